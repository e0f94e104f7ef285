use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportNames;
use crate::ast::node::Node;
use crate::ast::pat::Pat;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::ast::type_expr::TypeEntityName;
use crate::ast::type_expr::TypeExpr;
use crate::error::SyntaxErrorType;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::parse;
use crate::token::TT;
use serde_json::json;

fn parse_ok(source: &str) -> Node<TopLevel> {
  parse(source).unwrap()
}

#[test]
fn test_parser() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  // Consume the first two tokens.
  p.consume();
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(t.typ, TT::Identifier);

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // Peek using a different mode, which should truncate the buffer.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_exported_function_declaration() {
  let source = "export async function f<T>(a: number, ...rest: T[]): Promise<T> {\n  return rest[a];\n}\n";
  let top = parse_ok(source);
  assert_eq!(top.stx.body.len(), 1);
  let Stmt::FuncDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert!(decl.stx.export);
  assert_eq!(decl.stx.name, "f");
  let func = &decl.stx.function.stx;
  assert!(func.async_);
  assert_eq!(func.parameters.len(), 2);
  assert!(func.parameters[1].stx.rest);
  assert_eq!(decl.stx.function.stx.parameters_loc.text(source), "(a: number, ...rest: T[])");
  assert_eq!(func.return_type.as_ref().unwrap().text(source), "Promise<T>");
  // The statement covers `export`; the declaration does not.
  assert!(top.stx.body[0].text(source).starts_with("export async"));
  assert!(decl.text(source).starts_with("async function"));
}

#[test]
fn test_regex_after_reserved_word_in_body() {
  let top = parse_ok("export function f(s: string) {\n  if (s) return /}/.test(s)\n  return s ?? ''\n}\nexport const g = 1\n");
  assert_eq!(top.stx.body.len(), 2);
}

#[test]
fn test_nested_async_closure_is_mentioned() {
  let source = "export const f = (xs: number[]) => xs.map(async x => x)\n";
  let top = parse_ok(source);
  let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected variable declaration");
  };
  let Some(init) = &decl.stx.declarators[0].stx.initializer else {
    panic!("expected initializer");
  };
  let Expr::ArrowFunc(arrow) = init.stx.as_ref() else {
    panic!("expected arrow function");
  };
  let func = &arrow.stx.func.stx;
  assert!(!func.async_);
  assert!(func.mentions_async);
}

#[test]
fn test_overload_signatures_have_no_body() {
  let top = parse_ok("export function f(a: string): void;\nexport function f(a: any) {}\n");
  let bodies: Vec<bool> = top
    .stx
    .body
    .iter()
    .map(|stmt| match stmt.stx.as_ref() {
      Stmt::FuncDecl(decl) => decl.stx.function.stx.body.is_some(),
      _ => panic!("expected function declaration"),
    })
    .collect();
  assert_eq!(bodies, vec![false, true]);
}

#[test]
fn test_variable_initializers_are_classified() {
  let source = r#"
export const a = async (x: number): Promise<number> => x * 2;
export const b = function named() { return 1 }
export const c = class {}
export const d = { k: 1 }
export const e = [1, 2]
export const f = other.member
export const g = 1 + 2
export const h = { k: 1 }.k
export let i = (y) => y, j = z => z
"#;
  let top = parse_ok(source);
  let kinds: Vec<&str> = top
    .stx
    .body
    .iter()
    .flat_map(|stmt| match stmt.stx.as_ref() {
      Stmt::VarDecl(decl) => decl.stx.declarators.iter(),
      _ => panic!("expected variable declaration"),
    })
    .map(|d| match d.stx.initializer.as_ref().unwrap().stx.as_ref() {
      Expr::ArrowFunc(_) => "arrow",
      Expr::Class(_) => "class",
      Expr::Func(_) => "func",
      Expr::Id(_) => "id",
      Expr::LitArr(_) => "array",
      Expr::LitObj(_) => "object",
      Expr::Member(_) => "member",
      Expr::Other(_) => "other",
    })
    .collect();
  assert_eq!(kinds, vec![
    "arrow", "func", "class", "object", "array", "member", "other", "other", "arrow", "arrow"
  ]);
}

#[test]
fn test_arrow_with_type_arguments_in_body() {
  let source = "export const make = () => new Map<string, number>()\nexport const n = 1\n";
  let top = parse_ok(source);
  assert_eq!(top.stx.body.len(), 2);
  let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected variable declaration");
  };
  let Expr::ArrowFunc(arrow) = decl.stx.declarators[0].stx.initializer.as_ref().unwrap().stx.as_ref() else {
    panic!("expected arrow function");
  };
  assert!(arrow.stx.func.stx.body.as_ref().unwrap().stx.expression);
  assert_eq!(arrow.text(source), "() => new Map<string, number>()");
}

#[test]
fn test_destructuring_declarations() {
  let top = parse_ok("export const { a, b: [c, , d = 1], ...e } = obj;");
  let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected variable declaration");
  };
  let pattern: &Pat = decl.stx.declarators[0].stx.pattern.stx.as_ref();
  assert_eq!(pattern.bound_names(), vec!["a", "c", "d", "e"]);
  assert_eq!(pattern.to_expression(), "{ a, b: [c, , d], ...e }");
}

#[test]
fn test_pattern_expressions_drop_defaults() {
  let cases = [
    ("{ a = 1 }", "{ a }"),
    ("{ a: { b = 2, c: d } = {}, [k]: v }", "{ a: { b, c: d }, [k]: v }"),
    ("[x = 1, , ...rest]", "[x, , ...rest]"),
    ("[a, ,]", "[a, ,]"),
    ("{}", "{}"),
  ];
  for (pattern, expected) in cases {
    let top = parse_ok(&format!("const {pattern} = obj;"));
    let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
      panic!("expected variable declaration");
    };
    assert_eq!(decl.stx.declarators[0].stx.pattern.stx.to_expression(), expected);
  }
}

#[test]
fn test_imports() {
  let source = r#"
import Default, { a, b as c, type D } from './m'
import * as ns from "./ns";
import type { T } from './types'
import './side-effect'
import fs = require('fs')
"#;
  let top = parse_ok(source);
  let stmts = &top.stx.body;
  assert_eq!(stmts.len(), 5);
  let Stmt::Import(first) = stmts[0].stx.as_ref() else {
    panic!("expected import");
  };
  assert_eq!(first.stx.default.as_deref(), Some("Default"));
  assert_eq!(first.stx.module, "'./m'");
  let Some(ImportNames::Specific(names)) = &first.stx.names else {
    panic!("expected named imports");
  };
  let aliases: Vec<(&str, &str, bool)> = names
    .iter()
    .map(|n| (n.importable.as_str(), n.alias.as_str(), n.type_only))
    .collect();
  assert_eq!(aliases, vec![("a", "a", false), ("b", "c", false), ("D", "D", true)]);
  let Stmt::Import(second) = stmts[1].stx.as_ref() else {
    panic!("expected import");
  };
  assert_eq!(second.stx.names, Some(ImportNames::All("ns".to_string())));
  let Stmt::Import(third) = stmts[2].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(third.stx.type_only);
  let Stmt::Import(fourth) = stmts[3].stx.as_ref() else {
    panic!("expected import");
  };
  assert!(fourth.stx.names.is_none() && fourth.stx.default.is_none());
  assert!(matches!(stmts[4].stx.as_ref(), Stmt::Other(_)));
}

#[test]
fn test_exports() {
  let source = r#"
export { a, b as c } from './m'
export * from './all'
export * as ns from './ns'
export type { T }
export default function () {}
"#;
  let top = parse_ok(source);
  let stmts = &top.stx.body;
  assert_eq!(stmts.len(), 5);
  let Stmt::ExportList(list) = stmts[0].stx.as_ref() else {
    panic!("expected export list");
  };
  assert_eq!(list.stx.from.as_deref(), Some("'./m'"));
  let Stmt::ExportList(star) = stmts[1].stx.as_ref() else {
    panic!("expected export list");
  };
  assert_eq!(star.stx.names, ExportNames::All(None));
  let Stmt::ExportList(star_as) = stmts[2].stx.as_ref() else {
    panic!("expected export list");
  };
  assert_eq!(star_as.stx.names, ExportNames::All(Some("ns".to_string())));
  let Stmt::ExportList(types) = stmts[3].stx.as_ref() else {
    panic!("expected export list");
  };
  assert!(types.stx.type_only && types.stx.from.is_none());
  assert!(matches!(stmts[4].stx.as_ref(), Stmt::ExportDefault(_)));
}

#[test]
fn test_type_declarations() {
  let source = r#"
export interface Shape<T extends object = {}> extends Base, Other<T> {
  readonly id: string
  area(scale?: number): number;
  [key: string]: unknown,
  new (x: number): Shape<T>
}
export type Pair<A, B> = [first: A, second?: B];
export type Mapped<T> = { readonly [K in keyof T]?: T[K] };
export type Cond<T> = T extends Array<infer U> ? U : never;
export type Fn = (a: ns.Inner, ...rest: string[]) => asserts a is ns.Inner;
export type Tpl = `prefix-${string}`;
export const enum Color { Red = 1, Green = 'g', Blue }
declare namespace Hidden { const x: number }
"#;
  let top = parse_ok(source);
  let stmts = &top.stx.body;
  assert_eq!(stmts.len(), 8);
  let Stmt::InterfaceDecl(iface) = stmts[0].stx.as_ref() else {
    panic!("expected interface");
  };
  assert_eq!(iface.stx.name, "Shape");
  assert_eq!(iface.stx.extends.len(), 2);
  assert_eq!(iface.stx.members.len(), 4);
  let Stmt::TypeAliasDecl(alias) = stmts[4].stx.as_ref() else {
    panic!("expected type alias");
  };
  let TypeExpr::Function(func) = alias.stx.type_expr.stx.as_ref() else {
    panic!("expected function type");
  };
  let Some(TypeExpr::Reference(reference)) =
    func.stx.parameters[0].stx.type_annotation.as_ref().map(|t| t.stx.as_ref())
  else {
    panic!("expected type reference");
  };
  assert_eq!(reference.stx.name.leftmost(), "ns");
  assert!(matches!(reference.stx.name, TypeEntityName::Qualified(_, _)));
  let Stmt::EnumDecl(color) = stmts[6].stx.as_ref() else {
    panic!("expected enum");
  };
  assert!(color.stx.const_);
  assert_eq!(color.stx.members.len(), 3);
  assert!(matches!(stmts[7].stx.as_ref(), Stmt::Other(_)));
}

#[test]
fn test_nested_generic_closers() {
  let top = parse_ok("export function f(a: Promise<Array<Map<string, number>>>): void {}");
  let Stmt::FuncDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected function declaration");
  };
  assert_eq!(decl.stx.function.stx.parameters.len(), 1);
}

#[test]
fn test_opaque_statements() {
  let source = r#"
if (a < b) { run(/re}/g) } else { other() }
for (const x of xs) console.log(`${x}}`)
export function after() {}
"#;
  let top = parse_ok(source);
  let last = top.stx.body.last().unwrap();
  assert!(matches!(last.stx.as_ref(), Stmt::FuncDecl(_)));
  assert!(top.stx.body[..top.stx.body.len() - 1]
    .iter()
    .all(|stmt| matches!(stmt.stx.as_ref(), Stmt::Other(_))));
}

#[test]
fn test_classes() {
  let source = r#"
@Injectable()
export abstract class Service<T> extends Base<T> implements Api {
  method() { return '}' }
}
export const Expr = class Named extends Base {}
"#;
  let top = parse_ok(source);
  let Stmt::ClassDecl(decl) = top.stx.body[0].stx.as_ref() else {
    panic!("expected class");
  };
  assert!(decl.stx.abstract_);
  assert_eq!(decl.stx.name, "Service");
  let Stmt::VarDecl(var) = top.stx.body[1].stx.as_ref() else {
    panic!("expected variable declaration");
  };
  assert!(matches!(
    var.stx.declarators[0].stx.initializer.as_ref().unwrap().stx.as_ref(),
    Expr::Class(_)
  ));
}

#[test]
fn test_syntax_errors() {
  let err = parse("export function (a) {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("identifier"));

  let err = parse("export const f = (a: number)\n=> a").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters);

  let err = parse("export function f() {").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);

  let err = parse("const a = (1]").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnbalancedDelimiter);
}

#[test]
fn test_serialize_tree() {
  let top = parse_ok("export const x: number = 1;");
  let value = serde_json::to_value(&top).unwrap();
  assert_eq!(
    value["body"][0],
    json!({
      "$t": "VarDecl",
      "export": true,
      "declare": false,
      "mode": "Const",
      "declarators": [{
        "pattern": { "$t": "Id", "name": "x" },
        "definite": false,
        "type_annotation": { "$t": "Keyword", "keyword": "Number" },
        "initializer": { "$t": "Other" },
      }],
    })
  );
}
