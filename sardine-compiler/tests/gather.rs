use sardine_compiler::err::CompileError;
use sardine_compiler::gather_exports;
use sardine_compiler::record::EdgeDirection;
use sardine_compiler::record::IdentifierRecord;
use sardine_compiler::record::SyntaxKind;
use sardine_compiler::GatherOptions;
use sardine_compiler::GatheredExports;

fn gather(source: &str) -> GatheredExports {
  gather_exports(source, "src/api/users.ts", &GatherOptions::default())
    .expect("source should gather")
}

fn gather_err(source: &str) -> CompileError {
  match gather_exports(source, "src/api/users.ts", &GatherOptions::default()) {
    Ok(gathered) => panic!("expected an error, gathered {:?}", gathered.identifiers),
    Err(err) => err,
  }
}

fn record<'g>(gathered: &'g GatheredExports, name: &str) -> &'g IdentifierRecord {
  gathered
    .identifiers
    .get(name)
    .unwrap_or_else(|| panic!("no record for {name}"))
}

fn param_names(record: &IdentifierRecord) -> Vec<&str> {
  record.parameters().iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn module_without_exports_gathers_nothing() {
  let gathered = gather(
    r#"
    import { Bar } from './bar'
    const limit = 10
    function helper(bar: Bar, n: number) { return n }
    interface Internal { a: string }
    class Service {}
    "#,
  );
  assert!(gathered.identifiers.is_empty());
  assert!(gathered.referenced_types.is_empty());
  assert!(gathered.reexports.is_empty());
  assert_eq!(gathered.imports.len(), 1);
}

#[test]
fn exported_arrow_function() {
  let gathered = gather(
    r#"
    import { Bar } from './bar'
    export const add = async (a: number, b: Bar = defaultBar): Promise<number> => {
      return a + b.value
    }
    "#,
  );
  let add = record(&gathered, "add");
  assert_eq!(add.kind, SyntaxKind::ArrowFunction);
  assert!(add.is_exported);
  assert!(add.is_async);
  assert_eq!(param_names(add), vec!["a", "b"]);
  assert_eq!(add.parameters()[1].text, "b: Bar = defaultBar");
  assert_eq!(add.return_type, "number");
  assert_eq!(add.referenced_type_names, vec!["Bar"]);
  assert!(add.raw_text.starts_with("async (a: number"));
  assert_eq!(gathered.referenced_types, vec!["Bar"]);
}

#[test]
fn return_types() {
  let gathered = gather(
    r#"
    export async function a(): Promise<Map<string, number>> { return new Map() }
    export function b(): Promise<void> { return Promise.resolve() }
    export const c = (x: number): string => `${x}`
    export const d = () => 1
    export declare function e(): string;
    "#,
  );
  assert_eq!(record(&gathered, "a").return_type, "Map<string, number>");
  assert_eq!(record(&gathered, "b").return_type, "Promise<void>");
  assert_eq!(record(&gathered, "c").return_type, "string");
  assert_eq!(record(&gathered, "d").return_type, "any");
  // No body follows the annotation.
  assert_eq!(record(&gathered, "e").return_type, "any");
}

#[test]
fn bodyless_callables_are_flagged() {
  let gathered = gather(
    r#"
    export declare function ambient(a: string): void;
    export const arrow = (a: string) => a
    export function declared(a: string) { return a }
    "#,
  );
  assert!(!record(&gathered, "ambient").has_body);
  assert!(record(&gathered, "arrow").has_body);
  assert!(record(&gathered, "declared").has_body);
  // Still proxied, as there may be an implementation elsewhere at runtime.
  assert!(record(&gathered, "ambient").kind.is_callable());
}

#[test]
fn async_marker_anywhere_in_the_callable_makes_it_async() {
  let gathered = gather(
    r#"
    export function run(jobs: number[]): Promise<number[]> {
      return Promise.all(jobs.map(async (j) => await work(j)))
    }
    export const each = (xs: number[]) => xs.map(async x => x)
    export const later = async function (n: number) { return n }
    export const plain = (n: number) => n + 1
    "#,
  );
  let run = record(&gathered, "run");
  assert!(run.is_async);
  assert_eq!(run.return_type, "number[]");
  assert!(record(&gathered, "each").is_async);
  let later = record(&gathered, "later");
  assert!(later.is_async);
  assert_eq!(later.kind, SyntaxKind::FunctionExpression);
  assert!(!record(&gathered, "plain").is_async);
}

#[test]
fn referenced_types_skip_built_ins_generics_and_type_parameters() {
  let gathered = gather(
    r#"
    import { A, B, C } from './types'
    import * as ns from './ns'
    export function f<T extends A>(
      t: T,
      list: Array<B>,
      map: Map<string, C | null>,
      q: ns.Query,
      cb: (err: Error) => void,
      keys: { [K in keyof T]: K },
      s: string,
    ) {}
    "#,
  );
  assert_eq!(record(&gathered, "f").referenced_type_names, vec![
    "A", "B", "C", "ns", "Error"
  ]);
  assert_eq!(
    record(&gathered, "f").type_parameters.as_deref(),
    Some("<T extends A>")
  );
}

#[test]
fn ambient_types_are_not_referenced() {
  let options = GatherOptions {
    ambient_types: vec!["Date".to_string()],
  };
  let gathered = gather_exports(
    "export const at = (when: Date, user: User) => when",
    "src/at.ts",
    &options,
  )
  .expect("source should gather");
  assert_eq!(gathered.referenced_types, vec!["User"]);
}

#[test]
fn rest_and_this_parameters() {
  let gathered = gather("export function log(this: Logger, level: number, ...args: string[]) {}");
  let log = record(&gathered, "log");
  assert_eq!(param_names(log), vec!["level", "args"]);
  assert!(log.parameters()[1].rest);
  assert_eq!(log.parameters()[1].forwarded(), "...args");
  // The `this` type is not needed by the proxy.
  assert!(log.referenced_type_names.is_empty());
}

#[test]
fn destructured_parameters_forward_their_bound_names() {
  let gathered = gather(
    "export const f = ({ a, b }: Opts, [c]: number[], { d = 1, e: { g = 2 } = {} }: More = {}) => a",
  );
  let f = record(&gathered, "f");
  assert_eq!(param_names(f), vec!["{ a, b }", "[c]", "{ d, e: { g } }"]);
  assert_eq!(f.parameters()[2].text, "{ d = 1, e: { g = 2 } = {} }: More = {}");
}

#[test]
fn pass_through_kinds() {
  let gathered = gather(
    r#"
    import config from './config'
    export interface User { id: string }
    export type Id = string | number
    export enum Role { Admin, Guest }
    export const enum Flag { On = 1 }
    export const defaults = { page: 1 }
    export const roles = ['admin']
    export const timeout = config.http.timeout
    export const limit = 10
    "#,
  );
  let kinds: Vec<(&str, SyntaxKind)> = gathered
    .identifiers
    .values()
    .map(|r| (r.name.as_str(), r.kind))
    .collect();
  assert_eq!(kinds, vec![
    ("User", SyntaxKind::InterfaceDeclaration),
    ("Id", SyntaxKind::TypeAliasDeclaration),
    ("Role", SyntaxKind::EnumDeclaration),
    ("Flag", SyntaxKind::EnumDeclaration),
    ("defaults", SyntaxKind::ObjectLiteral),
    ("roles", SyntaxKind::ArrayLiteral),
    ("timeout", SyntaxKind::PropertyAccess),
  ]);
}

#[test]
fn identifier_initializer_takes_over_the_callable() {
  let gathered = gather(
    r#"
    const impl = async (id: string): Promise<User> => load(id)
    export const getUser = impl
    export const unknown = imported
    "#,
  );
  assert_eq!(gathered.identifiers.len(), 1);
  let get_user = record(&gathered, "getUser");
  assert_eq!(get_user.kind, SyntaxKind::ArrowFunction);
  assert!(get_user.is_async);
  assert_eq!(get_user.return_type, "User");
  assert_eq!(param_names(get_user), vec!["id"]);
}

#[test]
fn destructured_bindings() {
  let gathered = gather(
    r#"
    export const { host, port } = settings
    export const [first, , third] = [1, 2, 3]
    export const { a } = makeSettings()
    "#,
  );
  let kinds: Vec<(&str, SyntaxKind)> = gathered
    .identifiers
    .values()
    .map(|r| (r.name.as_str(), r.kind))
    .collect();
  assert_eq!(kinds, vec![
    ("host", SyntaxKind::PropertyAccess),
    ("port", SyntaxKind::PropertyAccess),
    ("first", SyntaxKind::ArrayLiteral),
    ("third", SyntaxKind::ArrayLiteral),
  ]);
}

#[test]
fn local_export_lists() {
  let gathered = gather(
    r#"
    import { format } from './format'
    import * as util from './util'
    const add = (a: number, b: number) => a + b
    function sub(a: number, b: number) { return a - b }
    interface Point { x: number }
    export { add, sub as minus, Point, format as fmt, util, missing }
    "#,
  );
  let names: Vec<&str> = gathered.identifiers.keys().map(|k| k.as_str()).collect();
  assert_eq!(names, vec!["add", "Point", "minus"]);
  assert_eq!(record(&gathered, "minus").kind, SyntaxKind::FunctionDeclaration);
  let reexports: Vec<String> = gathered.reexports.iter().map(|e| e.statement()).collect();
  assert_eq!(reexports, vec![
    "export { format as fmt } from './format'",
    "export * as util from './util'",
  ]);
}

#[test]
fn import_and_reexport_edges() {
  let gathered = gather(
    r#"
    import React, { useState as state, type FC } from 'react'
    import * as path from "path"
    import './polyfill'
    import { useState as state } from 'react'
    export { a, b as c } from './ab'
    export * from './all'
    export * as everything from './all'
    export { default } from './main'
    "#,
  );
  let imports: Vec<String> = gathered.imports.iter().map(|e| e.statement()).collect();
  assert_eq!(imports, vec![
    "import { default as React } from 'react'",
    "import { useState as state } from 'react'",
    "import { FC } from 'react'",
    "import * as path from \"path\"",
  ]);
  assert!(gathered
    .imports
    .iter()
    .all(|e| e.direction == EdgeDirection::Import));
  let reexports: Vec<String> = gathered.reexports.iter().map(|e| e.statement()).collect();
  assert_eq!(reexports, vec![
    "export { a } from './ab'",
    "export { b as c } from './ab'",
    "export * from './all'",
    "export * as everything from './all'",
    "export { default } from './main'",
  ]);
}

#[test]
fn duplicate_identifiers_are_rejected() {
  let err = gather_err(
    r#"
    export const x = 1
    export function x() {}
    "#,
  );
  assert!(
    matches!(&err, CompileError::DuplicateIdentifier { name, .. } if name == "x"),
    "{err}"
  );
  // Overloads are separate declarations.
  let err = gather_err(
    r#"
    export function f(a: string): string;
    export function f(a: any) { return a }
    "#,
  );
  assert!(matches!(err, CompileError::DuplicateIdentifier { .. }));
}

#[test]
fn exported_classes_are_rejected() {
  for source in [
    "export class Service {}",
    "@Injectable()\nexport abstract class Service {}",
    "export const Service = class {}",
    "class Service {}\nexport { Service }",
  ] {
    let err = gather_err(source);
    assert!(
      matches!(&err, CompileError::IllegalExportType { name, kind: "ClassDeclaration", .. } if name == "Service"),
      "{source}: {err}"
    );
  }
}

#[test]
fn default_exports_are_rejected() {
  for source in [
    "export default function () {}",
    "const a = 1\nexport default a",
    "export = { a: 1 }",
    "const a = () => 1\nexport { a as default }",
    "export { a as default } from './a'",
  ] {
    let err = gather_err(source);
    assert!(
      matches!(err, CompileError::UnsupportedDefaultExport { .. }),
      "{source}: {err}"
    );
  }
}

#[test]
fn syntax_errors_name_the_position() {
  let err = gather_err("export const f = (a: number => a");
  let msg = err.to_string();
  assert!(msg.starts_with("src/api/users.ts:1:"), "{msg}");
  assert!(matches!(err, CompileError::Syntax { line: 1, .. }));
}
