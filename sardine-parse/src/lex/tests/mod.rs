use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  check_with_mode(code, LexMode::Standard, expecteds);
}

fn check_with_mode<const N: usize>(code: &str, mode: LexMode, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, mode);
    assert_eq!(t.typ, expected, "lexing {:?}", code);
  }
  let t = lex_next(&mut lexer, mode);
  assert_eq!(EOF, t.typ);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("interface", [KeywordInterface]);
  check("export async function", [KeywordExport, KeywordAsync, KeywordFunction]);
  check("return if", [KeywordReserved, KeywordReserved]);
  check("returned", [Identifier]);
  check("await yield of", [Identifier, Identifier, Identifier]);
}

#[test]
fn test_lex_operators() {
  check("a ??= b === c", [Identifier, Operator, Identifier, Operator, Identifier]);
  check("x?.y => z", [Identifier, QuestionDot, Identifier, EqualsChevronRight, Identifier]);
  check("a >>= 1", [Identifier, ChevronRightChevronRightEquals, LiteralNumber]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("asyncFoo", [Identifier]);
  check("exports", [Identifier]);
  check("$origin _x", [Identifier, Identifier]);
  check("caf\u{e9}", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check("1_000.5e-3", [LiteralNumber]);
  check("0x800faceb00cn", [LiteralBigInt]);
  check("?.929", [Question, LiteralNumber]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check(r#""it's \" quoted""#, [LiteralString]);
  check("'hello world\n'", [Invalid, Invalid]);
}

#[test]
fn test_lex_comments_and_line_terminators() {
  let mut lexer = Lexer::new("a // note\n/* block */ b /*\n*/ c");
  let a = lex_next(&mut lexer, LexMode::Standard);
  assert!(!a.preceded_by_line_terminator);
  let b = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(b.typ, Identifier);
  assert!(b.preceded_by_line_terminator);
  let c = lex_next(&mut lexer, LexMode::Standard);
  assert!(c.preceded_by_line_terminator);
}

#[test]
fn test_lex_regex_depends_on_mode() {
  check("/a/", [Slash, Identifier, Slash]);
  check_with_mode("/a[/]b/gi", LexMode::SlashIsRegex, [LiteralRegex]);
}

#[test]
fn test_lex_template_parts() {
  let mut lexer = Lexer::new("`a${b}c`");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, LiteralTemplatePartString);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, BraceClose);
  assert_eq!(
    lex_next(&mut lexer, LexMode::TemplateStrContinue).typ,
    LiteralTemplatePartStringEnd
  );
  check("`plain`", [LiteralTemplatePartStringEnd]);
}

#[test]
fn test_lex_type_argument_closers() {
  check("Promise<Array<T>>", [Identifier, ChevronLeft, Identifier, ChevronLeft, Identifier, ChevronRightChevronRight]);
  check_with_mode(">>", LexMode::TypeArguments, [ChevronRight, ChevronRight]);
  check_with_mode(">=", LexMode::TypeArguments, [ChevronRight, Equals]);
}

#[test]
fn test_lex_import_statement() {
  check("import * as a from \"./a\";", [
    KeywordImport,
    Asterisk,
    KeywordAs,
    Identifier,
    KeywordFrom,
    LiteralString,
    Semicolon,
  ]);
}
