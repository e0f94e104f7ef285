use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

/// Parses a TypeScript module into its top-level statements.
///
/// Only module-level declarations are parsed structurally. Function bodies, class bodies and
/// statements that cannot declare or export anything are kept as opaque ranges of the source.
pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  parser.parse_top_level()
}
