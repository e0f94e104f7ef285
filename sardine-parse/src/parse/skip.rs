use super::Parser;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Delim {
  Brace,
  Bracket,
  Paren,
  // Inside `${ ... }` of a template literal.
  Template,
}

fn slash_is_regex(prev: Option<TT>) -> bool {
  !prev.is_some_and(TT::can_end_expression)
}

/// Whether automatic semicolon insertion ends a statement before `t`.
pub fn is_asi_boundary(t: &Token, prev: Option<TT>) -> bool {
  t.preceded_by_line_terminator
    && prev.is_some_and(TT::can_end_expression)
    && t.typ.can_begin_statement_after_newline()
}

/// Stop condition for an expression in a declarator or statement position.
pub fn ends_initializer(t: &Token, prev: Option<TT>) -> bool {
  matches!(t.typ, TT::Comma | TT::Semicolon) || is_asi_boundary(t, prev)
}

// Tokens that cannot directly follow a type argument list in an expression; if one of these is
// next, the `<` was a comparison instead.
fn can_start_expression_after_type_arguments(t: &Token) -> bool {
  match t.typ {
    TT::ParenthesisOpen | TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => false,
    TT::KeywordAs | TT::KeywordSatisfies | TT::KeywordIn | TT::KeywordInstanceof => false,
    TT::BracketOpen
    | TT::BraceOpen
    | TT::Exclamation
    | TT::Tilde
    | TT::Plus
    | TT::Hyphen
    | TT::PlusPlus
    | TT::HyphenHyphen
    | TT::ChevronLeft
    | TT::Slash
    | TT::SlashEquals
    | TT::At
    | TT::LiteralBigInt
    | TT::LiteralNumber
    | TT::LiteralString => true,
    typ => typ.is_identifier_name(),
  }
}

impl<'a> Parser<'a> {
  /// Consumes a balanced run of tokens until `stop` accepts a token at nesting depth zero, or the
  /// end of input. The stopping token is not consumed. `stop` receives the candidate token and
  /// the type of the previous token within the run.
  pub fn skip_until<F>(&mut self, stop: F) -> SyntaxResult<Loc>
  where
    F: Fn(&Token, Option<TT>) -> bool,
  {
    let start = self.peek().loc.0;
    self.skip_tokens(Vec::new(), stop)?;
    Ok(self.loc_since(start))
  }

  /// Consumes an opening `{`, `[` or `(` and everything up to and including its matching closer.
  pub fn skip_balanced(&mut self) -> SyntaxResult<Loc> {
    let open = self.consume();
    let delim = match open.typ {
      TT::BraceOpen => Delim::Brace,
      TT::BracketOpen => Delim::Bracket,
      TT::ParenthesisOpen => Delim::Paren,
      _ => return Err(open.error(SyntaxErrorType::ExpectedSyntax("opening bracket"))),
    };
    self.skip_tokens(vec![delim], |_, _| true)?;
    Ok(self.loc_since(open.loc.0))
  }

  fn skip_tokens<F>(&mut self, mut stack: Vec<Delim>, stop: F) -> SyntaxResult<()>
  where
    F: Fn(&Token, Option<TT>) -> bool,
  {
    let balanced_only = !stack.is_empty();
    let mut prev = stack.last().and_then(|_| self.prev_typ());
    loop {
      let mode = if slash_is_regex(prev) {
        LexMode::SlashIsRegex
      } else {
        LexMode::Standard
      };
      let t = self.peek_with_mode(mode);
      if stack.is_empty() && (t.typ == TT::EOF || stop(&t, prev)) {
        return Ok(());
      }
      if stack.is_empty()
        && t.typ == TT::ChevronLeft
        && prev.is_some_and(TT::is_binding_identifier)
        && self.skip_expression_type_arguments()
      {
        prev = Some(TT::ChevronRight);
        continue;
      }
      self.consume_with_mode(mode);
      prev = Some(t.typ);
      match t.typ {
        TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        TT::Invalid => return Err(t.error(SyntaxErrorType::InvalidToken)),
        TT::BraceOpen => stack.push(Delim::Brace),
        TT::BracketOpen | TT::QuestionDotBracketOpen => stack.push(Delim::Bracket),
        TT::ParenthesisOpen | TT::QuestionDotParenthesisOpen => stack.push(Delim::Paren),
        TT::LiteralTemplatePartString => stack.push(Delim::Template),
        TT::BraceClose => match stack.pop() {
          Some(Delim::Brace) => {}
          Some(Delim::Template) => {
            let cont = self.consume_with_mode(LexMode::TemplateStrContinue);
            match cont.typ {
              TT::LiteralTemplatePartString => stack.push(Delim::Template),
              TT::LiteralTemplatePartStringEnd => {}
              _ => return Err(cont.error(SyntaxErrorType::InvalidToken)),
            };
            prev = Some(cont.typ);
          }
          _ => return Err(t.error(SyntaxErrorType::UnbalancedDelimiter)),
        },
        TT::BracketClose => {
          if stack.pop() != Some(Delim::Bracket) {
            return Err(t.error(SyntaxErrorType::UnbalancedDelimiter));
          }
        }
        TT::ParenthesisClose => {
          if stack.pop() != Some(Delim::Paren) {
            return Err(t.error(SyntaxErrorType::UnbalancedDelimiter));
          }
        }
        _ => {}
      };
      if balanced_only && stack.is_empty() {
        return Ok(());
      }
    }
  }

  /// Tries to consume `<...>` as type arguments of a call or instantiation expression like
  /// `new Map<string, number>()`. Leaves the parser untouched and returns false if the tokens read
  /// better as a comparison.
  fn skip_expression_type_arguments(&mut self) -> bool {
    let cp = self.checkpoint();
    let parsed = self.type_arguments().is_ok()
      && !can_start_expression_after_type_arguments(&self.peek());
    if !parsed {
      self.restore_checkpoint(cp);
    }
    parsed
  }
}
