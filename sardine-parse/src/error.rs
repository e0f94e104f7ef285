use crate::loc::Loc;
use crate::token::TT;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

/// A stable classification of syntax errors produced by the parser.
///
/// Diagnostic codes (prefix `SP`) are assigned per variant and are stable:
/// - `SP0001`: [`SyntaxErrorType::ExpectedNotFound`]
/// - `SP0002`: [`SyntaxErrorType::ExpectedSyntax`]
/// - `SP0003`: [`SyntaxErrorType::InvalidToken`]
/// - `SP0004`: [`SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters`]
/// - `SP0005`: [`SyntaxErrorType::RequiredTokenNotFound`]
/// - `SP0006`: [`SyntaxErrorType::UnbalancedDelimiter`]
/// - `SP0007`: [`SyntaxErrorType::UnexpectedEnd`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedNotFound,
  ExpectedSyntax(&'static str),
  InvalidToken,
  LineTerminatorAfterArrowFunctionParameters,
  RequiredTokenNotFound(TT),
  UnbalancedDelimiter,
  UnexpectedEnd,
}

#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  /// Returns the 1-based line and column of the error's start within `source`.
  pub fn line_col(&self, source: &str) -> (usize, usize) {
    let prefix = source.get(..self.loc.0).unwrap_or(source);
    let line = prefix.matches('\n').count() + 1;
    let col = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, col)
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}: {}",
      self.typ.code(),
      self.typ.message(self.actual_token)
    )
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxErrorType {
  /// Stable diagnostic code for this syntax error variant.
  pub fn code(&self) -> &'static str {
    match self {
      SyntaxErrorType::ExpectedNotFound => "SP0001",
      SyntaxErrorType::ExpectedSyntax(_) => "SP0002",
      SyntaxErrorType::InvalidToken => "SP0003",
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => "SP0004",
      SyntaxErrorType::RequiredTokenNotFound(_) => "SP0005",
      SyntaxErrorType::UnbalancedDelimiter => "SP0006",
      SyntaxErrorType::UnexpectedEnd => "SP0007",
    }
  }

  /// Human-readable message describing this syntax error.
  pub fn message(&self, actual_token: Option<TT>) -> String {
    match self {
      SyntaxErrorType::ExpectedNotFound => match actual_token {
        Some(tok) => format!("unexpected token {:?}", tok),
        None => "expected token not found".into(),
      },
      SyntaxErrorType::ExpectedSyntax(expected) => format!("expected {}", expected),
      SyntaxErrorType::InvalidToken => "invalid or unterminated token".into(),
      SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        "line terminator not allowed after arrow function parameters".into()
      }
      SyntaxErrorType::RequiredTokenNotFound(token) => format!("expected token {:?}", token),
      SyntaxErrorType::UnbalancedDelimiter => "unbalanced bracket, brace or parenthesis".into(),
      SyntaxErrorType::UnexpectedEnd => actual_token
        .map(|tok| format!("unexpected end before {:?}", tok))
        .unwrap_or_else(|| "unexpected end of input".into()),
    }
  }
}
