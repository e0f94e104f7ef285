use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::{max, min};
use std::ops::{Add, AddAssign};

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn add_option(self, rhs: Option<Loc>) -> Loc {
    let mut new = self;
    if let Some(rhs) = rhs {
      new.extend(rhs);
    };
    new
  }

  /// Returns the source text covered by this location.
  ///
  /// Out-of-range or non-boundary offsets yield an empty string rather than panicking, as
  /// locations may come from a different revision of the text.
  pub fn text<'s>(&self, source: &'s str) -> &'s str {
    source.get(self.0..self.1).unwrap_or("")
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

#[cfg(test)]
mod tests {
  use super::Loc;

  #[test]
  fn test_loc_extend() {
    let mut loc = Loc(4, 10);
    loc.extend(Loc(1, 6));
    assert_eq!(loc, Loc(1, 10));
    assert_eq!(Loc(3, 4) + Loc(8, 9), Loc(3, 9));
    assert_eq!(Loc(3, 4).add_option(None), Loc(3, 4));
  }

  #[test]
  fn test_loc_text() {
    let src = "export const x = 1;";
    assert_eq!(Loc(7, 12).text(src), "const");
    assert_eq!(Loc(13, 14).text(src), "x");
    assert_eq!(Loc(7, 400).text(src), "");
  }
}
