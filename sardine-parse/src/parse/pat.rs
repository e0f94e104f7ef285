use super::Parser;
use crate::ast::expr::OpaqueExpr;
use crate::ast::node::Node;
use crate::ast::pat::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a binding pattern: an identifier, or an object or array destructuring pattern.
  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    match self.peek().typ {
      TT::BraceOpen => Ok(self.obj_pat()?.wrap(Pat::Obj)),
      TT::BracketOpen => Ok(self.arr_pat()?.wrap(Pat::Arr)),
      _ => Ok(self.id_pat()?.wrap(Pat::Id)),
    }
  }

  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    self.with_loc(|p| {
      let name = p.require_binding_identifier()?;
      Ok(IdPat { name })
    })
  }

  // `= value` inside a pattern, skipped up to the next element or the end of the pattern.
  fn pat_default_value(&mut self, close: TT) -> SyntaxResult<Option<Node<OpaqueExpr>>> {
    if !self.consume_if(TT::Equals).is_match() {
      return Ok(None);
    }
    let loc = self.skip_until(|t, _| t.typ == TT::Comma || t.typ == close)?;
    if loc.is_empty() {
      return Err(loc.error(SyntaxErrorType::ExpectedSyntax("expression"), None));
    }
    Ok(Some(Node::new(loc, OpaqueExpr {})))
  }

  fn obj_pat(&mut self) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BraceClose).is_match() {
          break;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          p.require(TT::BraceClose)?;
          break;
        }
        properties.push(p.with_loc(|p| p.obj_pat_prop())?);
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BraceClose)?;
          break;
        }
      }
      Ok(ObjPat { properties, rest })
    })
  }

  fn obj_pat_prop(&mut self) -> SyntaxResult<ObjPatProp> {
    let [t0, t1] = self.peek_n::<2>();
    if t0.typ.is_binding_identifier() && t1.typ != TT::Colon {
      let target = self.id_pat()?;
      let key = PropKey::Direct(target.stx.name.clone());
      let default_value = self.pat_default_value(TT::BraceClose)?;
      return Ok(ObjPatProp {
        key,
        target: target.wrap(Pat::Id),
        shorthand: true,
        default_value,
      });
    }
    let key = if t0.typ == TT::BracketOpen {
      let loc = self.skip_balanced()?;
      PropKey::Computed(self.string(loc))
    } else {
      let t = self.require_predicate(
        |typ| typ.is_identifier_name() || matches!(typ, TT::LiteralString | TT::LiteralNumber),
        "property name",
      )?;
      PropKey::Direct(self.string(t.loc))
    };
    self.require(TT::Colon)?;
    let target = self.pat()?;
    let default_value = self.pat_default_value(TT::BraceClose)?;
    Ok(ObjPatProp {
      key,
      target,
      shorthand: false,
      default_value,
    })
  }

  fn arr_pat(&mut self) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        if p.consume_if(TT::BracketClose).is_match() {
          break;
        }
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat()?);
          p.require(TT::BracketClose)?;
          break;
        }
        // Holes: `[, b]`.
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
          continue;
        }
        let elem = p.with_loc(|p| {
          let target = p.pat()?;
          let default_value = p.pat_default_value(TT::BracketClose)?;
          Ok(ArrPatElem {
            target,
            default_value,
          })
        })?;
        elements.push(Some(elem));
        if !p.consume_if(TT::Comma).is_match() {
          p.require(TT::BracketClose)?;
          break;
        }
      }
      Ok(ArrPat { elements, rest })
    })
  }
}
