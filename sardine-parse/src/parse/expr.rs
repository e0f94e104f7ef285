use super::skip::ends_initializer;
use super::Parser;
use crate::ast::expr::*;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses the initializer of a variable declarator, up to the end of the declarator.
  ///
  /// Function and class expressions, object and array literals, and plain identifier or member
  /// references are recognized when they make up the whole initializer. Anything else, including
  /// those shapes followed by further operators, is skipped as an opaque span.
  pub fn initializer_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    if let Some(expr) = self.rewindable(|p| p.whole_classified_expr())? {
      return Ok(expr);
    }
    let loc = self.skip_until(ends_initializer)?;
    if loc.is_empty() {
      return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("expression")));
    }
    Ok(Node::new(loc, OpaqueExpr {}).wrap(Expr::Other))
  }

  fn whole_classified_expr(&mut self) -> SyntaxResult<Option<Node<Expr>>> {
    let Some(expr) = self.classified_expr()? else {
      return Ok(None);
    };
    let prev = self.prev_typ();
    let t = self.peek();
    Ok((t.typ == TT::EOF || ends_initializer(&t, prev)).then_some(expr))
  }

  fn classified_expr(&mut self) -> SyntaxResult<Option<Node<Expr>>> {
    if self.is_start_of_arrow_func() {
      let func = self.arrow_func()?;
      return Ok(Some(
        Node::new(func.loc, ArrowFuncExpr { func }).wrap(Expr::ArrowFunc),
      ));
    }
    let [t0, t1] = self.peek_n::<2>();
    let expr = match t0.typ {
      TT::KeywordFunction => self.func_expr()?.wrap(Expr::Func),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => {
        self.func_expr()?.wrap(Expr::Func)
      }
      TT::KeywordClass => self
        .with_loc(|p| {
          p.require(TT::KeywordClass)?;
          let t = p.peek();
          let name = if t.typ.is_binding_identifier() && t.typ != TT::KeywordImplements {
            Some(p.consume_as_string())
          } else {
            None
          };
          p.class_tail()?;
          Ok(ClassExpr { name })
        })?
        .wrap(Expr::Class),
      TT::BraceOpen => {
        let loc = self.skip_balanced()?;
        Node::new(loc, LitObjExpr {}).wrap(Expr::LitObj)
      }
      TT::BracketOpen => {
        let loc = self.skip_balanced()?;
        Node::new(loc, LitArrExpr {}).wrap(Expr::LitArr)
      }
      typ if typ.is_binding_identifier() => self.reference_expr()?,
      _ => return Ok(None),
    };
    Ok(Some(expr))
  }

  fn func_expr(&mut self) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      let start = p.peek().loc.0;
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let generator = p.consume_if(TT::Asterisk).is_match();
      let name = if p.peek().typ.is_binding_identifier() {
        Some(p.consume_as_string())
      } else {
        None
      };
      let func = p.func_rest(start, async_, generator)?;
      if func.stx.body.is_none() {
        return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::BraceOpen)));
      }
      Ok(FuncExpr { name, func })
    })
  }

  // `a`, `a.b`, `a?.b.c`
  fn reference_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc.0;
    let name = self.require_binding_identifier()?;
    let mut expr = Node::new(self.loc_since(start), IdExpr { name }).wrap(Expr::Id);
    loop {
      let [t0, t1] = self.peek_n::<2>();
      if !matches!(t0.typ, TT::Dot | TT::QuestionDot) || !t1.typ.is_identifier_name() {
        break;
      }
      self.consume();
      let right = self.consume_as_string();
      expr = Node::new(self.loc_since(start), MemberExpr {
        optional_chaining: t0.typ == TT::QuestionDot,
        left: expr,
        right,
      })
      .wrap(Expr::Member);
    }
    Ok(expr)
  }
}
