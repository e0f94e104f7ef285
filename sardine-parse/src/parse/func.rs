use super::skip::ends_initializer;
use super::Parser;
use crate::ast::expr::OpaqueExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::ParamDecl;
use crate::ast::node::Node;
use crate::ast::pat::IdPat;
use crate::ast::pat::Pat;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses `(a: T, b = 1, ...rest)`, returning the parameters and the location of the whole list
  /// including its parentheses.
  pub fn func_params(&mut self) -> SyntaxResult<(Vec<Node<ParamDecl>>, Loc)> {
    let start = self.peek().loc.0;
    self.require(TT::ParenthesisOpen)?;
    let parameters = self.list_with_loc(TT::Comma, TT::ParenthesisClose, |p| p.param_decl())?;
    Ok((parameters, self.loc_since(start)))
  }

  fn param_decl(&mut self) -> SyntaxResult<ParamDecl> {
    let rest = self.consume_if(TT::DotDotDot).is_match();
    let pattern = if self.peek().typ == TT::KeywordThis {
      self
        .with_loc(|p| {
          p.consume();
          Ok(IdPat {
            name: "this".to_string(),
          })
        })?
        .wrap(Pat::Id)
    } else {
      self.pat()?
    };
    let optional = self.consume_if(TT::Question).is_match();
    let type_annotation = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    let default_value = if self.consume_if(TT::Equals).is_match() {
      let loc =
        self.skip_until(|t, _| matches!(t.typ, TT::Comma | TT::ParenthesisClose))?;
      if loc.is_empty() {
        return Err(loc.error(SyntaxErrorType::ExpectedSyntax("expression"), None));
      }
      Some(Node::new(loc, OpaqueExpr {}))
    } else {
      None
    };
    Ok(ParamDecl {
      rest,
      optional,
      pattern,
      type_annotation,
      default_value,
    })
  }

  /// Parses everything after a function's name: type parameters, parameters, return type and an
  /// optional block body. The returned node spans from `start`.
  pub fn func_rest(&mut self, start: usize, async_: bool, generator: bool) -> SyntaxResult<Node<Func>> {
    let cp = self.checkpoint();
    let type_parameters = self.maybe_type_parameters()?;
    let (parameters, parameters_loc) = self.func_params()?;
    let return_type = if self.consume_if(TT::Colon).is_match() {
      Some(self.return_type()?)
    } else {
      None
    };
    let body = if self.peek().typ == TT::BraceOpen {
      let loc = self.skip_balanced()?;
      Some(Node::new(loc, FuncBody { expression: false }))
    } else {
      None
    };
    let mentions_async = async_ || self.consumed_since(cp, TT::KeywordAsync);
    Ok(Node::new(self.loc_since(start), Func {
      arrow: false,
      async_,
      mentions_async,
      generator,
      type_parameters,
      parameters,
      parameters_loc,
      return_type,
      body,
    }))
  }

  /// Whether the upcoming tokens begin an arrow function. Never consumes anything.
  pub fn is_start_of_arrow_func(&mut self) -> bool {
    let [t0, t1] = self.peek_n::<2>();
    let offset = if t0.typ == TT::KeywordAsync
      && !t1.preceded_by_line_terminator
      && (t1.typ.is_binding_identifier() || matches!(t1.typ, TT::ParenthesisOpen | TT::ChevronLeft))
    {
      1
    } else {
      0
    };
    self.lookahead(|p| {
      if offset == 1 {
        p.consume();
      }
      let t = p.peek();
      if t.typ.is_binding_identifier() {
        p.consume();
        return Ok(p.peek().typ == TT::EqualsChevronRight);
      }
      if t.typ == TT::ChevronLeft {
        p.type_parameters()?;
      }
      if p.peek().typ != TT::ParenthesisOpen {
        return Ok(false);
      }
      p.skip_balanced()?;
      Ok(matches!(p.peek().typ, TT::EqualsChevronRight | TT::Colon))
    })
  }

  /// Parses an arrow function, including a leading `async`.
  pub fn arrow_func(&mut self) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let cp = p.checkpoint();
      let [t0, t1] = p.peek_n::<2>();
      let async_ = t0.typ == TT::KeywordAsync
        && !t1.preceded_by_line_terminator
        && t1.typ != TT::EqualsChevronRight;
      if async_ {
        p.consume();
      }
      let type_parameters = p.maybe_type_parameters()?;
      let (parameters, parameters_loc, return_type) = if p.peek().typ.is_binding_identifier() {
        let param = p.with_loc(|p| {
          let pattern = p.id_pat()?.wrap(Pat::Id);
          Ok(ParamDecl {
            rest: false,
            optional: false,
            pattern,
            type_annotation: None,
            default_value: None,
          })
        })?;
        let loc = param.loc;
        (vec![param], loc, None)
      } else {
        let (parameters, loc) = p.func_params()?;
        let return_type = if p.consume_if(TT::Colon).is_match() {
          Some(p.return_type()?)
        } else {
          None
        };
        (parameters, loc, return_type)
      };
      let arrow = p.require(TT::EqualsChevronRight)?;
      if arrow.preceded_by_line_terminator {
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      }
      let body = if p.peek().typ == TT::BraceOpen {
        let loc = p.skip_balanced()?;
        Node::new(loc, FuncBody { expression: false })
      } else {
        let loc = p.skip_until(|t, prev| {
          ends_initializer(t, prev)
            || matches!(t.typ, TT::ParenthesisClose | TT::BracketClose | TT::BraceClose)
        })?;
        if loc.is_empty() {
          return Err(p.peek().error(SyntaxErrorType::ExpectedSyntax("arrow function body")));
        }
        Node::new(loc, FuncBody { expression: true })
      };
      Ok(Func {
        arrow: true,
        async_,
        mentions_async: p.consumed_since(cp, TT::KeywordAsync),
        generator: false,
        type_parameters,
        parameters,
        parameters_loc,
        return_type,
        body: Some(body),
      })
    })
  }
}
