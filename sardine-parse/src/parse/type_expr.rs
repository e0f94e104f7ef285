use super::Parser;
use crate::ast::node::Node;
use crate::ast::pat::PropKey;
use crate::ast::type_expr::*;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::token::TT;

fn keyword_kind(typ: TT) -> Option<TypeKeywordKind> {
  Some(match typ {
    TT::KeywordAny => TypeKeywordKind::Any,
    TT::KeywordBigIntType => TypeKeywordKind::BigInt,
    TT::KeywordBooleanType => TypeKeywordKind::Boolean,
    TT::KeywordNever => TypeKeywordKind::Never,
    TT::LiteralNull => TypeKeywordKind::Null,
    TT::KeywordNumberType => TypeKeywordKind::Number,
    TT::KeywordObjectType => TypeKeywordKind::Object,
    TT::KeywordStringType => TypeKeywordKind::String,
    TT::KeywordSymbolType => TypeKeywordKind::Symbol,
    TT::KeywordThis => TypeKeywordKind::This,
    TT::KeywordUndefinedType => TypeKeywordKind::Undefined,
    TT::KeywordUnknown => TypeKeywordKind::Unknown,
    TT::KeywordVoid => TypeKeywordKind::Void,
    _ => return None,
  })
}

fn is_property_key_start(typ: TT) -> bool {
  typ.is_identifier_name()
    || matches!(typ, TT::LiteralString | TT::LiteralNumber | TT::BracketOpen)
}

impl<'a> Parser<'a> {
  /// Main entry point for parsing type expressions.
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let [t0, t1] = self.peek_n::<2>();
    if t0.typ == TT::KeywordNew || (t0.typ == TT::KeywordAbstract && t1.typ == TT::KeywordNew) {
      return self.constructor_type();
    }
    if self.is_start_of_function_type() {
      return self.function_type();
    }
    self.type_conditional()
  }

  fn is_start_of_function_type(&mut self) -> bool {
    match self.peek().typ {
      TT::ChevronLeft => true,
      TT::ParenthesisOpen => self.lookahead(|p| {
        p.skip_balanced()?;
        Ok(p.peek().typ == TT::EqualsChevronRight)
      }),
      _ => false,
    }
  }

  fn function_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          let type_parameters = p.maybe_type_parameters()?;
          let (parameters, _) = p.func_params()?;
          p.require(TT::EqualsChevronRight)?;
          let return_type = p.return_type()?;
          Ok(TypeFunction {
            type_parameters,
            parameters,
            return_type,
          })
        })?
        .wrap(TypeExpr::Function),
    )
  }

  fn constructor_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          let abstract_ = p.consume_if(TT::KeywordAbstract).is_match();
          p.require(TT::KeywordNew)?;
          let type_parameters = p.maybe_type_parameters()?;
          let (parameters, _) = p.func_params()?;
          p.require(TT::EqualsChevronRight)?;
          let return_type = p.return_type()?;
          Ok(TypeConstructor {
            abstract_,
            type_parameters,
            parameters,
            return_type,
          })
        })?
        .wrap(TypeExpr::Constructor),
    )
  }

  /// Parses a return type annotation, which may also be a type predicate.
  pub fn return_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let [t0, t1] = self.peek_n::<2>();
    let names_param = |typ: TT| typ.is_binding_identifier() || typ == TT::KeywordThis;
    let is_predicate =
      names_param(t0.typ) && t1.typ == TT::KeywordIs && !t1.preceded_by_line_terminator;
    let is_assertion = t0.typ == TT::KeywordAsserts
      && names_param(t1.typ)
      && !t1.preceded_by_line_terminator;
    if !is_predicate && !is_assertion {
      return self.type_expr();
    }
    Ok(
      self
        .with_loc(|p| {
          if is_assertion {
            p.consume();
          }
          let parameter_name = p.consume_as_string();
          let type_annotation = if p.consume_if(TT::KeywordIs).is_match() {
            Some(p.type_expr()?)
          } else {
            None
          };
          Ok(TypePredicate {
            asserts: is_assertion,
            parameter_name,
            type_annotation,
          })
        })?
        .wrap(TypeExpr::Predicate),
    )
  }

  /// Parse conditional types: T extends U ? X : Y
  fn type_conditional(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.peek().loc.0;
    let check_type = self.type_union()?;
    let t = self.peek();
    if t.typ != TT::KeywordExtends || t.preceded_by_line_terminator {
      return Ok(check_type);
    }
    self.consume();
    let extends_type = self.type_union()?;
    self.require(TT::Question)?;
    let true_type = self.type_expr()?;
    self.require(TT::Colon)?;
    let false_type = self.type_expr()?;
    let loc = self.loc_since(start);
    Ok(
      Node::new(loc, TypeConditional {
        check_type,
        extends_type,
        true_type,
        false_type,
      })
      .wrap(TypeExpr::Conditional),
    )
  }

  /// Parse union types. A leading `|` is allowed.
  fn type_union(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.peek().loc.0;
    let _ = self.consume_if(TT::Bar);
    let mut types = vec![self.type_intersection()?];
    while self.consume_if(TT::Bar).is_match() {
      types.push(self.type_intersection()?);
    }
    if types.len() == 1 {
      return Ok(types.remove(0));
    }
    let loc = self.loc_since(start);
    Ok(Node::new(loc, TypeUnion { types }).wrap(TypeExpr::Union))
  }

  /// Parse intersection types. A leading `&` is allowed.
  fn type_intersection(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.peek().loc.0;
    let _ = self.consume_if(TT::Ampersand);
    let mut types = vec![self.type_operator()?];
    while self.consume_if(TT::Ampersand).is_match() {
      types.push(self.type_operator()?);
    }
    if types.len() == 1 {
      return Ok(types.remove(0));
    }
    let loc = self.loc_since(start);
    Ok(Node::new(loc, TypeIntersection { types }).wrap(TypeExpr::Intersection))
  }

  fn type_operator(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let operator = match self.peek().typ {
      TT::KeywordKeyof => TypeOperatorKind::KeyOf,
      TT::KeywordReadonly => TypeOperatorKind::Readonly,
      TT::KeywordUnique => TypeOperatorKind::Unique,
      TT::KeywordInfer => return self.infer_type(),
      _ => return self.type_postfix(),
    };
    Ok(
      self
        .with_loc(|p| {
          p.consume();
          let type_expr = p.type_operator()?;
          Ok(TypeOperator {
            operator,
            type_expr,
          })
        })?
        .wrap(TypeExpr::Operator),
    )
  }

  fn infer_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordInfer)?;
          let name = p.require_binding_identifier()?;
          // `infer U extends X ? A : B` is a conditional on `infer U`, not a constraint.
          let constraint = p.rewindable(|p| {
            if !p.consume_if(TT::KeywordExtends).is_match() {
              return Ok(None);
            }
            let constraint = p.type_union()?;
            Ok((p.peek().typ != TT::Question).then_some(constraint))
          })?;
          Ok(TypeInfer { name, constraint })
        })?
        .wrap(TypeExpr::Infer),
    )
  }

  /// Parse array types and indexed access types: `T[]` or `T[K]`.
  fn type_postfix(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let start = self.peek().loc.0;
    let mut base = self.type_primary()?;
    loop {
      let t = self.peek();
      if t.typ != TT::BracketOpen || t.preceded_by_line_terminator {
        break;
      }
      self.consume();
      if self.consume_if(TT::BracketClose).is_match() {
        let loc = self.loc_since(start);
        base = Node::new(loc, TypeArray { element_type: base }).wrap(TypeExpr::Array);
      } else {
        let index_type = self.type_expr()?;
        self.require(TT::BracketClose)?;
        let loc = self.loc_since(start);
        base = Node::new(loc, TypeIndexedAccess {
          object_type: base,
          index_type,
        })
        .wrap(TypeExpr::IndexedAccess);
      }
    }
    Ok(base)
  }

  fn type_primary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let [t0, t1] = self.peek_n::<2>();
    if let Some(keyword) = keyword_kind(t0.typ) {
      if t1.typ != TT::Dot {
        return Ok(
          self
            .with_loc(|p| {
              p.consume();
              Ok(TypeKeyword { keyword })
            })?
            .wrap(TypeExpr::Keyword),
        );
      }
    }
    match t0.typ {
      TT::LiteralString
      | TT::LiteralNumber
      | TT::LiteralBigInt
      | TT::LiteralTrue
      | TT::LiteralFalse
      | TT::Hyphen => self.literal_type(),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.template_literal_type()
      }
      TT::ParenthesisOpen => Ok(
        self
          .with_loc(|p| {
            p.require(TT::ParenthesisOpen)?;
            let type_expr = p.type_expr()?;
            p.require(TT::ParenthesisClose)?;
            Ok(TypeParenthesized { type_expr })
          })?
          .wrap(TypeExpr::Parenthesized),
      ),
      TT::BracketOpen => self.tuple_type(false),
      TT::BraceOpen => {
        if self.is_start_of_mapped_type() {
          self.mapped_type()
        } else {
          Ok(
            self
              .with_loc(|p| {
                let members = p.type_members()?;
                Ok(TypeObjectLiteral { members })
              })?
              .wrap(TypeExpr::ObjectLiteral),
          )
        }
      }
      TT::KeywordTypeof => Ok(
        self
          .with_loc(|p| {
            p.require(TT::KeywordTypeof)?;
            let expr_name = p.type_entity_name()?;
            let type_arguments = p.maybe_type_arguments()?;
            Ok(TypeQuery {
              expr_name,
              type_arguments,
            })
          })?
          .wrap(TypeExpr::Query),
      ),
      TT::KeywordImport => self.import_type(),
      typ if typ.is_binding_identifier() || keyword_kind(typ).is_some() => self.type_reference(),
      _ => Err(t0.error(SyntaxErrorType::ExpectedSyntax("type"))),
    }
  }

  fn literal_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          let negative = p.consume_if(TT::Hyphen).is_match();
          let t = p.consume();
          let text = p.string(t.loc);
          let value = match t.typ {
            TT::LiteralString if !negative => TypeLiteralValue::String(text),
            TT::LiteralTrue if !negative => TypeLiteralValue::Boolean(true),
            TT::LiteralFalse if !negative => TypeLiteralValue::Boolean(false),
            TT::LiteralNumber if negative => TypeLiteralValue::Number(format!("-{}", text)),
            TT::LiteralNumber => TypeLiteralValue::Number(text),
            TT::LiteralBigInt if negative => TypeLiteralValue::BigInt(format!("-{}", text)),
            TT::LiteralBigInt => TypeLiteralValue::BigInt(text),
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("literal type"))),
          };
          Ok(TypeLiteral { value })
        })?
        .wrap(TypeExpr::Literal),
    )
  }

  fn template_literal_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          let mut spans = Vec::new();
          let mut t = p.consume();
          while t.typ == TT::LiteralTemplatePartString {
            spans.push(p.type_expr()?);
            p.require(TT::BraceClose)?;
            t = p.consume_with_mode(LexMode::TemplateStrContinue);
          }
          if t.typ != TT::LiteralTemplatePartStringEnd {
            return Err(t.error(SyntaxErrorType::InvalidToken));
          }
          Ok(TypeTemplateLiteral { spans })
        })?
        .wrap(TypeExpr::TemplateLiteral),
    )
  }

  fn tuple_type(&mut self, readonly: bool) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::BracketOpen)?;
          let elements = p.list_with_loc(TT::Comma, TT::BracketClose, |p| p.tuple_element())?;
          Ok(TypeTuple { readonly, elements })
        })?
        .wrap(TypeExpr::Tuple),
    )
  }

  fn tuple_element(&mut self) -> SyntaxResult<TypeTupleElement> {
    let rest = self.consume_if(TT::DotDotDot).is_match();
    let [t0, t1, t2] = self.peek_n::<3>();
    let labelled = t0.typ.is_identifier_name()
      && (t1.typ == TT::Colon || (t1.typ == TT::Question && t2.typ == TT::Colon));
    let mut label = None;
    let mut optional = false;
    if labelled {
      label = Some(self.consume_as_string());
      optional = self.consume_if(TT::Question).is_match();
      self.require(TT::Colon)?;
    }
    let type_expr = self.type_expr()?;
    if !labelled {
      optional = self.consume_if(TT::Question).is_match();
    }
    Ok(TypeTupleElement {
      label,
      optional,
      rest,
      type_expr,
    })
  }

  fn is_start_of_mapped_type(&mut self) -> bool {
    let [_, t1, t2, t3, t4] = self.peek_n::<5>();
    let (bracket, name, keyword_in) = match t1.typ {
      TT::Plus | TT::Hyphen => (t3, t4, None),
      TT::KeywordReadonly => (t2, t3, Some(t4)),
      _ => (t1, t2, Some(t3)),
    };
    if bracket.typ != TT::BracketOpen || !name.typ.is_binding_identifier() {
      return false;
    }
    match keyword_in {
      Some(t) => t.typ == TT::KeywordIn,
      // `{ +readonly [K in ...` or `{ -readonly [K in ...`: too far to peek, so the modifier decides.
      None => true,
    }
  }

  fn mapped_modifier(&mut self, keyword: TT) -> SyntaxResult<Option<MappedTypeModifier>> {
    let modifier = if self.consume_if(TT::Plus).is_match() {
      MappedTypeModifier::Plus
    } else if self.consume_if(TT::Hyphen).is_match() {
      MappedTypeModifier::Minus
    } else if self.consume_if(keyword).is_match() {
      return Ok(Some(MappedTypeModifier::None));
    } else {
      return Ok(None);
    };
    self.require(keyword)?;
    Ok(Some(modifier))
  }

  fn mapped_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::BraceOpen)?;
          let readonly_modifier = p.mapped_modifier(TT::KeywordReadonly)?;
          p.require(TT::BracketOpen)?;
          let type_parameter = p.require_binding_identifier()?;
          p.require(TT::KeywordIn)?;
          let constraint = p.type_expr()?;
          let name_type = if p.consume_if(TT::KeywordAs).is_match() {
            Some(p.type_expr()?)
          } else {
            None
          };
          p.require(TT::BracketClose)?;
          let optional_modifier = p.mapped_modifier(TT::Question)?;
          let type_expr = if p.consume_if(TT::Colon).is_match() {
            Some(p.type_expr()?)
          } else {
            None
          };
          if !p.consume_if(TT::Semicolon).is_match() {
            let _ = p.consume_if(TT::Comma);
          }
          p.require(TT::BraceClose)?;
          Ok(TypeMapped {
            readonly_modifier,
            type_parameter,
            constraint,
            name_type,
            optional_modifier,
            type_expr,
          })
        })?
        .wrap(TypeExpr::Mapped),
    )
  }

  fn import_type(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::KeywordImport)?;
          p.require(TT::ParenthesisOpen)?;
          let module = p.require(TT::LiteralString)?;
          let module = p.string(module.loc);
          p.require(TT::ParenthesisClose)?;
          let qualifier = if p.consume_if(TT::Dot).is_match() {
            Some(p.type_entity_name()?)
          } else {
            None
          };
          let type_arguments = p.maybe_type_arguments()?;
          Ok(TypeImport {
            module,
            qualifier,
            type_arguments,
          })
        })?
        .wrap(TypeExpr::Import),
    )
  }

  fn type_reference(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    Ok(
      self
        .with_loc(|p| {
          let name = p.type_entity_name()?;
          let type_arguments = p.maybe_type_arguments()?;
          Ok(TypeReference {
            name,
            type_arguments,
          })
        })?
        .wrap(TypeExpr::Reference),
    )
  }

  /// Parse entity name (can be qualified: A.B.C)
  fn type_entity_name(&mut self) -> SyntaxResult<TypeEntityName> {
    let first = self.require_identifier_name()?;
    let mut name = TypeEntityName::Identifier(first);
    while self.consume_if(TT::Dot).is_match() {
      let right = self.require_identifier_name()?;
      name = TypeEntityName::Qualified(Box::new(name), right);
    }
    Ok(name)
  }

  fn maybe_type_arguments(&mut self) -> SyntaxResult<Option<Vec<Node<TypeExpr>>>> {
    let t = self.peek();
    if t.typ != TT::ChevronLeft || t.preceded_by_line_terminator {
      return Ok(None);
    }
    Ok(Some(self.type_arguments()?))
  }

  /// Parse type arguments: <T, U, V>
  pub fn type_arguments(&mut self) -> SyntaxResult<Vec<Node<TypeExpr>>> {
    self.require(TT::ChevronLeft)?;
    let mut args = Vec::new();
    while !self
      .maybe_consume_with_mode(TT::ChevronRight, LexMode::TypeArguments)
      .is_match()
    {
      args.push(self.type_expr()?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require_with_mode(TT::ChevronRight, LexMode::TypeArguments)?;
        break;
      }
    }
    Ok(args)
  }

  pub fn maybe_type_parameters(&mut self) -> SyntaxResult<Option<Vec<Node<TypeParameter>>>> {
    if self.peek().typ != TT::ChevronLeft {
      return Ok(None);
    }
    Ok(Some(self.type_parameters()?))
  }

  pub fn type_parameters(&mut self) -> SyntaxResult<Vec<Node<TypeParameter>>> {
    self.require(TT::ChevronLeft)?;
    let mut params = Vec::new();
    while !self
      .maybe_consume_with_mode(TT::ChevronRight, LexMode::TypeArguments)
      .is_match()
    {
      params.push(self.with_loc(|p| p.type_parameter())?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require_with_mode(TT::ChevronRight, LexMode::TypeArguments)?;
        break;
      }
    }
    Ok(params)
  }

  fn type_parameter(&mut self) -> SyntaxResult<TypeParameter> {
    let const_ = self.consume_if(TT::KeywordConst).is_match();
    // Variance annotations: `in T`, `out T`, `in out T`.
    loop {
      let [t0, t1] = self.peek_n::<2>();
      let is_variance = t0.typ == TT::KeywordIn || (t0.typ == TT::Identifier && self.str(t0.loc) == "out");
      if is_variance && t1.typ.is_binding_identifier() {
        self.consume();
      } else {
        break;
      }
    }
    let name = self.require_binding_identifier()?;
    let constraint = if self.consume_if(TT::KeywordExtends).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    let default = if self.consume_if(TT::Equals).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    Ok(TypeParameter {
      const_,
      name,
      constraint,
      default,
    })
  }

  /// Parses `{ ... }` containing interface or object type members.
  pub fn type_members(&mut self) -> SyntaxResult<Vec<Node<TypeMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while !self.consume_if(TT::BraceClose).is_match() {
      members.push(self.type_member()?);
      if !self.consume_if(TT::Semicolon).is_match() && !self.consume_if(TT::Comma).is_match() {
        let t = self.peek();
        if t.typ != TT::BraceClose && !t.preceded_by_line_terminator {
          return Err(t.error(SyntaxErrorType::ExpectedSyntax("`;` or `,` between members")));
        }
      }
    }
    Ok(members)
  }

  fn property_key(&mut self) -> SyntaxResult<PropKey> {
    let t = self.peek();
    if t.typ == TT::BracketOpen {
      let loc = self.skip_balanced()?;
      return Ok(PropKey::Computed(self.string(loc)));
    }
    let t = self.require_predicate(
      |typ| typ.is_identifier_name() || matches!(typ, TT::LiteralString | TT::LiteralNumber),
      "property name",
    )?;
    Ok(PropKey::Direct(self.string(t.loc)))
  }

  fn call_signature(&mut self) -> SyntaxResult<Node<TypeCallSignature>> {
    self.with_loc(|p| {
      let _ = p.consume_if(TT::KeywordNew);
      let type_parameters = p.maybe_type_parameters()?;
      let (parameters, _) = p.func_params()?;
      let return_type = if p.consume_if(TT::Colon).is_match() {
        Some(p.return_type()?)
      } else {
        None
      };
      Ok(TypeCallSignature {
        type_parameters,
        parameters,
        return_type,
      })
    })
  }

  fn type_member(&mut self) -> SyntaxResult<Node<TypeMember>> {
    let [t0, t1, t2] = self.peek_n::<3>();
    match t0.typ {
      TT::ParenthesisOpen | TT::ChevronLeft => {
        return Ok(self.call_signature()?.wrap(TypeMember::CallSignature));
      }
      TT::KeywordNew if matches!(t1.typ, TT::ParenthesisOpen | TT::ChevronLeft) => {
        return Ok(self.call_signature()?.wrap(TypeMember::ConstructSignature));
      }
      _ => {}
    };
    let readonly = t0.typ == TT::KeywordReadonly && is_property_key_start(t1.typ);
    let (k0, k1, k2) = if readonly { (t1, t2, None) } else { (t0, t1, Some(t2)) };
    if k0.typ == TT::BracketOpen
      && k1.typ.is_binding_identifier()
      && k2.map_or(true, |t| t.typ == TT::Colon)
    {
      return Ok(
        self
          .with_loc(|p| {
            if readonly {
              p.consume();
            }
            p.require(TT::BracketOpen)?;
            let parameter_name = p.require_binding_identifier()?;
            p.require(TT::Colon)?;
            let parameter_type = p.type_expr()?;
            p.require(TT::BracketClose)?;
            p.require(TT::Colon)?;
            let type_annotation = p.type_expr()?;
            Ok(TypeIndexSignature {
              readonly,
              parameter_name,
              parameter_type,
              type_annotation,
            })
          })?
          .wrap(TypeMember::IndexSignature),
      );
    }
    let start = self.peek().loc.0;
    if readonly {
      self.consume();
    }
    let [a0, a1] = self.peek_n::<2>();
    let accessor = match a0.typ {
      TT::KeywordGet if is_property_key_start(a1.typ) => Some(Accessor::Get),
      TT::KeywordSet if is_property_key_start(a1.typ) => Some(Accessor::Set),
      _ => None,
    };
    if accessor.is_some() {
      self.consume();
    }
    let key = self.property_key()?;
    let optional = self.consume_if(TT::Question).is_match();
    if accessor.is_some() || matches!(self.peek().typ, TT::ParenthesisOpen | TT::ChevronLeft) {
      let type_parameters = self.maybe_type_parameters()?;
      let (parameters, _) = self.func_params()?;
      let return_type = if self.consume_if(TT::Colon).is_match() {
        Some(self.return_type()?)
      } else {
        None
      };
      let loc = self.loc_since(start);
      return Ok(
        Node::new(loc, TypeMethodSignature {
          accessor,
          key,
          optional,
          type_parameters,
          parameters,
          return_type,
        })
        .wrap(TypeMember::Method),
      );
    }
    let type_annotation = if self.consume_if(TT::Colon).is_match() {
      Some(self.type_expr()?)
    } else {
      None
    };
    let loc = self.loc_since(start);
    Ok(
      Node::new(loc, TypePropertySignature {
        readonly,
        key,
        optional,
        type_annotation,
      })
      .wrap(TypeMember::Property),
    )
  }
}
