use super::skip::is_asi_boundary;
use super::Parser;
use crate::ast::expr::OpaqueExpr;
use crate::ast::import_export::ExportNames;
use crate::ast::node::Node;
use crate::ast::pat::PropKey;
use crate::ast::stmt::*;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while self.peek_with_mode(LexMode::SlashIsRegex).typ != TT::EOF {
      body.push(self.stmt()?);
    }
    Ok(Node::new(self.source_range(), TopLevel { body }))
  }

  fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1] = self.peek_n::<2>();
    let start = t0.loc.0;
    match t0.typ {
      TT::Semicolon => {
        self.consume();
        Ok(Node::new(t0.loc, OpaqueStmt {}).wrap(Stmt::Other))
      }
      TT::KeywordImport if !matches!(t1.typ, TT::ParenthesisOpen | TT::Dot) => self.import_stmt(),
      TT::KeywordExport => self.export_stmt(),
      _ => match self.decl(start, false)? {
        Some(stmt) => Ok(stmt),
        None => self.opaque_stmt(start),
      },
    }
  }

  // Skips a statement whose structure is irrelevant, up to and including its terminator.
  fn opaque_stmt(&mut self, start: usize) -> SyntaxResult<Node<Stmt>> {
    self.skip_until(|t, prev| t.typ == TT::Semicolon || is_asi_boundary(t, prev))?;
    let _ = self.consume_if(TT::Semicolon);
    Ok(Node::new(self.loc_since(start), OpaqueStmt {}).wrap(Stmt::Other))
  }

  fn export_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.peek().loc.0;
    self.require(TT::KeywordExport)?;
    let [t0, t1, t2] = self.peek_n::<3>();
    match t0.typ {
      TT::KeywordDefault | TT::Equals => {
        self.consume();
        self.skip_until(|t, prev| t.typ == TT::Semicolon || is_asi_boundary(t, prev))?;
        let _ = self.consume_if(TT::Semicolon);
        Ok(
          Node::new(self.loc_since(start), ExportDefaultStmt {
            assignment: t0.typ == TT::Equals,
          })
          .wrap(Stmt::ExportDefault),
        )
      }
      TT::Asterisk => self.export_list(start, false),
      TT::BraceOpen => self.export_list(start, false),
      TT::KeywordType if matches!(t1.typ, TT::BraceOpen | TT::Asterisk) => {
        self.consume();
        self.export_list(start, true)
      }
      // `export import A = B.C;` and `export as namespace Lib;`
      TT::KeywordImport if t1.typ.is_binding_identifier() && t2.typ == TT::Equals => {
        self.opaque_stmt(start)
      }
      TT::KeywordAs if t1.typ == TT::KeywordNamespace => self.opaque_stmt(start),
      _ => self
        .decl(start, true)?
        .ok_or_else(|| t0.error(SyntaxErrorType::ExpectedSyntax("exportable declaration"))),
    }
  }

  fn export_list(&mut self, start: usize, type_only: bool) -> SyntaxResult<Node<Stmt>> {
    let names = if self.consume_if(TT::Asterisk).is_match() {
      let alias = if self.consume_if(TT::KeywordAs).is_match() {
        let t = self.require_predicate(
          |typ| typ.is_identifier_name() || typ == TT::LiteralString,
          "export name",
        )?;
        Some(self.string(t.loc))
      } else {
        None
      };
      ExportNames::All(alias)
    } else {
      ExportNames::Specific(self.export_names()?)
    };
    let from = if self.consume_if(TT::KeywordFrom).is_match() {
      Some(self.module_specifier()?)
    } else {
      None
    };
    if matches!(names, ExportNames::All(_)) && from.is_none() {
      return Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordFrom)));
    }
    self.require_stmt_end()?;
    Ok(
      Node::new(self.loc_since(start), ExportListStmt {
        type_only,
        names,
        from,
      })
      .wrap(Stmt::ExportList),
    )
  }

  /// Parses a declaration if one starts here. The returned statement spans from `start`, which
  /// may precede the declaration itself to cover an `export` keyword.
  fn decl(&mut self, start: usize, export: bool) -> SyntaxResult<Option<Node<Stmt>>> {
    let decl_start = self.peek().loc.0;
    let [t0, t1] = self.peek_n::<2>();
    let declare = t0.typ == TT::KeywordDeclare
      && !t1.preceded_by_line_terminator
      && (matches!(
        t1.typ,
        TT::KeywordVar
          | TT::KeywordLet
          | TT::KeywordConst
          | TT::KeywordFunction
          | TT::KeywordAsync
          | TT::KeywordClass
          | TT::KeywordAbstract
          | TT::KeywordInterface
          | TT::KeywordType
          | TT::KeywordEnum
          | TT::KeywordNamespace
          | TT::KeywordModule
      ) || (t1.typ == TT::Identifier && self.str(t1.loc) == "global"));
    if declare {
      self.consume();
    }
    let [t0, t1] = self.peek_n::<2>();
    let same_line = !t1.preceded_by_line_terminator;
    let stx = match t0.typ {
      TT::KeywordConst if t1.typ == TT::KeywordEnum => {
        Stmt::EnumDecl(self.enum_decl(decl_start, export, declare)?)
      }
      TT::KeywordConst | TT::KeywordVar => Stmt::VarDecl(self.var_decl(decl_start, export, declare)?),
      TT::KeywordLet
        if t1.typ.is_binding_identifier() || matches!(t1.typ, TT::BracketOpen | TT::BraceOpen) =>
      {
        Stmt::VarDecl(self.var_decl(decl_start, export, declare)?)
      }
      TT::KeywordFunction => Stmt::FuncDecl(self.func_decl(decl_start, export, declare)?),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && same_line => {
        Stmt::FuncDecl(self.func_decl(decl_start, export, declare)?)
      }
      TT::KeywordClass | TT::At => Stmt::ClassDecl(self.class_decl(decl_start, export, declare)?),
      TT::KeywordAbstract if t1.typ == TT::KeywordClass && same_line => {
        Stmt::ClassDecl(self.class_decl(decl_start, export, declare)?)
      }
      TT::KeywordInterface if t1.typ.is_binding_identifier() => {
        Stmt::InterfaceDecl(self.interface_decl(decl_start, export, declare)?)
      }
      TT::KeywordType if t1.typ.is_binding_identifier() && same_line => {
        Stmt::TypeAliasDecl(self.type_alias_decl(decl_start, export, declare)?)
      }
      TT::KeywordEnum => Stmt::EnumDecl(self.enum_decl(decl_start, export, declare)?),
      // Namespaces, ambient modules and `declare global` cannot hold remotely callable
      // declarations, so their contents are skipped.
      TT::KeywordNamespace | TT::KeywordModule
        if same_line && (t1.typ.is_binding_identifier() || t1.typ == TT::LiteralString) =>
      {
        self.namespace_decl()?
      }
      TT::Identifier if declare && self.str(t0.loc) == "global" => self.namespace_decl()?,
      _ if declare => {
        return Err(t0.error(SyntaxErrorType::ExpectedSyntax("declaration")));
      }
      _ => return Ok(None),
    };
    Ok(Some(Node::new(self.loc_since(start), stx)))
  }

  fn namespace_decl(&mut self) -> SyntaxResult<Stmt> {
    let start = self.peek().loc.0;
    // `namespace`, `module` or `global`.
    self.consume();
    match self.peek().typ {
      TT::LiteralString => {
        self.consume();
      }
      TT::BraceOpen => {}
      _ => loop {
        self.require_identifier_name()?;
        if !self.consume_if(TT::Dot).is_match() {
          break;
        }
      },
    };
    if self.peek().typ == TT::BraceOpen {
      self.skip_balanced()?;
    } else {
      self.require_stmt_end()?;
    }
    Ok(Stmt::Other(Node::new(self.loc_since(start), OpaqueStmt {})))
  }

  fn var_decl(&mut self, start: usize, export: bool, declare: bool) -> SyntaxResult<Node<VarDecl>> {
    let mode = match self.consume().typ {
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordLet => VarDeclMode::Let,
      _ => VarDeclMode::Var,
    };
    let mut declarators = Vec::new();
    loop {
      declarators.push(self.with_loc(|p| {
        let pattern = p.pat()?;
        let definite = p.consume_if(TT::Exclamation).is_match();
        let type_annotation = if p.consume_if(TT::Colon).is_match() {
          Some(p.type_expr()?)
        } else {
          None
        };
        let initializer = if p.consume_if(TT::Equals).is_match() {
          Some(p.initializer_expr()?)
        } else {
          None
        };
        Ok(VarDeclarator {
          pattern,
          definite,
          type_annotation,
          initializer,
        })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require_stmt_end()?;
    Ok(Node::new(self.loc_since(start), VarDecl {
      export,
      declare,
      mode,
      declarators,
    }))
  }

  fn func_decl(&mut self, start: usize, export: bool, declare: bool) -> SyntaxResult<Node<FuncDecl>> {
    let async_ = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordFunction)?;
    let generator = self.consume_if(TT::Asterisk).is_match();
    let name = self.require_binding_identifier()?;
    let func_start = self.peek().loc.0;
    let function = self.func_rest(func_start, async_, generator)?;
    if function.stx.body.is_none() {
      self.require_stmt_end()?;
    }
    Ok(Node::new(self.loc_since(start), FuncDecl {
      export,
      declare,
      name,
      function,
    }))
  }

  // `@a.b(c)` decorators in front of a class.
  fn decorators(&mut self) -> SyntaxResult<()> {
    while self.consume_if(TT::At).is_match() {
      if self.peek().typ == TT::ParenthesisOpen {
        self.skip_balanced()?;
        continue;
      }
      self.require_identifier_name()?;
      while self.consume_if(TT::Dot).is_match() {
        self.require_identifier_name()?;
      }
      if self.peek().typ == TT::ChevronLeft {
        self.type_arguments()?;
      }
      if self.peek().typ == TT::ParenthesisOpen {
        self.skip_balanced()?;
      }
    }
    Ok(())
  }

  /// Parses a class after its name: type parameters and heritage clauses, then skips the body.
  pub fn class_tail(&mut self) -> SyntaxResult<()> {
    self.maybe_type_parameters()?;
    if self.consume_if(TT::KeywordExtends).is_match() {
      // The superclass can be any left-hand-side expression.
      let loc = self.skip_until(|t, _| matches!(t.typ, TT::BraceOpen | TT::KeywordImplements))?;
      if loc.is_empty() {
        return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("superclass")));
      }
    }
    if self.consume_if(TT::KeywordImplements).is_match() {
      loop {
        self.type_expr()?;
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    if self.peek().typ != TT::BraceOpen {
      return Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::BraceOpen)));
    }
    self.skip_balanced()?;
    Ok(())
  }

  fn class_decl(&mut self, start: usize, export: bool, declare: bool) -> SyntaxResult<Node<ClassDecl>> {
    self.decorators()?;
    // Decorators may also precede the `export` keyword.
    let export = export || self.consume_if(TT::KeywordExport).is_match();
    let abstract_ = self.consume_if(TT::KeywordAbstract).is_match();
    self.require(TT::KeywordClass)?;
    let name = self.require_binding_identifier()?;
    self.class_tail()?;
    Ok(Node::new(self.loc_since(start), ClassDecl {
      export,
      declare,
      abstract_,
      name,
    }))
  }

  fn interface_decl(
    &mut self,
    start: usize,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<InterfaceDecl>> {
    self.require(TT::KeywordInterface)?;
    let name = self.require_binding_identifier()?;
    let type_parameters = self.maybe_type_parameters()?;
    let mut extends = Vec::new();
    if self.consume_if(TT::KeywordExtends).is_match() {
      loop {
        extends.push(self.type_expr()?);
        if !self.consume_if(TT::Comma).is_match() {
          break;
        }
      }
    }
    let members = self.type_members()?;
    Ok(Node::new(self.loc_since(start), InterfaceDecl {
      export,
      declare,
      name,
      type_parameters,
      extends,
      members,
    }))
  }

  fn type_alias_decl(
    &mut self,
    start: usize,
    export: bool,
    declare: bool,
  ) -> SyntaxResult<Node<TypeAliasDecl>> {
    self.require(TT::KeywordType)?;
    let name = self.require_binding_identifier()?;
    let type_parameters = self.maybe_type_parameters()?;
    self.require(TT::Equals)?;
    let type_expr = self.type_expr()?;
    self.require_stmt_end()?;
    Ok(Node::new(self.loc_since(start), TypeAliasDecl {
      export,
      declare,
      name,
      type_parameters,
      type_expr,
    }))
  }

  fn enum_decl(&mut self, start: usize, export: bool, declare: bool) -> SyntaxResult<Node<EnumDecl>> {
    let const_ = self.consume_if(TT::KeywordConst).is_match();
    self.require(TT::KeywordEnum)?;
    let name = self.require_binding_identifier()?;
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    while !self.consume_if(TT::BraceClose).is_match() {
      members.push(self.with_loc(|p| {
        let key = if p.peek().typ == TT::BracketOpen {
          let loc = p.skip_balanced()?;
          PropKey::Computed(p.string(loc))
        } else {
          let t = p.require_predicate(
            |typ| typ.is_identifier_name() || typ == TT::LiteralString,
            "enum member name",
          )?;
          PropKey::Direct(p.string(t.loc))
        };
        let initializer = if p.consume_if(TT::Equals).is_match() {
          let loc = p.skip_until(|t, _| matches!(t.typ, TT::Comma | TT::BraceClose))?;
          Some(Node::new(loc, OpaqueExpr {}))
        } else {
          None
        };
        Ok(EnumMember { key, initializer })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        break;
      }
    }
    Ok(Node::new(self.loc_since(start), EnumDecl {
      export,
      declare,
      const_,
      name,
      members,
    }))
  }
}
