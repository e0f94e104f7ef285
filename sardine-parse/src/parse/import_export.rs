use super::skip::is_asi_boundary;
use super::Parser;
use crate::ast::import_export::*;
use crate::ast::node::Node;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::OpaqueStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Returns the module specifier exactly as written, quotes included.
  pub fn module_specifier(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    Ok(self.string(t.loc))
  }

  // `with { type: "json" }` or the older `assert { ... }`.
  fn import_attributes(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    let is_attributes = !t.preceded_by_line_terminator
      && (t.typ == TT::KeywordWith || (t.typ == TT::Identifier && self.str(t.loc) == "assert"));
    if is_attributes {
      self.consume();
      self.skip_balanced()?;
    }
    Ok(())
  }

  // Either an IdentifierName or a string literal, as allowed for module export names.
  fn module_export_name(&mut self) -> SyntaxResult<String> {
    let t = self.require_predicate(
      |typ| typ.is_identifier_name() || typ == TT::LiteralString,
      "export name",
    )?;
    Ok(self.string(t.loc))
  }

  // Detects the `type` modifier in `{ type A }`, `{ type A as B }` and `{ type as as B }`, as
  // opposed to a binding actually named `type`.
  fn consume_type_modifier(&mut self) -> bool {
    let [t0, t1, t2] = self.peek_n::<3>();
    if t0.typ != TT::KeywordType {
      return false;
    }
    let is_modifier = match t1.typ {
      TT::Comma | TT::BraceClose => false,
      TT::KeywordAs => t2.typ == TT::KeywordAs,
      typ => typ.is_identifier_name() || typ == TT::LiteralString,
    };
    if is_modifier {
      self.consume();
    }
    is_modifier
  }

  /// Parses any import statement, except `import x = require(...)` and `import x = a.b`, which
  /// are returned as opaque statements.
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.peek().loc.0;
    self.require(TT::KeywordImport)?;
    let [t0, t1, t2] = self.peek_n::<3>();
    let type_only = t0.typ == TT::KeywordType
      && match t1.typ {
        TT::BraceOpen | TT::Asterisk => true,
        TT::KeywordFrom => t2.typ == TT::KeywordFrom,
        typ => typ.is_binding_identifier(),
      };
    if type_only {
      self.consume();
    }
    if self.peek().typ == TT::LiteralString {
      let module = self.module_specifier()?;
      self.import_attributes()?;
      self.require_stmt_end()?;
      return Ok(
        Node::new(self.loc_since(start), ImportStmt {
          type_only,
          default: None,
          names: None,
          module,
        })
        .wrap(Stmt::Import),
      );
    }
    let [t0, t1] = self.peek_n::<2>();
    let default = if t0.typ.is_binding_identifier()
      && !(t0.typ == TT::KeywordFrom && t1.typ == TT::LiteralString)
    {
      Some(self.consume_as_string())
    } else {
      None
    };
    if default.is_some() && self.peek().typ == TT::Equals {
      self.skip_until(|t, prev| t.typ == TT::Semicolon || is_asi_boundary(t, prev))?;
      let _ = self.consume_if(TT::Semicolon);
      return Ok(Node::new(self.loc_since(start), OpaqueStmt {}).wrap(Stmt::Other));
    }
    let names = if default.is_none() || self.consume_if(TT::Comma).is_match() {
      if self.consume_if(TT::Asterisk).is_match() {
        self.require(TT::KeywordAs)?;
        Some(ImportNames::All(self.require_binding_identifier()?))
      } else {
        self.require(TT::BraceOpen)?;
        let mut names = Vec::new();
        while !self.consume_if(TT::BraceClose).is_match() {
          let type_only = self.consume_type_modifier();
          let importable = self.module_export_name()?;
          let alias = if self.consume_if(TT::KeywordAs).is_match() {
            self.require_binding_identifier()?
          } else {
            importable.clone()
          };
          names.push(ImportName {
            type_only,
            importable,
            alias,
          });
          if !self.consume_if(TT::Comma).is_match() {
            self.require(TT::BraceClose)?;
            break;
          }
        }
        Some(ImportNames::Specific(names))
      }
    } else {
      None
    };
    self.require(TT::KeywordFrom)?;
    let module = self.module_specifier()?;
    self.import_attributes()?;
    self.require_stmt_end()?;
    Ok(
      Node::new(self.loc_since(start), ImportStmt {
        type_only,
        default,
        names,
        module,
      })
      .wrap(Stmt::Import),
    )
  }

  /// Parses the `{ a, b as c, type D }` list of an export statement.
  pub fn export_names(&mut self) -> SyntaxResult<Vec<ExportName>> {
    self.require(TT::BraceOpen)?;
    let mut names = Vec::new();
    while !self.consume_if(TT::BraceClose).is_match() {
      let type_only = self.consume_type_modifier();
      let exportable = self.module_export_name()?;
      let alias = if self.consume_if(TT::KeywordAs).is_match() {
        self.module_export_name()?
      } else {
        exportable.clone()
      };
      names.push(ExportName {
        type_only,
        exportable,
        alias,
      });
      if !self.consume_if(TT::Comma).is_match() {
        self.require(TT::BraceClose)?;
        break;
      }
    }
    Ok(names)
  }
}
