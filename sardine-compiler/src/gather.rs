use crate::err::CompileError;
use crate::err::CompileResult;
use crate::options::GatherOptions;
use crate::record::EdgeDirection;
use crate::record::IdentifierRecord;
use crate::record::ImportExportEdge;
use crate::record::Parameter;
use crate::record::SyntaxKind;
use ahash::AHashSet;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use indexmap::IndexMap;
use sardine_parse::ast::expr::Expr;
use sardine_parse::ast::func::Func;
use sardine_parse::ast::func::ParamDecl;
use sardine_parse::ast::import_export::ExportName;
use sardine_parse::ast::import_export::ExportNames;
use sardine_parse::ast::import_export::ImportNames;
use sardine_parse::ast::node::Node;
use sardine_parse::ast::pat::Pat;
use sardine_parse::ast::stmt::ExportListStmt;
use sardine_parse::ast::stmt::ImportStmt;
use sardine_parse::ast::stmt::Stmt;
use sardine_parse::ast::stmt::VarDecl;
use sardine_parse::ast::type_expr::TypeInfer;
use sardine_parse::ast::type_expr::TypeMapped;
use sardine_parse::ast::type_expr::TypeParameter;
use sardine_parse::ast::type_expr::TypeReference;
use sardine_parse::loc::Loc;
use sardine_parse::parse;
use std::fs;
use std::mem;
use std::path::Path;
use tracing::debug;
use tracing::warn;

/// Everything proxy generation needs to know about one file.
#[derive(Clone, Debug, Default)]
pub struct GatheredExports {
  /// Exported declarations of a legal kind, in declaration order.
  pub identifiers: IndexMap<String, IdentifierRecord>,
  /// Names that parameter types of the exported callables refer to, in first-seen order.
  pub referenced_types: Vec<String>,
  pub imports: Vec<ImportExportEdge>,
  pub reexports: Vec<ImportExportEdge>,
}

/// Reads and gathers the file at `path`.
pub fn gather_file(path: &Path, options: &GatherOptions) -> CompileResult<GatheredExports> {
  let file = path.display().to_string();
  let source = fs::read_to_string(path).map_err(|e| CompileError::io(file.as_str(), e))?;
  gather_exports(&source, &file, options)
}

/// Classifies the top-level declarations of a module and collects what its proxy module needs.
///
/// Fails on duplicate top-level names, exported classes, default exports and syntax errors.
/// Non-exported declarations take part in duplicate detection and alias resolution, but are not
/// part of the result.
pub fn gather_exports(
  source: &str,
  file_path: &str,
  options: &GatherOptions,
) -> CompileResult<GatheredExports> {
  let top = parse(source).map_err(|e| CompileError::syntax(file_path, source, e))?;
  let mut gatherer = Gatherer {
    source,
    file: file_path,
    options,
    identifiers: IndexMap::new(),
    imports: Vec::new(),
    reexports: Vec::new(),
    local_exports: Vec::new(),
  };
  for stmt in top.stx.body.iter() {
    gatherer.stmt(stmt)?;
  }
  gatherer.finish()
}

type TypeInferNode = Node<TypeInfer>;
type TypeMappedNode = Node<TypeMapped>;
type TypeParameterNode = Node<TypeParameter>;
type TypeReferenceNode = Node<TypeReference>;

// Type names bound within a signature, which never need an import.
#[derive(Default, Visitor)]
#[visitor(TypeParameterNode(enter), TypeMappedNode(enter), TypeInferNode(enter))]
struct LocalTypeNames {
  names: AHashSet<String>,
}

impl LocalTypeNames {
  fn enter_type_parameter_node(&mut self, node: &TypeParameterNode) {
    self.names.insert(node.stx.name.clone());
  }

  fn enter_type_mapped_node(&mut self, node: &TypeMappedNode) {
    self.names.insert(node.stx.type_parameter.clone());
  }

  fn enter_type_infer_node(&mut self, node: &TypeInferNode) {
    self.names.insert(node.stx.name.clone());
  }
}

#[derive(Visitor)]
#[visitor(TypeReferenceNode(enter))]
struct TypeReferenceCollector<'a> {
  options: &'a GatherOptions,
  locals: &'a AHashSet<String>,
  found: Vec<String>,
}

impl TypeReferenceCollector<'_> {
  fn enter_type_reference_node(&mut self, node: &TypeReferenceNode) {
    // A generic instantiation only contributes its type arguments, which are visited next.
    if node.stx.type_arguments.is_some() {
      return;
    }
    let name = node.stx.name.leftmost();
    if self.options.is_built_in(name)
      || self.locals.contains(name)
      || self.found.iter().any(|f| f == name)
    {
      return;
    }
    self.found.push(name.to_string());
  }
}

fn value_kind(expr: &Expr) -> SyntaxKind {
  match expr {
    Expr::ArrowFunc(_) => SyntaxKind::ArrowFunction,
    Expr::Class(_) => SyntaxKind::ClassDeclaration,
    Expr::Func(_) => SyntaxKind::FunctionExpression,
    Expr::LitArr(_) => SyntaxKind::ArrayLiteral,
    Expr::LitObj(_) => SyntaxKind::ObjectLiteral,
    Expr::Member(_) => SyntaxKind::PropertyAccess,
    Expr::Id(_) | Expr::Other(_) => SyntaxKind::Unhandled,
  }
}

fn illegal_export(record: &IdentifierRecord, file: &str) -> CompileError {
  CompileError::IllegalExportType {
    name: record.name.clone(),
    kind: record.kind.name(),
    file: file.to_string(),
  }
}

struct Gatherer<'a> {
  source: &'a str,
  file: &'a str,
  options: &'a GatherOptions,
  identifiers: IndexMap<String, IdentifierRecord>,
  imports: Vec<ImportExportEdge>,
  reexports: Vec<ImportExportEdge>,
  // `export { a, b as c }` without a module; resolved once every declaration is known.
  local_exports: Vec<ExportName>,
}

impl<'a> Gatherer<'a> {
  fn text<S: Drive + DriveMut>(&self, node: &Node<S>) -> &'a str {
    node.text(self.source)
  }

  fn default_export_error(&self) -> CompileError {
    CompileError::UnsupportedDefaultExport {
      file: self.file.to_string(),
    }
  }

  fn store(&mut self, record: IdentifierRecord) -> CompileResult<()> {
    if self.identifiers.contains_key(&record.name) {
      return Err(CompileError::DuplicateIdentifier {
        name: record.name,
        file: self.file.to_string(),
      });
    }
    if record.is_exported && record.kind.is_illegal_export() {
      return Err(illegal_export(&record, self.file));
    }
    debug!(
      name = %record.name,
      kind = %record.kind,
      exported = record.is_exported,
      "gathered identifier"
    );
    self.identifiers.insert(record.name.clone(), record);
    Ok(())
  }

  fn add_edge(&mut self, edge: ImportExportEdge) {
    let edges = match edge.direction {
      EdgeDirection::Import => &mut self.imports,
      EdgeDirection::Reexport => &mut self.reexports,
    };
    if !edges.contains(&edge) {
      edges.push(edge);
    }
  }

  fn stmt(&mut self, stmt: &Node<Stmt>) -> CompileResult<()> {
    match stmt.stx.as_ref() {
      Stmt::VarDecl(decl) => self.var_decl(decl),
      Stmt::FuncDecl(decl) => {
        let record = self.callable(
          decl.stx.name.clone(),
          SyntaxKind::FunctionDeclaration,
          &decl.stx.function,
          decl.stx.export,
          self.text(decl),
        );
        self.store(record)
      }
      Stmt::ClassDecl(decl) => self.store(IdentifierRecord::plain(
        &decl.stx.name,
        SyntaxKind::ClassDeclaration,
        decl.stx.export,
        self.text(decl),
      )),
      Stmt::InterfaceDecl(decl) => self.store(IdentifierRecord::plain(
        &decl.stx.name,
        SyntaxKind::InterfaceDeclaration,
        decl.stx.export,
        self.text(decl),
      )),
      Stmt::TypeAliasDecl(decl) => self.store(IdentifierRecord::plain(
        &decl.stx.name,
        SyntaxKind::TypeAliasDeclaration,
        decl.stx.export,
        self.text(decl),
      )),
      Stmt::EnumDecl(decl) => self.store(IdentifierRecord::plain(
        &decl.stx.name,
        SyntaxKind::EnumDeclaration,
        decl.stx.export,
        self.text(decl),
      )),
      Stmt::Import(import) => {
        self.import(&import.stx);
        Ok(())
      }
      Stmt::ExportList(list) => self.export_list(&list.stx),
      Stmt::ExportDefault(_) => Err(self.default_export_error()),
      Stmt::Other(_) => Ok(()),
    }
  }

  fn var_decl(&mut self, decl: &Node<VarDecl>) -> CompileResult<()> {
    let export = decl.stx.export;
    for declarator in decl.stx.declarators.iter() {
      let Some(init) = &declarator.stx.initializer else {
        continue;
      };
      let raw_text = self.text(init);
      match declarator.stx.pattern.stx.as_ref() {
        Pat::Id(id) => {
          let name = &id.stx.name;
          let record = match init.stx.as_ref() {
            // `const x = f` takes over the call metadata of an earlier `f`. Bindings to anything
            // not declared in this file are not recorded.
            Expr::Id(source_id) => match self.identifiers.get(&source_id.stx.name) {
              Some(source) => IdentifierRecord {
                name: name.clone(),
                is_exported: export,
                ..source.clone()
              },
              None => continue,
            },
            Expr::ArrowFunc(arrow) => self.callable(
              name.clone(),
              SyntaxKind::ArrowFunction,
              &arrow.stx.func,
              export,
              raw_text,
            ),
            Expr::Func(func) => self.callable(
              name.clone(),
              SyntaxKind::FunctionExpression,
              &func.stx.func,
              export,
              raw_text,
            ),
            other => IdentifierRecord::plain(name, value_kind(other), export, raw_text),
          };
          self.store(record)?;
        }
        pattern => {
          let kind = match init.stx.as_ref() {
            Expr::Id(_) | Expr::Member(_) => SyntaxKind::PropertyAccess,
            Expr::LitArr(_) => SyntaxKind::ArrayLiteral,
            Expr::LitObj(_) => SyntaxKind::ObjectLiteral,
            _ => SyntaxKind::Unhandled,
          };
          for name in pattern.bound_names() {
            self.store(IdentifierRecord::plain(name, kind, export, raw_text))?;
          }
        }
      }
    }
    Ok(())
  }

  fn callable(
    &self,
    name: String,
    kind: SyntaxKind,
    func: &Node<Func>,
    is_exported: bool,
    raw_text: &str,
  ) -> IdentifierRecord {
    let func = func.stx.as_ref();
    let is_async = func.mentions_async;
    let params: Vec<&Node<ParamDecl>> = func
      .parameters
      .iter()
      .filter(|p| !p.stx.is_this_param())
      .collect();
    let parameters = params.iter().map(|p| self.parameter(p)).collect();
    let type_parameters = func.type_parameters.as_deref().and_then(|tps| {
      let first = tps.first()?;
      let last = tps.last()?;
      Some(format!("<{}>", Loc(first.loc.0, last.loc.1).text(self.source)))
    });

    let mut locals = LocalTypeNames::default();
    func.type_parameters.drive(&mut locals);
    for param in params.iter() {
      param.drive(&mut locals);
    }
    let mut collector = TypeReferenceCollector {
      options: self.options,
      locals: &locals.names,
      found: Vec::new(),
    };
    func.type_parameters.drive(&mut collector);
    for param in params.iter() {
      param.drive(&mut collector);
    }

    // Only an annotation directly followed by a body is taken as the return type.
    let return_type = match (&func.return_type, &func.body) {
      (Some(return_type), Some(_)) => {
        let text = self.text(return_type);
        match text.strip_prefix("Promise<").and_then(|t| t.strip_suffix('>')) {
          Some(inner) if is_async => inner.to_string(),
          _ => text.to_string(),
        }
      }
      _ => "any".to_string(),
    };

    IdentifierRecord {
      name,
      kind,
      is_exported,
      is_async,
      raw_text: raw_text.to_string(),
      parameters: Some(parameters),
      type_parameters,
      referenced_type_names: collector.found,
      return_type,
      has_body: func.body.is_some(),
    }
  }

  fn parameter(&self, param: &Node<ParamDecl>) -> Parameter {
    let pattern = &param.stx.pattern;
    let name = pattern.stx.to_expression();
    Parameter {
      name,
      text: self.text(param).to_string(),
      rest: param.stx.rest,
    }
  }

  fn import(&mut self, import: &ImportStmt) {
    let module = &import.module;
    if let Some(default) = &import.default {
      self.add_edge(ImportExportEdge::new(
        "default",
        Some(default.clone()),
        module,
        EdgeDirection::Import,
      ));
    }
    match &import.names {
      Some(ImportNames::All(alias)) => self.add_edge(ImportExportEdge::new(
        "*",
        Some(alias.clone()),
        module,
        EdgeDirection::Import,
      )),
      Some(ImportNames::Specific(names)) => {
        for name in names.iter() {
          self.add_edge(ImportExportEdge::new(
            &name.importable,
            Some(name.alias.clone()),
            module,
            EdgeDirection::Import,
          ));
        }
      }
      None => {}
    };
  }

  fn export_list(&mut self, list: &ExportListStmt) -> CompileResult<()> {
    let ExportNames::Specific(names) = &list.names else {
      if let (ExportNames::All(alias), Some(from)) = (&list.names, &list.from) {
        self.add_edge(ImportExportEdge::new(
          "*",
          alias.clone(),
          from,
          EdgeDirection::Reexport,
        ));
      }
      return Ok(());
    };
    // Passing another module's default through unchanged is fine; making anything else the
    // default export of the proxy module is not.
    if names
      .iter()
      .any(|n| n.alias == "default" && n.exportable != "default")
    {
      return Err(self.default_export_error());
    }
    match &list.from {
      Some(from) => {
        for name in names.iter() {
          self.add_edge(ImportExportEdge::new(
            &name.exportable,
            Some(name.alias.clone()),
            from,
            EdgeDirection::Reexport,
          ));
        }
      }
      None => self.local_exports.extend(names.iter().cloned()),
    };
    Ok(())
  }

  fn local_export(&mut self, name: ExportName) -> CompileResult<()> {
    if let Some(record) = self.identifiers.get_mut(&name.exportable) {
      if name.alias == name.exportable {
        record.is_exported = true;
        if record.kind.is_illegal_export() {
          return Err(illegal_export(record, self.file));
        }
        return Ok(());
      }
      let aliased = IdentifierRecord {
        name: name.alias,
        is_exported: true,
        ..record.clone()
      };
      return self.store(aliased);
    }
    // Exporting an imported binding re-exports it from where it came from.
    let imported = self
      .imports
      .iter()
      .find(|edge| edge.binding() == name.exportable)
      .cloned();
    match imported {
      Some(edge) => self.add_edge(ImportExportEdge::new(
        edge.local_name,
        Some(name.alias),
        edge.source_module,
        EdgeDirection::Reexport,
      )),
      None => warn!(
        name = %name.exportable,
        file = self.file,
        "ignoring export of a binding that is neither declared nor imported"
      ),
    };
    Ok(())
  }

  fn finish(mut self) -> CompileResult<GatheredExports> {
    for name in mem::take(&mut self.local_exports) {
      self.local_export(name)?;
    }
    self
      .identifiers
      .retain(|_, record| record.is_exported && record.kind.is_legal_export());
    let mut referenced_types: Vec<String> = Vec::new();
    for record in self.identifiers.values().filter(|r| r.kind.is_callable()) {
      if !record.has_body {
        warn!(
          name = %record.name,
          file = self.file,
          "exported callable has no body; its proxy calls a declaration with no runtime value"
        );
      }
      for name in record.referenced_type_names.iter() {
        if !referenced_types.contains(name) {
          referenced_types.push(name.clone());
        }
      }
    }
    Ok(GatheredExports {
      identifiers: self.identifiers,
      referenced_types,
      imports: self.imports,
      reexports: self.reexports,
    })
  }
}
