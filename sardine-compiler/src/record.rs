use std::fmt;

/// The syntactic category of a top-level declaration, as far as proxy generation cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
  FunctionDeclaration,
  FunctionExpression,
  ArrowFunction,
  InterfaceDeclaration,
  TypeAliasDeclaration,
  EnumDeclaration,
  ObjectLiteral,
  ArrayLiteral,
  PropertyAccess,
  ClassDeclaration,
  // Declarations that take part in duplicate detection but are never exported through a proxy
  // module, such as `const x = 1`.
  Unhandled,
}

impl SyntaxKind {
  pub fn name(self) -> &'static str {
    match self {
      SyntaxKind::FunctionDeclaration => "FunctionDeclaration",
      SyntaxKind::FunctionExpression => "FunctionExpression",
      SyntaxKind::ArrowFunction => "ArrowFunction",
      SyntaxKind::InterfaceDeclaration => "InterfaceDeclaration",
      SyntaxKind::TypeAliasDeclaration => "TypeAliasDeclaration",
      SyntaxKind::EnumDeclaration => "EnumDeclaration",
      SyntaxKind::ObjectLiteral => "ObjectLiteralExpression",
      SyntaxKind::ArrayLiteral => "ArrayLiteralExpression",
      SyntaxKind::PropertyAccess => "PropertyAccessExpression",
      SyntaxKind::ClassDeclaration => "ClassDeclaration",
      SyntaxKind::Unhandled => "Unhandled",
    }
  }

  /// Kinds that callers outside the module must never receive through the proxy module.
  pub fn is_illegal_export(self) -> bool {
    self == SyntaxKind::ClassDeclaration
  }

  /// Kinds that survive gathering when exported.
  pub fn is_legal_export(self) -> bool {
    self.is_callable() || self.is_directly_exportable()
  }

  /// Kinds re-exported verbatim from the archived module, because they have no call semantics.
  pub fn is_directly_exportable(self) -> bool {
    matches!(
      self,
      SyntaxKind::InterfaceDeclaration
        | SyntaxKind::TypeAliasDeclaration
        | SyntaxKind::EnumDeclaration
        | SyntaxKind::ObjectLiteral
        | SyntaxKind::ArrayLiteral
        | SyntaxKind::PropertyAccess
    )
  }

  /// Kinds that become services behind a proxy wrapper.
  pub fn is_callable(self) -> bool {
    matches!(
      self,
      SyntaxKind::FunctionDeclaration | SyntaxKind::FunctionExpression | SyntaxKind::ArrowFunction
    )
  }
}

impl fmt::Display for SyntaxKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// One parameter of a callable declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
  /// The bound name, or for a destructuring pattern an expression that rebuilds the destructured
  /// value from the bound names.
  pub name: String,
  /// The full declaration, including type annotation and default value.
  pub text: String,
  pub rest: bool,
}

impl Parameter {
  /// How the parameter is passed on to another call.
  pub fn forwarded(&self) -> String {
    if self.rest {
      format!("...{}", self.name)
    } else {
      self.name.clone()
    }
  }
}

/// A classified top-level declaration of one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentifierRecord {
  pub name: String,
  pub kind: SyntaxKind,
  pub is_exported: bool,
  pub is_async: bool,
  /// Source text of the declaration without its `export` keyword; for variable bindings, the
  /// initializer.
  pub raw_text: String,
  /// Present only for callable kinds.
  pub parameters: Option<Vec<Parameter>>,
  /// The type parameter list as written, including the angle brackets.
  pub type_parameters: Option<String>,
  pub referenced_type_names: Vec<String>,
  pub return_type: String,
  /// False for overload signatures and ambient callables, which have nothing to call at runtime.
  pub has_body: bool,
}

impl IdentifierRecord {
  /// A record without call metadata.
  pub fn plain(
    name: impl Into<String>,
    kind: SyntaxKind,
    is_exported: bool,
    raw_text: impl Into<String>,
  ) -> IdentifierRecord {
    IdentifierRecord {
      name: name.into(),
      kind,
      is_exported,
      is_async: false,
      raw_text: raw_text.into(),
      parameters: None,
      type_parameters: None,
      referenced_type_names: Vec::new(),
      return_type: "any".to_string(),
      has_body: false,
    }
  }

  pub fn parameters(&self) -> &[Parameter] {
    self.parameters.as_deref().unwrap_or(&[])
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeDirection {
  Import,
  Reexport,
}

/// A binding imported from, or re-exported from, another module.
///
/// `local_name` is the name in the other module, `"*"` for namespace imports and star
/// re-exports, and `"default"` for default imports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportExportEdge {
  pub local_name: String,
  pub alias: Option<String>,
  /// The module specifier as written, including quotes.
  pub source_module: String,
  pub direction: EdgeDirection,
}

impl ImportExportEdge {
  pub fn new(
    local_name: impl Into<String>,
    alias: Option<String>,
    source_module: impl Into<String>,
    direction: EdgeDirection,
  ) -> ImportExportEdge {
    let local_name = local_name.into();
    // `a as a` is the same binding as `a`.
    let alias = alias.filter(|a| *a != local_name);
    ImportExportEdge {
      local_name,
      alias,
      source_module: source_module.into(),
      direction,
    }
  }

  /// The name this edge binds in the importing module.
  pub fn binding(&self) -> &str {
    self.alias.as_deref().unwrap_or(&self.local_name)
  }

  /// The statement that recreates this edge in a generated module.
  pub fn statement(&self) -> String {
    let src = &self.source_module;
    match (self.direction, self.local_name.as_str(), &self.alias) {
      (EdgeDirection::Import, "*", Some(alias)) => format!("import * as {alias} from {src}"),
      (EdgeDirection::Reexport, "*", Some(alias)) => format!("export * as {alias} from {src}"),
      (EdgeDirection::Reexport, "*", None) => format!("export * from {src}"),
      (EdgeDirection::Import, name, Some(alias)) => {
        format!("import {{ {name} as {alias} }} from {src}")
      }
      (EdgeDirection::Import, name, None) => format!("import {{ {name} }} from {src}"),
      (EdgeDirection::Reexport, name, Some(alias)) => {
        format!("export {{ {name} as {alias} }} from {src}")
      }
      (EdgeDirection::Reexport, name, None) => format!("export {{ {name} }} from {src}"),
    }
  }
}
