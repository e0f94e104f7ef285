use super::expr::Expr;
use super::expr::OpaqueExpr;
use super::func::Func;
use super::import_export::ExportNames;
use super::import_export::ImportNames;
use super::node::Node;
use super::pat::Pat;
use super::pat::PropKey;
use super::type_expr::TypeExpr;
use super::type_expr::TypeMember;
use super::type_expr::TypeParameter;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

/// A top-level statement.
///
/// Every declaration carries its own `export` flag, copied from the enclosing `export` keyword,
/// so consumers never need to look upwards. The location of a declaration node excludes the
/// `export` keyword; the location of the enclosing `Node<Stmt>` includes it.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Stmt {
  ClassDecl(Node<ClassDecl>),
  EnumDecl(Node<EnumDecl>),
  ExportDefault(Node<ExportDefaultStmt>),
  ExportList(Node<ExportListStmt>),
  FuncDecl(Node<FuncDecl>),
  Import(Node<ImportStmt>),
  InterfaceDecl(Node<InterfaceDecl>),
  Other(Node<OpaqueStmt>),
  TypeAliasDecl(Node<TypeAliasDecl>),
  VarDecl(Node<VarDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub abstract_: bool,
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EnumMember {
  #[drive(skip)]
  pub key: PropKey,
  pub initializer: Option<Node<OpaqueExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EnumDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub const_: bool,
  #[drive(skip)]
  pub name: String,
  pub members: Vec<Node<EnumMember>>,
}

/// `export default ...` or `export = ...`. The exported value is not parsed.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportDefaultStmt {
  // Whether this is the CommonJS-style `export =` form.
  #[drive(skip)]
  pub assignment: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportListStmt {
  #[drive(skip)]
  pub type_only: bool,
  #[drive(skip)]
  pub names: ExportNames,
  // The module specifier as written, including quotes.
  #[drive(skip)]
  pub from: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportStmt {
  #[drive(skip)]
  pub type_only: bool,
  #[drive(skip)]
  pub default: Option<String>,
  #[drive(skip)]
  pub names: Option<ImportNames>,
  // The module specifier as written, including quotes.
  #[drive(skip)]
  pub module: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct InterfaceDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Any statement that cannot declare or export a binding visible to other modules.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct OpaqueStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeAliasDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<Pat>,
  #[drive(skip)]
  pub definite: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<Node<VarDeclarator>>,
}
