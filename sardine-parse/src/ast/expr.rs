use super::func::Func;
use super::node::Node;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

/// Expressions are only classified, not fully parsed: anything that is not one of the shapes
/// below is an opaque span of source text.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Class(Node<ClassExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  LitArr(Node<LitArrExpr>),
  LitObj(Node<LitObjExpr>),
  Member(Node<MemberExpr>),
  Other(Node<OpaqueExpr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  #[drive(skip)]
  pub name: Option<String>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  #[drive(skip)]
  pub name: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {}

/// `a.b` or `a?.b`, where `a` is itself an identifier or member expression.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

/// A balanced run of tokens whose structure is not needed.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct OpaqueExpr {}
