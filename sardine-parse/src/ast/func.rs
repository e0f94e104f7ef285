use super::expr::OpaqueExpr;
use super::node::Node;
use super::pat::Pat;
use super::type_expr::TypeExpr;
use super::type_expr::TypeParameter;
use crate::loc::Loc;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub rest: bool,
  #[drive(skip)]
  pub optional: bool,
  pub pattern: Node<Pat>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub default_value: Option<Node<OpaqueExpr>>,
}

impl ParamDecl {
  /// Whether this is TypeScript's fake `this` parameter, which only annotates the receiver.
  pub fn is_this_param(&self) -> bool {
    matches!(self.pattern.stx.as_ref(), Pat::Id(id) if id.stx.name == "this")
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncBody {
  // Whether this is an arrow function's concise expression body rather than a block.
  #[drive(skip)]
  pub expression: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  // Whether an `async` keyword appears anywhere in the function, including nested closures in
  // parameter defaults and the body.
  #[drive(skip)]
  pub mentions_async: bool,
  #[drive(skip)]
  pub generator: bool,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  // The parenthesized parameter list, or the single unparenthesized arrow parameter.
  #[drive(skip)]
  pub parameters_loc: Loc,
  pub return_type: Option<Node<TypeExpr>>,
  // None for overload signatures and ambient declarations.
  pub body: Option<Node<FuncBody>>,
}
