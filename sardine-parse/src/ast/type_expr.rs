use super::func::ParamDecl;
use super::node::Node;
use super::pat::PropKey;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  Array(Node<TypeArray>),
  Conditional(Node<TypeConditional>),
  Constructor(Node<TypeConstructor>),
  Function(Node<TypeFunction>),
  Import(Node<TypeImport>),
  IndexedAccess(Node<TypeIndexedAccess>),
  Infer(Node<TypeInfer>),
  Intersection(Node<TypeIntersection>),
  Keyword(Node<TypeKeyword>),
  Literal(Node<TypeLiteral>),
  Mapped(Node<TypeMapped>),
  ObjectLiteral(Node<TypeObjectLiteral>),
  Operator(Node<TypeOperator>),
  Parenthesized(Node<TypeParenthesized>),
  Predicate(Node<TypePredicate>),
  Query(Node<TypeQuery>),
  Reference(Node<TypeReference>),
  TemplateLiteral(Node<TypeTemplateLiteral>),
  Tuple(Node<TypeTuple>),
  Union(Node<TypeUnion>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeKeywordKind {
  Any,
  BigInt,
  Boolean,
  Never,
  Null,
  Number,
  Object,
  String,
  Symbol,
  This,
  Undefined,
  Unknown,
  Void,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeKeyword {
  #[drive(skip)]
  pub keyword: TypeKeywordKind,
}

/// A possibly qualified type name: `A` or `A.B.C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeEntityName {
  Identifier(String),
  Qualified(Box<TypeEntityName>, String),
}

impl TypeEntityName {
  /// The leftmost identifier, which is the binding the name resolves through.
  pub fn leftmost(&self) -> &str {
    match self {
      TypeEntityName::Identifier(name) => name,
      TypeEntityName::Qualified(left, _) => left.leftmost(),
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeReference {
  #[drive(skip)]
  pub name: TypeEntityName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeLiteralValue {
  BigInt(String),
  Boolean(bool),
  Number(String),
  String(String),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeLiteral {
  #[drive(skip)]
  pub value: TypeLiteralValue,
}

/// `` `prefix-${T}-suffix` ``; only the embedded types are kept.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTemplateLiteral {
  pub spans: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeArray {
  pub element_type: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTupleElement {
  #[drive(skip)]
  pub label: Option<String>,
  #[drive(skip)]
  pub optional: bool,
  #[drive(skip)]
  pub rest: bool,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeTuple {
  #[drive(skip)]
  pub readonly: bool,
  pub elements: Vec<Node<TypeTupleElement>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeUnion {
  pub types: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIntersection {
  pub types: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeFunction {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeConstructor {
  #[drive(skip)]
  pub abstract_: bool,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeObjectLiteral {
  pub members: Vec<Node<TypeMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeParenthesized {
  pub type_expr: Node<TypeExpr>,
}

/// `typeof a.b`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeQuery {
  #[drive(skip)]
  pub expr_name: TypeEntityName,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum TypeOperatorKind {
  KeyOf,
  Readonly,
  Unique,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeOperator {
  #[drive(skip)]
  pub operator: TypeOperatorKind,
  pub type_expr: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIndexedAccess {
  pub object_type: Node<TypeExpr>,
  pub index_type: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeConditional {
  pub check_type: Node<TypeExpr>,
  pub extends_type: Node<TypeExpr>,
  pub true_type: Node<TypeExpr>,
  pub false_type: Node<TypeExpr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeInfer {
  #[drive(skip)]
  pub name: String,
  pub constraint: Option<Node<TypeExpr>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum MappedTypeModifier {
  Plus,
  Minus,
  None,
}

/// `{ readonly [K in keyof T as N]?: V }`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeMapped {
  #[drive(skip)]
  pub readonly_modifier: Option<MappedTypeModifier>,
  #[drive(skip)]
  pub type_parameter: String,
  pub constraint: Node<TypeExpr>,
  pub name_type: Option<Node<TypeExpr>>,
  #[drive(skip)]
  pub optional_modifier: Option<MappedTypeModifier>,
  pub type_expr: Option<Node<TypeExpr>>,
}

/// `x is T`, `asserts x`, `asserts x is T`; only valid in return positions.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypePredicate {
  #[drive(skip)]
  pub asserts: bool,
  #[drive(skip)]
  pub parameter_name: String,
  pub type_annotation: Option<Node<TypeExpr>>,
}

/// `import("module").A.B<T>`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeImport {
  #[drive(skip)]
  pub module: String,
  #[drive(skip)]
  pub qualifier: Option<TypeEntityName>,
  pub type_arguments: Option<Vec<Node<TypeExpr>>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeParameter {
  #[drive(skip)]
  pub const_: bool,
  #[drive(skip)]
  pub name: String,
  pub constraint: Option<Node<TypeExpr>>,
  pub default: Option<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum TypeMember {
  CallSignature(Node<TypeCallSignature>),
  ConstructSignature(Node<TypeCallSignature>),
  IndexSignature(Node<TypeIndexSignature>),
  Method(Node<TypeMethodSignature>),
  Property(Node<TypePropertySignature>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypePropertySignature {
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub key: PropKey,
  #[drive(skip)]
  pub optional: bool,
  pub type_annotation: Option<Node<TypeExpr>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Accessor {
  Get,
  Set,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeMethodSignature {
  #[drive(skip)]
  pub accessor: Option<Accessor>,
  #[drive(skip)]
  pub key: PropKey,
  #[drive(skip)]
  pub optional: bool,
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Option<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeCallSignature {
  pub type_parameters: Option<Vec<Node<TypeParameter>>>,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Option<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeIndexSignature {
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub parameter_name: String,
  pub parameter_type: Node<TypeExpr>,
  pub type_annotation: Node<TypeExpr>,
}
