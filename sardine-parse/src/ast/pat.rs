use super::expr::OpaqueExpr;
use super::node::Node;
use derive_visitor::{Drive, DriveMut};
use serde::Serialize;

/// A binding target: the left-hand side of a variable declarator, or a parameter.
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPatElem {
  pub target: Node<Pat>,
  pub default_value: Option<Node<OpaqueExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  // Unnamed elements can exist.
  pub elements: Vec<Option<Node<ArrPatElem>>>,
  pub rest: Option<Node<Pat>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PropKey {
  Direct(String),
  // The key is an arbitrary expression; only its text is kept.
  Computed(String),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPatProp {
  #[drive(skip)]
  pub key: PropKey,
  // If `shorthand`, `key` is Direct and `target` is an IdPat of the same name. This way, there is always an IdPat that exists and can be visited.
  pub target: Node<Pat>,
  #[drive(skip)]
  pub shorthand: bool,
  pub default_value: Option<Node<OpaqueExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

impl Pat {
  /// Names bound by this pattern, in source order.
  pub fn bound_names(&self) -> Vec<&str> {
    let mut names = Vec::new();
    self.collect_bound_names(&mut names);
    names
  }

  /// An expression that rebuilds the value this pattern destructures from its bound names, with
  /// default values left out: `{ a = 1, b: [c] }` becomes `{ a, b: [c] }`.
  pub fn to_expression(&self) -> String {
    let mut out = String::new();
    self.write_expression(&mut out);
    out
  }

  fn write_expression(&self, out: &mut String) {
    match self {
      Pat::Id(id) => out.push_str(&id.stx.name),
      Pat::Arr(arr) => {
        out.push('[');
        for (i, elem) in arr.stx.elements.iter().enumerate() {
          if i > 0 {
            out.push_str(", ");
          }
          if let Some(elem) = elem {
            elem.stx.target.stx.write_expression(out);
          }
        }
        // A trailing hole needs its own comma to survive.
        if arr.stx.rest.is_none() && matches!(arr.stx.elements.last(), Some(None)) {
          out.push(',');
        }
        if let Some(rest) = &arr.stx.rest {
          if !arr.stx.elements.is_empty() {
            out.push_str(", ");
          }
          out.push_str("...");
          rest.stx.write_expression(out);
        }
        out.push(']');
      }
      Pat::Obj(obj) => {
        let mut parts = Vec::new();
        for prop in obj.stx.properties.iter() {
          let prop = &prop.stx;
          let mut target = String::new();
          prop.target.stx.write_expression(&mut target);
          match &prop.key {
            PropKey::Direct(_) if prop.shorthand => parts.push(target),
            PropKey::Direct(key) | PropKey::Computed(key) => parts.push(format!("{key}: {target}")),
          };
        }
        if let Some(rest) = &obj.stx.rest {
          parts.push(format!("...{}", rest.stx.name));
        }
        if parts.is_empty() {
          out.push_str("{}");
        } else {
          out.push_str(&format!("{{ {} }}", parts.join(", ")));
        }
      }
    }
  }

  fn collect_bound_names<'p>(&'p self, out: &mut Vec<&'p str>) {
    match self {
      Pat::Id(id) => out.push(&id.stx.name),
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter().flatten() {
          elem.stx.target.stx.collect_bound_names(out);
        }
        if let Some(rest) = &arr.stx.rest {
          rest.stx.collect_bound_names(out);
        }
      }
      Pat::Obj(obj) => {
        for prop in obj.stx.properties.iter() {
          prop.stx.target.stx.collect_bound_names(out);
        }
        if let Some(rest) = &obj.stx.rest {
          out.push(&rest.stx.name);
        }
      }
    }
  }
}
