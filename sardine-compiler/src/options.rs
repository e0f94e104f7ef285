/// Type names that parameter types may use without importing them.
pub const BUILT_IN_TYPES: &[&str] = &[
  "Promise",
  "Map",
  "Array",
  "Set",
  "void",
  "any",
  "null",
  "undefined",
  "object",
  "number",
  "string",
  "boolean",
];

pub const DEFAULT_RUNTIME_MODULE: &str = "sardines-core";

#[derive(Clone, Debug, Default)]
pub struct GatherOptions {
  /// Additional globally available type names, such as `Date` or `Buffer`, that parameter types
  /// may mention without importing them.
  pub ambient_types: Vec<String>,
}

impl GatherOptions {
  pub fn is_built_in(&self, name: &str) -> bool {
    BUILT_IN_TYPES.contains(&name) || self.ambient_types.iter().any(|t| t == name)
  }
}

#[derive(Clone, Debug)]
pub struct TransformOptions {
  /// Module that provides the `Core` runtime binding used by proxies.
  pub runtime_module: String,
}

impl Default for TransformOptions {
  fn default() -> Self {
    TransformOptions {
      runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
    }
  }
}
