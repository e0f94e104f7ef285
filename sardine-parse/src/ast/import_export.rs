use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportName {
  pub type_only: bool, // import { type Foo }
  pub importable: String,
  // This is always set, even when no explicit alias is provided.
  pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImportNames {
  // `import * as name`
  All(String),
  // `import {a as b, c, default as e}`
  Specific(Vec<ImportName>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportName {
  pub type_only: bool, // export { type Foo }
  pub exportable: String,
  // This is always set, even when no explicit alias is provided.
  pub alias: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExportNames {
  // `export * from "module"`
  // `export * as name from "module"`
  All(Option<String>),
  // `export {a as default, b as c, d}`
  // `export {default, a as b, c} from "module"`
  Specific(Vec<ExportName>),
}
