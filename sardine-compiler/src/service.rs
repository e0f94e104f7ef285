use crate::record::IdentifierRecord;
use serde::Deserialize;
use serde::Serialize;

/// One argument of a service, split out of the parameter's declaration text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub r#type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub default: Option<String>,
}

fn any_type() -> String {
  "any".to_string()
}

/// A service exposed through a proxy, as recorded in the service descriptor file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
  pub name: String,
  pub module: String,
  #[serde(default)]
  pub arguments: Vec<Argument>,
  #[serde(default = "any_type")]
  pub return_type: String,
  #[serde(default)]
  pub is_async: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filepath: Option<String>,
}

impl ServiceRecord {
  /// `module:name`, unique across a registry.
  pub fn identity(&self) -> String {
    format!("{}:{}", self.module, self.name)
  }
}

pub fn service_name(service: &ServiceRecord) -> String {
  service.identity()
}

/// Builds the service record for a callable declared in `source_file_path`, a file whose name
/// without extension is `file_base_name`.
pub fn gen_service(
  record: &IdentifierRecord,
  file_base_name: &str,
  source_file_path: &str,
) -> ServiceRecord {
  ServiceRecord {
    name: record.name.clone(),
    module: module_path(file_base_name, source_file_path),
    arguments: record
      .parameters()
      .iter()
      .map(|p| split_argument(&p.text))
      .collect(),
    return_type: record.return_type.clone(),
    is_async: record.is_async,
    filepath: Some(normalize_filepath(source_file_path)),
  }
}

/// The module a file's services belong to.
///
/// `src/foo/bar/index.ts` is `/foo/bar` and `src/foo/bar/baz.ts` is `/foo/bar/baz`. Everything up
/// to and including the first `/src/` segment is dropped.
pub fn module_path(file_base_name: &str, source_file_path: &str) -> String {
  let path = source_file_path.trim_start_matches("./");
  let dir = match path.rfind('/') {
    Some(i) => &path[..i],
    None => "",
  };
  let mut module = if file_base_name == "index" {
    dir.to_string()
  } else if dir.is_empty() {
    file_base_name.to_string()
  } else {
    format!("{dir}/{file_base_name}")
  };
  if !module.starts_with('/') {
    module.insert(0, '/');
  }
  let lower = module.to_ascii_lowercase();
  if lower == "/src" {
    return "/".to_string();
  }
  match lower.find("/src/") {
    // ASCII lowercasing keeps byte offsets.
    Some(i) => module[i + "/src".len()..].to_string(),
    None => module,
  }
}

/// The source path relative to the source root.
pub fn normalize_filepath(source_file_path: &str) -> String {
  let mut rest = source_file_path;
  for prefix in ["./src", "/src", "src"] {
    if let Some(stripped) = rest.strip_prefix(prefix) {
      if stripped.is_empty() || stripped.starts_with('/') {
        rest = stripped;
        break;
      }
    }
  }
  if rest.is_empty() {
    "/".to_string()
  } else {
    rest.to_string()
  }
}

/// Splits `name: type = default` after removing all whitespace. A `:` or `=` inside the type or
/// the default is taken as the separator all the same.
pub fn split_argument(text: &str) -> Argument {
  let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
  let (param, default) = match compact.split_once('=') {
    Some((param, default)) => (param, Some(default)),
    None => (compact.as_str(), None),
  };
  let (name, r#type) = match param.split_once(':') {
    Some((name, r#type)) => (name, Some(r#type.to_string())),
    None => (param, None),
  };
  Argument {
    name: name.to_string(),
    r#type,
    default: default.filter(|d| !d.is_empty()).map(str::to_string),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_module_path() {
    assert_eq!(module_path("index", "src/foo/bar/index.ts"), "/foo/bar");
    assert_eq!(module_path("baz", "src/foo/bar/baz.ts"), "/foo/bar/baz");
    assert_eq!(module_path("index", "src/index.ts"), "/");
    assert_eq!(module_path("index", "./src/index.ts"), "/");
    assert_eq!(module_path("bar", "bar.ts"), "/bar");
    assert_eq!(module_path("bar", "./bar.ts"), "/bar");
    assert_eq!(module_path("m", "/home/me/app/SRC/api/m.ts"), "/api/m");
    assert_eq!(module_path("m", "lib/api/m.ts"), "/lib/api/m");
    assert_eq!(module_path("m", "/home/src/app/src/api/m.ts"), "/app/src/api/m");
    assert_eq!(module_path("index", "src/app/src/index.ts"), "/app/src");
  }

  #[test]
  fn test_normalize_filepath() {
    assert_eq!(normalize_filepath("src/foo/bar.ts"), "/foo/bar.ts");
    assert_eq!(normalize_filepath("./src/foo.ts"), "/foo.ts");
    assert_eq!(normalize_filepath("/src/foo.ts"), "/foo.ts");
    assert_eq!(normalize_filepath("src"), "/");
    assert_eq!(normalize_filepath("srcfoo/x.ts"), "srcfoo/x.ts");
    assert_eq!(normalize_filepath("lib/x.ts"), "lib/x.ts");
  }

  #[test]
  fn test_split_argument() {
    assert_eq!(split_argument("a: number"), Argument {
      name: "a".to_string(),
      r#type: Some("number".to_string()),
      default: None,
    });
    assert_eq!(split_argument("b = 2"), Argument {
      name: "b".to_string(),
      r#type: None,
      default: Some("2".to_string()),
    });
    assert_eq!(split_argument("c: Map<string, number> = new Map()"), Argument {
      name: "c".to_string(),
      r#type: Some("Map<string,number>".to_string()),
      default: Some("newMap()".to_string()),
    });
    assert_eq!(split_argument("...rest: string[]").name, "...rest");
  }

  #[test]
  fn test_service_record_json() {
    let service = ServiceRecord {
      name: "f".to_string(),
      module: "/m".to_string(),
      arguments: vec![split_argument("a: number")],
      return_type: "string".to_string(),
      is_async: true,
      filepath: Some("/m.ts".to_string()),
    };
    assert_eq!(
      serde_json::to_value(&service).unwrap(),
      serde_json::json!({
        "name": "f",
        "module": "/m",
        "arguments": [{ "name": "a", "type": "number" }],
        "returnType": "string",
        "isAsync": true,
        "filepath": "/m.ts",
      })
    );
    let parsed: ServiceRecord =
      serde_json::from_str(r#"{ "name": "g", "module": "/n" }"#).unwrap();
    assert_eq!(parsed.return_type, "any");
    assert_eq!(service_name(&parsed), "/n:g");
  }
}
