use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SRC_ROOT_DIR: &str = "./src";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("config file {0} does not exist")]
  NotFound(PathBuf),
  #[error("config file {0} is not a regular file")]
  NotAFile(PathBuf),
  #[error("config file {0} must be a .json file")]
  NotJson(PathBuf),
  #[error("failed to read config file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("config file {path} is broken: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("config file {0} is empty")]
  Empty(PathBuf),
  #[error("application name is missing in config file {0}")]
  MissingApplication(PathBuf),
}

/// Whether and where to write the service descriptor; `true` selects the default location.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenServices {
  Enabled(bool),
  Path(PathBuf),
}

/// The project config file. Keys other than these are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
  pub application: String,
  #[serde(default = "default_src_root_dir")]
  pub src_root_dir: PathBuf,
  #[serde(default)]
  pub runtime_module: Option<String>,
  #[serde(default)]
  pub ambient_types: Vec<String>,
  #[serde(default)]
  pub gen_services: Option<GenServices>,
}

fn default_src_root_dir() -> PathBuf {
  PathBuf::from(DEFAULT_SRC_ROOT_DIR)
}

impl Config {
  pub fn read(path: &Path) -> Result<Config, ConfigError> {
    let meta = match fs::symlink_metadata(path) {
      Ok(meta) => meta,
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        return Err(ConfigError::NotFound(path.to_path_buf()));
      }
      Err(source) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source,
        })
      }
    };
    if !meta.is_file() {
      return Err(ConfigError::NotAFile(path.to_path_buf()));
    }
    let is_json = path
      .extension()
      .and_then(|e| e.to_str())
      .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
      return Err(ConfigError::NotJson(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let parse_err = |source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    };
    let value: Value = serde_json::from_str(&raw).map_err(parse_err)?;
    match &value {
      Value::Null => return Err(ConfigError::Empty(path.to_path_buf())),
      Value::Object(map) if map.is_empty() => return Err(ConfigError::Empty(path.to_path_buf())),
      Value::Object(map) if !map.get("application").is_some_and(|a| a.is_string()) => {
        return Err(ConfigError::MissingApplication(path.to_path_buf()));
      }
      _ => {}
    };
    serde_json::from_value(value).map_err(parse_err)
  }
}
