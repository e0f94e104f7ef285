use crate::err::CompileError;
use crate::err::CompileResult;
use crate::service::ServiceRecord;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Map;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

/// The persisted service descriptor: `{ "application": ..., "services": [...] }`.
///
/// Keys this crate doesn't know about are kept as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptorFile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub application: Option<String>,
  #[serde(default)]
  pub services: Vec<ServiceRecord>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Services of a whole project, keyed by [`ServiceRecord::identity`].
#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
  services: IndexMap<String, ServiceRecord>,
}

impl ServiceRegistry {
  pub fn new() -> ServiceRegistry {
    ServiceRegistry::default()
  }

  /// Adds previously persisted services. Of several records with one identity, the first is
  /// kept, and none of them replace a record already present.
  pub fn seed<I: IntoIterator<Item = ServiceRecord>>(&mut self, services: I) {
    for service in services {
      self.services.entry(service.identity()).or_insert(service);
    }
  }

  /// Adds a freshly generated service, replacing any record with the same identity in place.
  pub fn insert(&mut self, service: ServiceRecord) -> Option<ServiceRecord> {
    self.services.insert(service.identity(), service)
  }

  pub fn get(&self, identity: &str) -> Option<&ServiceRecord> {
    self.services.get(identity)
  }

  pub fn len(&self) -> usize {
    self.services.len()
  }

  pub fn is_empty(&self) -> bool {
    self.services.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ServiceRecord> {
    self.services.values()
  }

  pub fn into_services(self) -> Vec<ServiceRecord> {
    self.services.into_values().collect()
  }
}

impl Extend<ServiceRecord> for ServiceRegistry {
  fn extend<I: IntoIterator<Item = ServiceRecord>>(&mut self, services: I) {
    for service in services {
      self.insert(service);
    }
  }
}

/// Loads a descriptor file, or `None` if there is none at `path`.
pub fn read_descriptor(path: &Path) -> CompileResult<Option<ServiceDescriptorFile>> {
  let file = path.display().to_string();
  let raw = match fs::read_to_string(path) {
    Ok(raw) => raw,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(err) => return Err(CompileError::io(file, err)),
  };
  serde_json::from_str(&raw)
    .map(Some)
    .map_err(|source| CompileError::Descriptor { file, source })
}

/// Writes `descriptor` as JSON indented by four spaces.
pub fn write_descriptor(path: &Path, descriptor: &ServiceDescriptorFile) -> CompileResult<()> {
  let file = path.display().to_string();
  let mut out = Vec::new();
  let formatter = PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
  descriptor
    .serialize(&mut ser)
    .map_err(|source| CompileError::Descriptor {
      file: file.clone(),
      source,
    })?;
  out.push(b'\n');
  fs::write(path, out).map_err(|err| CompileError::io(file, err))
}
