use crate::err::CompileError;
use crate::err::CompileResult;
use crate::gather::GatheredExports;
use crate::options::TransformOptions;
use crate::record::IdentifierRecord;
use crate::record::Parameter;
use crate::service::gen_service;
use crate::service::ServiceRecord;
use indexmap::IndexMap;
use std::fmt;
use std::io;
use tracing::debug;

/// Receives generated lines, without terminators, in order.
///
/// Index 0 starts a new module and must replace anything previously written to the destination;
/// every later index appends.
pub trait LineSink {
  fn emit(&mut self, line: &str, index: usize) -> io::Result<()>;
}

impl<F> LineSink for F
where
  F: FnMut(&str, usize) -> io::Result<()>,
{
  fn emit(&mut self, line: &str, index: usize) -> io::Result<()> {
    self(line, index)
  }
}

/// Generated module text held in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleText {
  lines: Vec<String>,
}

impl ModuleText {
  pub fn new() -> ModuleText {
    ModuleText::default()
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }
}

impl LineSink for ModuleText {
  fn emit(&mut self, line: &str, index: usize) -> io::Result<()> {
    if index == 0 {
      self.lines.clear();
    }
    self.lines.push(line.to_string());
    Ok(())
  }
}

impl fmt::Display for ModuleText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for line in self.lines.iter() {
      writeln!(f, "{line}")?;
    }
    Ok(())
  }
}

/// Where the module being transformed lives and what it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct ModuleContext<'a> {
  pub application: &'a str,
  /// File name without directory and extension, e.g. `index`.
  pub file_base_name: &'a str,
  /// File name the original module is archived under, relative to the generated module and
  /// without extension, e.g. `index.sardine`.
  pub archived_module: &'a str,
  pub source_file_path: &'a str,
}

/// Whether generating the module requires the `origin` and `Core` imports, i.e. whether any
/// identifier becomes a proxy instead of a plain re-export.
pub fn needs_runtime_imports(identifiers: &IndexMap<String, IdentifierRecord>) -> bool {
  identifiers
    .values()
    .any(|record| !record.kind.is_directly_exportable())
}

struct Emitter<'s, S: LineSink + ?Sized> {
  sink: &'s mut S,
  file: &'s str,
  index: usize,
}

impl<S: LineSink + ?Sized> Emitter<'_, S> {
  fn line(&mut self, line: &str) -> CompileResult<()> {
    self
      .sink
      .emit(line, self.index)
      .map_err(|source| CompileError::Emit {
        file: self.file.to_string(),
        source,
      })?;
    self.index += 1;
    Ok(())
  }
}

/// Generates the proxy module for `gathered` into `sink`, returning the services it exposes.
///
/// Type references are resolved before anything is emitted, so a module with an unresolved type
/// produces no output.
pub fn transform<S: LineSink + ?Sized>(
  ctx: &ModuleContext<'_>,
  gathered: &GatheredExports,
  options: &TransformOptions,
  sink: &mut S,
) -> CompileResult<Vec<ServiceRecord>> {
  let archived = format!("'./{}'", ctx.archived_module);
  let type_imports = type_imports(ctx, gathered, &archived)?;

  let mut out = Emitter {
    sink,
    file: ctx.source_file_path,
    index: 0,
  };
  if needs_runtime_imports(&gathered.identifiers) {
    out.line(&format!("import * as origin from {archived}"))?;
    out.line(&format!(
      "import {{ Core }} from '{}'",
      options.runtime_module
    ))?;
  }
  for line in type_imports.iter() {
    out.line(line)?;
  }
  for edge in gathered.reexports.iter() {
    out.line(&edge.statement())?;
  }

  let mut services = Vec::new();
  for record in gathered.identifiers.values() {
    if record.kind.is_directly_exportable() {
      out.line(&format!("export {{ {} }} from {archived}", record.name))?;
      continue;
    }
    let service = gen_service(record, ctx.file_base_name, ctx.source_file_path);
    if out.index > 0 {
      out.line("")?;
    }
    for line in proxy(ctx.application, record, &service) {
      out.line(&line)?;
    }
    debug!(service = %service.identity(), is_async = service.is_async, "generated proxy");
    services.push(service);
  }
  Ok(services)
}

fn type_imports(
  ctx: &ModuleContext<'_>,
  gathered: &GatheredExports,
  archived: &str,
) -> CompileResult<Vec<String>> {
  gathered
    .referenced_types
    .iter()
    .map(|name| {
      if gathered.identifiers.contains_key(name) {
        return Ok(format!("import {{ {name} }} from {archived}"));
      }
      gathered
        .imports
        .iter()
        .find(|edge| edge.binding() == name)
        .map(|edge| edge.statement())
        .ok_or_else(|| CompileError::UnresolvedTypeReference {
          name: name.clone(),
          file: ctx.source_file_path.to_string(),
        })
    })
    .collect()
}

fn proxy(application: &str, record: &IdentifierRecord, service: &ServiceRecord) -> Vec<String> {
  let name = &service.name;
  let module = &service.module;
  let params = record.parameters();
  let declared = params
    .iter()
    .map(|p| p.text.as_str())
    .collect::<Vec<_>>()
    .join(", ");
  let forwarded = params
    .iter()
    .map(Parameter::forwarded)
    .collect::<Vec<_>>()
    .join(", ");
  let invoke_args = if forwarded.is_empty() {
    String::new()
  } else {
    format!(", {forwarded}")
  };
  let async_ = if record.is_async { "async " } else { "" };
  let type_parameters = record.type_parameters.as_deref().unwrap_or("");
  let identity = [
    format!("application: '{application}',"),
    format!("module: '{module}',"),
    format!("name: '{name}',"),
    "version: '*'".to_string(),
  ];

  let mut lines = vec![
    format!("export const {name} = {async_}{type_parameters}({declared}) => {{"),
    format!("  if (Core.isRemote('{application}', '{module}', '{name}', '*')) {{"),
  ];
  if record.is_async {
    lines.push("    return await Core.invoke({".to_string());
    lines.extend(identity.iter().map(|l| format!("      {l}")));
    lines.push(format!("    }}{invoke_args})"));
    lines.push("  } else {".to_string());
    lines.push(format!("    return await origin.{name}({forwarded})"));
  } else {
    lines.push("    return new Promise((resolve, reject) => {".to_string());
    lines.push("      Core.invoke({".to_string());
    lines.extend(identity.iter().map(|l| format!("        {l}")));
    lines.push(format!(
      "      }}{invoke_args}).then(res => resolve(res)).catch(e => reject(e))"
    ));
    lines.push("    })".to_string());
    lines.push("  } else {".to_string());
    lines.push(format!("    return origin.{name}({forwarded})"));
  }
  lines.push("  }".to_string());
  lines.push("}".to_string());
  lines
}
