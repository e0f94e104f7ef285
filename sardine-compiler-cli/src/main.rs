mod config;

use ahash::AHashSet;
use anyhow::bail;
use anyhow::Context;
use clap::Parser;
use config::Config;
use config::GenServices;
use sardine_compiler::gather_file;
use sardine_compiler::registry::read_descriptor;
use sardine_compiler::registry::write_descriptor;
use sardine_compiler::transform;
use sardine_compiler::CompileError;
use sardine_compiler::CompileResult;
use sardine_compiler::GatherOptions;
use sardine_compiler::LineSink;
use sardine_compiler::ModuleContext;
use sardine_compiler::ModuleText;
use sardine_compiler::ServiceDescriptorFile;
use sardine_compiler::ServiceRegistry;
use sardine_compiler::TransformOptions;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const DEFAULT_SERVICES_FILE: &str = "./sardines-local-services.json";
const ARCHIVE_SUFFIX: &str = ".sardine";

#[derive(Parser)]
#[command(
  name = "sardine-compiler",
  version,
  about = "Compiles exported TypeScript functions into RPC proxy modules"
)]
struct Cli {
  /// Files or directories to compile; defaults to the configured source root.
  paths: Vec<PathBuf>,

  /// Log everything.
  #[arg(long)]
  verbose: bool,

  /// Print generated modules on stdout.
  #[arg(long)]
  print: bool,

  /// Validate the source files without compiling them; stops at the first error.
  #[arg(long)]
  only_validate: bool,

  /// Compile, halting at the first error.
  #[arg(long)]
  validate: bool,

  /// Compile files even if they have been compiled before.
  #[arg(long)]
  recompile: bool,

  /// Restore compiled files to their original source.
  #[arg(long, visible_alias = "undo")]
  reverse: bool,

  /// Write the service descriptor file.
  #[arg(
    long,
    value_name = "FILE",
    num_args = 0..=1,
    require_equals = true,
    default_missing_value = DEFAULT_SERVICES_FILE
  )]
  gen_services: Option<PathBuf>,

  /// Application the generated services belong to.
  #[arg(long)]
  application: Option<String>,

  /// Project config file (JSON).
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Globally available type that parameter types may use without importing it.
  #[arg(long = "ambient-type", value_name = "NAME")]
  ambient_types: Vec<String>,

  /// Module that provides the `Core` runtime binding.
  #[arg(long, value_name = "NAME")]
  runtime_module: Option<String>,
}

/// CLI flags merged over the config file.
struct Settings {
  application: Option<String>,
  paths: Vec<PathBuf>,
  gen_services: Option<PathBuf>,
  gather: GatherOptions,
  transform: TransformOptions,
}

impl Settings {
  fn resolve(cli: &Cli) -> anyhow::Result<Settings> {
    let config = cli.config.as_deref().map(Config::read).transpose()?;
    let mut gather = GatherOptions::default();
    let mut transform = TransformOptions::default();
    let mut gen_services = cli.gen_services.clone();
    let mut paths = cli.paths.clone();
    let mut application = cli.application.clone();
    if let Some(config) = config {
      gather.ambient_types = config.ambient_types;
      if let Some(runtime_module) = config.runtime_module {
        transform.runtime_module = runtime_module;
      }
      if gen_services.is_none() {
        gen_services = match config.gen_services {
          Some(GenServices::Enabled(true)) => Some(PathBuf::from(DEFAULT_SERVICES_FILE)),
          Some(GenServices::Path(path)) => Some(path),
          Some(GenServices::Enabled(false)) | None => None,
        };
      }
      if paths.is_empty() {
        paths.push(config.src_root_dir);
      }
      application = application.or(Some(config.application));
    }
    gather.ambient_types.extend(cli.ambient_types.iter().cloned());
    if let Some(runtime_module) = &cli.runtime_module {
      transform.runtime_module = runtime_module.clone();
    }
    Ok(Settings {
      application,
      paths,
      gen_services,
      gather,
      transform,
    })
  }
}

/// The files involved in compiling one module: `dir/name.ts` is archived to
/// `dir/name.sardine.ts`, and generated into `dir/name.sardine.tmp` first.
struct ModuleFiles {
  source: PathBuf,
  archive: PathBuf,
  intermediate: PathBuf,
  base_name: String,
}

impl ModuleFiles {
  fn of(path: &Path) -> CompileResult<ModuleFiles> {
    let file = path.display().to_string();
    let extension = path
      .extension()
      .and_then(|e| e.to_str())
      .unwrap_or_default();
    if !extension.eq_ignore_ascii_case("ts") {
      return Err(CompileError::UnsupportedFileType {
        extension: extension.to_string(),
        file,
      });
    }
    let stem = path
      .file_stem()
      .and_then(|s| s.to_str())
      .ok_or_else(|| CompileError::io(file.as_str(), io::ErrorKind::InvalidInput.into()))?;
    // An archive stands for the module it was archived from.
    let base_name = stem.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(stem);
    let dir = path.parent().unwrap_or(Path::new(""));
    Ok(ModuleFiles {
      source: dir.join(format!("{base_name}.{extension}")),
      archive: dir.join(format!("{base_name}{ARCHIVE_SUFFIX}.{extension}")),
      intermediate: dir.join(format!("{base_name}{ARCHIVE_SUFFIX}.tmp")),
      base_name: base_name.to_string(),
    })
  }
}

/// Writes generated lines to a file, truncating it on the first line.
struct FileSink {
  path: PathBuf,
  out: Option<BufWriter<File>>,
}

impl FileSink {
  fn new(path: PathBuf) -> FileSink {
    FileSink { path, out: None }
  }

  fn flush(&mut self) -> io::Result<()> {
    match self.out.as_mut() {
      Some(out) => out.flush(),
      None => Ok(()),
    }
  }
}

impl LineSink for FileSink {
  fn emit(&mut self, line: &str, index: usize) -> io::Result<()> {
    if index == 0 {
      self.out = None;
    }
    if self.out.is_none() {
      self.out = Some(BufWriter::new(File::create(&self.path)?));
    }
    if let Some(out) = self.out.as_mut() {
      writeln!(out, "{line}")?;
    }
    Ok(())
  }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
  match fs::remove_file(path) {
    Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
    _ => Ok(()),
  }
}

struct Compiler<'a> {
  cli: &'a Cli,
  settings: &'a Settings,
  application: &'a str,
  registry: Option<ServiceRegistry>,
  seen: AHashSet<PathBuf>,
}

impl Compiler<'_> {
  fn process_file(&mut self, path: &Path) -> CompileResult<()> {
    let files = ModuleFiles::of(path)?;
    if !self.seen.insert(files.source.clone()) {
      return Ok(());
    }
    let source_name = files.source.display().to_string();
    if files.archive.exists() {
      if !(self.cli.recompile || self.cli.reverse) {
        info!(file = %source_name, "already compiled, skipping");
        return Ok(());
      }
      fs::rename(&files.archive, &files.source)
        .map_err(|err| CompileError::io(source_name.as_str(), err))?;
      info!(file = %source_name, "restored original source");
    }
    if self.cli.reverse {
      return Ok(());
    }
    self.compile(&files, &source_name)
  }

  fn compile(&mut self, files: &ModuleFiles, source_name: &str) -> CompileResult<()> {
    let gathered = gather_file(&files.source, &self.settings.gather)?;
    let archived_module = format!("{}{ARCHIVE_SUFFIX}", files.base_name);
    let ctx = ModuleContext {
      application: self.application,
      file_base_name: &files.base_name,
      archived_module: &archived_module,
      source_file_path: source_name,
    };

    let mut text = ModuleText::new();
    let mut file_sink = (!self.cli.only_validate).then(|| FileSink::new(files.intermediate.clone()));
    let result = {
      let mut sink = |line: &str, index: usize| -> io::Result<()> {
        if let Some(file_sink) = file_sink.as_mut() {
          file_sink.emit(line, index)?;
        }
        text.emit(line, index)
      };
      transform(&ctx, &gathered, &self.settings.transform, &mut sink)
    };
    let result = result.and_then(|services| {
      if let Some(mut file_sink) = file_sink.take() {
        file_sink
          .flush()
          .map_err(|source| CompileError::Emit {
            file: source_name.to_string(),
            source,
          })?;
        if !text.is_empty() {
          self.swap_in(files, source_name)?;
        }
      }
      Ok(services)
    });
    // Never leave the intermediate file behind, whatever happened.
    if let Err(err) = remove_if_exists(&files.intermediate) {
      warn!(file = %files.intermediate.display(), "failed to remove intermediate file: {err}");
    }
    let services = result?;

    if self.cli.print && !text.is_empty() {
      print!("{text}");
    }
    info!(
      file = %source_name,
      services = services.len(),
      lines = text.lines().len(),
      "compiled"
    );
    if let Some(registry) = self.registry.as_mut() {
      registry.extend(services);
    }
    Ok(())
  }

  // source -> archive, then intermediate -> source.
  fn swap_in(&self, files: &ModuleFiles, source_name: &str) -> CompileResult<()> {
    let io_err = |err| CompileError::io(source_name, err);
    fs::rename(&files.source, &files.archive).map_err(io_err)?;
    if let Err(err) = fs::rename(&files.intermediate, &files.source) {
      if let Err(restore_err) = fs::rename(&files.archive, &files.source) {
        error!(file = %source_name, "failed to restore archived source: {restore_err}");
      }
      return Err(io_err(err));
    }
    Ok(())
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .try_init();
}

/// Expands directories into the files below them, in file name order.
fn target_files(target: &Path) -> Vec<CompileResult<PathBuf>> {
  if !target.is_dir() {
    return vec![Ok(target.to_path_buf())];
  }
  WalkDir::new(target)
    .sort_by_file_name()
    .into_iter()
    .filter_map(|entry| match entry {
      Ok(entry) if entry.file_type().is_file() => {
        let path = entry.into_path();
        // Declarations have no implementation to proxy to.
        if path.to_string_lossy().ends_with(".d.ts") {
          debug!(file = %path.display(), "skipping declaration file");
          return None;
        }
        Some(Ok(path))
      }
      Ok(_) => None,
      Err(err) => {
        let file = err
          .path()
          .map_or_else(|| target.display().to_string(), |p| p.display().to_string());
        Some(Err(CompileError::io(file, err.into())))
      }
    })
    .collect()
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
  let settings = Settings::resolve(cli)?;
  if settings.paths.is_empty() {
    bail!("nothing to compile; pass paths or a config file with srcRootDir");
  }
  let application = match (&settings.application, cli.reverse) {
    (Some(application), _) => application.as_str(),
    (None, true) => "",
    (None, false) => bail!("application name is missing; pass --application or --config"),
  };
  let halt_on_error = cli.validate || cli.only_validate;
  let mut failures = 0usize;

  let mut descriptor = ServiceDescriptorFile::default();
  let mut registry = None;
  if let Some(path) = &settings.gen_services {
    match read_descriptor(path) {
      Ok(existing) => {
        let mut seeded = ServiceRegistry::new();
        if let Some(existing) = existing {
          descriptor = existing;
          seeded.seed(descriptor.services.drain(..));
        }
        registry = Some(seeded);
      }
      Err(err) => {
        error!("{err}");
        failures += 1;
      }
    }
  }

  let mut compiler = Compiler {
    cli,
    settings: &settings,
    application,
    registry,
    seen: AHashSet::new(),
  };
  'targets: for target in settings.paths.iter() {
    for file in target_files(target) {
      if let Err(err) = file.and_then(|file| compiler.process_file(&file)) {
        error!("{err}");
        failures += 1;
        if halt_on_error {
          break 'targets;
        }
      }
    }
  }

  match (compiler.registry, &settings.gen_services) {
    (Some(registry), Some(path)) if failures == 0 && !cli.only_validate && !cli.reverse => {
      if let Some(application) = &settings.application {
        descriptor.application = Some(application.clone());
      }
      descriptor.services = registry.into_services();
      write_descriptor(path, &descriptor)
        .with_context(|| format!("failed to write service descriptor {}", path.display()))?;
      info!(
        file = %path.display(),
        services = descriptor.services.len(),
        "wrote service descriptor"
      );
    }
    (_, Some(path)) => {
      warn!(file = %path.display(), "service descriptor not written");
    }
    _ => {}
  };
  Ok(failures == 0)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  match run(&cli) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(err) => {
      error!("{err:#}");
      ExitCode::FAILURE
    }
  }
}
