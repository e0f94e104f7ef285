use sardine_parse::error::SyntaxError;
use std::io;
use thiserror::Error;

/// Errors that abort the compilation of one file. Every variant names the file it concerns.
#[derive(Debug, Error)]
pub enum CompileError {
  #[error("{file}:{line}:{col}: {source}")]
  Syntax {
    file: String,
    line: usize,
    col: usize,
    #[source]
    source: SyntaxError,
  },

  /// Two top-level declarations in one file share a name.
  #[error("duplicated identifier `{name}` in {file}")]
  DuplicateIdentifier { name: String, file: String },

  /// An exported declaration of a kind that can be neither proxied nor re-exported.
  #[error("illegal export type {kind} for `{name}` in {file}")]
  IllegalExportType {
    name: String,
    kind: &'static str,
    file: String,
  },

  #[error("default exports are not supported ({file})")]
  UnsupportedDefaultExport { file: String },

  /// A parameter type is neither declared in the file nor imported into it.
  #[error("type reference `{name}` needs to be exported in source file {file}")]
  UnresolvedTypeReference { name: String, file: String },

  #[error("unsupported file type `{extension}` for file {file}")]
  UnsupportedFileType { extension: String, file: String },

  #[error("{file}: {source}")]
  Io {
    file: String,
    #[source]
    source: io::Error,
  },

  /// The line sink rejected a generated line.
  #[error("failed to emit generated code for {file}: {source}")]
  Emit {
    file: String,
    #[source]
    source: io::Error,
  },

  /// The service descriptor file exists but is not valid.
  #[error("invalid service descriptor file {file}: {source}")]
  Descriptor {
    file: String,
    #[source]
    source: serde_json::Error,
  },
}

impl CompileError {
  pub fn syntax(file: &str, source_text: &str, source: SyntaxError) -> CompileError {
    let (line, col) = source.line_col(source_text);
    CompileError::Syntax {
      file: file.to_string(),
      line,
      col,
      source,
    }
  }

  pub fn io(file: impl Into<String>, source: io::Error) -> CompileError {
    CompileError::Io {
      file: file.into(),
      source,
    }
  }
}

pub type CompileResult<T> = Result<T, CompileError>;
