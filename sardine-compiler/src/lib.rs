//! Compiles the exported declarations of TypeScript modules into proxy modules.
//!
//! Each exported function becomes a wrapper that asks the `Core` runtime whether the service runs
//! remotely, and either dispatches the call through `Core.invoke` or calls the original
//! implementation, which is kept in an archived copy of the module. Exported types, enums and
//! values without call semantics are re-exported from the archived module unchanged.
//!
//! The pipeline for one file is [`gather_exports`] followed by [`transform`], which also returns
//! the [`ServiceRecord`]s that a [`ServiceRegistry`] aggregates across a project.

pub mod err;
pub mod gather;
pub mod options;
pub mod record;
pub mod registry;
pub mod service;
pub mod transform;

pub use err::CompileError;
pub use err::CompileResult;
pub use gather::gather_exports;
pub use gather::gather_file;
pub use gather::GatheredExports;
pub use options::GatherOptions;
pub use options::TransformOptions;
pub use registry::ServiceDescriptorFile;
pub use registry::ServiceRegistry;
pub use service::gen_service;
pub use service::service_name;
pub use service::ServiceRecord;
pub use transform::transform;
pub use transform::LineSink;
pub use transform::ModuleContext;
pub use transform::ModuleText;
