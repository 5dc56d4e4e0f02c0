//! Build pipeline stages
//!
//! ```text
//! compile  → build/{version}/{os}_{arch}/
//! package  → pkg/{version}/{os}_{arch}_{version}.zip
//! ```
//!
//! - `compile` - cross-compiler invocation
//! - `archive` - per-target zip writing
//! - `package` - concurrent fan-out over all targets

pub mod archive;
pub mod compile;
pub mod package;

pub use compile::{compile, CompileOptions, PlatformFilters};
pub use package::{package, PackageOptions};
