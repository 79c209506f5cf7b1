//! # crontap-tabfile
//!
//! Loads job definitions from files: classic crontab text or a YAML
//! list, picked by file extension.
//!
//! ## Features
//!
//! - Crontab lines with five fields, six fields, or `@shorthand` specs
//! - YAML job lists (`- spec: ...` / `cmd: ...`)
//! - Shape errors only: spec grammar is validated where jobs are created

pub mod crontab;
pub mod entry;
pub mod error;
pub mod loader;
pub mod yaml;

pub use entry::JobEntry;
pub use error::TabError;
pub use loader::load_path;
