//! Error types for job definition loading.

use thiserror::Error;

/// Errors raised while loading job definitions from a file.
#[derive(Debug, Error)]
pub enum TabError {
    /// The source file could not be read.
    #[error("Failed to read source file: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML source did not deserialize into a list of entries.
    #[error("Failed to parse YAML source: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// A crontab line was too short to hold a spec and a command.
    #[error("Malformed crontab entry at line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}
