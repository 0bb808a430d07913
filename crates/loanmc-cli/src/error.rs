//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A flag cannot be applied to the configured portfolio.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `--scenario` matched nothing.
    #[error("No stress scenario named '{0}'. Run `loanmc config scenarios` to list them.")]
    UnknownScenario(String),

    /// Refusing to overwrite a file.
    #[error("{} already exists. Use --force to overwrite.", .0.display())]
    FileExists(PathBuf),

    /// No location to write the default config to.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
