use std::path::PathBuf;

/// All domain errors for createconfig.
///
/// Each variant carries the paths involved so the message is enough to
/// diagnose the problem from the terminal.
#[derive(Debug, thiserror::Error)]
pub enum CreateConfigError {
    #[error(
        "Environment name is empty\n\n  \
         Pass a non-empty name: createconfig -e <environment name>"
    )]
    EmptyEnvironment,

    #[error(
        "Directory not found: {path}\n\n  \
         Check that the path passed to --dir exists and is a directory."
    )]
    DirectoryNotFound { path: PathBuf },

    #[error(
        "Failed to copy {from} to {to}: {source}\n\n  \
         Files materialized before this one were kept.\n  \
         Fix the cause and run the same command again; existing files are skipped."
    )]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Invalid configuration: {detail}\n\n  \
         Expected format in createconfig.toml:\n    \
         [materialize]\n    \
         names = [\"config\", \"redis\"]\n    \
         extension = \"yaml\""
    )]
    InvalidConfig { detail: String },

    #[error("Failed to read configuration {path}: {source}")]
    ConfigReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CreateConfigError>;
