//! Error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A required element of a dropdown container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownPart {
    Trigger,
    Panel,
    OptionsList,
    Display,
}

impl fmt::Display for DropdownPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DropdownPart::Trigger => "trigger",
            DropdownPart::Panel => "panel",
            DropdownPart::OptionsList => "options list",
            DropdownPart::Display => "display text",
        };
        f.write_str(name)
    }
}

/// Binding a dropdown to page markup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("dropdown container `{0}` not found")]
    ContainerNotFound(String),

    #[error("dropdown container `{container}` has no {part}")]
    MissingPart {
        container: String,
        part: DropdownPart,
    },
}

/// Loading the application config failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetching option data failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unknown resource `{0}`")]
    UnknownResource(String),

    #[error("resource `{resource}` did not return a list of records")]
    UnexpectedShape { resource: String },
}
