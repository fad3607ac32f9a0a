use super::config::ConfigError;
use crate::core::io::xyz::XyzError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read structure from '{path}': {source}", path = path.display())]
    StructureRead {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error("Failed to write structure to '{path}': {source}", path = path.display())]
    StructureWrite {
        path: PathBuf,
        #[source]
        source: XyzError,
    },

    #[error("I/O error at '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot derive a base name from '{path}'", path = path.display())]
    InvalidFileName { path: PathBuf },

    #[error("Invalid placement: {0}")]
    Placement(String),

    #[error("Failed to write manifest '{path}': {source}", path = path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
