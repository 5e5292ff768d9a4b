//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VpongError {
    #[error("failed to access colour profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("colour profile {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "no colour profile at {0}; run with --update_color_range to calibrate the tracked colours"
    )]
    MissingCalibration(PathBuf),
    #[error("invalid colour profile: {0}")]
    InvalidCalibration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, VpongError>;
