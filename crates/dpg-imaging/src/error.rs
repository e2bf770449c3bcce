use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DpgError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sequence error: {0}")]
    Sequence(#[from] SequenceError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("No master files found for unit {unit}")]
    NoFiles { unit: String },

    #[error("Incorrectly named master file '{file_name}', expected unit prefix {expected_unit}")]
    InvalidName {
        file_name: String,
        expected_unit: String,
    },

    #[error("Number of master files ({count}) does not match highest sequence number {highest}")]
    CountMismatch { highest: u64, count: usize },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory scan failed for '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown step type: {0}")]
    UnknownStepType(u8),

    #[error("Unknown assignment status: {0}")]
    UnknownAssignStatus(u8),

    #[error("Assignment does not reference a workflow step")]
    MissingStep,

    #[error("Unknown project filter: {0}")]
    UnknownFilter(String),
}

pub type Result<T> = std::result::Result<T, DpgError>;
