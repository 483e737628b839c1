//! Error types for catalog, config and save data loading.

use thiserror::Error;

/// Errors that can occur when loading or saving game data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// File could not be written.
    #[error("Failed to write file '{path}': {details}")]
    WriteError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// RON serialization failed.
    #[error("Could not serialize '{path}': {details}")]
    SerializeError { path: String, details: String },

    /// A definition holds a value outside its allowed range.
    #[error("Invalid value in '{path}': {details}")]
    InvalidValue { path: String, details: String },

    /// A definition points at an item id the catalog does not contain.
    #[error("Item '{item}' references unknown item '{reference}'")]
    UnknownReference { item: String, reference: String },
}
