//! Error types used by the crate.

use geolayer_types::GeometryError;
use thiserror::Error;

/// Malformed JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid JSON at byte {offset}: {reason}")]
pub struct SyntaxError {
    /// Byte offset in the input text where the error was found.
    pub offset: usize,
    /// Description of the problem.
    pub reason: String,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, reason: impl Into<String>) -> Self {
        Self {
            offset,
            reason: reason.into(),
        }
    }
}

/// Well-formed JSON that is not a valid GeoJSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid GeoJSON at {path}: {reason}")]
pub struct SchemaError {
    /// JSON path to the offending value, e.g. `$.features[0].geometry`.
    pub path: String,
    /// Description of the problem.
    pub reason: String,
}

/// Error returned by the GeoJSON pipeline. Each variant corresponds to one stage of processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoJsonError {
    /// Input text is not valid JSON.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Input JSON does not have the structure of a GeoJSON object.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Input GeoJSON has invalid coordinate values.
    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),
}
