use std::fmt;

/// Caller-misuse failures at the engine's public boundaries.
///
/// Malformed page data never raises an error (it degrades to documented
/// sentinels); these variants exist only for arguments the algorithms
/// assume validated.
#[derive(Debug)]
pub enum EngineError {
    /// Similarity threshold outside the [0, 1] range
    InvalidThreshold(f64),

    /// Graph file could not be read
    GraphRead { path: String, source: std::io::Error },

    /// Graph JSON could not be parsed
    GraphParse { path: String, source: serde_json::Error },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidThreshold(t) => {
                write!(f, "Similarity threshold must be within [0, 1], got {}", t)
            }
            EngineError::GraphRead { path, source } => {
                write!(f, "Failed to read crawl graph from {}: {}", path, source)
            }
            EngineError::GraphParse { path, source } => {
                write!(f, "Failed to parse crawl graph from {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::GraphRead { source, .. } => Some(source),
            EngineError::GraphParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reject thresholds outside [0, 1] before any algorithm runs.
pub fn validate_threshold(threshold: f64) -> Result<(), EngineError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(EngineError::InvalidThreshold(threshold));
    }
    Ok(())
}
