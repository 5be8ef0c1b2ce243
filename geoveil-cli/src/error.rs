//! CLI error types.

use std::fmt;

use geoveil::GeoError;

/// Errors surfaced to the command-line user.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded, parsed or saved.
    Config(String),

    /// Engine or logging error.
    Geo(GeoError),

    /// Failed to serialize output.
    Output(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Geo(e) => write!(f, "{}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(_) => None,
            CliError::Geo(e) => Some(e),
            CliError::Output(e) => Some(e),
        }
    }
}

impl From<GeoError> for CliError {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::Config(msg) => CliError::Config(msg),
            other => CliError::Geo(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
