//! Common types and utilities shared across CLI commands.

use serde::Serialize;

use crate::error::CliError;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a coordinate pair the way all commands print it.
pub fn format_coords(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coords() {
        assert_eq!(format_coords(48.8566, -2.5), "48.856600, -2.500000");
    }
}
