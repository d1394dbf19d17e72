use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while loading catalogs and rendering charts.
#[derive(Error, Debug)]
pub enum SismoError {
    /// The catalog or boundary file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// A file exists but could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required field failed to parse. `row` is the 1-based data row
    /// (the header is row 0).
    #[error("Malformed input at row {row}, field {field}: {reason}")]
    MalformedInput {
        row: u64,
        field: String,
        reason: String,
    },

    /// The CSV reader itself failed (bad quoting, invalid UTF-8, ...).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A boundary document could not be parsed as GeoJSON.
    #[error("Failed to parse GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A JSON document could not be parsed or serialised.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The drawing backend reported an error.
    #[error("Render error: {0}")]
    Render(String),

    /// A raster image could not be decoded or encoded.
    #[error("Image error: {0}")]
    Image(String),

    /// Images stacked together must all share the same width.
    #[error("Image {path} is {found}px wide, expected {expected}px")]
    ImageWidthMismatch {
        path: PathBuf,
        expected: u32,
        found: u32,
    },

    /// Compositing was requested with no input images.
    #[error("No images to composite")]
    EmptyComposite,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SismoError {
    /// Shorthand for [`SismoError::MalformedInput`].
    pub fn malformed(row: u64, field: &str, reason: impl Into<String>) -> Self {
        SismoError::MalformedInput {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the sismo crates.
pub type Result<T> = std::result::Result<T, SismoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_not_found() {
        let err = SismoError::InputNotFound(PathBuf::from("/missing/data.csv"));
        assert_eq!(err.to_string(), "Input file not found: /missing/data.csv");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SismoError::FileRead {
            path: PathBuf::from("/some/data.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/data.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_error_display_malformed() {
        let err = SismoError::malformed(3, "Magnitud", "invalid float literal: \"abc\"");
        assert_eq!(
            err.to_string(),
            "Malformed input at row 3, field Magnitud: invalid float literal: \"abc\""
        );
    }

    #[test]
    fn test_error_display_width_mismatch() {
        let err = SismoError::ImageWidthMismatch {
            path: PathBuf::from("2.png"),
            expected: 1280,
            found: 1080,
        };
        assert_eq!(err.to_string(), "Image 2.png is 1080px wide, expected 1280px");
    }

    #[test]
    fn test_error_display_config() {
        let err = SismoError::Config("bad source date".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad source date");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: SismoError = io_err.into();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: SismoError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
