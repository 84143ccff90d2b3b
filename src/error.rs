//! Error types for STL parsing, quoting and export
//!
//! Parsing and quoting each have their own error enum so callers can tell a bad
//! file apart from bad print parameters. [`Error`] wraps both for the convenience
//! entry points in the crate root.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Mesh file parsing errors
//! - **E2xxx**: Print parameter and configuration validation errors
//! - **E3xxx**: I/O errors while exporting
//!
//! ## Error Codes
//!
//! - `E1001`: Empty input buffer
//! - `E1002`: Binary layout truncated or inconsistent
//! - `E1003`: Neither binary nor ASCII structure recognized
//! - `E1004`: Non-finite vertex coordinate
//! - `E1005`: File parsed but contains no triangles
//! - `E2001`: Infill percentage out of range
//! - `E2002`: Quantity out of range
//! - `E2003`: Unknown material id
//! - `E2004`: Invalid material properties
//! - `E2005`: Invalid engine configuration
//! - `E2006`: Configuration or catalog JSON could not be read
//! - `E2007`: Analysis result with non-finite or negative metrics
//! - `E3001`: I/O error

use std::io;
use thiserror::Error;

/// Result type for operations that can fail with any engine error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when decoding an STL byte buffer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input buffer has zero length
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Upload was interrupted before any data arrived
    /// - An empty file was selected
    #[error("[E1001] Empty input: the buffer contains no data")]
    Empty,

    /// The buffer looks like binary STL but its length disagrees with the
    /// declared triangle count
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Partially uploaded or partially downloaded file
    /// - Trailing garbage appended after the last record
    /// - Buffer shorter than the 84-byte binary preamble
    /// - A non-STL binary file (image, archive) renamed to `.stl`; any
    ///   non-text buffer is read against the binary layout
    ///
    /// **Suggestions**:
    /// - Re-export the model from the CAD tool
    /// - Upload the file again
    #[error(
        "[E1002] Truncated binary STL: header declares {declared} triangle(s) \
         requiring {expected_len} bytes, buffer has {actual_len} bytes"
    )]
    Truncated {
        /// Triangle count declared in the header (0 if the header is incomplete)
        declared: u32,
        /// Byte length implied by the declared count
        expected_len: u64,
        /// Actual byte length of the buffer
        actual_len: u64,
    },

    /// Neither a binary nor an ASCII STL structure was recognized
    ///
    /// **Error Code**: E1003
    ///
    /// **Common Causes**:
    /// - A different file format (OBJ, 3MF, STEP) renamed to `.stl`
    /// - Malformed ASCII keywords or numbers
    #[error("[E1003] Invalid STL encoding at line {line}: {message}")]
    InvalidEncoding {
        /// 1-based line of the offending token (0 when not applicable)
        line: usize,
        /// Description of what was expected
        message: String,
    },

    /// A vertex coordinate is NaN, infinite, or beyond the 32-bit float range
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Non-finite coordinate in triangle {triangle}, vertex {vertex}")]
    NonFiniteValue {
        /// 0-based index of the triangle
        triangle: usize,
        /// 0-based index of the vertex inside the triangle
        vertex: usize,
    },

    /// The structure was valid but contained zero triangles
    ///
    /// **Error Code**: E1005
    #[error("[E1005] Empty mesh: the file contains no triangles")]
    EmptyMesh,
}

impl ParseError {
    /// Create an InvalidEncoding error
    ///
    /// # Arguments
    /// * `line` - 1-based line number, or 0 when not tied to a line
    /// * `message` - Description of the problem
    pub fn invalid_encoding(line: usize, message: impl Into<String>) -> Self {
        ParseError::InvalidEncoding {
            line,
            message: message.into(),
        }
    }

    /// A short, user-facing suggestion for resolving the error
    pub fn hint(&self) -> &'static str {
        match self {
            ParseError::Empty => "The file is empty. Select a non-empty STL file.",
            ParseError::Truncated { .. } => {
                "The file is truncated, was not fully uploaded, or is not an STL file. \
                 Upload it again or export the model as STL."
            }
            ParseError::InvalidEncoding { .. } => {
                "Unsupported format. Export the model as a binary or ASCII STL file."
            }
            ParseError::NonFiniteValue { .. } => {
                "The model contains invalid coordinates. Repair the mesh and export it again."
            }
            ParseError::EmptyMesh => "The file contains no triangles. Check the export settings.",
        }
    }
}

/// Errors raised when print parameters or configuration are out of range
///
/// Values are never clamped: callers must supply sanitized input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Infill percentage outside `[1, 100]` or not a finite number
    ///
    /// **Error Code**: E2001
    #[error("[E2001] Infill percentage {value} is outside the allowed range 1-100")]
    InfillOutOfRange {
        /// The rejected value
        value: f64,
    },

    /// Quantity outside `[1, max]`
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Quantity {value} is outside the allowed range 1-{max}")]
    QuantityOutOfRange {
        /// The rejected value
        value: u32,
        /// Configured maximum quantity per order
        max: u32,
    },

    /// No material with the requested id exists in the catalog
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Unknown material id '{0}'")]
    UnknownMaterial(String),

    /// Material has a non-positive or non-finite price or density
    ///
    /// **Error Code**: E2004
    #[error("[E2004] Invalid material '{id}': {message}")]
    InvalidMaterial {
        /// Material identifier
        id: String,
        /// Description of the invalid property
        message: String,
    },

    /// Engine configuration value is out of range
    ///
    /// **Error Code**: E2005
    #[error("[E2005] Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis metrics cannot be priced
    ///
    /// **Error Code**: E2007
    ///
    /// **Common Causes**:
    /// - A hand-built [`AnalysisResult`](crate::AnalysisResult) with NaN or
    ///   infinite volume
    /// - Negative volume or surface area
    #[error("[E2007] Invalid analysis: {0}")]
    InvalidAnalysis(String),
}

impl ValidationError {
    /// A short, user-facing suggestion for resolving the error
    pub fn hint(&self) -> &'static str {
        match self {
            ValidationError::InfillOutOfRange { .. } => "Choose an infill between 1% and 100%.",
            ValidationError::QuantityOutOfRange { .. } => {
                "Choose a quantity between 1 and the maximum allowed per order."
            }
            ValidationError::UnknownMaterial(_) => "Select one of the available materials.",
            ValidationError::InvalidMaterial { .. } => {
                "The material catalog entry is misconfigured. Check its price and density."
            }
            ValidationError::InvalidConfig(_) => "Check the pricing and build envelope settings.",
            ValidationError::InvalidAnalysis(_) => {
                "The model could not be measured. Repair the mesh and upload it again."
            }
        }
    }
}

/// Umbrella error for the crate-level convenience functions and the STL writer
#[derive(Error, Debug)]
pub enum Error {
    /// The mesh file could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Print parameters or configuration were rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// IO error occurred while writing or reading a file
    ///
    /// **Error Code**: E3001
    #[error("[E3001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration or catalog could not be deserialized
    ///
    /// **Error Code**: E2006
    #[cfg(feature = "serde")]
    #[error("[E2006] Unreadable configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// A short, user-facing suggestion for resolving the error
    pub fn hint(&self) -> &'static str {
        match self {
            Error::Parse(e) => e.hint(),
            Error::Validation(e) => e.hint(),
            Error::Io(_) => "The file could not be read or written. Check the path and permissions.",
            #[cfg(feature = "serde")]
            Error::Config(_) => "The configuration file is malformed. Check its JSON syntax.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        assert!(ParseError::Empty.to_string().contains("[E1001]"));
        let truncated = ParseError::Truncated {
            declared: 100,
            expected_len: 5084,
            actual_len: 500,
        };
        assert!(truncated.to_string().contains("[E1002]"));
        assert!(truncated.to_string().contains("5084"));
        assert!(
            ParseError::invalid_encoding(3, "expected 'vertex'")
                .to_string()
                .contains("[E1003]")
        );
        assert!(
            ParseError::NonFiniteValue {
                triangle: 0,
                vertex: 1
            }
            .to_string()
            .contains("[E1004]")
        );
        assert!(ParseError::EmptyMesh.to_string().contains("[E1005]"));

        assert!(
            ValidationError::InfillOutOfRange { value: 0.0 }
                .to_string()
                .contains("[E2001]")
        );
        assert!(
            ValidationError::QuantityOutOfRange { value: 51, max: 50 }
                .to_string()
                .contains("1-50")
        );
        assert!(
            ValidationError::UnknownMaterial("nylon".to_string())
                .to_string()
                .contains("'nylon'")
        );
    }

    #[test]
    fn test_invalid_encoding_helper() {
        let err = ParseError::invalid_encoding(7, "expected 'endloop', found 'vertex'");
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("'endloop'"));
    }

    #[test]
    fn test_hints_distinguish_truncation_from_format() {
        let truncated = ParseError::Truncated {
            declared: 1,
            expected_len: 134,
            actual_len: 100,
        };
        let invalid = ParseError::invalid_encoding(1, "missing 'solid'");
        assert!(truncated.hint().contains("truncated"));
        assert!(invalid.hint().contains("Unsupported format"));
        assert_ne!(truncated.hint(), invalid.hint());

        // Renamed images and archives also land on Truncated
        assert!(truncated.hint().contains("not an STL file"));
    }

    #[test]
    fn test_validation_codes_are_distinct() {
        let errors = [
            ValidationError::InfillOutOfRange { value: 0.0 },
            ValidationError::QuantityOutOfRange { value: 0, max: 50 },
            ValidationError::UnknownMaterial("x".into()),
            ValidationError::InvalidMaterial {
                id: "x".into(),
                message: "bad".into(),
            },
            ValidationError::InvalidConfig("bad".into()),
            ValidationError::InvalidAnalysis("volume is NaN".into()),
        ];
        let codes: Vec<String> = errors.iter().map(|e| e.to_string()[..7].to_string()).collect();
        let mut unique = codes.clone();
        unique.dedup();
        assert_eq!(codes, unique);
        assert_eq!(codes[5], "[E2007]");
        assert!(!errors[5].hint().is_empty());
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = ParseError::Empty.into();
        assert!(matches!(err, Error::Parse(ParseError::Empty)));
        assert_eq!(err.to_string(), ParseError::Empty.to_string());
        assert_eq!(err.hint(), ParseError::Empty.hint());

        let err: Error = ValidationError::UnknownMaterial("x".into()).into();
        assert!(matches!(err, Error::Validation(_)));

        let err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "test"));
        assert!(err.to_string().contains("[E3001]"));
    }
}
