/// Error raised when a wire value cannot be turned into a protocol type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The field is not valid hex
    InvalidHex { field: &'static str, reason: String },
    /// The field holds bytes that are not UTF-8 text
    InvalidUtf8 { field: &'static str, reason: String },
    /// The field must have an exact length
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The field exceeds its maximum length
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl std::error::Error for DecodeError {}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidHex { field, reason } => {
                write!(f, "Field {field} is not valid hex: {reason}")
            }
            Self::InvalidUtf8 { field, reason } => {
                write!(f, "Field {field} is not valid UTF-8: {reason}")
            }
            Self::InvalidLength {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Field {field} has invalid length: expected {expected}, got {actual}"
                )
            }
            Self::TooLong { field, max, actual } => {
                write!(f, "Field {field} is too long: maximum {max}, got {actual}")
            }
        }
    }
}
