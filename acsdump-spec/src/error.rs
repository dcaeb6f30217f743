//! # Error Taxonomy
//!
//! A single error enum is shared by every stage of the pipeline; the
//! binary is the only place errors become process exit state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("object file too large: {size} bytes")]
    TooLarge { size: u64 },

    #[error("unsupported format")]
    UnsupportedFormat,

    #[error("{0}")]
    UnsupportedOperation(&'static str),

    #[error("ill-formed object: short read at offset {offset} ({needed} bytes needed)")]
    ShortRead { offset: u32, needed: u32 },

    #[error("ill-formed object: offset {offset} out of range")]
    OffsetOutOfRange { offset: i64 },

    #[error("ill-formed object: negative {what}")]
    NegativeCount { what: &'static str },

    #[error("ill-formed object: unterminated string at offset {offset}")]
    UnterminatedString { offset: u32 },

    #[error("ill-formed object: {reason}")]
    BadLayout { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, ObjectError>;

impl ObjectError {
    /// True for any bounds or structure violation in the object itself,
    /// as opposed to environment failures and unsupported requests.
    pub fn is_ill_formed(&self) -> bool {
        matches!(
            self,
            ObjectError::ShortRead { .. }
                | ObjectError::OffsetOutOfRange { .. }
                | ObjectError::NegativeCount { .. }
                | ObjectError::UnterminatedString { .. }
                | ObjectError::BadLayout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ObjectError::ShortRead {
            offset: 12,
            needed: 4,
        };
        assert_eq!(
            err.to_string(),
            "ill-formed object: short read at offset 12 (4 bytes needed)"
        );

        let err = ObjectError::UnsupportedFormat;
        assert_eq!(err.to_string(), "unsupported format");
    }

    #[test]
    fn test_is_ill_formed() {
        assert!(ObjectError::OffsetOutOfRange { offset: -1 }.is_ill_formed());
        assert!(ObjectError::UnterminatedString { offset: 9 }.is_ill_formed());
        assert!(!ObjectError::UnsupportedFormat.is_ill_formed());
        assert!(!ObjectError::TooLarge { size: 1 << 40 }.is_ill_formed());
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ObjectError = io.into();
        assert!(err.to_string().contains("no such file"));
        assert!(!err.is_ill_formed());
    }
}
