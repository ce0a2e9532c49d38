//! Error types for sequence encoding and decoding

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing JSON tokens
#[derive(Debug, Error)]
pub enum Error {
    /// Input was consumed cleanly to completion.
    ///
    /// This is the benign end-of-input sentinel: it is never attributed to
    /// a sequence type and callers usually treat it as "nothing to decode".
    #[error("EOF")]
    Eof,

    /// Unexpected token or malformed token text
    #[error("{context}: {message}, error found at byte offset {offset}")]
    Syntax {
        /// Reader primitive that detected the problem (e.g. `ReadArray`)
        context: &'static str,
        /// What was expected and what was found
        message: String,
        /// Byte offset into the input where the problem was detected
        offset: usize,
    },

    /// A numeric token does not fit the target type
    #[error("{context}: value out of range for {type_name}, error found at byte offset {offset}")]
    Overflow {
        /// Reader primitive that detected the overflow
        context: &'static str,
        /// Target numeric type
        type_name: &'static str,
        /// Byte offset of the numeric token
        offset: usize,
    },

    /// A value has no representation in the wire format (NaN, infinities)
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// An error attributed to the sequence type that was being processed
    #[error("{type_name}: {source}")]
    Typed {
        /// Declared type name, e.g. `[]i64`
        type_name: String,
        /// Underlying error
        source: Box<Error>,
    },

    /// Failure while flushing encoded output
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoded output is not valid UTF-8
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn syntax(context: &'static str, message: impl Into<String>, offset: usize) -> Self {
        Error::Syntax {
            context,
            message: message.into(),
            offset,
        }
    }

    /// Returns true for the end-of-input sentinel.
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::Eof)
    }

    /// Prefixes the error with `type_name`.
    ///
    /// The end-of-input sentinel is returned unchanged.
    pub fn attribute(self, type_name: &str) -> Self {
        if self.is_eof() {
            return self;
        }
        Error::Typed {
            type_name: type_name.to_string(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through type attribution.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Typed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
