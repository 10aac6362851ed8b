//! Error types for model extraction and conversion.

use thiserror::Error;

/// Errors that abort a parse or conversion.
///
/// Every variant carries a human-readable message. Nothing is recovered
/// locally: the first error raised by a builder is returned to the caller
/// unchanged and no partial model or output is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A required name is missing (enum, literal, class, interface, field, operation).
    #[error("Null pointer: {0}")]
    NullPointer(String),

    /// A referenced type is not part of the configured type system.
    #[error("Wrong type: {0}")]
    WrongType(String),

    /// A field or operation parameter has no resolvable type.
    #[error("Wrong field: {0}")]
    WrongField(String),

    /// The requested type system is not supported.
    #[error("Wrong database type: {0}")]
    WrongDatabaseType(String),

    /// The dialect does not support the requested capability.
    #[error("Unimplemented operation: {0}")]
    UnimplementedOperation(String),

    /// The document tree does not have the expected shape.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The input text is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// One or more files of a batch failed to convert.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The kind of a [`ParseError`], without its message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ParseError::NullPointer`].
    NullPointer,
    /// See [`ParseError::WrongType`].
    WrongType,
    /// See [`ParseError::WrongField`].
    WrongField,
    /// See [`ParseError::WrongDatabaseType`].
    WrongDatabaseType,
    /// See [`ParseError::UnimplementedOperation`].
    UnimplementedOperation,
    /// See [`ParseError::MalformedDocument`].
    MalformedDocument,
    /// See [`ParseError::Xml`].
    Xml,
    /// See [`ParseError::Json`].
    Json,
    /// See [`ParseError::Conversion`].
    Conversion,
    /// See [`ParseError::Io`].
    Io,
}

impl ParseError {
    /// The kind of this error, for matching without the message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullPointer(_) => ErrorKind::NullPointer,
            Self::WrongType(_) => ErrorKind::WrongType,
            Self::WrongField(_) => ErrorKind::WrongField,
            Self::WrongDatabaseType(_) => ErrorKind::WrongDatabaseType,
            Self::UnimplementedOperation(_) => ErrorKind::UnimplementedOperation,
            Self::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Self::Xml(_) => ErrorKind::Xml,
            Self::Json(_) => ErrorKind::Json,
            Self::Conversion(_) => ErrorKind::Conversion,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Create a null pointer error.
    pub fn null_pointer(message: impl Into<String>) -> Self {
        Self::NullPointer(message.into())
    }

    /// Create a wrong type error.
    pub fn wrong_type(message: impl Into<String>) -> Self {
        Self::WrongType(message.into())
    }

    /// Create a wrong field error.
    pub fn wrong_field(message: impl Into<String>) -> Self {
        Self::WrongField(message.into())
    }

    /// Create a malformed document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ParseError::null_pointer("x").kind(), ErrorKind::NullPointer);
        assert_eq!(ParseError::wrong_field("x").kind(), ErrorKind::WrongField);
        assert_eq!(ParseError::malformed("x").kind(), ErrorKind::MalformedDocument);
        assert_eq!(ParseError::json("x").kind(), ErrorKind::Json);
    }

    #[test]
    fn test_message_is_displayed() {
        let err = ParseError::wrong_type("The type 'Foo' isn't supported.");
        assert_eq!(err.to_string(), "Wrong type: The type 'Foo' isn't supported.");
    }
}
