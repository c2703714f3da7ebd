//! Error module
use std::{borrow::Cow, fmt};
use thiserror::Error;

#[derive(Debug, Error)]
/// The error type for query execution and result set access.
pub struct Error {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

/// Builds an [`Error`](struct.Error.html), optionally carrying what the
/// database itself reported.
pub struct ErrorBuilder {
    kind: ErrorKind,
    original_code: Option<String>,
    original_message: Option<String>,
}

impl ErrorBuilder {
    /// The error code sent by the database.
    pub fn set_original_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.original_code = Some(code.into());
        self
    }

    /// The error message sent by the database.
    pub fn set_original_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.original_message = Some(message.into());
        self
    }

    /// Finish the error.
    pub fn build(self) -> Error {
        Error {
            kind: self.kind,
            original_code: self.original_code,
            original_message: self.original_message,
        }
    }
}

impl Error {
    /// Start building an error of the given kind.
    ///
    /// ```
    /// use sql_connection::{Error, ErrorBuilder, ErrorKind};
    ///
    /// let mut builder: ErrorBuilder = Error::builder(ErrorKind::ResultTypeMismatch("text"));
    /// builder.set_original_code("42804");
    /// let err = builder.build();
    ///
    /// assert_eq!(err.original_code(), Some("42804"));
    /// ```
    pub fn builder(kind: ErrorKind) -> ErrorBuilder {
        ErrorBuilder {
            kind,
            original_code: None,
            original_message: None,
        }
    }

    /// The error code sent by the database, if available.
    pub fn original_code(&self) -> Option<&str> {
        self.original_code.as_deref()
    }

    /// The original error message sent by the database, if available.
    pub fn original_message(&self) -> Option<&str> {
        self.original_message.as_deref()
    }

    /// A more specific error type for matching.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::builder(kind).build()
    }
}

/// What went wrong.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The database rejected or failed the statement.
    #[error("Error querying the database: {}", _0)]
    QueryError(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The connection could not be used.
    #[error("Error creating a database connection.")]
    ConnectionError(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A row has no column with the requested alias.
    #[error("Error accessing result set, column not found: {}", column)]
    ColumnNotFound {
        /// The alias that was asked for.
        column: String,
    },

    /// A column holds a value of a different type than requested.
    #[error("Error accessing result set, type mismatch, expected: {}", _0)]
    ResultTypeMismatch(&'static str),

    /// A value could not be converted.
    #[error("Conversion failed: {}", _0)]
    ConversionError(Cow<'static, str>),
}

impl ErrorKind {
    /// Wrap any error reported by a driver as a query failure.
    pub fn query_error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::QueryError(Box::new(err))
    }

    /// A conversion error with the given message.
    pub fn conversion(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ConversionError(msg.into())
    }
}

impl From<Error> for ErrorKind {
    fn from(e: Error) -> Self {
        e.kind
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(_: std::num::TryFromIntError) -> Self {
        Self::builder(ErrorKind::conversion(
            "Couldn't convert an integer (possible overflow).",
        ))
        .build()
    }
}
