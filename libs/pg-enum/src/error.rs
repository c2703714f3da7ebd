use crate::ColumnType;
use std::{
    error::Error as StdError,
    fmt::{self, Display},
};
use tracing_error::SpanTrace;

/// The result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors of the enum extension.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: SpanTrace,
}

impl Error {
    /// The `ErrorKind` wrapped by the error.
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// The `ErrorKind` wrapped by the error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The `tracing_error::SpanTrace` captured where the error was created.
    pub fn span_trace(&self) -> SpanTrace {
        self.context.clone()
    }

    pub(crate) fn conflicting_option(option: &'static str, conflicts_with: &'static str) -> Self {
        ErrorKind::ConflictingOption { option, conflicts_with }.into()
    }

    pub(crate) fn irreversible(step: &'static str) -> Self {
        ErrorKind::IrreversibleMigrationStep { step }.into()
    }

    pub(crate) fn invalid_array_literal(literal: &str, reason: &'static str) -> Self {
        ErrorKind::InvalidArrayLiteral {
            literal: literal.to_owned(),
            reason,
        }
        .into()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: SpanTrace::capture(),
        }
    }
}

impl From<sql_connection::Error> for Error {
    fn from(err: sql_connection::Error) -> Self {
        ErrorKind::QueryError(err).into()
    }
}

/// Variants of `Error`.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A catalog query or DDL statement failed. The connection's error is kept
    /// as is.
    #[error(transparent)]
    QueryError(sql_connection::Error),

    /// Two options that cannot be combined were both given.
    #[error("The `{option}` option cannot be combined with `{conflicts_with}`")]
    ConflictingOption {
        option: &'static str,
        conflicts_with: &'static str,
    },

    /// A step in a `change` migration has no automatic inverse.
    #[error("`{step}` cannot be reversed automatically, the migration needs explicit down steps")]
    IrreversibleMigrationStep { step: &'static str },

    /// An array wire literal did not follow the array grammar.
    #[error("Invalid array literal {literal:?}: {reason}")]
    InvalidArrayLiteral { literal: String, reason: &'static str },

    /// No typecast exists for the given column type tag.
    #[error("No typecast is registered for the column type `{0}`")]
    UnknownColumnType(String),

    /// A value could not be typecast to a non-enum column type.
    #[error("Cannot typecast `{value}` to {column_type}")]
    InvalidValue { column_type: ColumnType, value: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::QueryError(err) => Some(err),
            _ => None,
        }
    }
}
