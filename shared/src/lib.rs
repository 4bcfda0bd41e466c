// shared/src/lib.rs

use std::fmt;

/// Failure categories that survive every layer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Misconfigured,
    RateLimited,
    Internal,
}

impl ErrorKind {
    /// Message shown to API clients for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "forecast not found",
            ErrorKind::Misconfigured => "misconfigured service",
            ErrorKind::RateLimited => "too many requests",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("forecast not found")]
    NotFound,
    #[error("misconfigured service")]
    Misconfigured,
    #[error("too many requests")]
    RateLimited,
    #[error("internal error: {0}")]
    Internal(String),
    /// An error annotated with where it happened. `kind` is what callers
    /// classify on; it may differ from the kind of `source`.
    #[error("{context}: {source}")]
    Wrapped {
        kind: ErrorKind,
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound => ErrorKind::NotFound,
            Error::Misconfigured => ErrorKind::Misconfigured,
            Error::RateLimited => ErrorKind::RateLimited,
            Error::Internal(_) => ErrorKind::Internal,
            Error::Wrapped { kind, .. } => *kind,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Add context while keeping the current kind.
    pub fn wrap(self, context: impl Into<String>) -> Self {
        let kind = self.kind();
        self.wrap_as(kind, context)
    }

    /// Add context and reclassify as `Internal`.
    pub fn wrap_internal(self, context: impl Into<String>) -> Self {
        self.wrap_as(ErrorKind::Internal, context)
    }

    fn wrap_as(self, kind: ErrorKind, context: impl Into<String>) -> Self {
        Error::Wrapped {
            kind,
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error of a wrap chain
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Wrapped { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
