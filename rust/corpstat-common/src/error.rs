use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidOperation { name: name.into() }.into())
    }

    pub fn not_found(what: impl Into<String>) -> Error {
        Error(ErrorKind::NotFound { what: what.into() }.into())
    }

    /// A pipeline invariant was violated. Always fatal: the affected output would
    /// be silently wrong if processing continued.
    pub fn consistency(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Consistency {
                message: message.into(),
            }
            .into(),
        )
    }

    /// Wraps a decoding failure with the location of the offending line.
    pub fn malformed_record(origin: impl Into<String>, line: usize, cause: Error) -> Error {
        Error(
            ErrorKind::MalformedRecord {
                origin: origin.into(),
                line,
                message: cause.to_string(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn worker<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Worker {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Returns `true` for lookups of absent terms or conditional entries.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid operation {name}")]
    InvalidOperation { name: String },

    #[error("invalid text format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("malformed record at {origin}:{line}: {message}")]
    MalformedRecord {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("consistency violation: {message}")]
    Consistency { message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("worker error: {context}")]
    Worker {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::invalid_format("integer", e.to_string())
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(e: std::num::ParseFloatError) -> Self {
        Error::invalid_format("float", e.to_string())
    }
}
