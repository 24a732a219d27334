use std::convert::Into;
use std::error::Error as StdError;
use std::fmt;

/// The kind of an error (non-exhaustive)
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// Generic error
    Msg(String),
    /// A template was requested but does not exist
    TemplateNotFound(String),
    /// A `@component` referenced a component that does not exist
    ComponentNotFound(String),
    /// A layout was requested but does not exist
    LayoutNotFound(String),
    /// A directive could not be parsed
    MalformedDirective {
        /// The directive name, without the leading `@`
        directive: String,
        /// What went wrong
        reason: String,
    },
    /// A condition could not be parsed or evaluated
    ExpressionEvaluation(String),
    /// Components nested deeper than the engine allows
    RecursionLimitExceeded {
        /// The component being entered when the limit was hit
        name: String,
        /// The configured limit
        limit: usize,
    },
    /// A file couldn't be read
    Io {
        /// The file being read
        path: String,
        /// What the OS reported
        kind: std::io::ErrorKind,
    },
}

/// The Error type
#[derive(Debug)]
pub struct Error {
    /// Kind of error
    pub kind: ErrorKind,
    source: Option<Box<dyn StdError + Sync + Send>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Msg(ref message) => write!(f, "{}", message),
            ErrorKind::TemplateNotFound(ref name) => write!(f, "Template '{}' not found", name),
            ErrorKind::ComponentNotFound(ref name) => write!(f, "Component '{}' not found", name),
            ErrorKind::LayoutNotFound(ref name) => write!(f, "Layout '{}' not found", name),
            ErrorKind::MalformedDirective { ref directive, ref reason } => {
                write!(f, "Malformed directive `@{}`: {}", directive, reason)
            }
            ErrorKind::ExpressionEvaluation(ref message) => {
                write!(f, "Failed to evaluate condition: {}", message)
            }
            ErrorKind::RecursionLimitExceeded { ref name, limit } => write!(
                f,
                "Rendering component '{}' would exceed the maximum nesting depth of {}",
                name, limit
            ),
            ErrorKind::Io { ref path, kind } => {
                write!(f, "Couldn't read '{}' ({:?})", path, kind)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|c| &**c as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Creates generic error
    pub fn msg(value: impl ToString) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: None }
    }

    /// Creates generic error with a source
    pub fn chain(value: impl ToString, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: Some(source.into()) }
    }

    /// Creates a template not found error
    pub fn template_not_found(name: impl ToString) -> Self {
        Self { kind: ErrorKind::TemplateNotFound(name.to_string()), source: None }
    }

    /// Creates a component not found error
    pub fn component_not_found(name: impl ToString) -> Self {
        Self { kind: ErrorKind::ComponentNotFound(name.to_string()), source: None }
    }

    /// Creates a layout not found error
    pub fn layout_not_found(name: impl ToString) -> Self {
        Self { kind: ErrorKind::LayoutNotFound(name.to_string()), source: None }
    }

    /// Creates a malformed directive error
    pub fn malformed_directive(directive: impl ToString, reason: impl ToString) -> Self {
        Self {
            kind: ErrorKind::MalformedDirective {
                directive: directive.to_string(),
                reason: reason.to_string(),
            },
            source: None,
        }
    }

    /// Creates a condition evaluation error
    pub fn expression(message: impl ToString) -> Self {
        Self { kind: ErrorKind::ExpressionEvaluation(message.to_string()), source: None }
    }

    /// Creates a recursion limit error
    pub fn recursion_limit(name: impl ToString, limit: usize) -> Self {
        Self {
            kind: ErrorKind::RecursionLimitExceeded { name: name.to_string(), limit },
            source: None,
        }
    }

    /// Creates an IO error for the file at `path`
    pub fn io_error(path: impl ToString, error: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io { path: path.to_string(), kind: error.kind() },
            source: Some(Box::new(error)),
        }
    }

    /// Whether this error must abort the render instead of being shown inline
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::RecursionLimitExceeded { .. })
    }

    /// Short machine name of the kind, used in inline error fragments
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ErrorKind::Msg(_) => "error",
            ErrorKind::TemplateNotFound(_) => "template-not-found",
            ErrorKind::ComponentNotFound(_) => "component-not-found",
            ErrorKind::LayoutNotFound(_) => "layout-not-found",
            ErrorKind::MalformedDirective { .. } => "malformed-directive",
            ErrorKind::ExpressionEvaluation(_) => "expression-evaluation",
            ErrorKind::RecursionLimitExceeded { .. } => "recursion-limit-exceeded",
            ErrorKind::Io { .. } => "io",
        }
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Self::msg(e)
    }
}
impl From<String> for Error {
    fn from(e: String) -> Self {
        Self::msg(e)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::chain("Failed to convert a value to JSON", e)
    }
}
/// Convenient wrapper around std::Result.
pub type Result<T> = ::std::result::Result<T, Error>;
