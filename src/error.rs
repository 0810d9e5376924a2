//! Structured failures and the `Fin` outcome type
//!
//! Every effect reports its outcome as a [`Fin`], which is just a `Result`
//! whose error side is always the crate's [`Error`]. An `Error` is immutable
//! and comes in three shapes:
//!
//! - **Message**: a user or domain described failure
//! - **Exceptional**: a wrapped native fault (anything implementing
//!   `std::error::Error`), kept by reference for diagnostics
//! - **Many**: an ordered aggregate of other errors
//!
//! # Examples
//!
//! ```
//! use catchwater::{Error, Semigroup};
//!
//! let err = Error::new("disk full").combine(Error::new("retry budget spent"));
//! assert_eq!(err.errors().len(), 2);
//! assert_eq!(err.to_string(), "disk full; retry budget spent");
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::semigroup::Semigroup;

/// Message used by producer-style adapters when their source is exhausted.
pub const END_OF_STREAM: &str = "end of stream";

/// Message carried by errors raised when a cancellation signal is observed.
pub const CANCELLED: &str = "cancelled";

/// Message of the error [`Error::many`] builds from an empty sequence.
pub const NO_ERRORS: &str = "no errors reported";

/// Outcome of running an effect: success with a value, or failure with an [`Error`].
pub type Fin<A> = Result<A, Error>;

/// A native fault shared by reference.
pub type Fault = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A failure value.
///
/// Errors are never the success path. They can be combined with
/// [`Semigroup::combine`], which flattens nested aggregates while keeping the
/// order of occurrence.
#[derive(Clone)]
pub enum Error {
    /// A described failure.
    Message(String),
    /// A wrapped native fault.
    Exceptional(Fault),
    /// An ordered aggregate of failures.
    Many(Vec<Error>),
}

impl Error {
    /// Create a message error.
    ///
    /// # Examples
    ///
    /// ```
    /// use catchwater::Error;
    ///
    /// let err = Error::new("not found");
    /// assert!(err.is_message("not found"));
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    /// Wrap a native fault.
    pub fn from_fault<F>(fault: F) -> Self
    where
        F: std::error::Error + Send + Sync + 'static,
    {
        Error::Exceptional(Arc::new(fault))
    }

    /// Aggregate a sequence of errors, flattening nested aggregates.
    ///
    /// A single error is returned as-is rather than wrapped. An empty
    /// sequence (or one holding only empty aggregates) yields the
    /// [`NO_ERRORS`] message error, so the result always describes
    /// something.
    pub fn many(errors: impl IntoIterator<Item = Error>) -> Self {
        let mut flat = Vec::new();
        for error in errors {
            error.flatten_into(&mut flat);
        }
        match flat.len() {
            0 => Error::new(NO_ERRORS),
            1 => flat.remove(0),
            _ => Error::Many(flat),
        }
    }

    /// The conventional "end of stream" error.
    pub fn end_of_stream() -> Self {
        Error::new(END_OF_STREAM)
    }

    /// The conventional cancellation error.
    pub fn cancelled() -> Self {
        Error::new(CANCELLED)
    }

    /// Convert a panic payload into an exceptional error.
    pub fn panicked(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Error::from_fault(Panicked { message })
    }

    /// The text of a message error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Message(text) => Some(text),
            _ => None,
        }
    }

    /// The wrapped native fault, if any.
    pub fn fault(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Exceptional(fault) => Some(fault.as_ref()),
            _ => None,
        }
    }

    /// Flattened view of the errors this value stands for.
    ///
    /// A non-aggregate error yields a one-element list.
    pub fn errors(&self) -> Vec<&Error> {
        match self {
            Error::Many(children) => children.iter().flat_map(Error::errors).collect(),
            other => vec![other],
        }
    }

    /// Whether this is a message error with exactly `text`.
    pub fn is_message(&self, text: &str) -> bool {
        self.message() == Some(text)
    }

    /// Whether this is a wrapped native fault.
    pub fn is_exceptional(&self) -> bool {
        matches!(self, Error::Exceptional(_))
    }

    /// Whether this error (or any aggregated child) signals end of stream.
    pub fn is_end_of_stream(&self) -> bool {
        self.contains(|e| e.is_message(END_OF_STREAM))
    }

    /// Whether this error (or any aggregated child) signals cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.contains(|e| e.is_message(CANCELLED))
    }

    /// Whether this error, or any error it aggregates, satisfies `predicate`.
    pub fn contains(&self, predicate: impl Fn(&Error) -> bool) -> bool {
        self.errors().into_iter().any(predicate)
    }

    fn flatten_into(self, out: &mut Vec<Error>) {
        match self {
            Error::Many(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

impl Semigroup for Error {
    fn combine(self, other: Self) -> Self {
        let mut flat = Vec::new();
        self.flatten_into(&mut flat);
        other.flatten_into(&mut flat);
        Error::Many(flat)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Message(a), Error::Message(b)) => a == b,
            (Error::Exceptional(a), Error::Exceptional(b)) => Arc::ptr_eq(a, b),
            (Error::Many(a), Error::Many(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(text) => f.debug_tuple("Message").field(text).finish(),
            Error::Exceptional(fault) => f
                .debug_tuple("Exceptional")
                .field(&format_args!("{}", fault))
                .finish(),
            Error::Many(children) => f.debug_tuple("Many").field(children).finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(text) => write!(f, "{}", text),
            Error::Exceptional(fault) => write!(f, "{}", fault),
            Error::Many(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Exceptional(fault) => Some(fault.as_ref()),
            _ => None,
        }
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::new(message)
    }
}

impl From<std::io::Error> for Error {
    fn from(fault: std::io::Error) -> Self {
        Error::from_fault(fault)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(fault: serde_json::Error) -> Self {
        Error::from_fault(fault)
    }
}

/// A panic caught at an effect boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panicked {
    /// The panic message, when the payload was a string.
    pub message: String,
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl std::error::Error for Panicked {}
