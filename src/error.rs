//! Errors reported by the skiplist and the collections built on it.
//!
//! Every fallible operation reports through one of the variants of [`Error`].
//! Insertions additionally hand the rejected record back to the caller through
//! [`InsertError`], since the list never takes ownership of a record it did
//! not link in.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The kinds of failure surfaced to callers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// No record matched the requested key.
    #[error("no matching record.")]
    NotFound,
    /// A record comparing equal to the new one is already present.
    #[error("an equal record is already present.")]
    Duplicate,
    /// An argument was malformed; nothing was modified.
    #[error("invalid argument: {0}.")]
    InvalidArgument(&'static str),
    /// Memory for a new node could not be reserved.
    #[error("failed to allocate a node.")]
    AllocationFailure,
}

/// A failed insertion, carrying the record which was not inserted.
///
/// The list is left exactly as it was before the call.
pub struct InsertError<T> {
    error: Error,
    record: T,
}

impl<T> InsertError<T> {
    #[inline]
    pub(crate) fn new(error: Error, record: T) -> Self {
        InsertError { error, record }
    }

    /// The reason the record was rejected.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Error {
        self.error
    }

    /// A reference to the rejected record.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Recover the rejected record.
    #[inline]
    #[must_use]
    pub fn into_record(self) -> T {
        self.record
    }

    /// Convert the carried record, keeping the error.
    #[inline]
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> InsertError<U> {
        InsertError {
            error: self.error,
            record: f(self.record),
        }
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> std::error::Error for InsertError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> From<InsertError<T>> for Error {
    #[inline]
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Error, InsertError};

    #[test]
    fn display() {
        assert_eq!(Error::NotFound.to_string(), "no matching record.");
        assert_eq!(
            Error::InvalidArgument("min > max").to_string(),
            "invalid argument: min > max."
        );
    }

    #[test]
    fn insert_error_returns_record() {
        let err = InsertError::new(Error::Duplicate, String::from("old"));
        assert_eq!(err.error(), Error::Duplicate);
        assert_eq!(err.to_string(), "an equal record is already present.");
        assert_eq!(err.record(), "old");
        assert_eq!(err.into_record(), "old");
    }

    #[test]
    fn insert_error_converts() {
        let err: Error = InsertError::new(Error::AllocationFailure, 3_u8).into();
        assert_eq!(err, Error::AllocationFailure);
    }
}
