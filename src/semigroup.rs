//! Semigroup trait for associative operations
//!
//! A Semigroup is a type with an associative binary operation. The crate uses
//! it to aggregate failures: combining two [`Error`](crate::Error)s yields an
//! ordered `Many`, which is how parallel and batched failures are reported.
//!
//! # Mathematical Properties
//!
//! For a type to be a valid Semigroup, the `combine` operation must be associative:
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use catchwater::{Error, Semigroup};
//!
//! let v1 = vec![1, 2, 3];
//! assert_eq!(v1.combine(vec![4]), vec![1, 2, 3, 4]);
//!
//! let err = Error::new("first").combine(Error::new("second"));
//! assert_eq!(err.errors().len(), 2);
//! ```

/// A type that supports an associative binary operation
///
/// # Laws
///
/// Implementations must satisfy the associativity law:
/// ```text
/// a.combine(b).combine(c) == a.combine(b.combine(c))
/// ```
///
/// # Note on Ownership
///
/// The `combine` method takes `self` by value, not by reference. If you need to
/// preserve the original values, you must clone them before combining.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}
