//! Success/error container returned by every API call
//!
//! [`Outcome`] holds exactly one of a success value or an error value. It is
//! deliberately close to [`std::result::Result`] and converts to and from it,
//! but adds the checked accessors and boolean conversions the client API is
//! written against:
//!
//! ```
//! use octane_api_client::Outcome;
//!
//! let outcome: Outcome<u64, String> = Outcome::ok(42);
//! assert!(bool::from(&outcome));
//! assert_eq!(*outcome.get(), 42);
//!
//! let failed: Outcome<u64, String> = Outcome::error("not found".to_string());
//! assert!(!&failed);
//! assert_eq!(failed.err(), "not found");
//! ```

use std::ops::Not;

use thiserror::Error;

/// Reading the side of an [`Outcome`] that is not populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InvalidAccess {
    #[error("Outcome holds an error, not a success value")]
    NotOk,

    #[error("Outcome holds a success value, not an error")]
    NotError,
}

/// Either a success value `T` or an error value `E`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "this `Outcome` may be an error, which should be handled"]
pub enum Outcome<T, E> {
    Ok(T),
    Error(E),
}

impl<T, E> Outcome<T, E> {
    /// Success-populated outcome
    pub fn ok(value: T) -> Self {
        Outcome::Ok(value)
    }

    /// Error-populated outcome
    pub fn error(value: E) -> Self {
        Outcome::Error(value)
    }

    /// True for `Ok`
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    /// Borrow the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidAccess::NotOk`] if this holds an error.
    #[track_caller]
    pub fn get(&self) -> &T {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(_) => panic!("{}", InvalidAccess::NotOk),
        }
    }

    /// Mutably borrow the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidAccess::NotOk`] if this holds an error.
    #[track_caller]
    pub fn get_mut(&mut self) -> &mut T {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(_) => panic!("{}", InvalidAccess::NotOk),
        }
    }

    /// Take the success value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidAccess::NotOk`] if this holds an error.
    #[track_caller]
    pub fn into_ok(self) -> T {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Error(_) => panic!("{}", InvalidAccess::NotOk),
        }
    }

    /// Borrow the error value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidAccess::NotError`] if this holds a success value.
    #[track_caller]
    pub fn err(&self) -> &E {
        match self {
            Outcome::Ok(_) => panic!("{}", InvalidAccess::NotError),
            Outcome::Error(value) => value,
        }
    }

    /// Take the error value.
    ///
    /// # Panics
    ///
    /// Panics with [`InvalidAccess::NotError`] if this holds a success value.
    #[track_caller]
    pub fn into_error(self) -> E {
        match self {
            Outcome::Ok(_) => panic!("{}", InvalidAccess::NotError),
            Outcome::Error(value) => value,
        }
    }

    /// Borrow the `Ok` value, or `InvalidAccess::NotOk`
    pub fn try_get(&self) -> Result<&T, InvalidAccess> {
        match self {
            Outcome::Ok(value) => Ok(value),
            Outcome::Error(_) => Err(InvalidAccess::NotOk),
        }
    }

    pub fn try_err(&self) -> Result<&E, InvalidAccess> {
        match self {
            Outcome::Ok(_) => Err(InvalidAccess::NotError),
            Outcome::Error(value) => Ok(value),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Error(value) => Outcome::Error(value),
        }
    }

    /// Transform the `Ok` value, leaving an error untouched
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Error(value) => Outcome::Error(value),
        }
    }

    pub fn map_err<G, F: FnOnce(E) -> G>(self, f: F) -> Outcome<T, G> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(value),
            Outcome::Error(value) => Outcome::Error(f(value)),
        }
    }

    /// Convert into a std `Result` so `?` can be used on it
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(value) => Outcome::Error(value),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Ok(value) => Ok(value),
            Outcome::Error(value) => Err(value),
        }
    }
}

impl<T, E> From<&Outcome<T, E>> for bool {
    fn from(outcome: &Outcome<T, E>) -> Self {
        outcome.is_ok()
    }
}

impl<T, E> From<Outcome<T, E>> for bool {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.is_ok()
    }
}

impl<T, E> Not for Outcome<T, E> {
    type Output = bool;

    fn not(self) -> bool {
        self.is_error()
    }
}

impl<T, E> Not for &Outcome<T, E> {
    type Output = bool;

    fn not(self) -> bool {
        self.is_error()
    }
}

/// Unwrap the success side of an `Outcome` or std `Result`, returning the
/// error side from the enclosing function as an `Outcome`.
macro_rules! try_outcome {
    ($expr:expr) => {
        match $crate::result::Outcome::from($expr) {
            $crate::result::Outcome::Ok(value) => value,
            $crate::result::Outcome::Error(error) => {
                return $crate::result::Outcome::Error(::core::convert::From::from(error))
            }
        }
    };
}

pub(crate) use try_outcome;
