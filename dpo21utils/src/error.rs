//!
//! # Dpo21 Error-Helper Utilities
//!
//! ```rust
//! use dpo21utils::error::{ErrorHelper, Unwrapper};
//!
//! /// Example implementer of [`ErrorHelper`], reporting which row it was checking.
//! struct RowChecker {
//!     row: usize,
//! }
//! impl ErrorHelper for RowChecker {
//!     type Error = String;
//!     fn err(&self, msg: impl Into<String>) -> Self::Error {
//!         format!("Row {}: {}", self.row, msg.into())
//!     }
//! }
//! impl RowChecker {
//!     fn check(&self, sites: &[usize]) -> Result<usize, String> {
//!         self.assert(!sites.is_empty(), "Row has no sites")?;
//!         sites.first().copied().unwrapper(self, "Missing first site")
//!     }
//! }
//! let checker = RowChecker { row: 3 };
//! assert_eq!(checker.check(&[]), Err("Row 3: Row has no sites".to_string()));
//! assert_eq!(checker.check(&[7, 8]), Ok(7));
//! ```
//!

///
/// # ErrorHelper
///
/// Helper trait for re-use among design checkers and tree-walkers.
/// Each implementer will generally have some internal state to report upon failure,
/// e.g. the stack of entities being visited, which it injects in the required `err` method.
///
pub trait ErrorHelper {
    type Error;

    /// Create and return a [Self::Error] value.
    fn err(&self, msg: impl Into<String>) -> Self::Error;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> Result<T, Self::Error> {
        Err(self.err(msg))
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> Result<(), Self::Error> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}

///
/// # Unwrapper
///
/// Post-fix application of [`ErrorHelper`] handling on [`Option`]s.
/// `None` routes to the helper's `fail` method rather than panicking.
///
pub trait Unwrapper {
    type Ok;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper;
}
impl<T> Unwrapper for Option<T> {
    type Ok = T;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper,
    {
        match self {
            Some(t) => Ok(t),
            None => helper.fail(msg),
        }
    }
}
