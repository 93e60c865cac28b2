//!
//! # Dpo21 Internal Utilities Crate
//!
//! Shared helpers for the detailed-placement crates:
//! enumerated string-values, markup (de)serialization, and error-helper traits.
//!

pub mod ser;
pub use ser::*;

pub mod error;
pub use error::*;

pub mod enumstr;
pub use enumstr::*;
