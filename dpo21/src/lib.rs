//!
//! # Dpo21 Detailed-Placement Orientation
//!
//! Orientation legalization and flip optimization for standard-cell detailed placement.
//!
//! After cells are assigned positions within row segments:
//!
//! * [orient] brings each cell's mirror-state into the family its row's facing requires,
//!   and answers which orientations a row's site symmetry admits.
//! * [flip] mirrors cells about the y-axis where doing so shortens their nets without violating [spacing] rules.
//! * [detailed] runs the two in sequence, as directed by a command such as `orient -f`.
//!

// Internal modules & re-exports
pub use dpo21utils as utils;

pub mod error;
pub use error::*;

pub mod data;
pub use data::*;

pub mod orient;
pub use orient::*;

pub mod spacing;
pub use spacing::*;

pub mod flip;
pub use flip::*;

pub mod detailed;
pub use detailed::*;

mod validate;
