//!
//! # Dpo21 Command-Line Programs
//!
//! Core logic of the `dpo21orient` program, separated from its argument parsing.
//!

pub mod orient_file;
