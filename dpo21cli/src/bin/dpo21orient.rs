//!
//! # Detailed-Placement Orientation CLI
//!
//! Legalizes the orientation of every placed cell in a design file, optionally flips cells
//! to shorten their nets, and writes the result.
//!

use clap::Parser;
use std::error::Error;

use dpo21cli::orient_file::{orient_file, OrientOptions};

// => The doc-comment on `ProgramOptions` here is displayed by the `clap`-generated help docs =>

/// # Detailed-Placement Orientation CLI
/// Legalizes cell orientations for their rows, and optionally flips cells to shorten their nets.
/// File formats (json, yaml, toml) are inferred from extensions.
#[derive(Parser)]
pub struct ProgramOptions {
    /// Design Input File
    #[arg(short = 'i', long)]
    pub design: String,
    /// Output File
    #[arg(short = 'o', long, default_value = "")]
    pub out: String,
    /// Configuration File
    #[arg(short = 'c', long, default_value = "")]
    pub config: String,
    /// Run Flip Optimization
    #[arg(short = 'f', long)]
    pub flip: bool,
    /// Verbose Output Mode
    #[arg(short, long)]
    pub verbose: bool,
}

impl Into<OrientOptions> for ProgramOptions {
    /// Convert into the [`OrientOptions`] struct.
    fn into(self) -> OrientOptions {
        OrientOptions {
            design: self.design,
            out: self.out,
            config: self.config,
            flip: self.flip,
        }
    }
}

/// Main entry point.
/// Parses the command-line arguments, sets up logging, and calls [`orient_file`].
pub fn main() -> Result<(), Box<dyn Error>> {
    let options = ProgramOptions::parse();
    let mut logger = env_logger::Builder::from_default_env();
    if options.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let report = orient_file(&options.into())?;
    println!("{}", report);
    Ok(())
}
