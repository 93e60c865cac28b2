//!
//! # File-Based Detailed Orientation
//! The core logic of `dpo21orient`.
//!

use std::error::Error;

use dpo21::{Design, DetailedOrient, OrientCommand, OrientConfig, OrientReport};
use dpo21utils::SerdeFile;
use log::info;

/// # Orientation Options
///
/// Mirrors `dpo21orient`'s `ProgramOptions`, without the `clap` annotations.
/// Empty paths are treated as absent.
///
#[derive(Debug, Clone, Default)]
pub struct OrientOptions {
    /// Design Input File
    pub design: String,
    /// Output File
    pub out: String,
    /// Configuration File
    pub config: String,
    /// Run flip optimization after legalization
    pub flip: bool,
}

/// Load a design, legalize (and optionally flip) its cell orientations, and write the result.
/// Input, output, and configuration formats are each inferred from their file extensions.
pub fn orient_file(options: &OrientOptions) -> Result<OrientReport, Box<dyn Error>> {
    let mut design = Design::from_file(&options.design)?;
    info!(
        "Loaded design `{}`: {} nodes, {} edges, {} segments",
        design.name,
        design.network.num_nodes(),
        design.network.num_edges(),
        design.segments.len()
    );
    let config = match options.config.as_str() {
        "" => OrientConfig::default(),
        path => OrientConfig::load(path)?,
    };
    let cmd = OrientCommand { flip: options.flip };
    let report = DetailedOrient::new(config).run(&mut design, &cmd);

    if !options.out.is_empty() {
        design.store(&options.out)?;
        info!("Wrote {}", &options.out);
    }
    Ok(report)
}
