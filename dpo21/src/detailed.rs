//!
//! # Detailed Orientation Driver
//!
//! Runs orientation legalization over every placed cell, then optionally flip optimization,
//! as directed by a command such as `orient -f`.
//!

// Crates.io
use log::{info, warn};
use serde::{Deserialize, Serialize};

// Local imports
use crate::data::Design;
use crate::flip::{FlipOptimizer, DEFAULT_LARGE_NET_THRESHOLD};
use crate::orient::orient_cells_for_row;
use crate::utils::SerdeFile;

/// Characters separating command tokens
const SEPARATORS: &[char] = &[' ', '\r', '\t', '\n', ';'];

///
/// # Orientation Configuration
///
/// Loadable from JSON, YAML, or TOML. Absent fields take their defaults.
///
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrientConfig {
    /// Nets with at least this many pins are left out of flip evaluation
    pub large_net_threshold: usize,
    /// Run flip optimization after legalization
    pub flip: bool,
}
impl Default for OrientConfig {
    fn default() -> Self {
        Self {
            large_net_threshold: DEFAULT_LARGE_NET_THRESHOLD,
            flip: false,
        }
    }
}
impl SerdeFile for OrientConfig {}

///
/// # Orientation Command
///
/// The sole recognized flag is `-f`, which enables flip optimization, in any position.
/// A leading non-flag token is taken as the command's name.
/// Anything else is ignored, with a warning.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrientCommand {
    pub flip: bool,
}
impl OrientCommand {
    /// Split command-string `cmd` into tokens
    pub fn tokenize(cmd: &str) -> Vec<String> {
        cmd.split(SEPARATORS)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
    /// Parse a list of command tokens
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let mut this = Self::default();
        for (idx, arg) in args.iter().enumerate() {
            match arg.as_ref() {
                "-f" => this.flip = true,
                name if idx == 0 && !name.starts_with('-') => (),
                other => warn!("Ignoring unrecognized orientation argument `{}`", other),
            }
        }
        this
    }
    /// Tokenize and parse command-string `cmd`
    pub fn from_command(cmd: &str) -> Self {
        Self::parse(&Self::tokenize(cmd))
    }
}

///
/// # Orientation Report
///
/// Outcome counts of a [DetailedOrient] run.
/// A nonzero `unresolved` count is left for the caller to act upon.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientReport {
    /// Cells whose orientation could not be legalized
    pub unresolved: usize,
    /// Cells flipped, if flip optimization ran
    pub flips: Option<usize>,
}
impl std::fmt::Display for OrientReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} unresolved orientations", self.unresolved)?;
        if let Some(flips) = self.flips {
            write!(f, ", {} flips", flips)?;
        }
        Ok(())
    }
}

///
/// # Detailed Orientation Driver
///
/// Holds a [FlipOptimizer], so repeated runs re-use its scratch state.
///
#[derive(Debug, Clone)]
pub struct DetailedOrient {
    config: OrientConfig,
    flipper: FlipOptimizer,
}
impl Default for DetailedOrient {
    fn default() -> Self {
        Self::new(OrientConfig::default())
    }
}
impl DetailedOrient {
    pub fn new(config: OrientConfig) -> Self {
        let flipper = FlipOptimizer::from_config(&config);
        Self { config, flipper }
    }
    pub fn config(&self) -> &OrientConfig {
        &self.config
    }
    /// Tokenize, parse, and run command-string `cmd`
    pub fn run_command(&mut self, design: &mut Design, cmd: &str) -> OrientReport {
        self.run(design, &OrientCommand::from_command(cmd))
    }
    ///
    /// Legalize every placed cell's orientation for its row, then, if either `cmd` or our configuration asks for it, flip cells.
    /// Always completes. Problems are reported as counts.
    ///
    pub fn run(&mut self, design: &mut Design, cmd: &OrientCommand) -> OrientReport {
        let unresolved = orient_cells_for_row(design);
        let flips = if cmd.flip || self.config.flip {
            Some(self.flipper.flip_cells(design))
        } else {
            None
        };
        let report = OrientReport { unresolved, flips };
        info!("Detailed orientation of `{}`: {}", design.name, report);
        report
    }
}
