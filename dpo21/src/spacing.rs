//!
//! # Inter-Cell Spacing Rules
//!
//! The minimum separation required between horizontally adjacent cells.
//!

// Crates.io
use serde::{Deserialize, Serialize};

// Local imports
use crate::data::Node;

///
/// # Spacing Rule
///
/// Minimum gap required between `left` and `right`, when placed adjacent in that order.
/// Rules read the cells' boundary attributes in their *current* state;
/// callers evaluating a hypothetical orientation pass a node in that state.
///
/// Implemented for closures, and for the architecture's [SpacingRules].
///
pub trait SpacingRule {
    fn required_gap(&self, left: &Node, right: &Node) -> f64;
}
impl<F> SpacingRule for F
where
    F: Fn(&Node, &Node) -> f64,
{
    fn required_gap(&self, left: &Node, right: &Node) -> f64 {
        self(left, right)
    }
}

///
/// # Architecture Spacing Rules
///
/// Combines an optional edge-type spacing table with per-cell padding.
/// The required gap is the larger of the two, and never negative.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpacingRules {
    /// Whether cell paddings apply
    #[serde(default)]
    pub use_padding: bool,
    /// Edge-type spacing table
    #[serde(default)]
    pub table: Option<EdgeSpacingTable>,
}
impl SpacingRule for SpacingRules {
    fn required_gap(&self, left: &Node, right: &Node) -> f64 {
        let mut gap: f64 = 0.0;
        if let Some(ref table) = self.table {
            if let Some(s) = table.get(left.right_edge(), right.left_edge()) {
                gap = gap.max(s);
            }
        }
        if self.use_padding {
            gap = gap.max(left.pad_right() + right.pad_left());
        }
        gap
    }
}

///
/// # Edge-Type Spacing Table
///
/// Square table of separations, indexed by (left cell's right edge type, right cell's left edge type).
/// Edge types outside the table impose no spacing.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdgeSpacingTable {
    pub spacings: Vec<Vec<f64>>,
}
impl EdgeSpacingTable {
    pub fn new(spacings: Vec<Vec<f64>>) -> Self {
        Self { spacings }
    }
    /// Number of edge types
    pub fn num_types(&self) -> usize {
        self.spacings.len()
    }
    /// Boolean indication of whether every row has an entry per edge type
    pub fn is_square(&self) -> bool {
        let n = self.num_types();
        self.spacings.iter().all(|row| row.len() == n)
    }
    /// Spacing between edge types `left` and `right`, if both are in the table
    pub fn get(&self, left: usize, right: usize) -> Option<f64> {
        self.spacings.get(left)?.get(right).copied()
    }
}
