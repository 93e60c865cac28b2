//!
//! # Orientation Legalization
//!
//! Transforms between the four mirror-states of a cell, and the legalization of
//! cells' states against the rows they are placed in.
//!
//! Each mirror-state has a pair of axis multipliers relative to [Orientation::N]:
//!
//! | Orientation | x  | y  |
//! |-------------|----|----|
//! | N           | +1 | +1 |
//! | S           | -1 | -1 |
//! | FN          | -1 | +1 |
//! | FS          | +1 | -1 |
//!
//! Moving a cell between two states negates the offsets of its pins along each axis
//! where the two states' multipliers differ.
//! Pin offsets are only ever written by [reorient], which keeps them consistent with the
//! cell's recorded orientation.
//!
//! Single-row-height cells only. Cells spanning several rows would need their mirrors
//! coordinated across each row they occupy.
//!

// Crates.io
use log::{info, warn};

// Local imports
use crate::data::{Design, Network, Node, NodeId, Orientation, Row, SiteSymmetry};
use crate::error::{DpoError, DpoResult};

/// # Orientation Family
/// The mirror-states compatible with a row's mechanical facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientFamily {
    /// `N` and `FN`
    North,
    /// `S` and `FS`
    South,
}
impl OrientFamily {
    /// Boolean indication of whether `orient` is a member
    pub fn contains(&self, orient: Orientation) -> bool {
        orient.family() == Some(*self)
    }
}

impl Orientation {
    /// Axis multipliers `(x, y)` relative to [Orientation::N].
    /// `None` for the rotated states.
    pub fn multipliers(&self) -> Option<(i8, i8)> {
        match self {
            Self::N => Some((1, 1)),
            Self::S => Some((-1, -1)),
            Self::FN => Some((-1, 1)),
            Self::FS => Some((1, -1)),
            Self::E | Self::W | Self::FE | Self::FW => None,
        }
    }
    /// The mirror-state with multipliers `(mx, my)`.
    /// Non-negative values are treated as +1.
    pub fn from_multipliers(mx: i8, my: i8) -> Self {
        match (mx < 0, my < 0) {
            (false, false) => Self::N,
            (true, true) => Self::S,
            (true, false) => Self::FN,
            (false, true) => Self::FS,
        }
    }
    /// Boolean indication of whether we are one of the four mirror-states
    pub fn is_mirror_state(&self) -> bool {
        self.multipliers().is_some()
    }
    /// Our state after a mirror about the x-axis (the horizontal axis). `N <-> FS`, `S <-> FN`.
    pub fn mirror_x(&self) -> Option<Self> {
        let (mx, my) = self.multipliers()?;
        Some(Self::from_multipliers(mx, -my))
    }
    /// Our state after a mirror about the y-axis (the vertical axis), i.e. a flip. `N <-> FN`, `S <-> FS`.
    pub fn mirror_y(&self) -> Option<Self> {
        let (mx, my) = self.multipliers()?;
        Some(Self::from_multipliers(-mx, my))
    }
    /// Our [OrientFamily], if we have one
    pub fn family(&self) -> Option<OrientFamily> {
        match self {
            Self::N | Self::FN => Some(OrientFamily::North),
            Self::S | Self::FS => Some(OrientFamily::South),
            Self::E | Self::W | Self::FE | Self::FW => None,
        }
    }
}

///
/// # Row-Fit Outcome
///
/// Result of legalizing a cell's orientation for a row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFit {
    /// Already in the row's family. Nothing changed.
    Legal,
    /// Mirrored about the x-axis into the row's family
    Corrected { from: Orientation, to: Orientation },
    /// The cell or row orientation is not a mirror-state. Nothing changed.
    Unresolved,
}
impl RowFit {
    /// Boolean indication of whether the cell now fits the row
    pub fn is_legal(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }
}

///
/// Move node `id` into orientation `to`.
///
/// Negates its pins' x-offsets if the move mirrors about the y-axis, and their y-offsets if it mirrors about the x-axis.
/// Mirrors about the y-axis also swap the node's left and right edge types and paddings.
///
/// Returns `Ok(false)` without change if the node is already in `to`, and `Ok(true)` if it moved.
/// Fails without change if either orientation is rotated, or if the node does not exist.
///
pub fn reorient(network: &mut Network, id: NodeId, to: Orientation) -> DpoResult<bool> {
    let node = match network.nodes.get(id) {
        Some(node) => node,
        None => return DpoError::fail(format!("Invalid node id {}", id)),
    };
    let from = node.orient;
    if from == to {
        return Ok(false);
    }
    let (mx, my) = match (from.multipliers(), to.multipliers()) {
        (Some((ax, ay)), Some((bx, by))) => (ax * bx, ay * by),
        _ => {
            return Err(DpoError::Orientation {
                node: node.name.clone(),
                from,
                to,
            })
        }
    };
    let (about_y, about_x) = (mx < 0, my < 0);
    for idx in node.pin_range() {
        let pin = network.node_pins[idx];
        network.pins[pin].mirror(about_y, about_x);
    }
    let node = &mut network.nodes[id];
    node.orient = to;
    if about_y {
        node.mirror_edges();
    }
    Ok(true)
}

///
/// Legalize the orientation of node `id` for `row`.
///
/// Rows facing north (`N`, `FN`) accept the [OrientFamily::North] states, and rows facing south (`S`, `FS`) the [OrientFamily::South] states.
/// A node outside its row's family is mirrored about the x-axis:
/// `S -> FN` and `FS -> N` in north-facing rows, `N -> FS` and `FN -> S` in south-facing ones.
///
pub fn legalize_for_row(network: &mut Network, id: NodeId, row: &Row) -> RowFit {
    let from = match network.node(id) {
        Some(node) => node.orient,
        None => return RowFit::Unresolved,
    };
    let (family, to) = match (row.orient.family(), from.mirror_x()) {
        (Some(family), Some(to)) => (family, to),
        _ => return RowFit::Unresolved,
    };
    if family.contains(from) {
        return RowFit::Legal;
    }
    match reorient(network, id, to) {
        Ok(_) => RowFit::Corrected { from, to },
        Err(_) => RowFit::Unresolved,
    }
}

///
/// Find the orientation [legalize_for_row] would give `node` in `row`, without changing anything.
/// Falls back to the row's own orientation if either is not a mirror-state.
///
pub fn find_orientation(node: &Node, row: &Row) -> Orientation {
    match (row.orient.family(), node.orient.mirror_x()) {
        (Some(family), Some(mirrored)) => {
            if family.contains(node.orient) {
                node.orient
            } else {
                mirrored
            }
        }
        _ => row.orient,
    }
}

///
/// Boolean indication of whether a cell in orientation `cell` may be placed on sites of
/// orientation `row` and symmetry class `symmetry`.
///
/// * [SiteSymmetry::Y] admits the row orientation and its mirror about the y-axis
/// * [SiteSymmetry::X] admits the row orientation and its mirror about the x-axis
/// * [SiteSymmetry::XY] admits all four mirror-states
/// * [SiteSymmetry::Unknown] and [SiteSymmetry::None] admit only the row orientation itself
/// * [SiteSymmetry::R90] classes are not constrained
///
/// Apart from the R90 classes, rotated row or cell orientations are never legal.
///
pub fn is_legal_for_symmetry(row: Orientation, symmetry: SiteSymmetry, cell: Orientation) -> bool {
    let mirrors = row.is_mirror_state() && cell.is_mirror_state();
    match symmetry {
        SiteSymmetry::R90 { .. } => true,
        _ if !mirrors => false,
        SiteSymmetry::Unknown | SiteSymmetry::None => cell == row,
        SiteSymmetry::X => cell == row || row.mirror_x() == Some(cell),
        SiteSymmetry::Y => cell == row || row.mirror_y() == Some(cell),
        SiteSymmetry::XY => true,
    }
}

///
/// Legalize the orientation of every placed cell for its segment's row.
///
/// Visits segments in design order, and cells left to right within each.
/// Returns the number of cells which could not be legalized; these are left unchanged.
///
pub fn orient_cells_for_row(design: &mut Design) -> usize {
    let Design {
        arch,
        network,
        segments,
        ..
    } = design;
    let mut unresolved = 0;
    let mut corrected = 0;
    for (seg_id, segment) in segments.iter().enumerate() {
        let row = match arch.segment_row(segment) {
            Some(row) => row,
            None => {
                warn!(
                    "Segment {} refers to missing row {}; {} cells not legalized",
                    seg_id,
                    segment.row,
                    segment.cells.len()
                );
                unresolved += segment.cells.len();
                continue;
            }
        };
        for &cell in segment.cells.iter() {
            match legalize_for_row(network, cell, row) {
                RowFit::Legal => (),
                RowFit::Corrected { .. } => corrected += 1,
                RowFit::Unresolved => {
                    let name = network.node(cell).map(|n| n.name.as_str()).unwrap_or("?");
                    warn!(
                        "Cannot legalize orientation of {} in row {} ({})",
                        name, segment.row, row.orient
                    );
                    unresolved += 1;
                }
            }
        }
    }
    info!(
        "Orientation legalization: {} corrected, {} unresolved",
        corrected, unresolved
    );
    unresolved
}
