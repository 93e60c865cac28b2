//!
//! # Flip Optimization
//!
//! Greedy local search mirroring cells about the y-axis to shorten their nets.
//!
//! Each segment whose row supports y-axis symmetry is swept once, left to right.
//! A cell is flipped when flipping it leaves enough room on either side for the spacing
//! its new boundaries require, and strictly reduces the summed x-span of the nets it touches.
//! Accepted flips are final, and are seen by the evaluation of every later cell.
//!

// Crates.io
use log::{debug, info};

// Local imports
use crate::data::{Architecture, Design, Network, NodeId, Segment};
use crate::detailed::OrientConfig;
use crate::orient::reorient;
use crate::spacing::SpacingRule;

/// Default pin-count at and above which nets are left out of wirelength evaluation
pub const DEFAULT_LARGE_NET_THRESHOLD: usize = 100;

/// # Wirelength Change
/// Summed x-spans of a cell's nets, as placed and as they would be with the cell flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlipDelta {
    pub old: f64,
    pub new: f64,
}
impl FlipDelta {
    /// Boolean indication of whether flipping strictly shortens the nets
    pub fn improves(&self) -> bool {
        self.new < self.old
    }
}

///
/// # Flip Optimizer
///
/// Holds the per-edge visit marks used to evaluate each net once per cell.
/// Marks are compared against an epoch counter which advances per evaluated cell,
/// so they never need clearing between cells or between runs.
///
#[derive(Debug, Clone)]
pub struct FlipOptimizer {
    /// Pin-count at and above which nets are skipped
    large_net_threshold: usize,
    /// Current evaluation epoch
    epoch: u64,
    /// Epoch in which each edge was last visited
    last_seen: Vec<u64>,
}
impl Default for FlipOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_LARGE_NET_THRESHOLD)
    }
}
impl FlipOptimizer {
    pub fn new(large_net_threshold: usize) -> Self {
        Self {
            large_net_threshold,
            epoch: 0,
            last_seen: Vec::new(),
        }
    }
    pub fn from_config(config: &OrientConfig) -> Self {
        Self::new(config.large_net_threshold)
    }
    /// Flip cells throughout `design`, using its architecture's spacing rules.
    /// Returns the number of flips.
    pub fn flip_cells(&mut self, design: &mut Design) -> usize {
        let Design {
            arch,
            network,
            segments,
            ..
        } = design;
        self.flip_segments(arch, segments, network, &arch.spacing)
    }
    /// Flip cells throughout `design`, using spacing rule `rule`.
    /// Returns the number of flips.
    pub fn flip_cells_with(&mut self, design: &mut Design, rule: &impl SpacingRule) -> usize {
        let Design {
            arch,
            network,
            segments,
            ..
        } = design;
        self.flip_segments(arch, segments, network, rule)
    }
    /// Sweep each of `segments` in order
    fn flip_segments(
        &mut self,
        arch: &Architecture,
        segments: &[Segment],
        network: &mut Network,
        rule: &impl SpacingRule,
    ) -> usize {
        if self.last_seen.len() < network.num_edges() {
            self.last_seen.resize(network.num_edges(), 0);
        }
        let mut nflips = 0;
        for segment in segments.iter() {
            match arch.segment_row(segment) {
                Some(row) if row.symmetry.has_y() => (),
                _ => continue,
            }
            for idx in 0..segment.cells.len() {
                if self.try_flip(network, segment, idx, rule) {
                    nflips += 1;
                }
            }
        }
        info!(
            "Flip optimization: {} cells flipped, nets of {} or more pins skipped",
            nflips, self.large_net_threshold
        );
        nflips
    }
    /// Evaluate, and if beneficial commit, a flip of the `idx`th cell of `segment`
    fn try_flip(
        &mut self,
        network: &mut Network,
        segment: &Segment,
        idx: usize,
        rule: &impl SpacingRule,
    ) -> bool {
        let cell = segment.cells[idx];
        let flipped = match network.node(cell).and_then(|n| n.orient().mirror_y()) {
            Some(o) => o,
            None => return false,
        };
        if !spacing_permits_flip(network, segment, idx, rule) {
            return false;
        }
        let delta = self.flip_delta(network, cell);
        if !delta.improves() {
            return false;
        }
        match reorient(network, cell, flipped) {
            Ok(_) => {
                debug!(
                    "Flipped {} to {}: span {} -> {}",
                    network.nodes[cell].name, flipped, delta.old, delta.new
                );
                true
            }
            Err(_) => false,
        }
    }
    ///
    /// Evaluate the summed x-spans of the nets touching `cell`, as placed and as they would be with `cell` flipped.
    ///
    /// Only the x-offsets of `cell`'s own pins change in the flipped evaluation.
    /// Nets with fewer than two pins, and nets at or above the large-net threshold, are skipped.
    /// Each net counts once, however many of `cell`'s pins it connects.
    ///
    pub fn flip_delta(&mut self, network: &Network, cell: NodeId) -> FlipDelta {
        if self.last_seen.len() < network.num_edges() {
            self.last_seen.resize(network.num_edges(), 0);
        }
        self.epoch += 1;
        let mut delta = FlipDelta::default();
        for &pi in network.node_pin_ids(cell) {
            let edge = network.pins[pi].edge;
            let npins = network.edges[edge].num_pins();
            if npins <= 1 || npins >= self.large_net_threshold {
                continue;
            }
            if self.last_seen[edge] == self.epoch {
                continue;
            }
            self.last_seen[edge] = self.epoch;

            let mut old_span = Span::default();
            let mut new_span = Span::default();
            for pin in network.edge_pins(edge) {
                let x = network.pin_x(pin);
                old_span.add(x);
                if pin.node == cell {
                    new_span.add(network.nodes[pin.node].x - pin.offset_x);
                } else {
                    new_span.add(x);
                }
            }
            delta.old += old_span.len();
            delta.new += new_span.len();
        }
        delta
    }
}

///
/// Check whether the `idx`th cell of `segment` has room for the spacing its flipped boundaries would require.
///
/// Required gaps are evaluated against a copy of the cell as a flip would leave it:
/// orientation mirrored, edge types and paddings swapped.
/// Cells at the ends of the segment are bounded by the segment extents, with no spacing required.
/// Rotated cells, and cells or neighbors missing from `network`, are never permitted.
///
pub fn spacing_permits_flip(
    network: &Network,
    segment: &Segment,
    idx: usize,
    rule: &impl SpacingRule,
) -> bool {
    let cell = match segment.cells.get(idx).and_then(|&c| network.node(c)) {
        Some(cell) => cell,
        None => return false,
    };
    let flipped = match cell.as_flipped() {
        Some(node) => node,
        None => return false,
    };
    // Neighbors, if any. A segment entry naming a missing node disqualifies its neighbors.
    let neighbor = |i: Option<usize>| match i.and_then(|i| segment.cells.get(i)) {
        Some(&id) => network.node(id).map(Some),
        None => Some(None),
    };
    let (left, right) = match (neighbor(idx.checked_sub(1)), neighbor(Some(idx + 1))) {
        (Some(left), Some(right)) => (left, right),
        _ => return false,
    };

    let gap_left = left.map_or(0.0, |l| rule.required_gap(l, &flipped));
    let gap_right = right.map_or(0.0, |r| rule.required_gap(&flipped, r));
    let space_left = cell.xmin() - left.map_or(segment.min_x, |l| l.xmax());
    let space_right = right.map_or(segment.max_x, |r| r.xmin()) - cell.xmax();
    gap_left <= space_left && gap_right <= space_right
}

/// Running min/max of a set of x-coordinates
#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}
impl Default for Span {
    fn default() -> Self {
        Self {
            min: f64::MAX,
            max: f64::MIN,
        }
    }
}
impl Span {
    fn add(&mut self, x: f64) {
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }
    fn len(&self) -> f64 {
        self.max - self.min
    }
}
