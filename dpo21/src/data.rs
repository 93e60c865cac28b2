//!
//! # Detailed-Placement Data Model
//!
//! Architecture rows, the node/pin/edge network, and the segments which order cells within rows.
//!
//! Nodes, edges, and pins are identified by their index into the [Network]'s vectors.
//! Node positions are cell *centers*, and pin offsets are measured from them,
//! so that mirroring a cell about either axis is a pure sign-change of its pins' offsets.
//!

// Std-Lib
use std::convert::TryFrom;
use std::ops::Range;
use std::path::Path;

// Crates.io
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

// Local imports
use crate::error::{DpoError, DpoResult};
use crate::spacing::SpacingRules;
use crate::utils::{enumstr, EnumStr, SerdeFile};

/// Index of a [Node] in its [Network]
pub type NodeId = usize;
/// Index of an [Edge] in its [Network]
pub type EdgeId = usize;
/// Index of a [Pin] in its [Network]
pub type PinId = usize;
/// Index of a [Row] in its [Architecture]
pub type RowId = usize;
/// Index of a [Segment] in its [Design]
pub type SegmentId = usize;

enumstr!(
    /// # Cell & Site Orientation
    ///
    /// The eight DEF/LEF placement orientations.
    /// Only the four mirror-states `N`, `S`, `FN`, and `FS` are supported by the transforms in [crate::orient];
    /// the rotated states are carried through loading and saving, and reported as unresolved.
    ///
    Orientation {
        N: "N",
        S: "S",
        E: "E",
        W: "W",
        FN: "FN",
        FS: "FS",
        FE: "FE",
        FW: "FW",
    }
);
impl Default for Orientation {
    fn default() -> Self {
        Self::N
    }
}

enumstr!(
    /// # Site Symmetry Axes
    /// Tokens of a LEF `SYMMETRY` statement
    SymmetryAxis {
        X: "X",
        Y: "Y",
        R90: "R90",
    }
);

///
/// # Site Symmetry Class
///
/// Which mirror axes the physical sites of a row support,
/// and hence which cell orientations are legal in it.
/// See [crate::orient::is_legal_for_symmetry].
///
/// Serialized in the manner of a LEF `SYMMETRY` statement, as a list of [SymmetryAxis] tokens.
/// An absent list is [SiteSymmetry::Unknown]; an empty one is [SiteSymmetry::None].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Vec<SymmetryAxis>>", into = "Option<Vec<SymmetryAxis>>")]
pub enum SiteSymmetry {
    /// Not specified
    Unknown,
    /// No symmetry
    None,
    /// Symmetric about the x-axis
    X,
    /// Symmetric about the y-axis
    Y,
    /// Symmetric about both axes
    XY,
    /// Any class including 90-degree rotation
    R90 { x: bool, y: bool },
}
impl SiteSymmetry {
    /// Create from the axes of a LEF `SYMMETRY` statement
    pub fn from_axes(axes: &[SymmetryAxis]) -> Self {
        let x = axes.contains(&SymmetryAxis::X);
        let y = axes.contains(&SymmetryAxis::Y);
        if axes.contains(&SymmetryAxis::R90) {
            return Self::R90 { x, y };
        }
        match (x, y) {
            (false, false) => Self::None,
            (true, false) => Self::X,
            (false, true) => Self::Y,
            (true, true) => Self::XY,
        }
    }
    /// Convert to LEF `SYMMETRY` axes. [SiteSymmetry::Unknown] has none to report.
    pub fn to_axes(&self) -> Option<Vec<SymmetryAxis>> {
        let (x, y, r90) = match *self {
            Self::Unknown => return None,
            Self::None => (false, false, false),
            Self::X => (true, false, false),
            Self::Y => (false, true, false),
            Self::XY => (true, true, false),
            Self::R90 { x, y } => (x, y, true),
        };
        let mut axes = Vec::new();
        if x {
            axes.push(SymmetryAxis::X);
        }
        if y {
            axes.push(SymmetryAxis::Y);
        }
        if r90 {
            axes.push(SymmetryAxis::R90);
        }
        Some(axes)
    }
    /// Boolean indication of whether sites may be mirrored about the y-axis,
    /// i.e. whether cells in them may be flipped.
    pub fn has_y(&self) -> bool {
        match *self {
            Self::Y | Self::XY => true,
            Self::R90 { y, .. } => y,
            Self::Unknown | Self::None | Self::X => false,
        }
    }
}
impl Default for SiteSymmetry {
    fn default() -> Self {
        Self::Unknown
    }
}
impl From<Option<Vec<SymmetryAxis>>> for SiteSymmetry {
    fn from(axes: Option<Vec<SymmetryAxis>>) -> Self {
        match axes {
            Some(axes) => Self::from_axes(&axes),
            None => Self::Unknown,
        }
    }
}
impl From<SiteSymmetry> for Option<Vec<SymmetryAxis>> {
    fn from(sym: SiteSymmetry) -> Self {
        sym.to_axes()
    }
}

/// # Placement Row
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize, PartialEq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct Row {
    /// Required site orientation
    pub orient: Orientation,
    /// Site symmetry class
    #[serde(default)]
    pub symmetry: SiteSymmetry,
    /// Bottom y-coordinate
    #[serde(default)]
    pub y: f64,
    /// Row height
    #[serde(default)]
    pub height: f64,
    /// Site width
    #[serde(default)]
    pub site_width: f64,
}

/// # Placement Architecture
/// Rows and the rules for spacing between cells placed in them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Architecture {
    pub rows: Vec<Row>,
    #[serde(default)]
    pub spacing: SpacingRules,
}
impl Architecture {
    /// Row of segment `seg`, if it exists
    pub fn segment_row(&self, seg: &Segment) -> Option<&Row> {
        self.rows.get(seg.row)
    }
}

///
/// # Node
///
/// A placeable cell.
/// Its orientation, edge types, and paddings change only through [crate::orient::reorient],
/// alongside the offsets of its pins.
///
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize, PartialEq)]
#[builder(pattern = "owned", setter(into), default)]
pub struct Node {
    /// Cell (instance) name
    pub name: String,
    /// Center x-coordinate
    pub x: f64,
    /// Center y-coordinate
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Current orientation
    #[serde(default)]
    pub(crate) orient: Orientation,
    /// Edge type of our left side, in the current orientation
    #[serde(default)]
    pub(crate) left_edge: usize,
    /// Edge type of our right side, in the current orientation
    #[serde(default)]
    pub(crate) right_edge: usize,
    /// Padding required to our left, in the current orientation
    #[serde(default)]
    pub(crate) pad_left: f64,
    /// Padding required to our right, in the current orientation
    #[serde(default)]
    pub(crate) pad_right: f64,

    // Derived from the [Network]'s pins
    #[serde(skip)]
    #[builder(setter(skip))]
    pub(crate) first_pin: usize,
    #[serde(skip)]
    #[builder(setter(skip))]
    pub(crate) last_pin: usize,
}
impl Node {
    /// Current orientation
    pub fn orient(&self) -> Orientation {
        self.orient
    }
    /// Edge type of our left side
    pub fn left_edge(&self) -> usize {
        self.left_edge
    }
    /// Edge type of our right side
    pub fn right_edge(&self) -> usize {
        self.right_edge
    }
    /// Padding required to our left
    pub fn pad_left(&self) -> f64 {
        self.pad_left
    }
    /// Padding required to our right
    pub fn pad_right(&self) -> f64 {
        self.pad_right
    }
    /// Left boundary x-coordinate
    pub fn xmin(&self) -> f64 {
        self.x - 0.5 * self.width
    }
    /// Right boundary x-coordinate
    pub fn xmax(&self) -> f64 {
        self.x + 0.5 * self.width
    }
    /// Range of our pins, indexing into [Network::node_pin_ids]
    pub fn pin_range(&self) -> Range<usize> {
        self.first_pin..self.last_pin
    }
    /// Swap our left and right boundary attributes, as a mirror about the y-axis does
    pub(crate) fn mirror_edges(&mut self) {
        std::mem::swap(&mut self.left_edge, &mut self.right_edge);
        std::mem::swap(&mut self.pad_left, &mut self.pad_right);
    }
    /// Copy of ourselves as we would be after a mirror about the y-axis:
    /// orientation flipped, edge types and paddings swapped.
    /// Returns `None` for the rotated orientations, which cannot be flipped.
    /// The copy's pin range is kept, but the pins themselves are not transformed.
    pub(crate) fn as_flipped(&self) -> Option<Node> {
        let mut node = self.clone();
        node.orient = self.orient.mirror_y()?;
        node.mirror_edges();
        Some(node)
    }
}

/// # Pin
/// Connection point of a [Node] onto an [Edge]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pin {
    /// Owning node
    pub node: NodeId,
    /// Connected edge
    pub edge: EdgeId,
    /// Offset from the node center, in its current orientation
    pub(crate) offset_x: f64,
    pub(crate) offset_y: f64,
}
impl Pin {
    pub fn new(node: NodeId, edge: EdgeId, offset_x: f64, offset_y: f64) -> Self {
        Self {
            node,
            edge,
            offset_x,
            offset_y,
        }
    }
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }
    /// Negate our x-offset if `about_y`, and our y-offset if `about_x`
    pub(crate) fn mirror(&mut self, about_y: bool, about_x: bool) {
        if about_y {
            self.offset_x = -self.offset_x;
        }
        if about_x {
            self.offset_y = -self.offset_y;
        }
    }
}

/// # Edge (Net)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub name: String,

    // Derived from the [Network]'s pins
    #[serde(skip)]
    pub(crate) first_pin: usize,
    #[serde(skip)]
    pub(crate) last_pin: usize,
}
impl Edge {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    /// Number of connected pins
    pub fn num_pins(&self) -> usize {
        self.last_pin - self.first_pin
    }
    /// Range of our pins, indexing into [Network::edge_pin_ids]
    pub fn pin_range(&self) -> Range<usize> {
        self.first_pin..self.last_pin
    }
}

/// # Serialized [Network] Content
/// Nodes, edges, and pins, without the derived per-node and per-edge pin orderings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pins: Vec<Pin>,
}

///
/// # Network
///
/// Nodes, edges, and the pins connecting them.
/// Pins are indexed twice: in node order, so that each [Node] owns a contiguous range,
/// and in edge order, so that each [Edge] does.
/// Both orderings are derived on creation, and are stable with respect to pin order.
///
/// Empty lists are omitted when serialized, as TOML admits no plain value after a table.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "NetworkData", into = "NetworkData")]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) pins: Vec<Pin>,
    pub(crate) node_pins: Vec<PinId>,
    pub(crate) edge_pins: Vec<PinId>,
}
impl Network {
    /// Create a [Network], indexing `pins` by node and edge.
    /// Fails if any pin refers to a nonexistent node or edge.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, pins: Vec<Pin>) -> DpoResult<Self> {
        let mut this = Self {
            nodes,
            edges,
            pins,
            node_pins: Vec::new(),
            edge_pins: Vec::new(),
        };
        this.index()?;
        Ok(this)
    }
    /// Derive the node-ordered and edge-ordered pin indices
    fn index(&mut self) -> DpoResult<()> {
        for (id, pin) in self.pins.iter().enumerate() {
            if pin.node >= self.nodes.len() || pin.edge >= self.edges.len() {
                return DpoError::fail(format!(
                    "Pin {} refers to node {} and edge {}, of {} nodes and {} edges",
                    id,
                    pin.node,
                    pin.edge,
                    self.nodes.len(),
                    self.edges.len()
                ));
            }
        }
        let node_of: Vec<usize> = self.pins.iter().map(|p| p.node).collect();
        let (order, ranges) = bucket(&node_of, self.nodes.len());
        for (node, range) in self.nodes.iter_mut().zip(ranges) {
            node.first_pin = range.start;
            node.last_pin = range.end;
        }
        self.node_pins = order;

        let edge_of: Vec<usize> = self.pins.iter().map(|p| p.edge).collect();
        let (order, ranges) = bucket(&edge_of, self.edges.len());
        for (edge, range) in self.edges.iter_mut().zip(ranges) {
            edge.first_pin = range.start;
            edge.last_pin = range.end;
        }
        self.edge_pins = order;
        Ok(())
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
    /// Ids of the pins owned by node `id`
    pub fn node_pin_ids(&self, id: NodeId) -> &[PinId] {
        match self.nodes.get(id) {
            Some(node) => &self.node_pins[node.pin_range()],
            None => &[],
        }
    }
    /// Ids of the pins connected to edge `id`
    pub fn edge_pin_ids(&self, id: EdgeId) -> &[PinId] {
        match self.edges.get(id) {
            Some(edge) => &self.edge_pins[edge.pin_range()],
            None => &[],
        }
    }
    /// Iterate over the pins owned by node `id`
    pub fn node_pins(&self, id: NodeId) -> impl Iterator<Item = &Pin> + '_ {
        self.node_pin_ids(id).iter().map(move |&p| &self.pins[p])
    }
    /// Iterate over the pins connected to edge `id`
    pub fn edge_pins(&self, id: EdgeId) -> impl Iterator<Item = &Pin> + '_ {
        self.edge_pin_ids(id).iter().map(move |&p| &self.pins[p])
    }
    /// Absolute x-coordinate of pin `pin`, in its node's current orientation
    pub fn pin_x(&self, pin: &Pin) -> f64 {
        self.nodes[pin.node].x + pin.offset_x
    }
}
impl TryFrom<NetworkData> for Network {
    type Error = DpoError;
    fn try_from(data: NetworkData) -> DpoResult<Self> {
        Self::new(data.nodes, data.edges, data.pins)
    }
}
impl From<Network> for NetworkData {
    fn from(net: Network) -> Self {
        Self {
            nodes: net.nodes,
            edges: net.edges,
            pins: net.pins,
        }
    }
}

/// Counting-sort the indices of `keys` into `n` buckets.
/// Returns the stable ordering of indices, and each bucket's range within it.
fn bucket(keys: &[usize], n: usize) -> (Vec<usize>, Vec<Range<usize>>) {
    let mut starts = vec![0; n + 1];
    for &k in keys {
        starts[k + 1] += 1;
    }
    for i in 0..n {
        starts[i + 1] += starts[i];
    }
    let ranges = (0..n).map(|i| starts[i]..starts[i + 1]).collect();
    let mut next = starts;
    let mut order = vec![0; keys.len()];
    for (idx, &k) in keys.iter().enumerate() {
        order[next[k]] = idx;
        next[k] += 1;
    }
    (order, ranges)
}

/// # Segment
/// Contiguous run of sites in a row, and the cells placed in it, ordered left to right.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    /// Row in which the segment lies
    pub row: RowId,
    /// Left boundary
    pub min_x: f64,
    /// Right boundary
    pub max_x: f64,
    /// Member cells, left to right
    #[serde(default)]
    pub cells: Vec<NodeId>,
}

///
/// # Design
///
/// Everything the orientation and flip passes read and write.
/// The order of `segments` is the order in which the passes visit them.
///
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Design {
    #[serde(default)]
    pub name: String,
    pub arch: Architecture,
    pub network: Network,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<Segment>,
}
impl SerdeFile for Design {}
impl Design {
    /// Load from file `fname`, in the format indicated by its extension, and validate the result.
    pub fn from_file(fname: impl AsRef<Path>) -> DpoResult<Self> {
        let design = <Self as SerdeFile>::load(fname)?;
        design.validate()?;
        Ok(design)
    }
    /// Check the integrity of our cross-references. See [crate::validate].
    pub fn validate(&self) -> DpoResult<()> {
        crate::validate::DesignValidator::validate(self)
    }
}
