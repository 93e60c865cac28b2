//!
//! # Design Validation
//!
//! Integrity checks on the cross-references of a [Design], run before any pass.
//! Pin-to-node and pin-to-edge references are checked earlier, on creation of its [crate::data::Network].
//!

// Local imports
use crate::data::Design;
use crate::error::{DpoError, DpoResult, ErrorContext};
use crate::utils::{ErrorHelper, Unwrapper};

/// Validator state: the stack of entities being checked, reported on failure
#[derive(Debug, Default)]
pub(crate) struct DesignValidator {
    stack: Vec<ErrorContext>,
}
impl ErrorHelper for DesignValidator {
    type Error = DpoError;
    fn err(&self, msg: impl Into<String>) -> DpoError {
        DpoError::Validation {
            message: msg.into(),
            stack: self.stack.clone(),
        }
    }
}
impl DesignValidator {
    pub(crate) fn validate(design: &Design) -> DpoResult<()> {
        let mut this = Self::default();
        this.stack.push(ErrorContext::Design(design.name.clone()));
        this.validate_spacing(design)?;
        this.validate_segments(design)?;
        this.stack.pop();
        Ok(())
    }
    fn validate_spacing(&mut self, design: &Design) -> DpoResult<()> {
        if let Some(ref table) = design.arch.spacing.table {
            self.stack.push(ErrorContext::SpacingTable);
            self.assert(table.is_square(), "Edge spacing table is not square")?;
            let negative = table.spacings.iter().flatten().any(|s| *s < 0.0);
            self.assert(!negative, "Negative edge spacing")?;
            self.stack.pop();
        }
        Ok(())
    }
    /// Check each segment's row, extent, and membership.
    /// Each node may be placed in at most one segment.
    fn validate_segments(&mut self, design: &Design) -> DpoResult<()> {
        let nodes = design.network.nodes();
        let mut placed_in: Vec<Option<usize>> = vec![None; nodes.len()];
        for (seg_id, segment) in design.segments.iter().enumerate() {
            self.stack.push(ErrorContext::Segment(seg_id));
            self.assert(
                segment.row < design.arch.rows.len(),
                format!("Invalid row {}", segment.row),
            )?;
            self.assert(
                segment.min_x <= segment.max_x,
                format!("Inverted extent [{}, {}]", segment.min_x, segment.max_x),
            )?;
            for &cell in segment.cells.iter() {
                let slot = placed_in
                    .get_mut(cell)
                    .unwrapper(self, format!("Invalid node id {}", cell))?;
                if let Some(other) = *slot {
                    self.stack.push(ErrorContext::Node(nodes[cell].name.clone()));
                    return self.fail(format!("Node also placed in segment {}", other));
                }
                *slot = Some(seg_id);
            }
            self.stack.pop();
        }
        Ok(())
    }
}
