//! The boolean evaluator: brushes in, one renderable mesh out

use crate::scene::brush::Brush;
use crate::scene::mesh::DerivedMesh;
use crate::traits::BooleanOps;

/// The boolean combination applied between base and tool each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Carve the tool out of the base.
    Subtraction,
    /// Merge base and tool.
    Union,
    /// Keep only the overlap of base and tool.
    Intersection,
}

/// Evaluates one boolean operation between two brushes per call.
///
/// Stateless apart from the grouping flag the orchestrator copies in from
/// configuration before each evaluation. The call is total: degenerate or
/// empty inputs flow through the BSP kernel and extraction without any
/// panicking path, yielding an empty but still renderable mesh in the worst
/// case. Synchronous and blocking within the frame; a slow evaluation
/// directly delays presentation, which is the accepted cost of the design.
#[derive(Debug, Clone)]
pub struct Evaluator {
    /// Preserve per-input material groups in the result.
    pub use_groups: bool,
}

impl Evaluator {
    pub const fn new() -> Self {
        Evaluator { use_groups: true }
    }

    /// Combine `base OP tool` in world space and extract render buffers.
    ///
    /// Both brushes' world solids are read here, which rebuilds them if a
    /// transform changed since the last evaluation. Results inherit the base
    /// brush's material wherever grouping is off or a fragment carries no
    /// metadata. Deterministic for identical brush states.
    pub fn evaluate(&self, base: &Brush, tool: &Brush, operation: Operation) -> DerivedMesh {
        let a = base.world_solid();
        let b = tool.world_solid();

        let combined = match operation {
            Operation::Subtraction => a.difference(b),
            Operation::Union => a.union(b),
            Operation::Intersection => a.intersection(b),
        };

        DerivedMesh::from_solid(&combined, base.material(), self.use_groups)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
