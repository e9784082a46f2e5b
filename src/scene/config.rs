//! Process-lifetime scene configuration

use crate::scene::evaluator::Operation;

/// Knobs of the per-frame evaluation loop.
///
/// Configured once at scene setup in the current behavior, but held behind a
/// mutable accessor on the orchestrator so a future control surface can vary
/// it between frames. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneConfig {
    /// Which boolean combines base and tool each frame.
    pub operation: Operation,
    /// Preserve per-input material grouping in the result.
    pub use_groups: bool,
    /// Show the wireframe overlay over the result.
    pub wireframe: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            operation: Operation::Subtraction,
            use_groups: true,
            wireframe: false,
        }
    }
}
