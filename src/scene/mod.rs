//! Per-frame boolean scene evaluation: brushes, drivers, evaluator,
//! orchestrator, and the host seam they publish through.

pub mod brush;
pub mod config;
pub mod driver;
pub mod evaluator;
pub mod host;
pub mod material;
pub mod mesh;
pub mod orchestrator;
pub mod overlay;

pub use brush::{Axis, Brush};
pub use config::SceneConfig;
pub use driver::Pendulum;
pub use evaluator::{Evaluator, Operation};
pub use host::{RecordingHost, SceneHost};
pub use material::{Material, MaterialId, MaterialTable};
pub use mesh::{DerivedMesh, GeometryGroup, MeshId, RenderGeometry};
pub use orchestrator::{BrushRegistry, DrivenBrush, FrameOrchestrator, TickOutcome};
pub use overlay::WireframeOverlay;
