//! Per-frame **constructive solid geometry** for interactive scenes: a BSP
//! boolean kernel plus the orchestration loop that re-evaluates one
//! `base OP tool` combination every rendered frame and swaps the result into
//! the scene graph.
//!
//! The crate renders nothing itself. A host (the thing that owns a window,
//! camera and lights) calls [`FrameOrchestrator::tick`] once per frame and
//! receives the output through the [`SceneHost`] publish/retract seam:
//!
//! ```
//! use csgframe::scene::{
//!     Axis, Brush, FrameOrchestrator, Material, MaterialTable, Pendulum,
//!     RecordingHost, SceneConfig,
//! };
//! use csgframe::solid::Solid;
//! use csgframe::traits::BooleanOps;
//!
//! let mut materials = MaterialTable::new();
//! let frosted = materials.insert(Material::solid_color(1.0, 1.0, 1.0).with_opacity(0.7));
//! let teal = materials.insert(Material::solid_color(0.5, 0.8, 0.77));
//!
//! let mut scene = FrameOrchestrator::new(
//!     SceneConfig::default(),
//!     materials,
//!     Material::wireframe(0.0, 0.59, 0.53),
//! );
//! scene
//!     .registry_mut()
//!     .set_base(Brush::new("base", Solid::cube(3.0, None).center(), frosted));
//! scene.registry_mut().add_tool(
//!     Brush::new("swing-x", Solid::sphere(1.2, 8, 4, None), teal),
//!     Pendulum::new(3.0, 0.0, Axis::X),
//! );
//!
//! let mut host = RecordingHost::new();
//! scene.tick(&mut host, 0.0);
//! assert_eq!(host.attached_count(), 1);
//! ```
//!
//! [`FrameOrchestrator::tick`]: scene::FrameOrchestrator::tick
//! [`SceneHost`]: scene::SceneHost

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod io;
pub mod scene;
pub mod solid;
pub mod traits;

pub use solid::Solid;
pub use solid::vertex::Vertex;
pub use traits::BooleanOps;

#[cfg(test)]
mod tests;
