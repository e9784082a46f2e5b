//! The per-frame evaluation-and-replacement loop
//!
//! Each tick recomputes the boolean combination of the live brushes from
//! scratch and swaps it into the scene: advance the driven transforms,
//! retire the previous frame's derived mesh, evaluate, publish, retarget the
//! wireframe overlay. There is no caching or frame-to-frame diffing; the
//! continuous re-creation is the intended behavior, not an optimization
//! opportunity.

use crate::float_types::Real;
use crate::scene::brush::Brush;
use crate::scene::config::SceneConfig;
use crate::scene::driver::Pendulum;
use crate::scene::evaluator::Evaluator;
use crate::scene::host::SceneHost;
use crate::scene::material::{Material, MaterialTable};
use crate::scene::mesh::DerivedMesh;
use crate::scene::overlay::WireframeOverlay;

/// A tool brush paired with the driver that animates it.
#[derive(Debug, Clone)]
pub struct DrivenBrush {
    pub brush: Brush,
    pub driver: Pendulum,
}

/// The orchestrator's exclusively-owned brush slots.
///
/// Slots are optional because the host can start ticking before scene wiring
/// finishes; a tick that finds the base or the primary tool missing is a
/// no-op frame. Every registered tool is animated each tick, but only the
/// first one, the primary, feeds the evaluator. That asymmetry reproduces
/// the observed scene exactly: the second pendulum swings without carving.
#[derive(Debug, Clone, Default)]
pub struct BrushRegistry {
    base: Option<Brush>,
    tools: Vec<DrivenBrush>,
}

impl BrushRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base(&mut self, brush: Brush) {
        self.base = Some(brush);
    }

    pub fn add_tool(&mut self, brush: Brush, driver: Pendulum) {
        self.tools.push(DrivenBrush { brush, driver });
    }

    pub fn base(&self) -> Option<&Brush> {
        self.base.as_ref()
    }

    pub fn base_mut(&mut self) -> Option<&mut Brush> {
        self.base.as_mut()
    }

    /// The tool brush fed to the evaluator.
    pub fn primary_tool(&self) -> Option<&Brush> {
        self.tools.first().map(|driven| &driven.brush)
    }

    pub fn tools(&self) -> &[DrivenBrush] {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut [DrivenBrush] {
        &mut self.tools
    }
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A fresh derived mesh was published.
    Rendered,
    /// Brushes were not ready; nothing changed in the scene.
    Skipped,
}

/// Drives one boolean-combined mesh through the scene, frame after frame.
///
/// Owns the brush registry, the evaluator, the material table, the wireframe
/// overlay and the single-slot "previous result". The host invokes
/// [`tick`](FrameOrchestrator::tick) once per rendered frame on the render
/// thread; ticks run strictly sequentially and never block on anything but
/// the evaluation itself.
#[derive(Debug)]
pub struct FrameOrchestrator {
    registry: BrushRegistry,
    evaluator: Evaluator,
    config: SceneConfig,
    materials: MaterialTable,
    overlay: WireframeOverlay,
    previous: Option<DerivedMesh>,
}

impl FrameOrchestrator {
    pub fn new(
        config: SceneConfig,
        materials: MaterialTable,
        overlay_material: Material,
    ) -> Self {
        FrameOrchestrator {
            registry: BrushRegistry::new(),
            evaluator: Evaluator::new(),
            config,
            materials,
            overlay: WireframeOverlay::new(overlay_material),
            previous: None,
        }
    }

    /// One frame of the loop, at elapsed time `t` (seconds, monotonically
    /// increasing, not required to start at zero).
    ///
    /// Order matters and is part of the contract:
    /// 1. every driven brush advances and its world solid is refreshed;
    /// 2. if the base or primary tool is missing, the tick is a no-op;
    /// 3. the previous derived mesh is retracted and released *before*
    ///    evaluation, so a failing evaluation can cost at most one blank
    ///    frame, never a leak or a double release;
    /// 4. the evaluator runs with the grouping mode copied from config;
    /// 5. the result is flagged for shadows, published, and the overlay
    ///    alias is retargeted at it, strictly after publishing.
    pub fn tick<H: SceneHost>(&mut self, host: &mut H, t: Real) -> TickOutcome {
        for driven in self.registry.tools_mut() {
            let value = driven.driver.displacement(t);
            driven.brush.set_axis_position(driven.driver.axis, value);
            // refresh eagerly so evaluation below reads current geometry
            driven.brush.world_solid();
        }

        // first frames can fire before scene wiring completes
        if self.registry.base().is_none() || self.registry.primary_tool().is_none() {
            log::debug!("tick skipped at t={t:.3}: brushes not ready");
            return TickOutcome::Skipped;
        }

        // retire last frame's result; the emptied slot is what makes the
        // failure containment above hold
        if let Some(previous) = self.previous.take() {
            host.retract(&previous);
        }

        self.evaluator.use_groups = self.config.use_groups;

        let base = self.registry.base().expect("base checked above");
        let tool = self.registry.primary_tool().expect("tool checked above");
        let mut result = self.evaluator.evaluate(base, tool, self.config.operation);

        result.cast_shadow = true;
        result.receive_shadow = true;

        host.publish(&result);

        self.overlay.retarget(result.geometry());
        self.overlay.set_visible(self.config.wireframe);

        if result.is_empty() {
            log::warn!("boolean result is empty at t={t:.3}");
        }
        log::trace!(
            "tick t={t:.3}: {} triangles in {} group(s)",
            result.triangle_count(),
            result.materials().len()
        );

        self.previous = Some(result);
        TickOutcome::Rendered
    }

    /// Release the currently attached derived mesh and drop the overlay
    /// alias. Hosts that simply stop ticking may skip this; hosts that keep
    /// running want the scene left clean.
    pub fn retire<H: SceneHost>(&mut self, host: &mut H) {
        if let Some(previous) = self.previous.take() {
            host.retract(&previous);
        }
        self.overlay.clear();
    }

    /// The derived mesh currently attached to the scene, if any.
    pub fn current(&self) -> Option<&DerivedMesh> {
        self.previous.as_ref()
    }

    pub fn overlay(&self) -> &WireframeOverlay {
        &self.overlay
    }

    pub fn registry(&self) -> &BrushRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BrushRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }
}
