//! End-to-end run of the carve loop through the public API only.

use csgframe::float_types::{Real, TAU};
use csgframe::scene::{
    Axis, Brush, FrameOrchestrator, Material, MaterialTable, Pendulum, RecordingHost,
    SceneConfig, TickOutcome,
};
use csgframe::solid::Solid;
use csgframe::traits::BooleanOps;

fn pendulum_scene() -> FrameOrchestrator {
    let mut materials = MaterialTable::new();
    let frosted = materials.insert(
        Material::solid_color(1.0, 1.0, 1.0)
            .with_opacity(0.7)
            .with_flat_shading(),
    );
    let teal = materials.insert(Material::solid_color(0.50, 0.80, 0.77));

    let mut scene = FrameOrchestrator::new(
        SceneConfig {
            wireframe: true,
            ..SceneConfig::default()
        },
        materials,
        Material::wireframe(0.0, 0.59, 0.53),
    );
    scene.registry_mut().set_base(Brush::new(
        "base",
        Solid::cube(3.0, None).center(),
        frosted,
    ));
    scene.registry_mut().add_tool(
        Brush::new("swing-x", Solid::sphere(1.2, 8, 4, None), teal),
        Pendulum::new(3.0, 0.0, Axis::X),
    );
    scene.registry_mut().add_tool(
        Brush::new("swing-z", Solid::sphere(1.2, 8, 4, None), teal),
        Pendulum::new(3.0, csgframe::float_types::FRAC_PI_2, Axis::Z),
    );
    scene
}

#[test]
fn a_full_period_of_frames_preserves_every_invariant() {
    let mut scene = pendulum_scene();
    let mut host = RecordingHost::new();

    const FRAMES: usize = 240;
    for frame in 0..FRAMES {
        let t = frame as Real / FRAMES as Real * TAU;
        assert_eq!(scene.tick(&mut host, t), TickOutcome::Rendered);

        // exactly one derived mesh attached, and it is the current one
        assert_eq!(host.attached_count(), 1);
        let live = scene.current().expect("live mesh after a rendered tick");
        assert!(host.is_attached(live.id()));

        // the host sees the same buffers the orchestrator owns
        let retained = host.geometry_of(live.id()).expect("host retains geometry");
        assert!(std::sync::Arc::ptr_eq(retained, live.geometry()));

        // the overlay aliases the live geometry and follows configuration
        assert!(scene.overlay().aliases(live.geometry()));
        assert!(scene.overlay().is_visible());

        // shadow flags are maintained on every frame's result
        assert!(live.cast_shadow && live.receive_shadow);
    }

    assert_eq!(host.published_total(), FRAMES);
    assert_eq!(host.retracted_total(), FRAMES - 1);

    scene.retire(&mut host);
    assert_eq!(host.attached_count(), 0);
    assert_eq!(host.retracted_total(), FRAMES);
    assert!(scene.overlay().geometry().is_none());
}

#[test]
fn late_brush_wiring_turns_skipped_frames_into_rendered_ones() {
    let mut materials = MaterialTable::new();
    let white = materials.insert(Material::solid_color(1.0, 1.0, 1.0));
    let teal = materials.insert(Material::solid_color(0.50, 0.80, 0.77));

    let mut scene = FrameOrchestrator::new(
        SceneConfig::default(),
        materials,
        Material::wireframe(0.0, 0.59, 0.53),
    );

    let mut host = RecordingHost::new();
    // the host starts ticking before the scene finished wiring
    assert_eq!(scene.tick(&mut host, 0.00), TickOutcome::Skipped);

    scene
        .registry_mut()
        .set_base(Brush::new("base", Solid::cube(3.0, None).center(), white));
    assert_eq!(scene.tick(&mut host, 0.02), TickOutcome::Skipped);

    scene.registry_mut().add_tool(
        Brush::new("swing-x", Solid::sphere(1.2, 8, 4, None), teal),
        Pendulum::new(3.0, 0.0, Axis::X),
    );
    assert_eq!(scene.tick(&mut host, 0.04), TickOutcome::Rendered);
    assert_eq!(host.attached_count(), 1);
}
