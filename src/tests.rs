use crate::float_types::{FRAC_PI_2, PI, Real};
use crate::scene::{
    Axis, Brush, FrameOrchestrator, Material, MaterialId, MaterialTable, Operation, Pendulum,
    RecordingHost, SceneConfig, TickOutcome,
};
use crate::solid::Solid;
use crate::traits::BooleanOps;
use std::sync::Arc;

// --------------------------------------------------------
//   Helpers
// --------------------------------------------------------

/// Quick helper to compare floating-point results with an acceptable tolerance.
fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// The demo scene (frosted cube, two swinging teal spheres) at a chosen
/// sphere resolution (coarse spheres keep the long loops fast).
fn carve_scene(segments: usize, stacks: usize) -> FrameOrchestrator {
    let mut materials = MaterialTable::new();
    let frosted = materials.insert(
        Material::solid_color(1.0, 1.0, 1.0)
            .with_opacity(0.7)
            .with_flat_shading(),
    );
    let teal = materials.insert(Material::solid_color(0.50, 0.80, 0.77));

    let mut scene = FrameOrchestrator::new(
        SceneConfig::default(),
        materials,
        Material::wireframe(0.0, 0.59, 0.53),
    );
    scene.registry_mut().set_base(Brush::new(
        "base",
        Solid::cube(3.0, None).center(),
        frosted,
    ));
    scene.registry_mut().add_tool(
        Brush::new("swing-x", Solid::sphere(1.2, segments, stacks, None), teal),
        Pendulum::new(3.0, 0.0, Axis::X),
    );
    scene.registry_mut().add_tool(
        Brush::new("swing-z", Solid::sphere(1.2, segments, stacks, None), teal),
        Pendulum::new(3.0, FRAC_PI_2, Axis::Z),
    );
    scene
}

// --------------------------------------------------------
//   Solid kernel: boolean operations
// --------------------------------------------------------

#[test]
fn difference_with_disjoint_tool_keeps_base_volume() {
    let base: Solid<()> = Solid::cube(3.0, None).center();
    let tool: Solid<()> = Solid::sphere(1.2, 16, 8, None).translate(3.0, 0.0, 0.0);

    let result = base.difference(&tool);
    assert!(
        approx_eq(result.volume(), 27.0, 1e-9),
        "no-op subtraction must keep the base volume, got {}",
        result.volume()
    );
    // nothing intersected, so the base faces pass through unsplit
    assert_eq!(result.polygons.len(), base.polygons.len());
}

#[test]
fn difference_with_contained_tool_carves_a_cavity() {
    let base: Solid<()> = Solid::cube(3.0, None).center();
    let tool: Solid<()> = Solid::sphere(1.2, 16, 8, None);

    let result = base.difference(&tool);
    let expected = 27.0 - tool.volume();
    assert!(
        approx_eq(result.volume(), expected, 1e-6),
        "carved volume {} should equal base minus tool {}",
        result.volume(),
        expected
    );
}

#[test]
fn difference_with_swallowing_tool_is_empty() {
    let base: Solid<()> = Solid::cube(1.0, None).center();
    let tool: Solid<()> = Solid::sphere(2.0, 16, 8, None);

    let result = base.difference(&tool);
    assert!(result.is_empty(), "a fully swallowed base must vanish");
    assert_eq!(result.volume(), 0.0);
}

#[test]
fn intersection_of_disjoint_solids_is_empty() {
    let a: Solid<()> = Solid::cube(1.0, None);
    let b: Solid<()> = Solid::cube(1.0, None).translate(5.0, 0.0, 0.0);
    assert!(a.intersection(&b).is_empty());
}

#[test]
fn union_of_disjoint_solids_sums_volumes() {
    let a: Solid<()> = Solid::cube(1.0, None);
    let b: Solid<()> = Solid::cube(2.0, None).translate(5.0, 0.0, 0.0);
    assert!(approx_eq(a.union(&b).volume(), 1.0 + 8.0, 1e-9));
}

#[test]
fn boolean_results_keep_per_input_metadata() {
    let base = Solid::cube(3.0, Some(0u32)).center();
    let tool = Solid::sphere(1.2, 16, 8, Some(1u32));

    let result = base.difference(&tool);
    let has = |tag: u32| {
        result
            .polygons
            .iter()
            .any(|p| p.metadata() == Some(&tag))
    };
    assert!(has(0), "faces inherited from the base must keep its tag");
    assert!(has(1), "cavity faces must keep the tool's tag");
}

// --------------------------------------------------------
//   Evaluator
// --------------------------------------------------------

fn cube_and_sphere_brushes() -> (Brush, Brush) {
    let base = Brush::new("base", Solid::cube(3.0, None).center(), MaterialId(0));
    let tool = Brush::new("tool", Solid::sphere(1.2, 16, 8, None), MaterialId(1));
    (base, tool)
}

#[test]
fn evaluation_is_deterministic_for_fixed_brushes() {
    let (base, tool) = cube_and_sphere_brushes();
    let evaluator = crate::scene::Evaluator::new();

    let first = evaluator.evaluate(&base, &tool, Operation::Subtraction);
    let second = evaluator.evaluate(&base, &tool, Operation::Subtraction);

    assert_eq!(first.triangle_count(), second.triangle_count());
    assert_eq!(first.geometry().groups, second.geometry().groups);
    // structurally equal, but distinct objects
    assert_ne!(first.id(), second.id());
    assert!(!Arc::ptr_eq(first.geometry(), second.geometry()));
}

#[test]
fn grouped_extraction_splits_by_source_material() {
    let (base, tool) = cube_and_sphere_brushes();
    let evaluator = crate::scene::Evaluator { use_groups: true };

    let mesh = evaluator.evaluate(&base, &tool, Operation::Subtraction);
    let mut materials = mesh.materials().to_vec();
    materials.sort();
    assert_eq!(materials, [MaterialId(0), MaterialId(1)]);

    // group ranges are contiguous, disjoint, and cover the index buffer
    let groups = &mesh.geometry().groups;
    let mut cursor = 0u32;
    for group in groups {
        assert_eq!(group.start, cursor);
        cursor += group.count;
    }
    assert_eq!(cursor as usize, mesh.geometry().indices.len());
}

#[test]
fn ungrouped_extraction_uses_the_base_material_only() {
    let (base, tool) = cube_and_sphere_brushes();
    let evaluator = crate::scene::Evaluator { use_groups: false };

    let mesh = evaluator.evaluate(&base, &tool, Operation::Subtraction);
    assert_eq!(mesh.materials(), &[MaterialId(0)]);
    assert_eq!(mesh.geometry().groups.len(), 1);
}

#[test]
fn tool_outside_the_base_leaves_it_untouched() {
    let (base, mut tool) = cube_and_sphere_brushes();
    tool.set_axis_position(Axis::X, 3.0);
    let evaluator = crate::scene::Evaluator::new();

    let mesh = evaluator.evaluate(&base, &tool, Operation::Subtraction);
    // 6 untouched quads, 2 triangles each
    assert_eq!(mesh.triangle_count(), 12);
}

// --------------------------------------------------------
//   Orchestrator: tick ordering and resource discipline
// --------------------------------------------------------

#[test]
fn tick_without_brushes_is_a_noop_frame() {
    let mut scene = FrameOrchestrator::new(
        SceneConfig::default(),
        MaterialTable::new(),
        Material::wireframe(0.0, 0.59, 0.53),
    );
    let mut host = RecordingHost::new();

    assert_eq!(scene.tick(&mut host, 0.0), TickOutcome::Skipped);
    assert_eq!(host.published_total(), 0);
    assert!(scene.current().is_none());
}

#[test]
fn tick_publishes_exactly_one_mesh_with_shadow_flags() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    assert_eq!(scene.tick(&mut host, 0.0), TickOutcome::Rendered);
    assert_eq!(host.attached_count(), 1);

    let mesh = scene.current().expect("a mesh is live after a tick");
    assert!(host.is_attached(mesh.id()));
    assert!(mesh.cast_shadow);
    assert!(mesh.receive_shadow);
}

#[test]
fn next_tick_retires_the_previous_mesh_and_its_geometry() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    scene.tick(&mut host, 0.0);
    let first = scene.current().expect("first mesh").id();
    let first_geometry = Arc::downgrade(scene.current().expect("first mesh").geometry());

    scene.tick(&mut host, 0.1);
    assert_eq!(host.attached_count(), 1);
    assert!(!host.is_attached(first), "predecessor must be detached");
    assert!(
        first_geometry.upgrade().is_none(),
        "predecessor geometry must be fully released, not merely detached"
    );
}

#[test]
fn transform_drivers_follow_the_pendulum_law() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    for &t in &[0.0, 0.4, FRAC_PI_2, 1.9, PI, 5.3] {
        scene.tick(&mut host, t);
        let tools = scene.registry().tools();
        assert!(approx_eq(tools[0].brush.position().x, 3.0 * t.sin(), 1e-9));
        assert!(approx_eq(
            tools[1].brush.position().z,
            3.0 * (t + FRAC_PI_2).sin(),
            1e-9
        ));
    }
}

#[test]
fn second_tool_swings_without_affecting_the_result() {
    let mut with_both = carve_scene(8, 4);
    let mut host_a = RecordingHost::new();
    with_both.tick(&mut host_a, 0.7);

    // same scene minus the second pendulum
    let mut materials = MaterialTable::new();
    let frosted = materials.insert(Material::solid_color(1.0, 1.0, 1.0));
    let teal = materials.insert(Material::solid_color(0.50, 0.80, 0.77));
    let mut only_primary = FrameOrchestrator::new(
        SceneConfig::default(),
        materials,
        Material::wireframe(0.0, 0.59, 0.53),
    );
    only_primary.registry_mut().set_base(Brush::new(
        "base",
        Solid::cube(3.0, None).center(),
        frosted,
    ));
    only_primary.registry_mut().add_tool(
        Brush::new("swing-x", Solid::sphere(1.2, 8, 4, None), teal),
        Pendulum::new(3.0, 0.0, Axis::X),
    );
    let mut host_b = RecordingHost::new();
    only_primary.tick(&mut host_b, 0.7);

    // the z pendulum moved...
    assert!(with_both.registry().tools()[1].brush.position().z.abs() > 0.1);
    // ...but contributed nothing to the boolean
    assert_eq!(
        with_both.current().expect("mesh").triangle_count(),
        only_primary.current().expect("mesh").triangle_count()
    );
}

#[test]
fn swallowed_base_renders_empty_and_the_loop_keeps_running() {
    let mut materials = MaterialTable::new();
    let white = materials.insert(Material::solid_color(1.0, 1.0, 1.0));
    let teal = materials.insert(Material::solid_color(0.50, 0.80, 0.77));

    let mut scene = FrameOrchestrator::new(
        SceneConfig::default(),
        materials,
        Material::wireframe(0.0, 0.59, 0.53),
    );
    scene
        .registry_mut()
        .set_base(Brush::new("base", Solid::cube(1.0, None).center(), white));
    // a stationary tool that swallows the base whole
    scene.registry_mut().add_tool(
        Brush::new("engulf", Solid::sphere(2.0, 16, 8, None), teal),
        Pendulum::new(0.0, 0.0, Axis::X),
    );

    let mut host = RecordingHost::new();
    assert_eq!(scene.tick(&mut host, 0.0), TickOutcome::Rendered);
    assert!(scene.current().expect("mesh").is_empty());
    assert_eq!(host.attached_count(), 1);

    // the degenerate frame must not poison the next one
    assert_eq!(scene.tick(&mut host, 0.1), TickOutcome::Rendered);
    assert_eq!(host.attached_count(), 1);
}

#[test]
fn thousand_ticks_stay_resource_bounded() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    for frame in 0..1000 {
        let t = frame as Real * 0.016;
        assert_eq!(scene.tick(&mut host, t), TickOutcome::Rendered);
        if frame % 100 == 0 {
            assert_eq!(host.attached_count(), 1);
        }
    }

    assert_eq!(host.published_total(), 1000);
    assert_eq!(host.retracted_total(), 999);
    assert_eq!(host.attached_count(), 1);

    // exactly two owners of the live geometry: the host and the
    // orchestrator's previous-mesh slot (the overlay only holds a Weak)
    let live = scene.current().expect("live mesh");
    assert_eq!(Arc::strong_count(live.geometry()), 2);
}

// --------------------------------------------------------
//   Orchestrator: overlay and configuration
// --------------------------------------------------------

#[test]
fn overlay_always_aliases_the_live_geometry() {
    let mut scene = carve_scene(8, 4);
    scene.config_mut().wireframe = true;
    let mut host = RecordingHost::new();

    for frame in 0..5 {
        scene.tick(&mut host, frame as Real * 0.3);
        let live = scene.current().expect("live mesh");
        assert!(
            scene.overlay().aliases(live.geometry()),
            "overlay must point at the live geometry, never a predecessor"
        );
        assert!(scene.overlay().is_visible());
    }
}

#[test]
fn overlay_visibility_follows_configuration() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    scene.tick(&mut host, 0.0);
    assert!(!scene.overlay().is_visible());

    scene.config_mut().wireframe = true;
    scene.tick(&mut host, 0.1);
    assert!(scene.overlay().is_visible());
}

#[test]
fn operation_can_be_reconfigured_between_frames() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    scene.tick(&mut host, 0.0);
    let carved = scene.current().expect("mesh").triangle_count();

    scene.config_mut().operation = Operation::Intersection;
    scene.tick(&mut host, 0.0);
    let intersected = scene.current().expect("mesh").triangle_count();

    assert_ne!(carved, intersected);
    assert_eq!(host.attached_count(), 1);
}

#[test]
fn ungrouped_configuration_flows_into_the_evaluator() {
    let mut scene = carve_scene(8, 4);
    scene.config_mut().use_groups = false;
    let mut host = RecordingHost::new();

    scene.tick(&mut host, 0.0);
    assert_eq!(scene.current().expect("mesh").materials().len(), 1);
}

#[test]
fn retire_detaches_everything() {
    let mut scene = carve_scene(8, 4);
    let mut host = RecordingHost::new();

    scene.tick(&mut host, 0.0);
    scene.retire(&mut host);

    assert_eq!(host.attached_count(), 0);
    assert!(scene.current().is_none());
    assert!(scene.overlay().geometry().is_none());
}

// --------------------------------------------------------
//   Scenario: the pendulum carve over a period
// --------------------------------------------------------

#[test]
fn carve_depth_follows_the_swing() {
    let mut scene = carve_scene(16, 8);
    let mut host = RecordingHost::new();

    // t = 0: sphere centered in the cube, concentric bite
    scene.tick(&mut host, 0.0);
    let base = scene.registry().base().expect("base").world_solid().clone();
    let full = base.volume();
    let carved = base.difference(scene.registry().tools()[0].brush.world_solid());
    assert!(carved.volume() < full - 1.0, "the bite must remove material");
    assert!(carved.volume() > 0.0);

    // t = π/2: sphere swung out to x=3, base left intact
    scene.tick(&mut host, FRAC_PI_2);
    let cleared = base.difference(scene.registry().tools()[0].brush.world_solid());
    assert!(
        approx_eq(cleared.volume(), full, 1e-9),
        "at full swing the tool no longer reaches the base"
    );
}
