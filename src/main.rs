// main.rs
//
// Headless run of the pendulum-carving scene: a frosted cube carved by a
// swinging sphere, one boolean evaluation per frame, with STL snapshots of
// selected frames written to stl/.

use std::fs;

use csgframe::float_types::{FRAC_PI_2, Real, TAU};
use csgframe::scene::{
    Axis, Brush, FrameOrchestrator, Material, MaterialTable, Pendulum, RecordingHost,
    SceneConfig,
};
use csgframe::solid::Solid;
use csgframe::traits::BooleanOps;

const SWING_AMPLITUDE: Real = 3.0;
const FRAMES: usize = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    // Ensure the /stl folder exists
    let _ = fs::create_dir_all("stl");

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
        Brush::new("swing-x", Solid::sphere(1.2, 32, 16, None), teal),
        Pendulum::new(SWING_AMPLITUDE, 0.0, Axis::X),
    );
    scene.registry_mut().add_tool(
        Brush::new("swing-z", Solid::sphere(1.2, 32, 16, None), teal),
        Pendulum::new(SWING_AMPLITUDE, FRAC_PI_2, Axis::Z),
    );

    let mut host = RecordingHost::new();

    for frame in 0..FRAMES {
        let t = frame as Real / FRAMES as Real * TAU;
        scene.tick(&mut host, t);

        // quarter-period snapshots: centered bite, swung clear, and back
        if frame % (FRAMES / 4) == 0 {
            if let Some(mesh) = scene.current() {
                let name = format!("carve_{frame:03}");
                let path = format!("stl/{name}.stl");
                match fs::write(&path, mesh.geometry().to_stl_ascii(&name)) {
                    Ok(()) => log::info!(
                        "t={t:.2}: {} triangles, {} group(s) -> {path}",
                        mesh.triangle_count(),
                        mesh.materials().len()
                    ),
                    Err(e) => log::error!("failed to write {path}: {e}"),
                }
            }
        }
    }

    scene.retire(&mut host);
    log::info!(
        "{} frames evaluated, {} published, {} retracted, {} still attached",
        FRAMES,
        host.published_total(),
        host.retracted_total(),
        host.attached_count()
    );
}
