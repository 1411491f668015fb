//! Orbit demo: a small solar system driven through the scene core
//!
//! Builds a sun, a planet on a rotating pivot, a moon and a translucent ring,
//! then runs a few frames of animation, preparation and drawing against a
//! backend that only logs what it is asked to do.
//!
//! Usage: `orbit_demo [config.toml|config.ron]`

use log::{debug, info, trace};
use scene_engine::foundation::math::FieldOfView;
use scene_engine::prelude::*;
use scene_engine::render::DrawItem;
use scene_engine::scene::{ComponentMutation, ComponentMutator};
use std::rc::Rc;

const FRAMES: usize = 8;
const DEGREES_PER_FRAME: f32 = 15.0;

/// Errors the demo can end with
#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Graphics backend that logs instead of drawing
#[derive(Debug, Default)]
struct LoggingBackend {
    draws: usize,
    light_uploads: usize,
}

impl GraphicsBackend for LoggingBackend {
    fn set_lights_in_shader(&mut self, shader: ShaderKind, lights: &LightBuckets) -> SceneResult<()> {
        self.light_uploads += 1;
        for (light_type, entries) in lights.iter() {
            trace!("{:?} <- {} {:?} light(s)", shader, entries.len(), light_type);
        }
        Ok(())
    }

    fn use_render_data(&mut self, node: NodeId, mesh: &ComponentMesh, material: &ComponentMaterial) -> SceneResult<()> {
        trace!(
            "Bind mesh {:?} with material '{}' for {:?}",
            mesh.mesh,
            material.material.name,
            node
        );
        Ok(())
    }

    fn draw_node(&mut self, node: NodeId, mtx_mesh_to_world: &Matrix4x4, _mtx_mesh_to_view: &Matrix4x4) -> SceneResult<()> {
        self.draws += 1;
        debug!("Draw {:?} at {}", node, mtx_mesh_to_world.get_translation());
        Ok(())
    }
}

struct SolarSystem {
    root: NodeId,
    planet: NodeId,
    camera: ComponentId,
}

fn add_body(
    graph: &mut Graph,
    parent: NodeId,
    name: &str,
    translation: Vector3,
    mesh: MeshId,
    material: Material,
) -> SceneResult<NodeId> {
    let node = graph.create_node(name);
    graph.add_child(parent, node)?;
    let transform = graph.create_component(ComponentTransform::from_translation(translation));
    graph.attach(node, transform)?;
    let mesh = graph.create_component(ComponentMesh::new(mesh));
    graph.attach(node, mesh)?;
    let material = graph.create_component(ComponentMaterial::new(material));
    graph.attach(node, material)?;
    Ok(node)
}

fn build_scene(graph: &mut Graph) -> SceneResult<SolarSystem> {
    let root = graph.create_node("solar_system");
    if let Some(node) = graph.node_mut(root) {
        node.add_event_listener(
            EventType::ChildAppend,
            Rc::new(|event: &Event| trace!("Appended {:?}", event.target())),
            false,
        );
    }

    let sun = add_body(
        graph,
        root,
        "sun",
        Vector3::ZERO,
        MeshId(0),
        Material::new("sun", ShaderKind::UniColor, Color::rgb(1.0, 0.9, 0.4)),
    )?;
    let sunlight = graph.create_component(LightFactory::point(Vector3::ZERO, Color::WHITE, 2.0));
    graph.attach(sun, sunlight)?;
    let ambient = graph.create_component(LightFactory::ambient(Color::WHITE, 0.1));
    graph.attach(root, ambient)?;

    let orbit = graph.create_node("orbit");
    graph.add_child(root, orbit)?;
    let pivot = graph.create_component(ComponentTransform::default());
    graph.attach(orbit, pivot)?;

    let planet = add_body(
        graph,
        orbit,
        "planet",
        Vector3::new(10.0, 0.0, 0.0),
        MeshId(1),
        Material::new("planet", ShaderKind::Phong, Color::rgb(0.2, 0.4, 0.9)),
    )?;
    add_body(
        graph,
        planet,
        "moon",
        Vector3::new(2.0, 0.0, 0.0),
        MeshId(2),
        Material::new("moon", ShaderKind::Gouraud, Color::rgb(0.7, 0.7, 0.7)),
    )?;
    add_body(
        graph,
        planet,
        "ring",
        Vector3::ZERO,
        MeshId(3),
        Material::new("ring", ShaderKind::Phong, Color::new(0.9, 0.8, 0.6, 0.4)),
    )?;
    let pick = graph.create_component(ComponentPick::new(PickType::Radius));
    graph.attach(planet, pick)?;

    let eye = graph.create_node("camera");
    graph.add_child(root, eye)?;
    let placement = graph.create_component(ComponentTransform::from_translation(Vector3::new(0.0, 5.0, -30.0)));
    graph.attach(eye, placement)?;
    let mut lens = ComponentCamera::new();
    lens.project_central(16.0 / 9.0, 60.0, FieldOfView::Diagonal, 0.1, 500.0);
    let camera = graph.create_component(lens);
    graph.attach(eye, camera)?;

    Ok(SolarSystem { root, planet, camera })
}

fn orbit_step(frame: usize) -> NodeMutator {
    #[allow(clippy::cast_precision_loss)]
    let angle = frame as f32 * DEGREES_PER_FRAME;
    NodeMutator::new().child(
        "orbit",
        NodeMutator::new().component(
            ComponentMutator::new(ComponentKind::Transform)
                .with(ComponentMutation::Rotation(Vector3::new(0.0, angle, 0.0))),
        ),
    )
}

fn describe(item: &DrawItem) -> String {
    format!("{:?} ({:?})", item.node, item.shader)
}

fn run(config_path: Option<String>) -> Result<(), DemoError> {
    let config = match config_path {
        Some(path) => SceneConfig::load_from_file(&path)?,
        None => SceneConfig::default(),
    };
    config.init_logging();
    info!("Starting orbit demo");

    let mut graph = Graph::new();
    let scene = build_scene(&mut graph)?;
    let mut manager = RenderManager::with_config(LoggingBackend::default(), config.render);

    for frame in 0..FRAMES {
        graph.apply_animation(scene.root, &orbit_step(frame))?;
        manager.prepare(&mut graph, scene.root)?;
        manager.draw(&graph, scene.camera)?;

        let planet = graph.node(scene.planet).ok_or(SceneError::NodeNotFound(scene.planet))?;
        info!(
            "Frame {}: planet at {}, branch radius {:.2}",
            frame,
            planet.mtx_world().get_translation(),
            planet.radius()
        );
    }

    let alpha: Vec<String> = manager.queue().alpha().iter().map(describe).collect();
    info!("Alpha items of the last frame: {}", alpha.join(", "));
    info!(
        "Drew {} meshes and uploaded lights {} times over {} frames",
        manager.backend().draws,
        manager.backend().light_uploads,
        FRAMES
    );
    info!("Scene:\n{}", graph.to_hierarchy_string(scene.root));

    let saved = graph.serialize(scene.root)?.to_ron()?;
    info!("Serialized scene to {} bytes of RON", saved.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let result = run(std::env::args().nth(1));
    if let Err(e) = &result {
        log::error!("Orbit demo failed: {e}");
    }
    result.map_err(Into::into)
}
