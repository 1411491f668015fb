use super::*;
use crate::components::{
    ComponentCamera, ComponentKind, ComponentMaterial, ComponentMesh, ComponentPick, ComponentRigidbody,
    ComponentTransform, LightFactory, LightType, Material, MeshId, PhysicsType, PickLayers, PickType, ShaderKind,
};
use crate::config::RenderConfig;
use crate::events::{Event, EventType};
use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::{Color, Matrix4x4, Vector3};
use crate::foundation::pool::Recycler;
use crate::scene::{Graph, SceneError, SceneResult};
use approx::assert_relative_eq;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Lights(ShaderKind, usize),
    Use(NodeId),
    Draw(NodeId, Vector3),
}

#[derive(Debug, Default)]
struct MockBackend {
    calls: Vec<Call>,
}

impl MockBackend {
    fn drawn(&self) -> Vec<(NodeId, Vector3)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Draw(node, position) => Some((*node, *position)),
                _ => None,
            })
            .collect()
    }
}

impl GraphicsBackend for MockBackend {
    fn set_lights_in_shader(&mut self, shader: ShaderKind, lights: &LightBuckets) -> SceneResult<()> {
        self.calls.push(Call::Lights(shader, lights.len()));
        Ok(())
    }

    fn use_render_data(&mut self, node: NodeId, _mesh: &ComponentMesh, _material: &ComponentMaterial) -> SceneResult<()> {
        self.calls.push(Call::Use(node));
        Ok(())
    }

    fn draw_node(&mut self, node: NodeId, mtx_mesh_to_world: &Matrix4x4, _mtx_mesh_to_view: &Matrix4x4) -> SceneResult<()> {
        self.calls.push(Call::Draw(node, mtx_mesh_to_world.get_translation()));
        Ok(())
    }
}

#[derive(Debug, Default)]
struct PhysicsLog {
    pushed: Vec<(NodeId, Vector3)>,
    pose: Option<BodyTransform>,
}

struct MockPhysics(Rc<RefCell<PhysicsLog>>);

impl PhysicsBackend for MockPhysics {
    fn body_transform(&mut self, _node: NodeId, _rigidbody: &ComponentRigidbody) -> Option<BodyTransform> {
        self.0.borrow().pose
    }

    fn push_transform(&mut self, node: NodeId, _rigidbody: &ComponentRigidbody, mtx_world: &Matrix4x4) {
        self.0.borrow_mut().pushed.push((node, mtx_world.get_translation()));
    }
}

fn placed(graph: &mut Graph, parent: Option<NodeId>, name: &str, translation: Vector3) -> NodeId {
    let node = graph.create_node(name);
    if let Some(parent) = parent {
        graph.add_child(parent, node).unwrap();
    }
    let transform = graph.create_component(ComponentTransform::from_translation(translation));
    graph.attach(node, transform).unwrap();
    node
}

fn renderable(graph: &mut Graph, node: NodeId, shader: ShaderKind, alpha: f32) -> (ComponentId, ComponentId) {
    let mesh = graph.create_component(ComponentMesh::new(MeshId(0)));
    graph.attach(node, mesh).unwrap();
    let material = graph.create_component(ComponentMaterial::new(Material::new(
        "test",
        shader,
        Color::new(1.0, 1.0, 1.0, alpha),
    )));
    graph.attach(node, material).unwrap();
    (mesh, material)
}

fn camera_at_origin(graph: &mut Graph, root: NodeId) -> ComponentId {
    let node = graph.create_node("camera");
    graph.add_child(root, node).unwrap();
    let camera = graph.create_component(ComponentCamera::new());
    graph.attach(node, camera).unwrap();
    camera
}

#[test]
fn test_node_without_transform_inherits_parent_world() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(1.0, 2.0, 3.0));
    let bare = graph.create_node("bare");
    graph.add_child(root, bare).unwrap();
    let leaf = placed(&mut graph, Some(bare), "leaf", Vector3::new(0.0, 0.0, 1.0));

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    let root_world = graph.node(root).unwrap().mtx_world().clone();
    assert_eq!(graph.node(bare).unwrap().mtx_world(), &root_world);
    assert_relative_eq!(
        graph.node(leaf).unwrap().mtx_world().get_translation(),
        Vector3::new(1.0, 2.0, 4.0)
    );
}

#[test]
fn test_local_change_waits_for_next_preparation() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(1.0, 0.0, 0.0));
    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    let transform = graph.get_component(root, ComponentKind::Transform).unwrap();
    graph
        .component_data_mut::<ComponentTransform>(transform)
        .unwrap()
        .mtx_local
        .translate_x(5.0, true);
    assert_relative_eq!(
        graph.node(root).unwrap().mtx_world().get_translation(),
        Vector3::new(1.0, 0.0, 0.0)
    );

    manager.prepare(&mut graph, root).unwrap();
    assert_relative_eq!(
        graph.node(root).unwrap().mtx_world().get_translation(),
        Vector3::new(6.0, 0.0, 0.0)
    );
}

#[test]
fn test_world_inverse_shared_until_next_timestamp() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(0.0, 4.0, 0.0));
    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    let first = graph.node(root).unwrap().mtx_world_inverse();
    let second = graph.node(root).unwrap().mtx_world_inverse();
    assert!(Rc::ptr_eq(&first, &second));
    assert_relative_eq!(first.get_translation(), Vector3::new(0.0, -4.0, 0.0));

    manager.prepare(&mut graph, root).unwrap();
    let third = graph.node(root).unwrap().mtx_world_inverse();
    assert!(!Rc::ptr_eq(&first, &third));
    assert_eq!(graph.node(root).unwrap().timestamp_update(), graph.timestamp());
}

#[test]
fn test_alpha_items_drawn_back_to_front() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let camera = camera_at_origin(&mut graph, root);
    let solid = placed(&mut graph, Some(root), "solid", Vector3::new(0.0, 0.0, 1.0));
    renderable(&mut graph, solid, ShaderKind::Phong, 1.0);
    let mut glass = Vec::new();
    for z in [5.0, 20.0, 10.0] {
        let node = placed(&mut graph, Some(root), "glass", Vector3::new(0.0, 0.0, z));
        renderable(&mut graph, node, ShaderKind::Phong, 0.5);
        glass.push(node);
    }

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();
    assert_eq!(manager.queue().opaque().len(), 1);
    assert_eq!(manager.queue().alpha().len(), 3);
    assert!(manager.queue().opaque().iter().all(|item| !glass.contains(&item.node)));

    manager.draw(&graph, camera).unwrap();
    let drawn = manager.backend().drawn();
    assert_eq!(drawn[0].0, solid);
    let depths: Vec<f32> = drawn[1..].iter().map(|(_, position)| position.z).collect();
    assert_eq!(depths, vec![20.0, 10.0, 5.0]);
    assert!(depths.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_mesh_world_includes_pivot_and_needs_active_material() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(1.0, 0.0, 0.0));
    let (mesh, material) = renderable(&mut graph, root, ShaderKind::Flat, 1.0);
    graph.component_data_mut::<ComponentMesh>(mesh).unwrap().mtx_pivot = Matrix4x4::translation(Vector3::new(0.0, 2.0, 0.0));

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();
    let mtx_mesh = &graph.component_data::<ComponentMesh>(mesh).unwrap().mtx_world;
    assert_relative_eq!(mtx_mesh.get_translation(), Vector3::new(1.0, 2.0, 0.0));
    assert_eq!(manager.queue().len(), 1);

    graph.activate_component(material, false).unwrap();
    manager.prepare(&mut graph, root).unwrap();
    assert!(manager.queue().is_empty());
    assert_eq!(manager.shaders_used().count(), 0);
}

#[test]
fn test_mesh_without_material_still_counts_for_radius() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let child = placed(&mut graph, Some(root), "child", Vector3::new(10.0, 0.0, 0.0));
    let mesh = graph.create_component(ComponentMesh::new(MeshId(0)));
    graph.attach(child, mesh).unwrap();

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    let mtx_mesh = &graph.component_data::<ComponentMesh>(mesh).unwrap().mtx_world;
    assert_relative_eq!(mtx_mesh.get_translation(), Vector3::new(10.0, 0.0, 0.0));
    assert_relative_eq!(graph.node(root).unwrap().radius(), 10.0, epsilon = 1e-5);
    assert!(manager.queue().is_empty());
}

#[test]
fn test_lights_pushed_to_every_used_shader() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let a = placed(&mut graph, Some(root), "a", Vector3::ZERO);
    renderable(&mut graph, a, ShaderKind::Phong, 1.0);
    let b = placed(&mut graph, Some(root), "b", Vector3::ZERO);
    renderable(&mut graph, b, ShaderKind::Flat, 1.0);
    let c = placed(&mut graph, Some(root), "c", Vector3::ZERO);
    renderable(&mut graph, c, ShaderKind::Phong, 1.0);

    let ambient = graph.create_component(LightFactory::ambient(Color::WHITE, 0.2));
    graph.attach(root, ambient).unwrap();
    let sun = graph.create_component(LightFactory::directional(Vector3::new(0.0, -1.0, 0.0), Color::WHITE, 1.0));
    graph.attach(root, sun).unwrap();
    let off = graph.create_component(LightFactory::point(Vector3::ZERO, Color::WHITE, 1.0));
    graph.attach(a, off).unwrap();
    graph.activate_component(off, false).unwrap();

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    assert_eq!(manager.lights().get(LightType::Ambient).len(), 1);
    assert_eq!(manager.lights().get(LightType::Directional).len(), 1);
    assert!(manager.lights().get(LightType::Point).is_empty());
    assert_eq!(
        manager.backend().calls,
        vec![Call::Lights(ShaderKind::Flat, 2), Call::Lights(ShaderKind::Phong, 2)]
    );
}

#[test]
fn test_branch_counts_and_radius() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let arm = placed(&mut graph, Some(root), "arm", Vector3::new(3.0, 0.0, 0.0));
    let hand = placed(&mut graph, Some(arm), "hand", Vector3::new(3.0, 4.0, 0.0));
    let hidden = placed(&mut graph, Some(root), "hidden", Vector3::new(100.0, 0.0, 0.0));
    graph.activate(hidden, false).unwrap();

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    let node = |id| graph.node(id).unwrap();
    assert_eq!(node(root).n_nodes_in_branch(), 3);
    assert_eq!(node(arm).n_nodes_in_branch(), 2);
    assert_eq!(node(hand).n_nodes_in_branch(), 1);
    assert_relative_eq!(node(hand).radius(), 0.0);
    assert_relative_eq!(node(arm).radius(), 5.0, epsilon = 1e-5);
    assert_relative_eq!(node(root).radius(), 8.0, epsilon = 1e-5);
    assert!(!node(hidden).is_updated(graph.timestamp()));
}

#[test]
fn test_prepare_events_on_root() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let log = Rc::new(RefCell::new(Vec::new()));
    for event_type in [EventType::RenderPrepareStart, EventType::RenderPrepareEnd] {
        let sink = Rc::clone(&log);
        graph.node_mut(root).unwrap().add_event_listener(
            event_type,
            Rc::new(move |event: &Event| sink.borrow_mut().push(event.event_type)),
            false,
        );
    }

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();
    assert_eq!(
        *log.borrow(),
        vec![EventType::RenderPrepareStart, EventType::RenderPrepareEnd]
    );
}

#[test]
fn test_pickables_filtered_by_layer() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let world = graph.create_component(ComponentPick::new(PickType::Radius));
    graph.attach(root, world).unwrap();
    let button = graph.create_node("button");
    graph.add_child(root, button).unwrap();
    let ui = graph.create_component(ComponentPick::new(PickType::Camera).with_layers(PickLayers::UI | PickLayers::GIZMO));
    graph.attach(button, ui).unwrap();

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    assert_eq!(manager.pickables().len(), 2);
    assert_eq!(manager.pickables_in(&graph, PickLayers::UI), vec![(button, ui)]);
    assert_eq!(manager.pickables_in(&graph, PickLayers::all()).len(), 2);
}

#[test]
fn test_kinematic_body_receives_node_transform() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(2.0, 0.0, 0.0));
    let body = graph.create_component(ComponentRigidbody::new(PhysicsType::Kinematic));
    graph.attach(root, body).unwrap();

    let log = Rc::new(RefCell::new(PhysicsLog::default()));
    let mut manager =
        RenderManager::new(MockBackend::default()).with_physics(Box::new(MockPhysics(Rc::clone(&log))));
    manager.prepare(&mut graph, root).unwrap();

    assert_eq!(manager.physics_nodes(), &[root]);
    assert_eq!(log.borrow().pushed, vec![(root, Vector3::new(2.0, 0.0, 0.0))]);
}

#[test]
fn test_dynamic_body_overrides_transform() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(1.0, 0.0, 0.0));
    let ball = placed(&mut graph, Some(root), "ball", Vector3::ZERO);
    let body = graph.create_component(ComponentRigidbody::new(PhysicsType::Dynamic));
    graph.attach(ball, body).unwrap();

    let log = Rc::new(RefCell::new(PhysicsLog {
        pose: Some(BodyTransform {
            translation: Vector3::new(0.0, 10.0, 0.0),
            rotation: Vector3::ZERO,
        }),
        ..PhysicsLog::default()
    }));
    let mut manager =
        RenderManager::new(MockBackend::default()).with_physics(Box::new(MockPhysics(Rc::clone(&log))));
    manager.prepare(&mut graph, root).unwrap();

    assert_relative_eq!(
        graph.node(ball).unwrap().mtx_world().get_translation(),
        Vector3::new(0.0, 10.0, 0.0),
        epsilon = 1e-5
    );
    let transform = graph.get_component(ball, ComponentKind::Transform).unwrap();
    let local = &graph.component_data::<ComponentTransform>(transform).unwrap().mtx_local;
    assert_relative_eq!(local.get_translation(), Vector3::new(-1.0, 10.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_ignore_physics_keeps_scene_transform() {
    let mut graph = Graph::new();
    let root = placed(&mut graph, None, "root", Vector3::new(1.0, 0.0, 0.0));
    let body = graph.create_component(ComponentRigidbody::new(PhysicsType::Static));
    graph.attach(root, body).unwrap();

    let log = Rc::new(RefCell::new(PhysicsLog {
        pose: Some(BodyTransform {
            translation: Vector3::new(9.0, 9.0, 9.0),
            rotation: Vector3::ZERO,
        }),
        ..PhysicsLog::default()
    }));
    let config = RenderConfig::default().with_ignore_physics(true);
    let mut manager = RenderManager::with_config(MockBackend::default(), config)
        .with_physics(Box::new(MockPhysics(Rc::clone(&log))));
    manager.prepare(&mut graph, root).unwrap();

    assert_eq!(manager.physics_nodes(), &[root]);
    assert_relative_eq!(
        graph.node(root).unwrap().mtx_world().get_translation(),
        Vector3::new(1.0, 0.0, 0.0)
    );
}

#[test]
fn test_camera_errors() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let loose = graph.create_component(ComponentCamera::new());
    let transform = graph.create_component(ComponentTransform::default());
    graph.attach(root, transform).unwrap();

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();

    assert_eq!(manager.draw(&graph, loose), Err(SceneError::CameraDetached(loose)));
    assert_eq!(manager.draw(&graph, transform), Err(SceneError::ComponentNotFound(transform)));
}

#[test]
fn test_draw_returns_scratch_matrices_to_pool() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let camera = camera_at_origin(&mut graph, root);
    for z in [1.0, 2.0] {
        let node = placed(&mut graph, Some(root), "item", Vector3::new(0.0, 0.0, z));
        renderable(&mut graph, node, ShaderKind::UniColor, 1.0);
    }

    let mut manager = RenderManager::new(MockBackend::default());
    manager.prepare(&mut graph, root).unwrap();
    Recycler::dump_all();
    manager.draw(&graph, camera).unwrap();

    assert_eq!(Recycler::available::<Matrix4x4>(), 1);
    assert_eq!(manager.backend().drawn().len(), 2);
}
