//! Render preparation and drawing
//!
//! [`RenderManager::prepare`] walks an active branch once per frame: it
//! computes world matrices, synchronizes physics bodies and collects lights,
//! pick targets and draw items. [`RenderManager::draw`] then feeds the
//! collected items to the [`GraphicsBackend`] as seen from a camera.

use super::backend::{GraphicsBackend, PhysicsBackend};
use super::lights::{LightBuckets, LightEntry};
use super::render_queue::{CommandType, DrawItem, RenderQueue};
use crate::components::{
    ComponentCamera, ComponentKind, ComponentLight, ComponentMaterial, ComponentMesh, ComponentPick,
    ComponentRigidbody, ComponentTransform, PickLayers, ShaderKind,
};
use crate::config::RenderConfig;
use crate::events::{Event, EventType};
use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::{Matrix4x4, Vector3};
use crate::foundation::pool::Recycler;
use crate::scene::{Graph, SceneError, SceneResult};
use log::{debug, trace};
use std::collections::BTreeSet;

/// Per-frame render preparation over a [`Graph`]
pub struct RenderManager<B: GraphicsBackend> {
    backend: B,
    physics: Option<Box<dyn PhysicsBackend>>,
    config: RenderConfig,
    queue: RenderQueue,
    lights: LightBuckets,
    pickables: Vec<(NodeId, ComponentId)>,
    physics_nodes: Vec<NodeId>,
    shaders_used: BTreeSet<ShaderKind>,
}

impl<B: GraphicsBackend> RenderManager<B> {
    /// Create a manager with default settings and no physics
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RenderConfig::default())
    }

    /// Create a manager with explicit settings
    pub fn with_config(backend: B, config: RenderConfig) -> Self {
        Self {
            backend,
            physics: None,
            config,
            queue: RenderQueue::with_capacity(config.queue_capacity),
            lights: LightBuckets::new(),
            pickables: Vec::new(),
            physics_nodes: Vec::new(),
            shaders_used: BTreeSet::new(),
        }
    }

    /// Install a physics bridge (builder pattern)
    pub fn with_physics(mut self, physics: Box<dyn PhysicsBackend>) -> Self {
        self.physics = Some(physics);
        self
    }

    /// The graphics backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The graphics backend, mutable
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Active settings
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw items of the last preparation
    pub const fn queue(&self) -> &RenderQueue {
        &self.queue
    }

    /// Lights of the last preparation
    pub const fn lights(&self) -> &LightBuckets {
        &self.lights
    }

    /// Active pick components of the last preparation, with their nodes
    pub fn pickables(&self) -> &[(NodeId, ComponentId)] {
        &self.pickables
    }

    /// Pickables on at least one of the layers in `mask`
    pub fn pickables_in(&self, graph: &Graph, mask: PickLayers) -> Vec<(NodeId, ComponentId)> {
        self.pickables
            .iter()
            .copied()
            .filter(|&(_, id)| graph.component_data::<ComponentPick>(id).is_some_and(|pick| pick.is_on(mask)))
            .collect()
    }

    /// Nodes with an active rigidbody in the last preparation
    pub fn physics_nodes(&self) -> &[NodeId] {
        &self.physics_nodes
    }

    /// Shaders used by the draw items of the last preparation
    pub fn shaders_used(&self) -> impl Iterator<Item = ShaderKind> + '_ {
        self.shaders_used.iter().copied()
    }

    /// Prepare the branch rooted at `root` for drawing
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for an unknown root, and whatever the
    /// graphics backend reports from `set_lights_in_shader`.
    pub fn prepare(&mut self, graph: &mut Graph, root: NodeId) -> SceneResult<()> {
        self.prepare_branch(graph, root, &Matrix4x4::identity())
    }

    /// Prepare the branch rooted at `root` below a parent world matrix
    ///
    /// Bumps the graph's frame timestamp once. Every active node reached is
    /// stamped with it; nodes of inactive branches keep their old stamp and
    /// world matrix.
    ///
    /// # Errors
    ///
    /// See [`prepare`](Self::prepare).
    pub fn prepare_branch(&mut self, graph: &mut Graph, root: NodeId, mtx_world_parent: &Matrix4x4) -> SceneResult<()> {
        graph.require_node(root)?;
        let timestamp = graph.next_timestamp();

        self.queue.clear();
        self.lights.clear();
        self.pickables.clear();
        self.physics_nodes.clear();
        self.shaders_used.clear();

        graph.dispatch_event(root, Event::new(EventType::RenderPrepareStart));
        let n_nodes = self.prepare_node(graph, root, mtx_world_parent, timestamp)?;
        graph.dispatch_event(root, Event::new(EventType::RenderPrepareEnd));

        for &shader in &self.shaders_used {
            self.backend.set_lights_in_shader(shader, &self.lights)?;
        }

        debug!(
            "Prepared frame {}: {} nodes, {} opaque, {} alpha, {} lights, {} pickables",
            timestamp,
            n_nodes,
            self.queue.opaque().len(),
            self.queue.alpha().len(),
            self.lights.len(),
            self.pickables.len()
        );
        Ok(())
    }

    fn prepare_node(
        &mut self,
        graph: &mut Graph,
        id: NodeId,
        mtx_world_parent: &Matrix4x4,
        timestamp: u64,
    ) -> SceneResult<usize> {
        if !graph.require_node(id)?.is_active() {
            return Ok(0);
        }

        let transform = graph.active_component::<ComponentTransform>(id);
        let transform_id = transform.map(|(cmp, _)| cmp);
        let mut mtx_world = match transform {
            Some((_, transform)) => Matrix4x4::multiplication(mtx_world_parent, &transform.mtx_local),
            None => mtx_world_parent.clone(),
        };

        if let Some((_, rigidbody)) = graph.active_component::<ComponentRigidbody>(id) {
            let rigidbody = rigidbody.clone();
            self.physics_nodes.push(id);
            if let Some(physics) = self.physics.as_deref_mut().filter(|_| !self.config.ignore_physics) {
                Self::synchronize_body(physics, graph, id, &rigidbody, transform_id, &mut mtx_world, mtx_world_parent);
            }
        }

        graph.require_node_mut(id)?.set_mtx_world(&mtx_world, timestamp);

        if let Some((pick, _)) = graph.active_component::<ComponentPick>(id) {
            self.pickables.push((id, pick));
        }

        for light_id in graph.get_components(id, ComponentKind::Light) {
            let Some(component) = graph.component(light_id).filter(|c| c.is_active()) else {
                continue;
            };
            if let Some(light) = component.get::<ComponentLight>() {
                self.lights.push(LightEntry {
                    node: id,
                    component: light_id,
                    light: light.light,
                    mtx_world: Matrix4x4::multiplication(&mtx_world, &light.mtx_pivot),
                });
            }
        }

        let mesh = match graph.active_component::<ComponentMesh>(id).map(|(cmp, _)| cmp) {
            Some(mesh_id) => {
                let mesh = graph
                    .component_data_mut::<ComponentMesh>(mesh_id)
                    .ok_or(SceneError::ComponentNotFound(mesh_id))?;
                mesh.mtx_world = Matrix4x4::multiplication(&mtx_world, &mesh.mtx_pivot);
                Some((mesh_id, mesh.mtx_world.clone()))
            }
            None => None,
        };
        let material = graph
            .active_component::<ComponentMaterial>(id)
            .map(|(cmp, material)| (cmp, material.material.shader, material.sort_for_alpha));
        if let (Some((mesh_id, mtx_mesh)), Some((material_id, shader, sort_for_alpha))) = (mesh, material) {
            self.shaders_used.insert(shader);
            self.queue.push(DrawItem {
                node: id,
                mesh: mesh_id,
                material: material_id,
                shader,
                mtx_world: mtx_mesh,
                command_type: if sort_for_alpha {
                    CommandType::Alpha
                } else {
                    CommandType::Opaque
                },
            });
        }

        let children = graph.require_node(id)?.children().to_vec();
        let position = mtx_world.get_translation();
        let mut n_nodes = 1;
        let mut radius = 0.0_f32;
        for child in children {
            n_nodes += self.prepare_node(graph, child, &mtx_world, timestamp)?;

            let child_node = graph.require_node(child)?;
            if !child_node.is_updated(timestamp) {
                continue;
            }
            let child_position = graph.active_component::<ComponentMesh>(child).map_or_else(
                || child_node.mtx_world().get_translation(),
                |(_, mesh)| mesh.mtx_world.get_translation(),
            );
            radius = radius.max(Vector3::distance(child_position, position) + child_node.radius());
        }

        let node = graph.require_node_mut(id)?;
        node.n_nodes_in_branch = n_nodes;
        node.radius = radius;
        Ok(n_nodes)
    }

    /// Kinematic bodies follow the node; dynamic and static bodies override
    /// the node's world translation and rotation, and its local transform is
    /// rewritten to match
    fn synchronize_body(
        physics: &mut dyn PhysicsBackend,
        graph: &mut Graph,
        id: NodeId,
        rigidbody: &ComponentRigidbody,
        transform: Option<ComponentId>,
        mtx_world: &mut Matrix4x4,
        mtx_world_parent: &Matrix4x4,
    ) {
        if rigidbody.is_kinematic() {
            let mtx_body = Matrix4x4::multiplication(mtx_world, &rigidbody.mtx_pivot);
            physics.push_transform(id, rigidbody, &mtx_body);
            return;
        }

        let Some(pose) = physics.body_transform(id, rigidbody) else {
            return;
        };
        trace!("Physics moved {:?} to {}", id, pose.translation);
        mtx_world.mutate(Some(pose.translation), Some(pose.rotation), None);
        if let Some(local) = transform.and_then(|cmp| graph.component_data_mut::<ComponentTransform>(cmp)) {
            local.mtx_local = Matrix4x4::relative(mtx_world, mtx_world_parent);
        }
    }

    /// Draw the prepared items as seen from `camera`
    ///
    /// Opaque items are drawn in collection order, then alpha items far to
    /// near in camera space.
    ///
    /// # Errors
    ///
    /// [`SceneError::ComponentNotFound`] if `camera` is not a camera,
    /// [`SceneError::CameraDetached`] if it is not attached to a node, and
    /// whatever the graphics backend reports.
    pub fn draw(&mut self, graph: &Graph, camera: ComponentId) -> SceneResult<()> {
        let component = graph.component(camera).ok_or(SceneError::ComponentNotFound(camera))?;
        let cmp_camera = component
            .get::<ComponentCamera>()
            .ok_or(SceneError::ComponentNotFound(camera))?;
        let node = component.node().ok_or(SceneError::CameraDetached(camera))?;

        let mtx_camera = Matrix4x4::multiplication(graph.require_node(node)?.mtx_world(), &cmp_camera.mtx_pivot);
        let mtx_view = Matrix4x4::inversion(&mtx_camera);
        let mtx_world_to_view = Matrix4x4::multiplication(&cmp_camera.mtx_projection(), &mtx_view);

        for item in self.queue.opaque() {
            Self::draw_item(&mut self.backend, graph, item, &mtx_world_to_view)?;
        }
        if self.config.sort_alpha {
            self.queue.sort_alpha(&mtx_view);
        }
        for item in self.queue.alpha() {
            Self::draw_item(&mut self.backend, graph, item, &mtx_world_to_view)?;
        }
        Ok(())
    }

    fn draw_item(backend: &mut B, graph: &Graph, item: &DrawItem, mtx_world_to_view: &Matrix4x4) -> SceneResult<()> {
        let mesh = graph
            .component_data::<ComponentMesh>(item.mesh)
            .ok_or(SceneError::ComponentNotFound(item.mesh))?;
        let material = graph
            .component_data::<ComponentMaterial>(item.material)
            .ok_or(SceneError::ComponentNotFound(item.material))?;
        backend.use_render_data(item.node, mesh, material)?;

        let mut mtx_mesh_to_view = Recycler::get::<Matrix4x4>();
        Matrix4x4::multiply_into(&mut mtx_mesh_to_view, mtx_world_to_view, &item.mtx_world);
        let result = backend.draw_node(item.node, &item.mtx_world, &mtx_mesh_to_view);
        Recycler::store(mtx_mesh_to_view);
        result
    }
}

impl<B: GraphicsBackend + std::fmt::Debug> std::fmt::Debug for RenderManager<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderManager")
            .field("backend", &self.backend)
            .field("physics", &self.physics.is_some())
            .field("config", &self.config)
            .field("queue", &self.queue.len())
            .field("lights", &self.lights.len())
            .finish_non_exhaustive()
    }
}
