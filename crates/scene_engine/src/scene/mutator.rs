//! Animation mutators
//!
//! A [`NodeMutator`] describes changes to apply to a branch: mutations for
//! components of the node itself and nested mutators for children, addressed
//! by name. An animation system samples its curves into a mutator once per
//! frame and hands it to [`Graph::apply_animation`].

use super::{Graph, SceneError, SceneResult};
use crate::components::{
    ComponentCamera, ComponentKind, ComponentLight, ComponentMaterial, ComponentMesh, ComponentRigidbody,
    ComponentTransform,
};
use crate::foundation::collections::{ComponentId, NodeId};
use crate::foundation::math::{Color, Matrix4x4, Vector3};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One property change on a component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ComponentMutation {
    /// Set the translation of the local or pivot matrix
    Translation(Vector3),
    /// Set the rotation of the local or pivot matrix, in degrees
    Rotation(Vector3),
    /// Set the scaling of the local or pivot matrix
    Scaling(Vector3),
    /// Set the material, light or background color
    Color(Color),
    /// Set the light intensity
    Intensity(f32),
    /// Activate or deactivate the component
    Active(bool),
}

/// Mutations for one component of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentMutator {
    /// Kind of the addressed component
    pub kind: ComponentKind,
    /// Position among the node's components of that kind
    pub index: usize,
    /// Changes in application order
    pub mutations: Vec<ComponentMutation>,
}

impl ComponentMutator {
    /// Mutator for the first component of `kind`
    pub const fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            index: 0,
            mutations: Vec::new(),
        }
    }

    /// Address the component at `index` instead (builder pattern)
    pub fn at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Append a mutation (builder pattern)
    pub fn with(mut self, mutation: ComponentMutation) -> Self {
        self.mutations.push(mutation);
        self
    }
}

/// Mutations for a node and its descendants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMutator {
    /// Mutators for the node's own components
    #[serde(default)]
    pub components: Vec<ComponentMutator>,
    /// Mutators for children, by child name
    #[serde(default)]
    pub children: BTreeMap<String, NodeMutator>,
}

impl NodeMutator {
    /// Empty mutator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component mutator (builder pattern)
    pub fn component(mut self, mutator: ComponentMutator) -> Self {
        self.components.push(mutator);
        self
    }

    /// Add a mutator for every child named `name` (builder pattern)
    pub fn child(mut self, name: impl Into<String>, mutator: Self) -> Self {
        self.children.insert(name.into(), mutator);
        self
    }

    /// Whether applying this mutator changes nothing
    pub fn is_empty(&self) -> bool {
        self.components.iter().all(|c| c.mutations.is_empty())
            && self.children.values().all(Self::is_empty)
    }
}

impl Graph {
    /// Apply `mutator` to the branch rooted at `node`
    ///
    /// Mutators addressing missing children are skipped; a mutator naming a
    /// component that does not exist is an error. Changes already applied
    /// before an error stay applied.
    ///
    /// # Errors
    ///
    /// [`SceneError::NodeNotFound`] for unknown ids,
    /// [`SceneError::Structural`] if no component of the addressed kind and
    /// index exists or the component has no such property.
    pub fn apply_animation(&mut self, node: NodeId, mutator: &NodeMutator) -> SceneResult<()> {
        self.require_node(node)?;

        for component_mutator in &mutator.components {
            let id = self
                .get_components(node, component_mutator.kind)
                .get(component_mutator.index)
                .copied()
                .ok_or_else(|| {
                    SceneError::Structural(format!(
                        "node {node:?} has no {} at index {}",
                        component_mutator.kind, component_mutator.index
                    ))
                })?;
            for mutation in &component_mutator.mutations {
                self.apply_mutation(id, *mutation)?;
            }
        }

        for (name, child_mutator) in &mutator.children {
            for child in self.get_children_by_name(node, name) {
                self.apply_animation(child, child_mutator)?;
            }
        }
        Ok(())
    }

    fn apply_mutation(&mut self, id: ComponentId, mutation: ComponentMutation) -> SceneResult<()> {
        trace!("Mutating {:?} with {:?}", id, mutation);
        match mutation {
            ComponentMutation::Active(on) => return self.activate_component(id, on),
            ComponentMutation::Translation(t) => self.with_mutable_matrix(id, |m| m.mutate(Some(t), None, None))?,
            ComponentMutation::Rotation(r) => self.with_mutable_matrix(id, |m| m.mutate(None, Some(r), None))?,
            ComponentMutation::Scaling(s) => self.with_mutable_matrix(id, |m| m.mutate(None, None, Some(s)))?,
            ComponentMutation::Color(color) => {
                let component = self
                    .component_mut(id)
                    .ok_or(SceneError::ComponentNotFound(id))?;
                let kind = component.kind();
                if let Some(material) = component.get_mut::<ComponentMaterial>() {
                    material.material.color = color;
                } else if let Some(light) = component.get_mut::<ComponentLight>() {
                    light.light.color = color;
                } else if let Some(camera) = component.get_mut::<ComponentCamera>() {
                    camera.background = color;
                } else {
                    return Err(unsupported(kind, "color"));
                }
            }
            ComponentMutation::Intensity(intensity) => {
                let component = self
                    .component_mut(id)
                    .ok_or(SceneError::ComponentNotFound(id))?;
                let kind = component.kind();
                let light = component
                    .get_mut::<ComponentLight>()
                    .ok_or_else(|| unsupported(kind, "intensity"))?;
                light.light.intensity = intensity;
            }
        }
        Ok(())
    }

    /// Run `f` on the matrix a transform mutation addresses: the local matrix
    /// of a transform, the pivot of every other placed component
    fn with_mutable_matrix(&mut self, id: ComponentId, f: impl FnOnce(&mut Matrix4x4)) -> SceneResult<()> {
        let component = self
            .component_mut(id)
            .ok_or(SceneError::ComponentNotFound(id))?;
        let kind = component.kind();
        let mtx = match kind {
            ComponentKind::Transform => component.get_mut::<ComponentTransform>().map(|c| &mut c.mtx_local),
            ComponentKind::Mesh => component.get_mut::<ComponentMesh>().map(|c| &mut c.mtx_pivot),
            ComponentKind::Light => component.get_mut::<ComponentLight>().map(|c| &mut c.mtx_pivot),
            ComponentKind::Camera => component.get_mut::<ComponentCamera>().map(|c| &mut c.mtx_pivot),
            ComponentKind::Rigidbody => component.get_mut::<ComponentRigidbody>().map(|c| &mut c.mtx_pivot),
            ComponentKind::Material | ComponentKind::Pick => None,
        };
        let mtx = mtx.ok_or_else(|| unsupported(kind, "transformation"))?;
        f(mtx);
        Ok(())
    }
}

fn unsupported(kind: ComponentKind, property: &str) -> SceneError {
    SceneError::Structural(format!("{kind} has no animatable {property}"))
}
