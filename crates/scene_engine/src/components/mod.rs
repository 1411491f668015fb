//! Components attachable to scene nodes
//!
//! A [`Component`] wraps one payload from the closed [`ComponentData`] set
//! together with the bookkeeping every component shares: an active flag, the
//! singleton rule and a back-reference to the owning node. Components are
//! stored in the [`Graph`](crate::scene::Graph) arena and attached with
//! [`Graph::attach`](crate::scene::Graph::attach).
//!
//! Typed access goes through [`ComponentType`]:
//!
//! ```
//! # use scene_engine::components::{Component, ComponentTransform};
//! let component = Component::new(ComponentTransform::default());
//! let transform: Option<&ComponentTransform> = component.get();
//! assert!(transform.is_some());
//! ```

mod camera;
mod light;
mod material;
mod mesh;
mod pick;
mod rigidbody;
mod transform;

pub use camera::{ComponentCamera, Projection};
pub use light::{ComponentLight, Light, LightFactory, LightType};
pub use material::{ComponentMaterial, Material, ShaderKind};
pub use mesh::{ComponentMesh, MeshId};
pub use pick::{ComponentPick, PickLayers, PickType};
pub use rigidbody::{ComponentRigidbody, PhysicsType};
pub use transform::ComponentTransform;

use crate::events::{EventType, Listener, ListenerRegistry};
use crate::foundation::collections::{ListenerId, NodeId};
use serde::{Deserialize, Serialize};

/// Kind of a component, used as registry key on nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// [`ComponentTransform`]
    Transform,
    /// [`ComponentMesh`]
    Mesh,
    /// [`ComponentMaterial`]
    Material,
    /// [`ComponentLight`]
    Light,
    /// [`ComponentCamera`]
    Camera,
    /// [`ComponentPick`]
    Pick,
    /// [`ComponentRigidbody`]
    Rigidbody,
}

impl ComponentKind {
    /// Whether a node may hold at most one component of this kind by default
    pub const fn is_singleton(self) -> bool {
        !matches!(self, Self::Light)
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transform => "ComponentTransform",
            Self::Mesh => "ComponentMesh",
            Self::Material => "ComponentMaterial",
            Self::Light => "ComponentLight",
            Self::Camera => "ComponentCamera",
            Self::Pick => "ComponentPick",
            Self::Rigidbody => "ComponentRigidbody",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentData {
    /// Local transform
    Transform(ComponentTransform),
    /// Mesh reference
    Mesh(ComponentMesh),
    /// Material reference
    Material(ComponentMaterial),
    /// Light source
    Light(ComponentLight),
    /// Camera
    Camera(ComponentCamera),
    /// Pick marker
    Pick(ComponentPick),
    /// Physics body
    Rigidbody(ComponentRigidbody),
}

/// Typed view of one [`ComponentData`] variant
pub trait ComponentType: Sized + Into<ComponentData> {
    /// Kind this payload belongs to
    const KIND: ComponentKind;

    /// Borrow the payload if `data` holds this type
    fn from_data(data: &ComponentData) -> Option<&Self>;

    /// Mutably borrow the payload if `data` holds this type
    fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self>;
}

macro_rules! component_types {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ComponentData {
                fn from(component: $ty) -> Self {
                    Self::$variant(component)
                }
            }

            impl ComponentType for $ty {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn from_data(data: &ComponentData) -> Option<&Self> {
                    match data {
                        ComponentData::$variant(component) => Some(component),
                        _ => None,
                    }
                }

                fn from_data_mut(data: &mut ComponentData) -> Option<&mut Self> {
                    match data {
                        ComponentData::$variant(component) => Some(component),
                        _ => None,
                    }
                }
            }
        )*

        impl ComponentData {
            /// Kind of the payload
            pub const fn kind(&self) -> ComponentKind {
                match self {
                    $(Self::$variant(_) => ComponentKind::$variant,)*
                }
            }
        }
    };
}

component_types! {
    Transform => ComponentTransform,
    Mesh => ComponentMesh,
    Material => ComponentMaterial,
    Light => ComponentLight,
    Camera => ComponentCamera,
    Pick => ComponentPick,
    Rigidbody => ComponentRigidbody,
}

/// A unit of data or behavior attachable to a node
pub struct Component {
    data: ComponentData,
    active: bool,
    singleton: bool,
    pub(crate) node: Option<NodeId>,
    pub(crate) listeners: ListenerRegistry,
}

impl Component {
    /// Create a detached, active component
    ///
    /// The singleton flag starts out as the kind's default.
    pub fn new(data: impl Into<ComponentData>) -> Self {
        let data = data.into();
        let singleton = data.kind().is_singleton();
        Self {
            data,
            active: true,
            singleton,
            node: None,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Kind of the payload
    pub const fn kind(&self) -> ComponentKind {
        self.data.kind()
    }

    /// Whether the component takes part in rendering and events
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether a node may hold only one component of this kind
    pub const fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// Override the singleton rule while detached (builder pattern)
    pub fn with_singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    /// Node this component is attached to
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Untyped payload
    pub const fn data(&self) -> &ComponentData {
        &self.data
    }

    /// Typed payload, if the component holds a `T`
    pub fn get<T: ComponentType>(&self) -> Option<&T> {
        T::from_data(&self.data)
    }

    /// Typed payload, mutable
    pub fn get_mut<T: ComponentType>(&mut self) -> Option<&mut T> {
        T::from_data_mut(&mut self.data)
    }

    /// Register a listener on this component
    pub fn add_event_listener(&mut self, event_type: EventType, listener: Listener) -> ListenerId {
        self.listeners.add(event_type, listener)
    }

    /// Remove a listener from this component
    pub fn remove_event_listener(&mut self, event_type: EventType, id: ListenerId) -> bool {
        self.listeners.remove(event_type, id)
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("kind", &self.kind())
            .field("active", &self.active)
            .field("singleton", &self.singleton)
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Color;

    #[test]
    fn test_singleton_defaults_by_kind() {
        assert!(Component::new(ComponentTransform::default()).is_singleton());
        assert!(Component::new(ComponentMesh::new(MeshId(1))).is_singleton());
        assert!(!Component::new(LightFactory::ambient(Color::WHITE, 1.0)).is_singleton());
    }

    #[test]
    fn test_typed_access() {
        let mut component = Component::new(ComponentMaterial::new(Material::default()));
        assert_eq!(component.kind(), ComponentKind::Material);
        assert!(component.get::<ComponentMaterial>().is_some());
        assert!(component.get::<ComponentMesh>().is_none());

        if let Some(material) = component.get_mut::<ComponentMaterial>() {
            material.sort_for_alpha = true;
        }
        assert!(component.get::<ComponentMaterial>().is_some_and(|m| m.sort_for_alpha));
    }

    #[test]
    fn test_translucent_material_sorts_for_alpha() {
        let glass = Material::new("glass", ShaderKind::Phong, Color::new(0.8, 0.9, 1.0, 0.4));
        assert!(ComponentMaterial::new(glass).sort_for_alpha);
        assert!(!ComponentMaterial::new(Material::default()).sort_for_alpha);
    }
}
