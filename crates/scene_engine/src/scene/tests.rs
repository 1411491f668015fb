use super::*;
use crate::components::{
    Component, ComponentKind, ComponentMaterial, ComponentMesh, ComponentTransform, LightFactory, Material, MeshId,
};
use crate::events::{Event, EventType};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Color;
use std::cell::RefCell;
use std::rc::Rc;

fn counter(graph: &mut Graph, node: NodeId, event_type: EventType, capture: bool) -> Rc<RefCell<usize>> {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    graph.node_mut(node).unwrap().add_event_listener(
        event_type,
        Rc::new(move |_: &Event| *sink.borrow_mut() += 1),
        capture,
    );
    count
}

#[test]
fn test_add_child_sets_parent_and_moves_between_parents() {
    let mut graph = Graph::new();
    let a = graph.create_node("a");
    let b = graph.create_node("b");
    let child = graph.create_node("child");

    graph.add_child(a, child).unwrap();
    assert_eq!(graph.get_parent(child), Some(a));
    assert_eq!(graph.get_children(a), vec![child]);

    graph.add_child(b, child).unwrap();
    assert_eq!(graph.get_parent(child), Some(b));
    assert!(graph.get_children(a).is_empty());
    assert_eq!(graph.get_children(b), vec![child]);

    graph.add_child(b, child).unwrap();
    assert_eq!(graph.n_children(b), 1);
}

#[test]
fn test_cycle_is_refused_without_changes() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let mid = graph.create_node("mid");
    let leaf = graph.create_node("leaf");
    graph.add_child(root, mid).unwrap();
    graph.add_child(mid, leaf).unwrap();
    let appended = counter(&mut graph, root, EventType::ChildAppend, false);

    assert!(matches!(graph.add_child(leaf, root), Err(SceneError::Structural(_))));
    assert!(matches!(graph.add_child(mid, mid), Err(SceneError::Structural(_))));

    assert_eq!(graph.get_parent(root), None);
    assert_eq!(graph.get_children(mid), vec![leaf]);
    assert!(graph.get_children(leaf).is_empty());
    assert_eq!(*appended.borrow(), 0);
}

#[test]
fn test_remove_child_is_idempotent() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let child = graph.create_node("child");
    graph.add_child(root, child).unwrap();
    let removed = counter(&mut graph, root, EventType::ChildRemove, false);

    graph.remove_child(root, child).unwrap();
    graph.remove_child(root, child).unwrap();

    assert_eq!(graph.get_parent(child), None);
    assert!(graph.get_children(root).is_empty());
    assert_eq!(*removed.borrow(), 1);
}

#[test]
fn test_remove_child_broadcasts_deactivate_into_branch() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let child = graph.create_node("child");
    let grandchild = graph.create_node("grandchild");
    graph.add_child(root, child).unwrap();
    graph.add_child(child, grandchild).unwrap();
    let deactivated = counter(&mut graph, grandchild, EventType::NodeDeactivate, true);

    graph.remove_child(root, child).unwrap();
    assert_eq!(*deactivated.borrow(), 1);
}

#[test]
fn test_child_append_bubbles_to_ancestors() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let mid = graph.create_node("mid");
    graph.add_child(root, mid).unwrap();
    let appended = counter(&mut graph, root, EventType::ChildAppend, false);

    let leaf = graph.create_node("leaf");
    graph.add_child(mid, leaf).unwrap();
    assert_eq!(*appended.borrow(), 1);
}

#[test]
fn test_replace_and_insert_keep_positions() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let a = graph.create_node("a");
    let b = graph.create_node("b");
    let c = graph.create_node("c");
    let d = graph.create_node("d");
    graph.add_child(root, a).unwrap();
    graph.add_child(root, b).unwrap();
    graph.insert_child(root, c, Some(1)).unwrap();
    assert_eq!(graph.get_children(root), vec![a, c, b]);

    assert!(graph.replace_child(root, c, d).unwrap());
    assert_eq!(graph.get_children(root), vec![a, d, b]);
    assert_eq!(graph.get_parent(c), None);
    assert_eq!(graph.get_parent(d), Some(root));

    assert!(!graph.replace_child(root, c, d).unwrap());
    let e = graph.create_node("e");
    graph.add_child(a, e).unwrap();
    assert!(matches!(graph.replace_child(a, e, root), Err(SceneError::Structural(_))));
    assert_eq!(graph.get_children(a), vec![e]);

    graph.remove_all_children(root).unwrap();
    assert_eq!(graph.n_children(root), 0);
}

#[test]
fn test_ancestry_queries() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let mid = graph.create_node("mid");
    let leaf = graph.create_node("leaf");
    let twin = graph.create_node("leaf");
    graph.add_child(root, mid).unwrap();
    graph.add_child(mid, leaf).unwrap();
    graph.add_child(mid, twin).unwrap();

    assert_eq!(graph.get_ancestor(leaf), root);
    assert_eq!(graph.get_path(leaf), vec![root, mid, leaf]);
    assert!(graph.is_descendant_of(leaf, root));
    assert!(graph.is_descendant_of(leaf, leaf));
    assert!(!graph.is_descendant_of(root, leaf));
    assert_eq!(graph.get_children_by_name(mid, "leaf"), vec![leaf, twin]);
    assert_eq!(graph.find_child(mid, twin).unwrap(), Some(1));
    assert_eq!(graph.get_child(mid, 5), None);
}

#[test]
fn test_second_singleton_is_refused() {
    let mut graph = Graph::new();
    let node = graph.create_node("node");
    let first = graph.create_component(ComponentTransform::default());
    let second = graph.create_component(ComponentTransform::default());
    graph.attach(node, first).unwrap();

    assert!(matches!(
        graph.attach(node, second),
        Err(SceneError::ConstraintViolation(_))
    ));
    assert_eq!(graph.get_components(node, ComponentKind::Transform), vec![first]);
    assert_eq!(graph.component(second).unwrap().node(), None);
}

#[test]
fn test_non_singleton_cannot_join_held_singleton() {
    let mut graph = Graph::new();
    let node = graph.create_node("node");
    let first = graph.create_component(ComponentTransform::default());
    graph.attach(node, first).unwrap();
    let relaxed = graph.add_component(Component::new(ComponentTransform::default()).with_singleton(false));

    assert!(matches!(
        graph.attach(node, relaxed),
        Err(SceneError::ConstraintViolation(_))
    ));
    assert_eq!(graph.get_components(node, ComponentKind::Transform), vec![first]);
    assert_eq!(graph.component(relaxed).unwrap().node(), None);
}

#[test]
fn test_never_prepared_node_is_not_updated() {
    let mut graph = Graph::new();
    let node = graph.create_node("node");
    assert_eq!(graph.timestamp(), 0);
    assert!(!graph.node(node).unwrap().is_updated(graph.timestamp()));
}

#[test]
fn test_lights_are_not_singletons() {
    let mut graph = Graph::new();
    let node = graph.create_node("node");
    for _ in 0..3 {
        let light = graph.create_component(LightFactory::ambient(Color::WHITE, 0.3));
        graph.attach(node, light).unwrap();
    }
    assert_eq!(graph.get_components(node, ComponentKind::Light).len(), 3);

    let single = graph.add_component(Component::new(LightFactory::ambient(Color::WHITE, 0.3)).with_singleton(true));
    let other = graph.create_node("other");
    graph.attach(other, single).unwrap();
    let extra = graph.add_component(Component::new(LightFactory::ambient(Color::WHITE, 0.3)).with_singleton(true));
    assert!(graph.attach(other, extra).is_err());
}

#[test]
fn test_attach_moves_component_and_fires_events() {
    let mut graph = Graph::new();
    let a = graph.create_node("a");
    let b = graph.create_node("b");
    let added = counter(&mut graph, b, EventType::ComponentAdd, false);
    let removed = counter(&mut graph, a, EventType::ComponentRemove, false);
    let mesh = graph.create_component(ComponentMesh::new(MeshId(1)));

    graph.attach(a, mesh).unwrap();
    graph.attach(b, mesh).unwrap();

    assert_eq!(graph.component(mesh).unwrap().node(), Some(b));
    assert!(graph.get_components(a, ComponentKind::Mesh).is_empty());
    assert_eq!(*added.borrow(), 1);
    assert_eq!(*removed.borrow(), 1);

    graph.detach(mesh).unwrap();
    graph.detach(mesh).unwrap();
    assert_eq!(graph.component(mesh).unwrap().node(), None);
    assert!(graph.node(b).unwrap().component_kinds().is_empty());
}

#[test]
fn test_component_activation_events_do_not_bubble() {
    let mut graph = Graph::new();
    let node = graph.create_node("node");
    let seen = counter(&mut graph, node, EventType::ComponentDeactivate, false);
    let material = graph.create_component(ComponentMaterial::new(Material::default()));
    graph.attach(node, material).unwrap();

    let own = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&own);
    graph.component_mut(material).unwrap().add_event_listener(
        EventType::ComponentDeactivate,
        Rc::new(move |event: &Event| {
            assert_eq!(event.component, Some(material));
            *sink.borrow_mut() += 1;
        }),
    );

    graph.activate_component(material, false).unwrap();
    assert!(!graph.component(material).unwrap().is_active());
    assert_eq!(*own.borrow(), 1);
    assert_eq!(*seen.borrow(), 0);
    assert!(graph.active_component::<ComponentMaterial>(node).is_none());
}

#[test]
fn test_audio_branch_broadcasts() {
    let mut graph = Graph::new();
    let world = graph.create_node("world");
    let outside = graph.create_node("outside");
    let emitter = graph.create_node("emitter");
    graph.set_audio_listened(Some(world));
    let joined = counter(&mut graph, emitter, EventType::AudioChildAppend, true);
    let left = counter(&mut graph, emitter, EventType::AudioChildRemove, true);

    graph.add_child(outside, emitter).unwrap();
    assert_eq!(*joined.borrow(), 0);

    graph.add_child(world, emitter).unwrap();
    assert_eq!(*joined.borrow(), 1);
    assert_eq!(*left.borrow(), 0);

    graph.remove_child(world, emitter).unwrap();
    assert_eq!(*left.borrow(), 1);
}

#[test]
fn test_destroy_removes_branch_and_components() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let child = graph.create_node("child");
    let grandchild = graph.create_node("grandchild");
    graph.add_child(root, child).unwrap();
    graph.add_child(child, grandchild).unwrap();
    let mesh = graph.create_component(ComponentMesh::new(MeshId(2)));
    graph.attach(grandchild, mesh).unwrap();
    graph.set_audio_listened(Some(child));

    graph.destroy(child).unwrap();

    assert_eq!(graph.n_nodes(), 1);
    assert!(graph.get_children(root).is_empty());
    assert!(!graph.contains_node(grandchild));
    assert!(graph.component(mesh).is_none());
    assert_eq!(graph.audio_listened(), None);
    assert!(matches!(graph.destroy(child), Err(SceneError::NodeNotFound(_))));
}

#[test]
fn test_hierarchy_string() {
    let mut graph = Graph::new();
    let root = graph.create_node("root");
    let child = graph.create_node("child");
    graph.add_child(root, child).unwrap();
    let transform = graph.create_component(ComponentTransform::default());
    graph.attach(child, transform).unwrap();
    let mesh = graph.create_component(ComponentMesh::new(MeshId(0)));
    graph.attach(child, mesh).unwrap();
    graph.activate(child, false).unwrap();

    assert_eq!(
        graph.to_hierarchy_string(root),
        "root\n  child [ComponentTransform, ComponentMesh] (inactive)\n"
    );
}
