//! Arena-backed widget hierarchy.
//!
//! Nodes are owned by the arena and addressed by generational [`WidgetId`]s, so a
//! handle to a removed widget resolves to nothing instead of dangling. Parent links
//! are ids, never references.
use bevy::prelude::*;
use slotmap::SlotMap;

use super::{transform::NodeTransform, widget::WidgetNode};

slotmap::new_key_type! {
    pub struct WidgetId;
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuError {
    UnknownWidget(WidgetId),
    CyclicAttach { parent: WidgetId, child: WidgetId },
    WrongKind { name: String, expected: &'static str },
    UnknownPanel(String),
    DuplicatePanel(String),
}

impl std::fmt::Display for MenuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWidget(id) => write!(f, "widget {id:?} does not exist"),
            Self::CyclicAttach { parent, child } => {
                write!(f, "attaching {child:?} under {parent:?} would create a cycle")
            }
            Self::WrongKind { name, expected } => write!(f, "widget `{name}` is not a {expected}"),
            Self::UnknownPanel(name) => write!(f, "no panel named `{name}` is registered"),
            Self::DuplicatePanel(name) => write!(f, "a panel named `{name}` already exists"),
        }
    }
}

impl std::error::Error for MenuError {}

#[derive(Default, Clone, Debug)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, mut node: WidgetNode) -> WidgetId {
        node.parent = None;
        node.children.clear();
        self.nodes.insert(node)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id)?.parent.filter(|parent| self.contains(*parent))
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn root_of(&self, id: WidgetId) -> WidgetId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Moves `child` under `parent`, detaching it from any previous parent first.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), MenuError> {
        if !self.contains(parent) {
            return Err(MenuError::UnknownWidget(parent));
        }
        if !self.contains(child) {
            return Err(MenuError::UnknownWidget(child));
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(MenuError::CyclicAttach { parent, child });
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Unlinks `child` from its parent. Returns whether it had one.
    pub fn detach(&mut self, child: WidgetId) -> bool {
        let Some(parent) = self.nodes.get_mut(child).and_then(|node| node.parent.take()) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        true
    }

    /// Removes a widget and its whole subtree. Returns how many nodes were freed.
    pub fn remove(&mut self, id: WidgetId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        self.detach(id);
        let doomed = self.descendants(id);
        for node in &doomed {
            self.nodes.remove(*node);
        }
        doomed.len()
    }

    /// Pre-order walk starting at (and including) `root`.
    pub fn descendants(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    pub fn find_by_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.nodes.get(*id).is_some_and(|node| node.name == name))
    }

    /// Effective visibility: the widget and every ancestor are visible.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        node.visible && self.ancestors(id).all(|ancestor| self.nodes[ancestor].visible)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn set_local_position(&mut self, id: WidgetId, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.local.translation = position;
        }
    }

    pub fn set_local_rotation(&mut self, id: WidgetId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.local.rotation = rotation;
        }
    }

    pub fn set_local_scale(&mut self, id: WidgetId, scale: f32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.local.scale = scale;
        }
    }

    pub fn logical_size(&self, id: WidgetId) -> Vec2 {
        self.nodes.get(id).map_or(Vec2::ZERO, WidgetNode::size)
    }

    /// World transform of `id`, with the root placed under `anchor`.
    pub fn world_transform(&self, id: WidgetId, anchor: &NodeTransform) -> Option<NodeTransform> {
        let node = self.nodes.get(id)?;
        let mut world = node.effective_local();
        for ancestor in self.ancestors(id) {
            world = self.nodes[ancestor].effective_local().compose(&world);
        }
        Some(anchor.compose(&world))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::ui::{
        layout::{ContainerState, LayoutMode},
        widget::WidgetKind,
    };

    fn container(tree: &mut WidgetTree, name: &str) -> WidgetId {
        tree.insert(WidgetNode::new(
            name,
            WidgetKind::Container(ContainerState::new(LayoutMode::Free, 0.0)),
        ))
    }

    fn plain(tree: &mut WidgetTree, name: &str) -> WidgetId {
        tree.insert(WidgetNode::new(name, WidgetKind::Plain))
    }

    #[test]
    fn attach_keeps_parent_and_child_links_consistent() {
        let mut tree = WidgetTree::new();
        let first = container(&mut tree, "first");
        let second = container(&mut tree, "second");
        let leaf = plain(&mut tree, "leaf");

        tree.attach(first, leaf).expect("attach");
        assert_eq!(tree.parent(leaf), Some(first));
        assert_eq!(tree.children(first), &[leaf]);

        tree.attach(second, leaf).expect("reparent");
        assert_eq!(tree.parent(leaf), Some(second));
        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[leaf]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = WidgetTree::new();
        let outer = container(&mut tree, "outer");
        let inner = container(&mut tree, "inner");
        tree.attach(outer, inner).expect("attach");
        assert_eq!(
            tree.attach(inner, outer),
            Err(MenuError::CyclicAttach {
                parent: inner,
                child: outer
            })
        );
        assert!(matches!(
            tree.attach(outer, outer),
            Err(MenuError::CyclicAttach { .. })
        ));
    }

    #[test]
    fn removal_frees_subtree_and_invalidates_handles() {
        let mut tree = WidgetTree::new();
        let root = container(&mut tree, "root");
        let branch = container(&mut tree, "branch");
        let leaf = plain(&mut tree, "leaf");
        tree.attach(root, branch).expect("attach");
        tree.attach(branch, leaf).expect("attach");

        assert_eq!(tree.remove(branch), 2);
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());
        assert!(tree.get(leaf).is_none());
        assert_eq!(tree.attach(root, leaf), Err(MenuError::UnknownWidget(leaf)));

        let reused = plain(&mut tree, "new");
        assert_ne!(reused, leaf);
        assert!(tree.get(leaf).is_none());
    }

    #[test]
    fn find_and_descend_in_pre_order() {
        let mut tree = WidgetTree::new();
        let root = container(&mut tree, "root");
        let a = container(&mut tree, "a");
        let a1 = plain(&mut tree, "a1");
        let b = plain(&mut tree, "b");
        tree.attach(root, a).expect("attach");
        tree.attach(a, a1).expect("attach");
        tree.attach(root, b).expect("attach");

        assert_eq!(tree.descendants(root), vec![root, a, a1, b]);
        assert_eq!(tree.find_by_name(root, "a1"), Some(a1));
        assert_eq!(tree.find_by_name(a, "b"), None);
        assert_eq!(tree.root_of(a1), root);
    }

    #[test]
    fn visibility_is_inherited() {
        let mut tree = WidgetTree::new();
        let root = container(&mut tree, "root");
        let leaf = plain(&mut tree, "leaf");
        tree.attach(root, leaf).expect("attach");
        assert!(tree.is_visible(leaf));
        tree.set_visible(root, false);
        assert!(!tree.is_visible(leaf));
        assert!(tree.get(leaf).is_some_and(|node| node.visible));
    }

    #[test]
    fn world_transform_composes_ancestors_and_anchor() {
        let mut tree = WidgetTree::new();
        let root = container(&mut tree, "root");
        let leaf = plain(&mut tree, "leaf");
        tree.attach(root, leaf).expect("attach");
        tree.set_local_position(root, Vec3::new(0.0, 0.0, 2.0));
        tree.set_local_scale(root, 0.5);
        tree.set_local_position(leaf, Vec3::new(4.0, 0.0, 0.0));

        let anchor = NodeTransform::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let world = tree.world_transform(leaf, &anchor).expect("live widget");
        assert!(world.translation.abs_diff_eq(Vec3::new(12.0, 0.0, 2.0), 1e-6));
        assert_eq!(world.scale, 0.5);
    }
}
