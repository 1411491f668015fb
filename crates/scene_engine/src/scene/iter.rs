//! Depth-first traversal of a branch

use super::Graph;
use crate::foundation::collections::NodeId;

/// Pre-order iterator over a branch, see [`Graph::iter`]
#[derive(Debug)]
pub struct BranchIter<'a> {
    graph: &'a Graph,
    stack: Vec<NodeId>,
    active_only: bool,
}

impl<'a> BranchIter<'a> {
    pub(crate) fn new(graph: &'a Graph, root: NodeId, active_only: bool) -> Self {
        let mut iter = Self {
            graph,
            stack: Vec::new(),
            active_only,
        };
        if iter.admits(root) {
            iter.stack.push(root);
        }
        iter
    }

    fn admits(&self, id: NodeId) -> bool {
        self.graph
            .node(id)
            .is_some_and(|node| !self.active_only || node.is_active())
    }
}

impl Iterator for BranchIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let graph = self.graph;
        if let Some(node) = graph.node(id) {
            for &child in node.children().iter().rev() {
                if self.admits(child) {
                    self.stack.push(child);
                }
            }
        }
        Some(id)
    }
}
