use super::{NodeId, QuadNode, QuadTree, ROOT};
use smallvec::SmallVec;

// Depth-first pre-order walk over the arena. Each level pushes at most four ids, so the
// stack stays inline for any reasonable max depth.
pub struct NodeIter<'a> {
    tree: &'a QuadTree,
    stack: SmallVec<[NodeId; 32]>,
}

impl<'a> NodeIter<'a> {
    pub(super) fn new(tree: &'a QuadTree) -> Self {
        let mut stack = SmallVec::new();
        stack.push(ROOT);
        Self { tree, stack }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tree.nodes[self.stack.pop()? as usize];
        if let Some(children) = node.children {
            // Reversed so that nw comes off the stack first.
            self.stack.extend(children.into_iter().rev());
        }
        Some(node)
    }
}
