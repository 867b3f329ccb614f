mod config;
mod iter;
mod stats;

pub use config::Config;
pub use iter::NodeIter;
pub use stats::QuadTreeStats;

use crate::error::{QuadtreeError, QuadtreeResult};
use common::collision_detection::circle_rectangle;
use common::shapes::{Circle, Rectangle};

pub type NodeId = u32;

const ROOT: NodeId = 0;

/// Anything the tree can bucket. The tree only ever sees item indices; the items
/// themselves are borrowed from the caller for the duration of each call.
pub trait QuadTreeItem {
    fn intersects_rect(&self, rect: &Rectangle) -> bool;
}

impl QuadTreeItem for Circle {
    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        circle_rectangle(self, rect)
    }
}

#[derive(Debug, Clone)]
pub struct QuadNode {
    depth: usize,
    bounds: Rectangle,
    items: Vec<usize>,
    // nw, ne, sw, se. Either all four exist or none do.
    children: Option<[NodeId; 4]>,
}

impl QuadNode {
    fn leaf(bounds: Rectangle, depth: usize) -> Self {
        Self {
            depth,
            bounds,
            items: Vec::new(),
            children: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    // Indices held by a leaf. Always empty on internal nodes.
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }
}

/// Region quadtree over item indices, stored as a flat arena of nodes.
///
/// The tree is meant to be thrown away and rebuilt every tick: there is no delete or
/// relocate, only [`QuadTree::insert`] and [`QuadTree::reset`]. A circle that straddles
/// a quadrant boundary is stored in every child it touches, so a pair of overlapping
/// items always shares at least one leaf.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    config: Config,
}

impl QuadTree {
    pub fn new(bounds: Rectangle, config: Config) -> QuadtreeResult<Self> {
        validate_bounds(&bounds)?;
        config.validate()?;
        Ok(Self {
            nodes: vec![QuadNode::leaf(bounds, 0)],
            config,
        })
    }

    /// New tree with every index of `items` inserted in order.
    pub fn build<T: QuadTreeItem>(
        bounds: Rectangle,
        config: Config,
        items: &[T],
    ) -> QuadtreeResult<Self> {
        let mut tree = Self::new(bounds, config)?;
        tree.insert_all(items);
        Ok(tree)
    }

    // Drops every node and starts over with a single empty root. Keeps the arena allocation.
    pub fn reset(&mut self, bounds: Rectangle) -> QuadtreeResult<()> {
        validate_bounds(&bounds)?;
        self.nodes.clear();
        self.nodes.push(QuadNode::leaf(bounds, 0));
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.root().bounds
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[ROOT as usize]
    }

    pub fn node(&self, id: NodeId) -> Option<&QuadNode> {
        self.nodes.get(id as usize)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn insert_all<T: QuadTreeItem>(&mut self, items: &[T]) {
        for index in 0..items.len() {
            self.insert(index, items);
        }
    }

    // `index` must be a valid index into `items`; it is not checked here.
    pub fn insert<T: QuadTreeItem>(&mut self, index: usize, items: &[T]) {
        self.insert_into(ROOT, index, items);
    }

    fn insert_into<T: QuadTreeItem>(&mut self, node_id: NodeId, index: usize, items: &[T]) {
        let node = &mut self.nodes[node_id as usize];
        if node.children.is_some() {
            self.insert_into_children(node_id, index, items);
            return;
        }

        node.items.push(index);
        if node.items.len() > self.config.node_capacity && node.depth < self.config.max_depth {
            let pending = std::mem::take(&mut node.items);
            self.subdivide(node_id);
            for pending_index in pending {
                self.insert_into_children(node_id, pending_index, items);
            }
        }
    }

    fn insert_into_children<T: QuadTreeItem>(
        &mut self,
        node_id: NodeId,
        index: usize,
        items: &[T],
    ) {
        let Some(children) = self.nodes[node_id as usize].children else {
            return;
        };
        let item = &items[index];
        for child in children {
            if item.intersects_rect(&self.nodes[child as usize].bounds) {
                self.insert_into(child, index, items);
            }
        }
    }

    fn subdivide(&mut self, node_id: NodeId) {
        let node = &self.nodes[node_id as usize];
        let depth = node.depth + 1;
        let quadrants = node.bounds.quadrants();

        let first = self.nodes.len() as NodeId;
        self.nodes
            .extend(quadrants.into_iter().map(|bounds| QuadNode::leaf(bounds, depth)));
        self.nodes[node_id as usize].children = Some([first, first + 1, first + 2, first + 3]);
    }

    /// Calls `visitor` once for every leaf holding at least two indices, in nw, ne, sw, se
    /// order, handing it the leaf's indices and mutable access to the items.
    pub fn traverse_leaves<T, F>(&self, items: &mut [T], mut visitor: F)
    where
        F: FnMut(&[usize], &mut [T]),
    {
        self.visit_leaves(ROOT, items, &mut visitor);
    }

    fn visit_leaves<T, F>(&self, node_id: NodeId, items: &mut [T], visitor: &mut F)
    where
        F: FnMut(&[usize], &mut [T]),
    {
        let node = &self.nodes[node_id as usize];
        match node.children {
            Some(children) => {
                for child in children {
                    self.visit_leaves(child, items, visitor);
                }
            }
            None => {
                if node.items.len() > 1 {
                    visitor(&node.items, items);
                }
            }
        }
    }

    /// Every node in pre-order: a node, then its nw, ne, sw and se subtrees.
    pub fn nodes(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &QuadNode> + '_ {
        self.nodes().filter(|node| node.is_leaf())
    }
}

fn validate_bounds(bounds: &Rectangle) -> QuadtreeResult<()> {
    if bounds.is_valid() {
        Ok(())
    } else {
        Err(QuadtreeError::InvalidBounds {
            start_x: bounds.start.x,
            start_y: bounds.start.y,
            end_x: bounds.end.x,
            end_y: bounds.end.y,
        })
    }
}
