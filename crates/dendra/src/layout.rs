//! Radial cluster layout.
//!
//! [`LayoutTree`] is an arena of [`LayoutNode`]s built from a borrowed
//! [`HierarchyNode`]. Nodes are stored in breadth-first order, so the root is
//! always at index 0 and every parent precedes its children. Siblings are
//! ordered ascending by `name` before positions are assigned, unless one of
//! them has no name, in which case they keep their input order.
//!
//! Positions are polar: `angle` in radians clockwise from twelve o'clock over
//! `[0, 2π]`, and `radius` as distance from the chart origin. See
//! [`cluster`] for how they are computed.

pub mod cluster;

use std::collections::VecDeque;

use log::{debug, trace};

use dendra_core::{geometry::Point, hierarchy::HierarchyNode};

use crate::config::RadialMode;

/// Position of a node inside a [`LayoutTree`].
///
/// Indices follow breadth-first order; `NodeIndex(0)` is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Wraps a raw breadth-first index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A positioned node of the radial layout.
#[derive(Debug, Clone)]
pub struct LayoutNode<'a> {
    source: &'a HierarchyNode,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    depth: usize,
    height: usize,
    angle: f32,
    radius: f32,
}

impl<'a> LayoutNode<'a> {
    /// The hierarchy node this layout node was built from.
    pub fn source(&self) -> &'a HierarchyNode {
        self.source
    }

    pub fn id(&self) -> &'a str {
        self.source.id()
    }

    pub fn name(&self) -> Option<&'a str> {
        self.source.name()
    }

    pub fn category(&self) -> Option<&'a str> {
        self.source.category()
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Children in sorted (ascending `name`) order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Length of the longest downward path to a leaf; leaves have height 0.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Angle in radians, clockwise from twelve o'clock.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Cartesian position relative to the chart origin.
    pub fn position(&self) -> Point {
        Point::from_polar(self.angle, self.radius)
    }
}

/// Arena holding every node of a laid-out hierarchy.
#[derive(Debug, Clone)]
pub struct LayoutTree<'a> {
    nodes: Vec<LayoutNode<'a>>,
    leaves: Vec<NodeIndex>,
}

impl<'a> LayoutTree<'a> {
    /// Lays out `root` on a disc of the given outer radius.
    pub fn build(root: &'a HierarchyNode, outer_radius: f32, mode: RadialMode) -> Self {
        let mut tree = Self::from_hierarchy(root);
        debug!(
            nodes = tree.nodes.len(),
            leaves = tree.leaves.len(),
            max_depth = tree.max_depth();
            "Hierarchy indexed"
        );

        cluster::assign_positions(&mut tree.nodes, &tree.leaves, outer_radius, mode);
        trace!(tree:?; "Cluster layout assigned");
        tree
    }

    /// Indexes the hierarchy breadth-first with sorted children, computing
    /// depth and height but no positions.
    fn from_hierarchy(root: &'a HierarchyNode) -> Self {
        let mut nodes = vec![LayoutNode {
            source: root,
            parent: None,
            children: Vec::new(),
            depth: 0,
            height: 0,
            angle: 0.0,
            radius: 0.0,
        }];

        let mut queue = VecDeque::from([NodeIndex(0)]);
        while let Some(parent) = queue.pop_front() {
            let source: &'a HierarchyNode = nodes[parent.0].source;
            let mut sorted: Vec<&'a HierarchyNode> = source.children().iter().collect();
            // Stable sort: equal names keep their input order. Siblings
            // without a full set of names are left in input order.
            if sorted.iter().all(|child| child.name().is_some()) {
                sorted.sort_by(|a, b| a.name().cmp(&b.name()));
            }

            let depth = nodes[parent.0].depth + 1;
            for child in sorted {
                let index = NodeIndex(nodes.len());
                nodes.push(LayoutNode {
                    source: child,
                    parent: Some(parent),
                    children: Vec::new(),
                    depth,
                    height: 0,
                    angle: 0.0,
                    radius: 0.0,
                });
                nodes[parent.0].children.push(index);
                queue.push_back(index);
            }
        }

        // Children always follow their parent, so a reverse sweep sees them first
        for i in (0..nodes.len()).rev() {
            if let Some(parent) = nodes[i].parent {
                let candidate = nodes[i].height + 1;
                if candidate > nodes[parent.0].height {
                    nodes[parent.0].height = candidate;
                }
            }
        }

        let leaves = leaves_in_order(&nodes);
        Self { nodes, leaves }
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not belong to this tree.
    pub fn node(&self, index: NodeIndex) -> &LayoutNode<'a> {
        &self.nodes[index.0]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&LayoutNode<'a>> {
        self.nodes.get(index.0)
    }

    /// All nodes in breadth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &LayoutNode<'a>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    /// Leaves in left-to-right (clockwise) order.
    pub fn leaves(&self) -> &[NodeIndex] {
        &self.leaves
    }

    /// Parent-child pairs, one per non-root node, in breadth-first order of the child.
    pub fn links(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.iter()
            .filter_map(|(index, node)| node.parent.map(|parent| (parent, index)))
    }

    /// Indices of every node in the subtree rooted at `index`, including itself.
    pub fn descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut result = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev());
        }
        result
    }

    /// Finds the first node (breadth-first) whose id matches.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.iter()
            .find(|(_, node)| node.id() == id)
            .map(|(index, _)| index)
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Depth-first, left-to-right leaf order.
fn leaves_in_order(nodes: &[LayoutNode<'_>]) -> Vec<NodeIndex> {
    let mut leaves = Vec::new();
    let mut stack = vec![NodeIndex(0)];
    while let Some(current) = stack.pop() {
        let node = &nodes[current.0];
        if node.children.is_empty() {
            leaves.push(current);
        } else {
            stack.extend(node.children.iter().rev());
        }
    }
    leaves
}
