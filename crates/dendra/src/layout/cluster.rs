//! Cluster (dendrogram) position assignment.
//!
//! Leaves are spread along the angular axis in left-to-right order, each one
//! `separation(leaf, previous)` after the last; internal nodes sit at the mean
//! angle of their children. The resulting span is padded by half a
//! separation on both ends and scaled onto the full circle.
//!
//! Separation is `1` between siblings and `2` between cousins, divided by the
//! depth of the node being placed. Deeper leaves therefore pack tighter, and
//! cluster boundaries get a visible gap.

use std::f32::consts::TAU;

use super::{LayoutNode, NodeIndex};
use crate::config::RadialMode;

/// Angular separation between two neighbouring leaves.
///
/// The root has depth 0; it only reaches this function when it is the sole
/// node, so the divisor is clamped to 1.
pub fn separation(a: &LayoutNode<'_>, b: &LayoutNode<'_>) -> f32 {
    let gap = if a.parent == b.parent { 1.0 } else { 2.0 };
    gap / a.depth.max(1) as f32
}

/// Writes `angle` and `radius` for every node.
///
/// `nodes` must be in breadth-first order and `leaves` in left-to-right order.
pub(super) fn assign_positions(
    nodes: &mut [LayoutNode<'_>],
    leaves: &[NodeIndex],
    outer_radius: f32,
    mode: RadialMode,
) {
    if nodes.len() <= 1 {
        if let Some(root) = nodes.first_mut() {
            root.angle = 0.0;
            root.radius = 0.0;
        }
        return;
    }

    // Raw angular coordinate per node
    let mut x = vec![0.0_f32; nodes.len()];
    let mut previous: Option<NodeIndex> = None;
    let mut cursor = 0.0_f32;
    for &leaf in leaves {
        if let Some(prev) = previous {
            cursor += separation(&nodes[leaf.0], &nodes[prev.0]);
        }
        x[leaf.0] = cursor;
        previous = Some(leaf);
    }

    // Reverse breadth-first order visits children before their parent
    for i in (0..nodes.len()).rev() {
        let children = &nodes[i].children;
        if !children.is_empty() {
            let sum: f32 = children.iter().map(|child| x[child.0]).sum();
            x[i] = sum / children.len() as f32;
        }
    }

    let (Some(&left), Some(&right)) = (leaves.first(), leaves.last()) else {
        return;
    };
    let x0 = x[left.0] - separation(&nodes[left.0], &nodes[right.0]) / 2.0;
    let x1 = x[right.0] + separation(&nodes[right.0], &nodes[left.0]) / 2.0;
    let span = x1 - x0;

    let max_depth = nodes.iter().map(|node| node.depth).max().unwrap_or(0);
    let root_height = nodes[0].height;

    for (i, node) in nodes.iter_mut().enumerate() {
        node.angle = (x[i] - x0) / span * TAU;
        node.radius = match mode {
            RadialMode::Depth if max_depth > 0 => {
                outer_radius * node.depth as f32 / max_depth as f32
            }
            RadialMode::LeafAligned if root_height > 0 => {
                outer_radius * (1.0 - node.height as f32 / root_height as f32)
            }
            _ => 0.0,
        };
    }
}
