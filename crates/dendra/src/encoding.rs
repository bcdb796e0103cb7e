//! Visual encoding of a laid-out tree.
//!
//! Two deterministic assignments drive every color and shape in a chart:
//!
//! - [`ColorAssignment`] is an ordinal scale from cluster ids (nodes of height
//!   1, in breadth-first order) to palette colors.
//! - [`CategoryShapeAssignment`] maps leaf categories to glyphs in the order
//!   they are first met walking the leaves clockwise.
//!
//! [`Encoding`] applies both to a [`LayoutTree`] and stores the per-node fill
//! and marker so that later stages never recompute them.

use indexmap::{IndexMap, map::Entry};
use log::debug;

use dendra_core::{color::{Color, Palette}, draw::Glyph};

use crate::layout::{LayoutTree, NodeIndex};

/// Ordinal color scale keyed by node id.
///
/// Keys keep insertion order; the `n`-th key maps to `palette[n % len]`.
/// Looking up an unknown key through [`ColorAssignment::color`] appends it
/// to the domain first.
///
/// ```
/// # use dendra::encoding::ColorAssignment;
/// # use dendra_core::color::Palette;
/// let mut colors = ColorAssignment::new(Palette::category10(), ["A", "B"]);
/// assert_ne!(colors.color("A"), colors.color("B"));
/// assert_eq!(colors.len(), 2);
///
/// colors.color("C");
/// assert_eq!(colors.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssignment {
    palette: Palette,
    domain: IndexMap<String, usize>,
}

impl ColorAssignment {
    /// Creates a scale over `palette` with the given initial domain.
    /// Duplicate keys keep their first position.
    pub fn new<S: Into<String>>(palette: Palette, domain: impl IntoIterator<Item = S>) -> Self {
        let mut assignment = Self {
            palette,
            domain: IndexMap::new(),
        };
        for key in domain {
            assignment.slot(key.into());
        }
        assignment
    }

    /// Builds the scale whose domain is every height-1 node id, breadth-first.
    pub fn from_layout(tree: &LayoutTree<'_>, palette: Palette) -> Self {
        Self::new(
            palette,
            tree.iter()
                .filter(|(_, node)| node.height() == 1)
                .map(|(_, node)| node.id()),
        )
    }

    fn slot(&mut self, key: String) -> usize {
        let next = self.domain.len();
        match self.domain.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(next),
        }
    }

    /// Color of `key`, extending the domain if the key is new.
    pub fn color(&mut self, key: &str) -> Color {
        let slot = match self.domain.get(key) {
            Some(&slot) => slot,
            None => self.slot(key.to_string()),
        };
        self.palette.get(slot)
    }

    /// Color of `key` if it is already in the domain.
    pub fn get(&self, key: &str) -> Option<Color> {
        self.domain.get(key).map(|&slot| self.palette.get(slot))
    }

    /// Domain keys in insertion order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}

/// Category to glyph mapping, fixed once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryShapeAssignment {
    shapes: IndexMap<String, Glyph>,
}

impl CategoryShapeAssignment {
    /// Assigns glyphs to categories in first-seen order, wrapping around
    /// `sequence` when categories outnumber glyphs.
    ///
    /// An empty sequence yields an empty assignment.
    pub fn new<'c>(categories: impl IntoIterator<Item = &'c str>, sequence: &[Glyph]) -> Self {
        let mut shapes = IndexMap::new();
        if sequence.is_empty() {
            return Self { shapes };
        }
        for category in categories {
            if !shapes.contains_key(category) {
                let glyph = sequence[shapes.len() % sequence.len()];
                shapes.insert(category.to_string(), glyph);
            }
        }
        Self { shapes }
    }

    /// Walks leaves clockwise and assigns a glyph to each new category.
    pub fn from_layout(tree: &LayoutTree<'_>, sequence: &[Glyph]) -> Self {
        Self::new(
            tree.leaves().iter().filter_map(|&leaf| tree.node(leaf).category()),
            sequence,
        )
    }

    pub fn glyph(&self, category: &str) -> Option<Glyph> {
        self.shapes.get(category).copied()
    }

    /// Categories with their glyphs, in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Glyph)> {
        self.shapes.iter().map(|(category, &glyph)| (category.as_str(), glyph))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// How a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    /// A plain circle of the given radius.
    Circle(f32),
    /// A category glyph of the given area.
    Glyph(Glyph, f32),
}

/// Per-node visual attributes for one layout.
#[derive(Debug, Clone)]
pub struct Encoding {
    colors: ColorAssignment,
    shapes: CategoryShapeAssignment,
    fills: Vec<Color>,
    markers: Vec<Marker>,
    neutral: Color,
}

impl Encoding {
    /// Computes colors and markers for every node of `tree`.
    ///
    /// - height > 1: the neutral color
    /// - height 1: the ordinal color of the node's own id
    /// - leaves: the parent's color, or their own id's color when hanging
    ///   directly off the root (or being the root)
    pub fn build(
        tree: &LayoutTree<'_>,
        palette: Palette,
        neutral: Color,
        sequence: &[Glyph],
        node_radius: f32,
        glyph_size: f32,
    ) -> Self {
        let mut colors = ColorAssignment::from_layout(tree, palette);
        let shapes = CategoryShapeAssignment::from_layout(tree, sequence);

        let mut fills = Vec::with_capacity(tree.len());
        let mut markers = Vec::with_capacity(tree.len());
        for (_, node) in tree.iter() {
            let fill = if node.height() > 1 {
                neutral
            } else if node.height() == 1 {
                colors.color(node.id())
            } else {
                match node.parent() {
                    Some(parent) if !tree.node(parent).is_root() => {
                        colors.color(tree.node(parent).id())
                    }
                    _ => colors.color(node.id()),
                }
            };
            fills.push(fill);

            let marker = match node.category().and_then(|c| shapes.glyph(c)) {
                Some(glyph) if node.is_leaf() => Marker::Glyph(glyph, glyph_size),
                _ => Marker::Circle(node_radius),
            };
            markers.push(marker);
        }

        debug!(
            clusters = colors.len(),
            categories = shapes.len();
            "Encoding assigned"
        );

        Self {
            colors,
            shapes,
            fills,
            markers,
            neutral,
        }
    }

    pub fn fill(&self, index: NodeIndex) -> Color {
        self.fills[index.index()]
    }

    pub fn marker(&self, index: NodeIndex) -> Marker {
        self.markers[index.index()]
    }

    /// Stroke color of the link ending at `target`: neutral towards internal
    /// nodes, the leaf's own fill otherwise.
    pub fn link_stroke(&self, tree: &LayoutTree<'_>, target: NodeIndex) -> Color {
        if tree.node(target).is_leaf() {
            self.fill(target)
        } else {
            self.neutral
        }
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn shapes(&self) -> &CategoryShapeAssignment {
        &self.shapes
    }

    pub fn neutral(&self) -> Color {
        self.neutral
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use dendra_core::hierarchy::HierarchyNode;

    use crate::config::RadialMode;

    use super::*;

    fn clusters(count: usize) -> HierarchyNode {
        HierarchyNode::leaf("root", "root").with_children((0..count).map(|i| {
            let id = format!("c{i:03}");
            let leaf = HierarchyNode::leaf(format!("{id}-leaf"), format!("{id}-leaf"))
                .with_category(format!("k{}", i % 4));
            HierarchyNode::leaf(id.clone(), id).with_child(leaf)
        }))
    }

    proptest! {
        #[test]
        fn cluster_colors_cycle_with_period_ten(count in 1usize..40) {
            let root = clusters(count);
            let tree = LayoutTree::build(&root, 100.0, RadialMode::Depth);
            let colors = ColorAssignment::from_layout(&tree, Palette::category10());

            let assigned: Vec<_> = colors.domain().map(|key| colors.get(key).unwrap()).collect();
            prop_assert_eq!(assigned.len(), count);
            for (i, color) in assigned.iter().enumerate() {
                for (j, other) in assigned.iter().enumerate().skip(i + 1) {
                    prop_assert_eq!(color == other, (j - i) % 10 == 0);
                }
            }
        }

        #[test]
        fn encoding_is_deterministic(count in 1usize..25) {
            let root = clusters(count);
            let tree = LayoutTree::build(&root, 100.0, RadialMode::Depth);
            let build = || {
                Encoding::build(
                    &tree,
                    Palette::category10(),
                    Color::default(),
                    &Glyph::SEQUENCE,
                    1.0,
                    16.0,
                )
            };
            let (first, second) = (build(), build());

            prop_assert_eq!(first.colors(), second.colors());
            prop_assert_eq!(first.shapes(), second.shapes());
            for (index, _) in tree.iter() {
                prop_assert_eq!(first.fill(index), second.fill(index));
                prop_assert_eq!(first.marker(index), second.marker(index));
            }
        }
    }
}
