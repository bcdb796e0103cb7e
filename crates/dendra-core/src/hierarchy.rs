//! The input tree data model.
//!
//! A chart is fed a single rooted [`HierarchyNode`] deserialized from JSON of
//! the shape `{ "id": ..., "name"?: ..., "category"?: ..., "children"?: [...] }`.
//! Fields other than these are ignored, so documents carrying extra metadata
//! (levels, weights, root markers) load unchanged. Trees exported from a graph
//! library often carry only `id`, so `name` is optional.

use serde::Deserialize;

/// One node of the input hierarchy.
///
/// `id` is the display label and the identity used by the color scale, while
/// `name`, when present, is the sort key for sibling ordering. Leaves may carry a `category`
/// tag which drives glyph selection and hover highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HierarchyNode {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Creates a leaf node.
    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            category: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf node without a sort key.
    pub fn unnamed(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: None,
            children: Vec::new(),
        }
    }

    /// Sets the category tag (builder style).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Appends a child (builder style).
    pub fn with_child(mut self, child: HierarchyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children (builder style).
    pub fn with_children(mut self, children: impl IntoIterator<Item = HierarchyNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn children(&self) -> &[HierarchyNode] {
        &self.children
    }

    /// True when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::len).sum::<usize>()
    }

    /// Always false; a hierarchy contains at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}
