//! Hover, pin, zoom, recenter and export over a rendered chart.
//!
//! [`InteractionController`] owns a [`RenderedChart`] and mutates it in
//! response to discrete events. Per-leaf view state lives in the controller,
//! keyed by [`NodeIndex`], and is created the first time a leaf is pinned.
//!
//! ```text
//!            hover                 click
//!   Idle ───────────▶ Hovered ───────────▶ Pinned
//!    ▲  ◀───────────    │                  │  ▲
//!    │     unhover      └─────── click ────┼──┘ (unpin keeps hover expansion)
//!    └──────────────────── click ──────────┘
//! ```

mod zoom;

pub use zoom::{ZoomBehavior, ZoomEvent, ZoomTransform};

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use crate::{
    DendraError,
    config::InteractionConfig,
    export::{self, Exporter},
    layout::NodeIndex,
    scene::RenderedChart,
};

/// Default file name for exported charts.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "radial-cluster.svg";

/// Observable interaction state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Idle,
    HoverHighlighted,
    Pinned,
}

/// UI-only state of one leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pinned: bool,
}

impl ViewState {
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// Event-driven controller over a single chart.
#[derive(Debug)]
pub struct InteractionController {
    chart: RenderedChart,
    view_states: HashMap<NodeIndex, ViewState>,
    hovered: Option<NodeIndex>,
    zoom: ZoomBehavior,
    dim_opacity: f32,
}

impl InteractionController {
    /// Takes ownership of `chart`, starting idle with the identity zoom.
    pub fn new(chart: RenderedChart, config: &InteractionConfig) -> Self {
        let zoom = ZoomBehavior::new(chart.view_box(), config.min_scale(), config.max_scale());
        Self {
            chart,
            view_states: HashMap::new(),
            hovered: None,
            zoom,
            dim_opacity: config.dim_opacity(),
        }
    }

    pub fn chart(&self) -> &RenderedChart {
        &self.chart
    }

    /// Releases the chart, dropping all view state.
    pub fn into_chart(self) -> RenderedChart {
        self.chart
    }

    fn is_pinned(&self, index: NodeIndex) -> bool {
        self.view_states
            .get(&index)
            .is_some_and(ViewState::is_pinned)
    }

    pub fn view_state(&self, index: NodeIndex) -> Option<ViewState> {
        self.view_states.get(&index).copied()
    }

    pub fn node_state(&self, index: NodeIndex) -> NodeState {
        if self.is_pinned(index) {
            NodeState::Pinned
        } else if self.hovered == Some(index) {
            NodeState::HoverHighlighted
        } else {
            NodeState::Idle
        }
    }

    /// Highlights the hovered node's category and expands its label.
    ///
    /// Nodes without a category, and unknown indices, are ignored. Hovering a
    /// new node while another is hovered releases the previous one first.
    pub fn hover(&mut self, index: NodeIndex) {
        let Some(category) = self
            .chart
            .node(index)
            .and_then(|node| node.category())
            .map(str::to_string)
        else {
            trace!(index = index.index(); "Hover ignored: no category");
            return;
        };

        if let Some(previous) = self.hovered.filter(|&previous| previous != index) {
            self.unhover(previous);
        }

        debug!(index = index.index(), category = category.as_str(); "Hover");
        self.chart.highlight(&category, self.dim_opacity);
        if let Some(label) = self.chart.label_mut(index) {
            label.set_expanded(true);
        }
        self.hovered = Some(index);
    }

    /// Collapses the label unless pinned. Opacity is restored only when
    /// `index` holds the highlight, or when nothing is hovered.
    pub fn unhover(&mut self, index: NodeIndex) {
        if self.chart.node(index).is_none() {
            return;
        }
        debug!(index = index.index(); "Unhover");
        match self.hovered {
            Some(hovered) if hovered != index => {
                trace!(index = index.index(), hovered = hovered.index(); "Highlight kept");
            }
            _ => {
                self.chart.clear_highlight();
                self.hovered = None;
            }
        }
        let pinned = self.is_pinned(index);
        if let Some(label) = self.chart.label_mut(index) {
            label.set_expanded(pinned);
        }
    }

    /// Toggles the pin on a leaf. Internal nodes and unknown indices are ignored.
    pub fn click(&mut self, index: NodeIndex) {
        if !self.chart.node(index).is_some_and(|node| node.is_leaf()) {
            return;
        }

        let state = self.view_states.entry(index).or_default();
        state.pinned = !state.pinned;
        let pinned = state.pinned;
        debug!(index = index.index(), pinned = pinned; "Pin toggled");

        let expanded = pinned || self.hovered == Some(index);
        if let Some(label) = self.chart.label_mut(index) {
            label.set_expanded(expanded);
        }
    }

    /// Applies a zoom event to the content group. Node state is untouched.
    pub fn zoom(&mut self, event: ZoomEvent) {
        let next = self.zoom.apply(self.chart.zoom(), event);
        trace!(k = next.k(), x = next.x(), y = next.y(); "Zoom");
        self.chart.set_zoom(next);
    }

    pub fn transform(&self) -> ZoomTransform {
        self.chart.zoom()
    }

    /// Centers the chart content in the viewport at the current scale.
    ///
    /// Content bounds include node markers and labels as currently sized, so
    /// expanded labels shift the result.
    pub fn recenter(&mut self) {
        let Some(content) = self.chart.content_bounds() else {
            return;
        };
        let next = self.zoom.centered_on(self.chart.zoom(), content);
        debug!(x = next.x(), y = next.y(); "Recentered");
        self.chart.set_zoom(next);
    }

    /// Serialises the current scene as a standalone SVG document without the
    /// help overlay.
    pub fn export(&self) -> Result<String, DendraError> {
        let svg = export::svg::SvgBuilder::new(DEFAULT_EXPORT_FILE_NAME)
            .with_overlay(false)
            .build()?;
        Ok(svg.render_string(&self.chart))
    }

    /// Writes the export to `path`, or to [`DEFAULT_EXPORT_FILE_NAME`] inside
    /// `path` when it is a directory. Returns the file written.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<PathBuf, DendraError> {
        let path = path.as_ref();
        let target = if path.is_dir() {
            path.join(DEFAULT_EXPORT_FILE_NAME)
        } else {
            path.to_path_buf()
        };

        let mut svg = export::svg::SvgBuilder::new(&target)
            .with_overlay(false)
            .build()?;
        svg.export_chart(&self.chart)?;

        info!(path = target.display().to_string(); "Chart exported");
        Ok(target)
    }
}
