//! The rendered chart scene graph.
//!
//! A [`RenderedChart`] holds every visual element of a chart with its
//! attributes already resolved: geometry, colors, marker, label placement and
//! current opacity. Interaction mutates these fields in place and export
//! serialises them; neither recomputes the layout.
//!
//! Elements that belong to a node (the node marker, its label and the link
//! ending at it) are addressed by the node's [`NodeIndex`].

use std::f32::consts::{FRAC_PI_2, PI};

use log::debug;
use svg::node::element::{self as svg_element, path::Data};

use dendra_core::{
    apply_stroke,
    color::Color,
    draw::{
        Drawable, Glyph, LayeredOutput, RenderLayer, StrokeDefinition, StrokeJoin, TextDefinition,
    },
    geometry::{Bounds, Point, Size, to_degrees},
};

use crate::{
    config::AppConfig,
    encoding::{Encoding, Marker},
    interaction::ZoomTransform,
    layout::{LayoutTree, NodeIndex},
};

/// Horizontal gap between a node and the start of its label.
const LABEL_GAP: f32 = 6.0;
const LEGEND_INSET: f32 = 12.0;
const LEGEND_ROW: f32 = 14.0;
const LEGEND_FONT_SIZE: f32 = 8.0;
const OVERLAY_INSET: f32 = 8.0;
const OVERLAY_ROW: f32 = 11.0;
const OVERLAY_FONT_SIZE: f32 = 8.0;

fn node_transform(angle: f32, radius: f32) -> String {
    format!("rotate({}) translate({},0)", to_degrees(angle) - 90.0, radius)
}

/// A parent-child link drawn as a radial bump curve.
#[derive(Debug, Clone)]
pub struct LinkElement {
    source: NodeIndex,
    target: NodeIndex,
    points: [Point; 4],
    stroke: StrokeDefinition,
    category: Option<String>,
    opacity: f32,
}

impl LinkElement {
    fn new(
        tree: &LayoutTree<'_>,
        source: NodeIndex,
        target: NodeIndex,
        stroke: StrokeDefinition,
    ) -> Self {
        let (from, to) = (tree.node(source), tree.node(target));
        let mid = (from.radius() + to.radius()) / 2.0;
        Self {
            source,
            target,
            points: [
                from.position(),
                Point::from_polar(from.angle(), mid),
                Point::from_polar(to.angle(), mid),
                to.position(),
            ],
            stroke,
            category: to.category().map(str::to_string),
            opacity: 1.0,
        }
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Category of the target node.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    /// Path data `M p0 C p1 p2 p3`.
    pub fn path_data(&self) -> Data {
        let [p0, p1, p2, p3] = self.points;
        Data::new()
            .move_to((p0.x(), p0.y()))
            .cubic_curve_to((p1.x(), p1.y(), p2.x(), p2.y(), p3.x(), p3.y()))
    }
}

impl Drawable for LinkElement {
    fn render_to_layers(&self) -> LayeredOutput {
        let path = svg_element::Path::new()
            .set("d", self.path_data())
            .set("fill", "none")
            .set("opacity", self.opacity);
        let path = apply_stroke!(path, &self.stroke);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Links, Box::new(path));
        output
    }

    fn bounds(&self) -> Bounds {
        // A cubic Bézier lies within the hull of its control points
        Bounds::from_points(self.points).unwrap_or_default()
    }
}

/// A node marker: a small circle, or a category glyph for tagged leaves.
#[derive(Debug, Clone)]
pub struct NodeElement {
    index: NodeIndex,
    id: String,
    angle: f32,
    radius: f32,
    fill: Color,
    marker: Marker,
    category: Option<String>,
    is_leaf: bool,
    opacity: f32,
}

impl NodeElement {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Point {
        Point::from_polar(self.angle, self.radius)
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    pub fn transform(&self) -> String {
        node_transform(self.angle, self.radius)
    }
}

impl Drawable for NodeElement {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let transform = self.transform();

        match self.marker {
            Marker::Circle(r) => {
                let mut circle = svg_element::Circle::new()
                    .set("transform", transform)
                    .set("fill", self.fill)
                    .set("r", r)
                    .set("opacity", self.opacity)
                    .set("data-id", self.id.as_str());
                if let Some(category) = &self.category {
                    circle = circle.set("data-category", category.as_str());
                }
                output.add_to_layer(RenderLayer::Nodes, Box::new(circle));
            }
            Marker::Glyph(glyph, area) => {
                let mut path = glyph_path(glyph, area, self.fill)
                    .set("transform", transform)
                    .set("opacity", self.opacity)
                    .set("data-id", self.id.as_str())
                    .set("data-glyph", glyph.name());
                if let Some(category) = &self.category {
                    path = path.set("data-category", category.as_str());
                }
                output.add_to_layer(RenderLayer::Nodes, Box::new(path));
            }
        }
        output
    }

    fn bounds(&self) -> Bounds {
        let half = match self.marker {
            Marker::Circle(r) => r,
            Marker::Glyph(glyph, area) => glyph.half_extent(area),
        };
        // Glyphs rotate with the node, so use the circumscribed square
        let size = Size::new(2.0 * half, 2.0 * half).scale(std::f32::consts::SQRT_2);
        self.position().to_bounds(size)
    }
}

fn glyph_path(glyph: Glyph, area: f32, color: Color) -> svg_element::Path {
    let path = svg_element::Path::new().set("d", glyph.path_data(area));
    if glyph.is_stroked() {
        path.set("fill", "none")
            .set("stroke", color)
            .set("stroke-width", 1.0_f32)
    } else {
        path.set("fill", color)
    }
}

/// A node label with its base and expanded (hovered or pinned) styles.
#[derive(Debug, Clone)]
pub struct LabelElement {
    index: NodeIndex,
    text: String,
    angle: f32,
    radius: f32,
    is_leaf: bool,
    category: Option<String>,
    base: TextDefinition,
    expanded_font_size: f32,
    expanded_offset: f32,
    halo: StrokeDefinition,
    expanded: bool,
    opacity: f32,
}

impl LabelElement {
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub(crate) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    pub(crate) fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// True when the label reads away from the center: leaves on the right
    /// half and internal nodes on the left half.
    fn is_outward(&self) -> bool {
        (self.angle < PI) == self.is_leaf
    }

    /// Whether the text is turned upside-right on the left half of the circle.
    fn is_flipped(&self) -> bool {
        self.angle >= PI
    }

    pub fn anchor(&self) -> &'static str {
        if self.is_outward() { "start" } else { "end" }
    }

    /// Horizontal offset of the text anchor in the label's rotated frame.
    pub fn x_offset(&self) -> f32 {
        let distance = if self.expanded {
            LABEL_GAP + self.expanded_offset
        } else {
            LABEL_GAP
        };
        if self.is_outward() { distance } else { -distance }
    }

    pub fn font_size(&self) -> f32 {
        if self.expanded {
            self.expanded_font_size
        } else {
            self.base.font_size()
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "{} rotate({})",
            node_transform(self.angle, self.radius),
            if self.is_flipped() { 180 } else { 0 }
        )
    }

    fn text_definition(&self) -> TextDefinition {
        self.base.clone().with_font_size(self.font_size())
    }
}

impl Drawable for LabelElement {
    fn render_to_layers(&self) -> LayeredOutput {
        let text = svg_element::Text::new(self.text.as_str())
            .set("transform", self.transform())
            .set("dy", "0.31em")
            .set("x", self.x_offset())
            .set("text-anchor", self.anchor())
            .set("paint-order", "stroke")
            .set("fill", "currentColor")
            .set("font-size", format!("{}px", self.font_size()))
            .set("opacity", self.opacity)
            .set("data-id", self.text.as_str());
        let text = apply_stroke!(text, &self.halo);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Labels, Box::new(text));
        output
    }

    fn bounds(&self) -> Bounds {
        let size = self.text_definition().measure(&self.text);
        let x = self.x_offset();
        let left = if self.is_outward() { x } else { x - size.width() };
        let local = Bounds::new_from_top_left(Point::new(left, -size.height() / 2.0), size);

        let flip = if self.is_flipped() { PI } else { 0.0 };
        let shift = Point::new(self.radius, 0.0);
        let rotation = self.angle - FRAC_PI_2;
        Bounds::from_points(
            local
                .corners()
                .into_iter()
                .map(|corner| corner.rotate(flip).add_point(shift).rotate(rotation)),
        )
        .unwrap_or_default()
    }
}

/// One legend row: a category glyph followed by the category name.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    category: String,
    glyph: Glyph,
    area: f32,
    color: Color,
    position: Point,
}

impl LegendEntry {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }
}

impl Drawable for LegendEntry {
    fn render_to_layers(&self) -> LayeredOutput {
        let marker = glyph_path(self.glyph, self.area, self.color);
        let label = svg_element::Text::new(self.category.as_str())
            .set("x", LEGEND_INSET)
            .set("dy", "0.31em")
            .set("font-size", format!("{LEGEND_FONT_SIZE}px"))
            .set("fill", "currentColor");
        let row = svg_element::Group::new()
            .set(
                "transform",
                format!("translate({},{})", self.position.x(), self.position.y()),
            )
            .set("data-category", self.category.as_str())
            .add(marker)
            .add(label);

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Legend, Box::new(row));
        output
    }

    fn bounds(&self) -> Bounds {
        let text = TextDefinition::new()
            .with_font_size(LEGEND_FONT_SIZE)
            .measure(&self.category);
        let half = self.glyph.half_extent(self.area);
        Bounds::new_from_top_left(
            Point::new(self.position.x() - half, self.position.y() - half.max(text.height() / 2.0)),
            Size::new(half + LEGEND_INSET + text.width(), 2.0 * half.max(text.height() / 2.0)),
        )
    }
}

/// One line of instructional help text.
#[derive(Debug, Clone)]
pub struct OverlayLine {
    text: String,
    position: Point,
}

impl OverlayLine {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Drawable for OverlayLine {
    fn render_to_layers(&self) -> LayeredOutput {
        let text = svg_element::Text::new(self.text.as_str())
            .set("x", self.position.x())
            .set("y", self.position.y())
            .set("font-size", format!("{OVERLAY_FONT_SIZE}px"))
            .set("fill", "#888");

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Overlay, Box::new(text));
        output
    }

    fn bounds(&self) -> Bounds {
        let size = TextDefinition::new()
            .with_font_size(OVERLAY_FONT_SIZE)
            .measure(&self.text);
        Bounds::new_from_top_left(
            Point::new(self.position.x(), self.position.y() - size.height()),
            size,
        )
    }
}

/// A fully attributed chart ready for interaction and export.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    width: f32,
    height: f32,
    view_box: Bounds,
    font_family: String,
    background: Option<Color>,
    links: Vec<LinkElement>,
    nodes: Vec<NodeElement>,
    labels: Vec<LabelElement>,
    legend: Vec<LegendEntry>,
    overlay: Vec<OverlayLine>,
    zoom: ZoomTransform,
}

impl RenderedChart {
    /// Builds the scene for a laid-out and encoded tree.
    ///
    /// # Errors
    ///
    /// Returns an error message if the configured background color is invalid.
    pub fn assemble(
        tree: &LayoutTree<'_>,
        encoding: &Encoding,
        config: &AppConfig,
    ) -> Result<Self, String> {
        let layout = config.layout();
        let style = config.style();

        let (width, height) = (layout.width(), layout.height());
        let view_box = Bounds::new_from_top_left(
            Point::new(-width * layout.center().x(), -height * layout.center().y()),
            Size::new(width, height),
        );

        let links: Vec<_> = tree
            .links()
            .map(|(source, target)| {
                let mut stroke =
                    StrokeDefinition::new(encoding.link_stroke(tree, target), style.link_width());
                stroke.set_opacity(style.link_opacity());
                LinkElement::new(tree, source, target, stroke)
            })
            .collect();

        let nodes: Vec<_> = tree
            .iter()
            .map(|(index, node)| NodeElement {
                index,
                id: node.id().to_string(),
                angle: node.angle(),
                radius: node.radius(),
                fill: encoding.fill(index),
                marker: encoding.marker(index),
                category: node.category().map(str::to_string),
                is_leaf: node.is_leaf(),
                opacity: 1.0,
            })
            .collect();

        let mut base = TextDefinition::new();
        base.set_font_family(style.font_family());
        base.set_font_size(style.label_font_size());
        let mut halo = StrokeDefinition::new(Color::new("white")?, 3.0);
        halo.set_join(StrokeJoin::Round);

        let labels: Vec<_> = tree
            .iter()
            .map(|(index, node)| LabelElement {
                index,
                text: node.id().to_string(),
                angle: node.angle(),
                radius: node.radius(),
                is_leaf: node.is_leaf(),
                category: node.category().map(str::to_string),
                base: base.clone(),
                expanded_font_size: style.expanded_label_font_size(),
                expanded_offset: style.expanded_label_offset(),
                halo: halo.clone(),
                expanded: false,
                opacity: 1.0,
            })
            .collect();

        let legend = if style.legend() {
            encoding
                .shapes()
                .iter()
                .enumerate()
                .map(|(row, (category, glyph))| LegendEntry {
                    category: category.to_string(),
                    glyph,
                    area: style.glyph_size(),
                    color: encoding.neutral(),
                    position: view_box.min_point().add_point(Point::new(
                        LEGEND_INSET,
                        LEGEND_INSET + row as f32 * LEGEND_ROW,
                    )),
                })
                .collect()
        } else {
            Vec::new()
        };

        let line_count = style.overlay().len();
        let overlay = style
            .overlay()
            .iter()
            .enumerate()
            .map(|(row, text)| OverlayLine {
                text: text.clone(),
                position: Point::new(
                    view_box.min_x() + OVERLAY_INSET,
                    view_box.max_y() - OVERLAY_INSET - (line_count - 1 - row) as f32 * OVERLAY_ROW,
                ),
            })
            .collect();

        debug!(
            links = links.len(),
            nodes = nodes.len(),
            legend_entries = legend.len();
            "Scene assembled"
        );

        Ok(Self {
            width,
            height,
            view_box,
            font_family: style.font_family().to_string(),
            background: style.background_color()?,
            links,
            nodes,
            labels,
            legend,
            overlay,
            zoom: ZoomTransform::IDENTITY,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The SVG viewBox, `[-cx, -cy, width, height]`.
    pub fn view_box(&self) -> Bounds {
        self.view_box
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn links(&self) -> &[LinkElement] {
        &self.links
    }

    pub fn nodes(&self) -> &[NodeElement] {
        &self.nodes
    }

    pub fn labels(&self) -> &[LabelElement] {
        &self.labels
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn overlay(&self) -> &[OverlayLine] {
        &self.overlay
    }

    pub fn node(&self, index: NodeIndex) -> Option<&NodeElement> {
        self.nodes.get(index.index())
    }

    pub fn label(&self, index: NodeIndex) -> Option<&LabelElement> {
        self.labels.get(index.index())
    }

    pub(crate) fn label_mut(&mut self, index: NodeIndex) -> Option<&mut LabelElement> {
        self.labels.get_mut(index.index())
    }

    /// Finds the first node (breadth-first) with the given id.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.iter().find(|node| node.id == id).map(|node| node.index)
    }

    /// Current pan/zoom transform of the content group.
    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    pub(crate) fn set_zoom(&mut self, zoom: ZoomTransform) {
        self.zoom = zoom;
    }

    /// Sets every node, link and label whose category differs from
    /// `category` to `dim`, and the rest to full opacity.
    pub(crate) fn highlight(&mut self, category: &str, dim: f32) {
        let pick = |own: Option<&str>| if own == Some(category) { 1.0 } else { dim };
        for node in &mut self.nodes {
            node.opacity = pick(node.category.as_deref());
        }
        for link in &mut self.links {
            link.opacity = pick(link.category.as_deref());
        }
        for label in &mut self.labels {
            label.opacity = pick(label.category.as_deref());
        }
    }

    /// Restores full opacity on every node, link and label.
    pub(crate) fn clear_highlight(&mut self) {
        for node in &mut self.nodes {
            node.set_opacity(1.0);
        }
        for link in &mut self.links {
            link.set_opacity(1.0);
        }
        for label in &mut self.labels {
            label.set_opacity(1.0);
        }
    }

    /// Bounding box of node markers and labels in chart coordinates.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(Drawable::bounds)
            .chain(self.labels.iter().map(Drawable::bounds))
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Links, nodes and labels: everything moved by the zoom transform.
    pub fn render_content(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for link in &self.links {
            output.merge(link.render_to_layers());
        }
        for node in &self.nodes {
            output.merge(node.render_to_layers());
        }
        for label in &self.labels {
            output.merge(label.render_to_layers());
        }
        output
    }

    /// Legend and, optionally, the help overlay. Both stay fixed in the viewport.
    pub fn render_chrome(&self, include_overlay: bool) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        for entry in &self.legend {
            output.merge(entry.render_to_layers());
        }
        if include_overlay {
            for line in &self.overlay {
                output.merge(line.render_to_layers());
            }
        }
        output
    }
}
