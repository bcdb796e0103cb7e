//! SVG document rendering for charts.
//!
//! The document mirrors the interactive chart's structure:
//!
//! ```text
//! <svg viewBox="-cx -cy w h">
//!   <g data-layer="background">       fixed
//!   <g class="zoom" transform="...">  pans and zooms
//!     <g data-layer="links">
//!     <g data-layer="nodes">
//!     <g data-layer="labels">
//!   <g data-layer="legend">           fixed
//!   <g data-layer="overlay">          fixed, omitted on export
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use svg::{Document, node::element as svg_element};

use dendra_core::draw::{LayeredOutput, RenderLayer};

use super::{Error, Exporter};
use crate::scene::RenderedChart;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Builder for [`Svg`] exporters.
#[derive(Debug, Clone)]
pub struct SvgBuilder {
    file_name: PathBuf,
    include_overlay: bool,
}

impl SvgBuilder {
    /// Creates a builder writing to `file_name`. The help overlay is
    /// included by default.
    pub fn new(file_name: impl AsRef<Path>) -> Self {
        Self {
            file_name: file_name.as_ref().to_path_buf(),
            include_overlay: true,
        }
    }

    /// Whether the instructional overlay is rendered.
    pub fn with_overlay(mut self, include_overlay: bool) -> Self {
        self.include_overlay = include_overlay;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::Render`] when no file name was given.
    pub fn build(self) -> Result<Svg, Error> {
        if self.file_name.as_os_str().is_empty() {
            return Err(Error::Render("export file name is empty".to_string()));
        }
        Ok(Svg {
            file_name: self.file_name,
            include_overlay: self.include_overlay,
        })
    }
}

/// SVG exporter for a [`RenderedChart`].
#[derive(Debug)]
pub struct Svg {
    file_name: PathBuf,
    include_overlay: bool,
}

impl Svg {
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Builds the SVG document tree for `chart`.
    pub fn render_document(&self, chart: &RenderedChart) -> Document {
        let view_box = chart.view_box();
        let mut doc = Document::new()
            .set("xmlns", SVG_NAMESPACE)
            .set("width", chart.width())
            .set("height", chart.height())
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view_box.min_x(),
                    view_box.min_y(),
                    view_box.width(),
                    view_box.height()
                ),
            )
            .set(
                "style",
                format!(
                    "width: 100%; height: auto; font: 10px {};",
                    chart.font_family()
                ),
            );

        if let Some(color) = chart.background() {
            let rect = svg_element::Rectangle::new()
                .set("x", view_box.min_x())
                .set("y", view_box.min_y())
                .set("width", view_box.width())
                .set("height", view_box.height())
                .set("fill", color);
            let mut background = LayeredOutput::new();
            background.add_to_layer(RenderLayer::Background, Box::new(rect));
            for node in background.render() {
                doc = doc.add(node);
            }
        }

        let mut zoom_group = svg_element::Group::new()
            .set("class", "zoom")
            .set("transform", chart.zoom().to_svg_value());
        for node in chart.render_content().render() {
            zoom_group = zoom_group.add(node);
        }
        doc = doc.add(zoom_group);

        for node in chart.render_chrome(self.include_overlay).render() {
            doc = doc.add(node);
        }

        doc
    }

    /// Serialises `chart` to a standalone SVG string with an XML declaration.
    pub fn render_string(&self, chart: &RenderedChart) -> String {
        let body = self.render_document(chart).to_string();
        if body.starts_with("<?xml") {
            body
        } else {
            format!("{XML_DECLARATION}\n{body}")
        }
    }
}

impl Exporter for Svg {
    fn export_chart(&mut self, chart: &RenderedChart) -> Result<(), Error> {
        let content = self.render_string(chart);
        debug!(
            path = self.file_name.display().to_string(),
            bytes = content.len();
            "Writing SVG"
        );
        fs::write(&self.file_name, content).map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use dendra_core::hierarchy::HierarchyNode;

    use crate::ChartBuilder;

    use super::*;

    fn chart() -> RenderedChart {
        let root = HierarchyNode::leaf("root", "root").with_children([
            HierarchyNode::leaf("A", "A")
                .with_child(HierarchyNode::leaf("a1", "a1").with_category("x")),
            HierarchyNode::leaf("B", "B").with_child(HierarchyNode::leaf("b1", "b1")),
        ]);
        ChartBuilder::default().render(&root).unwrap()
    }

    #[test]
    fn test_builder_rejects_empty_file_name() {
        assert!(SvgBuilder::new("").build().is_err());
    }

    #[test]
    fn test_render_string_is_standalone() {
        let svg = SvgBuilder::new("out.svg").build().unwrap();
        let content = svg.render_string(&chart());

        assert!(content.starts_with(XML_DECLARATION));
        let doc = roxmltree::Document::parse(&content).unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.tag_name().namespace(), Some(SVG_NAMESPACE));
        assert_eq!(root.attribute("viewBox"), Some("-250 -270 500 500"));
    }

    #[test]
    fn test_layers_in_order() {
        let svg = SvgBuilder::new("out.svg").build().unwrap();
        let content = svg.render_string(&chart());
        let doc = roxmltree::Document::parse(&content).unwrap();

        let layers: Vec<_> = doc
            .descendants()
            .filter_map(|node| node.attribute("data-layer"))
            .collect();
        assert_eq!(layers, ["links", "nodes", "labels", "legend", "overlay"]);
    }

    #[test]
    fn test_overlay_can_be_omitted() {
        let svg = SvgBuilder::new("out.svg").with_overlay(false).build().unwrap();
        let content = svg.render_string(&chart());
        assert!(!content.contains("data-layer=\"overlay\""));
        assert!(content.contains("data-layer=\"legend\""));
    }

    #[test]
    fn test_export_chart_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let mut svg = SvgBuilder::new(&path).build().unwrap();
        svg.export_chart(&chart()).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
