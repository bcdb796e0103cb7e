//! Dendra - radial cluster dendrograms.
//!
//! Layout, visual encoding, interaction and SVG rendering for tree-shaped
//! cluster hierarchies. A hierarchy is read from JSON, laid out on a circle,
//! encoded into an attributed scene graph, and then either exported directly
//! or driven through hover, pin and zoom events first.

pub mod config;
pub mod encoding;
pub mod export;
pub mod host;
pub mod interaction;
pub mod layout;
pub mod scene;

mod error;

pub use dendra_core::{color, draw, geometry, hierarchy};

pub use error::DendraError;
pub use host::{FetchResponse, FileSystemFetcher, HostError, SourceFetcher};
pub use interaction::{InteractionController, NodeState, ZoomEvent, ZoomTransform};
pub use scene::RenderedChart;

use log::{debug, error, info, trace};

use dendra_core::hierarchy::HierarchyNode;

use config::AppConfig;
use encoding::Encoding;
use export::svg::SvgBuilder;
use layout::LayoutTree;

/// Builder for parsing, rendering and mounting Dendra charts.
///
/// # Examples
///
/// ```rust
/// use dendra::{ChartBuilder, config::AppConfig};
///
/// let source = r#"{"id": "root", "name": "root", "children": [
///     {"id": "A", "name": "A", "children": [{"id": "a1", "name": "a1", "category": "x"}]}
/// ]}"#;
///
/// let builder = ChartBuilder::new(AppConfig::default());
/// let hierarchy = builder.parse(source).expect("Failed to parse");
///
/// // Interactive scene graph
/// let chart = builder.render(&hierarchy).expect("Failed to render");
/// let mut controller = builder.controller(chart);
/// let a1 = controller.chart().find("a1").unwrap();
/// controller.click(a1);
///
/// // Standalone SVG of the current state
/// let svg = controller.export().expect("Failed to export");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON hierarchy document.
    ///
    /// # Errors
    ///
    /// Returns [`DendraError::Parse`] with the source attached when the JSON
    /// is malformed or does not have the `{id, name, category?, children?}` shape.
    pub fn parse(&self, source: &str) -> Result<HierarchyNode, DendraError> {
        info!("Parsing hierarchy");

        let hierarchy: HierarchyNode =
            serde_json::from_str(source).map_err(|err| DendraError::new_parse_error(err, source))?;

        debug!(nodes = hierarchy.len(); "Hierarchy parsed successfully");
        trace!(hierarchy:?; "Parsed hierarchy");

        Ok(hierarchy)
    }

    /// Lay out and encode a hierarchy into a scene graph.
    ///
    /// # Errors
    ///
    /// Returns [`DendraError::Layout`] for an unusable viewport and
    /// [`DendraError::Config`] for invalid style or interaction settings.
    pub fn render(&self, hierarchy: &HierarchyNode) -> Result<RenderedChart, DendraError> {
        let layout_config = self.config.layout();
        layout_config.validate().map_err(DendraError::Layout)?;
        self.config
            .interaction()
            .validate()
            .map_err(DendraError::Config)?;

        let style = self.config.style();
        let palette = style.palette().map_err(DendraError::Config)?;
        let neutral = style.neutral_color().map_err(DendraError::Config)?;
        let shapes = style.shapes().map_err(DendraError::Config)?;

        info!(
            radius = layout_config.outer_radius(),
            radial:? = layout_config.radial();
            "Computing radial cluster layout"
        );
        let tree = LayoutTree::build(
            hierarchy,
            layout_config.outer_radius(),
            layout_config.radial(),
        );

        let encoding = Encoding::build(
            &tree,
            palette,
            neutral,
            shapes,
            style.node_radius(),
            style.glyph_size(),
        );

        let chart = RenderedChart::assemble(&tree, &encoding, &self.config)
            .map_err(DendraError::Config)?;
        info!(nodes = chart.nodes().len(); "Chart rendered");
        Ok(chart)
    }

    /// Render a hierarchy straight to an SVG string, help overlay included.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ChartBuilder::render`].
    pub fn render_svg(&self, hierarchy: &HierarchyNode) -> Result<String, DendraError> {
        let chart = self.render(hierarchy)?;
        let svg = SvgBuilder::new(interaction::DEFAULT_EXPORT_FILE_NAME).build()?;
        Ok(svg.render_string(&chart))
    }

    /// Wrap a chart in an interaction controller using this builder's settings.
    pub fn controller(&self, chart: RenderedChart) -> InteractionController {
        InteractionController::new(chart, self.config.interaction())
    }

    /// Locate, fetch, parse and render the chart declared by a host page.
    ///
    /// # Errors
    ///
    /// Returns [`DendraError::Host`] when the page contract is not met or the
    /// fetch fails, and any error of [`ChartBuilder::parse`] or
    /// [`ChartBuilder::render`].
    pub fn load(
        &self,
        page: &str,
        container_id: &str,
        document_url: &str,
        fetcher: &dyn SourceFetcher,
    ) -> Result<InteractionController, DendraError> {
        let source = host::locate_source(page, container_id)?;
        let path = host::resolve_fetch_path(document_url, &source)?;
        info!(container = container_id, path = path.as_str(); "Fetching hierarchy");

        let body = fetcher.fetch(&path).into_body(&path)?;
        let hierarchy = self.parse(&body)?;
        let chart = self.render(&hierarchy)?;
        Ok(self.controller(chart))
    }

    /// Like [`ChartBuilder::load`], but logs any failure and yields `None`
    /// instead of a partial chart.
    pub fn mount(
        &self,
        page: &str,
        container_id: &str,
        document_url: &str,
        fetcher: &dyn SourceFetcher,
    ) -> Option<InteractionController> {
        match self.load(page, container_id, document_url, fetcher) {
            Ok(controller) => Some(controller),
            Err(err) => {
                error!(container = container_id, err = err.to_string(); "Failed to mount chart");
                None
            }
        }
    }
}
