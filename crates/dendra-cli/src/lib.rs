//! CLI logic for the Dendra dendrogram tool.
//!
//! This module contains the core CLI logic: it loads a hierarchy either
//! directly from a JSON file or through a host page, replays the requested
//! interaction state, and writes the resulting SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{info, warn};

use dendra::{
    ChartBuilder, DendraError, FileSystemFetcher, InteractionController, ZoomEvent, ZoomTransform,
    export::{Exporter, svg::SvgBuilder},
};

/// Run the Dendra CLI application
///
/// This function loads the hierarchy, applies hover, pin and zoom state from
/// the arguments, and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `DendraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Host page and fetch errors
/// - Parsing errors
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), DendraError> {
    info!(
        input_path:? = args.input,
        page_path:? = args.page,
        output_path = args.output;
        "Processing hierarchy"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = ChartBuilder::new(app_config);

    let mut controller = match (&args.page, &args.input) {
        (Some(page), _) => load_from_page(&builder, args, page)?,
        (None, Some(input)) => {
            let source = fs::read_to_string(input)?;
            let hierarchy = builder.parse(&source)?;
            builder.controller(builder.render(&hierarchy)?)
        }
        (None, None) => {
            return Err(DendraError::Config(
                "either an input file or --page is required".to_string(),
            ));
        }
    };

    apply_interactions(&mut controller, args)?;

    if args.overlay {
        let mut svg = SvgBuilder::new(&args.output).with_overlay(true).build()?;
        svg.export_chart(controller.chart())?;
    } else {
        controller.export_to(&args.output)?;
    }

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

fn load_from_page(
    builder: &ChartBuilder,
    args: &Args,
    page: &str,
) -> Result<InteractionController, DendraError> {
    let content = fs::read_to_string(page)?;
    let files_root = match &args.files_root {
        Some(root) => Path::new(root).to_path_buf(),
        None => Path::new(page)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };

    let fetcher = FileSystemFetcher::new(files_root);
    builder.load(&content, &args.container, &args.document_url, &fetcher)
}

fn apply_interactions(
    controller: &mut InteractionController,
    args: &Args,
) -> Result<(), DendraError> {
    let find = |controller: &InteractionController, id: &str| {
        controller
            .chart()
            .find(id)
            .ok_or_else(|| DendraError::Config(format!("No node with id '{id}'")))
    };

    for id in &args.pin {
        let index = find(controller, id)?;
        if !controller.chart().node(index).is_some_and(|node| node.is_leaf()) {
            warn!(id = id.as_str(); "Only leaves can be pinned, ignoring");
        }
        controller.click(index);
    }

    if let Some(id) = &args.hover {
        let index = find(controller, id)?;
        controller.hover(index);
    }

    if let Some(scale) = args.scale {
        controller.zoom(ZoomEvent::Transform(ZoomTransform::new(scale, 0.0, 0.0)));
    }

    if args.recenter {
        controller.recenter();
    }

    Ok(())
}
