//! Text styling and measurement for chart labels.
//!
//! Labels are emitted as SVG `<text>` elements by the chart renderer; this
//! module owns the style ([`TextDefinition`]) and the font-backed size
//! calculation used to compute label bounding boxes.
//!
//! ```
//! # use dendra_core::draw::TextDefinition;
//! let mut style = TextDefinition::new();
//! style.set_font_size(9.0);
//! let size = style.measure("a1");
//! assert!(size.height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;

use crate::geometry::Size;

/// Style of a run of label text.
///
/// Font sizes are in SVG user units, matching the `font-size` attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in user units.
    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    /// Sets the font family for the text.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Returns a copy with a different font size (builder style).
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Measures the rendered size of `content` in this style.
    ///
    /// Falls back to an average glyph-width estimate when no font could shape
    /// the text (for example on hosts without any installed fonts).
    pub fn measure(&self, content: &str) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .calculate_text_size(content, self)
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
        }
    }
}

/// TextManager handles text measurement and font operations
/// It maintains a reusable FontSystem instance to avoid expensive recreation
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Calculate the size of single-line text using cosmic-text shaping.
    fn calculate_text_size(&self, text: &str, text_def: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size = text_def.font_size().max(0.1);
        let line_height = font_size * 1.15;
        let fallback = Size::new(text.chars().count() as f32 * font_size * 0.55, line_height);

        // A poisoned lock only means another measurement panicked; the estimate is still usable
        let Ok(mut font_system) = self.font_system.lock() else {
            return fallback;
        };

        let metrics = Metrics::new(font_size, line_height);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|last| last.x + last.w))
            .fold(0.0_f32, f32::max);

        if width > 0.0 {
            Size::new(width, line_height)
        } else {
            fallback
        }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
