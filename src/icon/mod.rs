//! App-style icons from SVG artwork.
//!
//! The conversion runs in a fixed order:
//! 1. Extract colour tokens from the markup
//! 2. Pick the palette background that contrasts most with them
//! 3. Normalize the artwork's coordinate space to the origin
//! 4. Fit the artwork into the canvas and emit the icon document
//!
//! Markup that does not parse still yields an icon: see [`Normalized`].

mod background;
mod compose;
mod extract;
mod normalize;
mod rasterize;

use std::path::{Path, PathBuf};

use roxmltree::{Document, ParsingOptions};
use serde::Serialize;

use crate::config::IconStyle;
use crate::error::{MediaError, Result};
use crate::types::{BackgroundPalette, Rgb, ViewBox};

pub use background::{average_colour, most_contrasting, select_background};
pub use compose::{compose_icon, Placement};
pub use extract::{extract_colours, extract_from_document, extract_lexical, is_colour_token};
pub use normalize::{normalize_document, normalize_svg, source_view_box, Artwork, Normalized};
pub use rasterize::{is_available as rasterizer_available, rasterize, write_png, Rasterized};

/// Suffix appended to the input stem for generated icons.
pub const LOGO_SUFFIX: &str = "_logo";

/// Parse SVG markup, tolerating a DOCTYPE.
pub(crate) fn parse_svg(markup: &str) -> std::result::Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(markup, options)
}

/// Format a number for SVG output in its shortest round-trip form.
pub(crate) fn format_number(n: f64) -> String {
    // -0 prints as "-0"
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Escape an attribute value for a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Escape character data.
pub(crate) fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Everything decided while converting one SVG.
#[derive(Debug, Clone, Serialize)]
pub struct IconReport {
    /// Colour tokens found in the artwork, in document order.
    pub colours: Vec<String>,
    /// Mean of the hex colours (black when there are none).
    pub average: Rgb,
    pub background: Rgb,
    /// Effective view box of the artwork, at the origin.
    pub view_box: ViewBox,
    pub placement: Placement,
    /// Set when the markup could not be processed and was embedded raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<String>,
    /// The icon document.
    #[serde(skip)]
    pub svg: String,
}

/// Converts SVG artwork into app icons.
#[derive(Debug, Clone, Default)]
pub struct IconConverter {
    style: IconStyle,
    palette: BackgroundPalette,
}

impl IconConverter {
    pub fn new(style: IconStyle) -> Self {
        Self {
            style,
            palette: BackgroundPalette::builtin(),
        }
    }

    /// Use a different set of background candidates.
    pub fn with_palette(mut self, palette: BackgroundPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn style(&self) -> &IconStyle {
        &self.style
    }

    pub fn palette(&self) -> &BackgroundPalette {
        &self.palette
    }

    /// Convert SVG markup into an icon document.
    ///
    /// Never fails: unparseable markup is reported through
    /// [`IconReport::degraded`].
    pub fn convert(&self, markup: &str) -> IconReport {
        let (colours, normalized) = match parse_svg(markup) {
            Ok(doc) => (
                extract_from_document(&doc),
                normalize_document(&doc),
            ),
            Err(e) => (
                extract_lexical(markup),
                Normalized::fallback(markup, e.to_string()),
            ),
        };

        let average = average_colour(&colours);
        let background = most_contrasting(average, &self.palette);

        let degraded = normalized.degraded_reason().map(str::to_string);
        let artwork = normalized.into_artwork();
        let placement = Placement::fit(&artwork.view_box, &self.style);
        let svg = compose_icon(&artwork, background, &self.style);

        IconReport {
            colours,
            average,
            background,
            view_box: artwork.view_box,
            placement,
            degraded,
            svg,
        }
    }

    /// Read and convert an SVG file.
    pub fn convert_file(&self, path: &Path) -> Result<IconReport> {
        if !path.exists() {
            return Err(MediaError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let markup = std::fs::read_to_string(path).map_err(|e| MediaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read file: {}", e),
        })?;

        Ok(self.convert(&markup))
    }
}

/// Output path for an icon: `dir/logo.svg` -> `dir/logo_logo.<extension>`.
pub fn icon_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, LOGO_SUFFIX, extension))
}

/// Write an icon document to disk.
pub fn write_svg(svg: &str, path: &Path) -> Result<()> {
    std::fs::write(path, svg).map_err(|e| MediaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write SVG: {}", e),
    })
}
