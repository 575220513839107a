//! Icon document composition.

use std::fmt::Write;

use serde::Serialize;

use super::{escape_attr, format_number};
use super::normalize::Artwork;
use crate::config::IconStyle;
use crate::types::{Rgb, ViewBox};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Where the artwork lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Uniform scale applied to the artwork.
    pub scale: f64,
    /// Left edge of the scaled artwork.
    pub x: f64,
    /// Top edge of the scaled artwork.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    /// Fit `view_box` into the padded canvas, preserving aspect ratio and
    /// centering along the shorter side.
    pub fn fit(view_box: &ViewBox, style: &IconStyle) -> Self {
        let inner = style.inner_size();
        let padding = style.padding as f64;

        let scale = inner / view_box.max_side();
        let width = view_box.width * scale;
        let height = view_box.height * scale;

        Self {
            scale,
            x: padding + (inner - width) / 2.0,
            y: padding + (inner - height) / 2.0,
            width,
            height,
        }
    }

    /// SVG transform that maps artwork coordinates onto the canvas.
    pub fn transform(&self) -> String {
        format!(
            "translate({}, {}) scale({})",
            format_number(self.x),
            format_number(self.y),
            format_number(self.scale)
        )
    }
}

/// Render the icon document: rounded background plus the placed artwork.
pub fn compose_icon(artwork: &Artwork, background: Rgb, style: &IconStyle) -> String {
    let placement = Placement::fit(&artwork.view_box, style);
    let size = style.size;
    let radius = style.corner_radius;

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");

    let _ = write!(
        svg,
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" xmlns=\"{SVG_NS}\""
    );
    for (prefix, uri) in &artwork.namespaces {
        let _ = write!(svg, " xmlns:{}=\"{}\"", prefix, escape_attr(uri));
    }
    svg.push_str(">\n");

    let _ = writeln!(
        svg,
        "  <rect width=\"{size}\" height=\"{size}\" rx=\"{radius}\" ry=\"{radius}\" fill=\"{background}\"/>"
    );
    let _ = writeln!(svg, "  <g transform=\"{}\">", placement.transform());
    for child in &artwork.children {
        let _ = writeln!(svg, "    {}", child);
    }
    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");

    svg
}
