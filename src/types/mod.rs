//! Core value types for media-maker.
//!
//! - `Rgb` - 8-bit colour values with contrast arithmetic
//! - `BackgroundPalette` - Ordered candidate backgrounds for icons
//! - `ViewBox` - SVG coordinate rectangles

mod colour;
mod palette;
mod viewbox;

pub use colour::Rgb;
pub use palette::BackgroundPalette;
pub use viewbox::ViewBox;
