//! media-maker - Image preview and app icon generators
//!
//! Two small transforms behind two binaries: `blur-img` writes a blurred,
//! downscaled preview of a raster image, and `logo-maker` turns SVG artwork
//! into a rounded app icon on a contrasting background.

pub mod blur;
pub mod cli;
pub mod config;
pub mod error;
pub mod icon;
pub mod output;
pub mod types;

pub use blur::{blur_file, blur_image, blurred_path, BlurOutcome};
pub use config::{BlurSettings, IconStyle, Settings};
pub use error::{MediaError, Result};
pub use icon::{IconConverter, IconReport, Normalized, Placement, Rasterized};
pub use types::{BackgroundPalette, Rgb, ViewBox};
