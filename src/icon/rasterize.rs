//! Optional PNG rendering of icon documents.
//!
//! Rendering goes through resvg and is compiled in with the `png` feature.
//! Without it, [`rasterize`] reports [`Rasterized::Unavailable`] and callers
//! are expected to fall back to writing the SVG.

use std::path::Path;

use image::RgbaImage;

use crate::error::{MediaError, Result};

/// Outcome of a rasterization attempt.
#[derive(Debug)]
pub enum Rasterized {
    Image(RgbaImage),
    /// No renderer in this build.
    Unavailable,
}

/// Whether this build can render PNGs.
pub const fn is_available() -> bool {
    cfg!(feature = "png")
}

/// Render an SVG document to a `size`x`size` image.
///
/// The document is scaled uniformly to fit and centered.
#[cfg(feature = "png")]
pub fn rasterize(svg: &str, size: u32) -> Result<Rasterized> {
    use resvg::tiny_skia::{Pixmap, Transform};
    use resvg::usvg;

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| MediaError::Render {
        message: format!("Failed to parse icon SVG: {}", e),
        help: None,
    })?;

    let mut pixmap = Pixmap::new(size, size).ok_or_else(|| MediaError::Render {
        message: format!("Cannot allocate a {}x{} pixmap", size, size),
        help: Some("Use an icon size of at least 1".to_string()),
    })?;

    let svg_size = tree.size();
    let scale = (size as f32 / svg_size.width()).min(size as f32 / svg_size.height());
    let offset_x = (size as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (size as f32 - svg_size.height() * scale) / 2.0;

    let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut img = RgbaImage::new(size, size);
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(Rasterized::Image(img))
}

#[cfg(not(feature = "png"))]
pub fn rasterize(_svg: &str, _size: u32) -> Result<Rasterized> {
    Ok(Rasterized::Unavailable)
}

/// Write a rendered icon as PNG.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| MediaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })
}
