//! Blurred preview images.
//!
//! Downscales an image by a fixed divisor with a Lanczos filter, then
//! applies a Gaussian blur. Used for low-weight placeholder backgrounds.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use crate::config::BlurSettings;
use crate::error::{MediaError, Result};

/// Suffix inserted before the extension of blurred outputs.
pub const BLUR_SUFFIX: &str = "-blur";

/// Result of blurring one file.
#[derive(Debug, Clone, PartialEq)]
pub struct BlurOutcome {
    pub output: PathBuf,
    pub source_size: (u32, u32),
    pub blurred_size: (u32, u32),
}

/// Size of the downscaled image: floor division per axis, never below 1.
pub fn target_size(width: u32, height: u32, divisor: u32) -> (u32, u32) {
    let divisor = divisor.max(1);
    ((width / divisor).max(1), (height / divisor).max(1))
}

/// Downscale and blur an image, leaving the input untouched.
pub fn blur_image(img: &DynamicImage, settings: &BlurSettings) -> DynamicImage {
    let (width, height) = target_size(img.width(), img.height(), settings.divisor);
    img.resize_exact(width, height, FilterType::Lanczos3)
        .blur(settings.sigma)
}

/// Output path for a blurred copy: `dir/photo.jpg` -> `dir/photo-blur.jpg`.
pub fn blurred_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(BLUR_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Decode an image, sniffing the format from its contents.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| io_error(path, e))?;

    // The file is open at this point; truncated data surfaces as an IO error
    reader.decode().map_err(|e| MediaError::Decode {
        path: path.to_path_buf(),
        message: match e {
            ImageError::IoError(e) => format!("Truncated or unreadable image data: {}", e),
            other => other.to_string(),
        },
    })
}

/// Encode an image in the format implied by the path's extension.
pub fn save_image(img: &DynamicImage, path: &Path) -> Result<()> {
    let result = match ImageFormat::from_path(path) {
        // JPEG has no alpha channel
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgb8(img.to_rgb8()).save(path),
        _ => img.save(path),
    };

    result.map_err(|e| MediaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    })
}

/// Blur `input` and write the result beside it.
pub fn blur_file(input: &Path, settings: &BlurSettings) -> Result<BlurOutcome> {
    let img = load_image(input)?;
    let blurred = blur_image(&img, settings);

    let output = blurred_path(input);
    save_image(&blurred, &output)?;

    Ok(BlurOutcome {
        output,
        source_size: (img.width(), img.height()),
        blurred_size: (blurred.width(), blurred.height()),
    })
}

fn io_error(path: &Path, e: io::Error) -> MediaError {
    if e.kind() == io::ErrorKind::NotFound {
        MediaError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        MediaError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}
