//! `blur-img` implementation.
//!
//! Writes a downscaled, blurred copy of an image next to the original.

use std::path::PathBuf;

use clap::Parser;

use crate::blur::blur_file;
use crate::config::Settings;
use crate::error::{MediaError, Result};
use crate::output::{display_path, Printer};

/// Create a blurred, quarter-size preview of an image
#[derive(Parser, Debug)]
#[command(name = "blur-img")]
#[command(version, about, long_about = None)]
pub struct BlurCli {
    /// Image to blur
    pub image_path: PathBuf,

    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print extra detail about each step
    #[arg(long, short)]
    pub verbose: bool,
}

pub fn run(args: BlurCli, printer: &Printer) -> Result<PathBuf> {
    if !args.image_path.is_file() {
        return Err(MediaError::NotFound {
            path: args.image_path,
        });
    }

    let settings = Settings::load_optional(args.config.as_deref())?;
    printer.verbose(
        "Settings",
        &format!(
            "divisor {}, sigma {}",
            settings.blur.divisor, settings.blur.sigma
        ),
    );

    let outcome = blur_file(&args.image_path, &settings.blur)?;

    let (sw, sh) = outcome.source_size;
    let (bw, bh) = outcome.blurred_size;
    printer.verbose("Resized", &format!("{}x{} -> {}x{}", sw, sh, bw, bh));
    printer.status(
        "Blurred",
        &format!(
            "image saved to {}",
            printer.cyan(&display_path(&outcome.output))
        ),
    );

    Ok(outcome.output)
}
