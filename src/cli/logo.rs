//! `logo-maker` implementation.
//!
//! Converts an SVG into an app-style icon on a contrasting rounded
//! background, written next to the input as SVG, PNG or both.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Settings;
use crate::error::{MediaError, Result};
use crate::icon::{icon_path, rasterize, write_png, write_svg, IconConverter, IconReport, Rasterized};
use crate::output::{display_path, plural, Printer};

/// Which files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    fn wants_svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    fn wants_png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

/// Turn an SVG into a rounded app icon
#[derive(Parser, Debug)]
#[command(name = "logo-maker")]
#[command(version, about, long_about = None)]
pub struct LogoCli {
    /// SVG artwork to convert
    pub svg_path: PathBuf,

    /// Output format
    #[arg(value_enum, ignore_case = true, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the conversion report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Print extra detail about each step
    #[arg(long, short)]
    pub verbose: bool,
}

/// Run a conversion, returning the files written.
pub fn run(args: LogoCli, printer: &Printer) -> Result<Vec<PathBuf>> {
    if !args.svg_path.exists() {
        return Err(MediaError::NotFound {
            path: args.svg_path,
        });
    }

    let settings = Settings::load_optional(args.config.as_deref())?;
    let converter = IconConverter::new(settings.icon);
    let report = converter.convert_file(&args.svg_path)?;

    describe(&report, printer);
    if let Some(reason) = &report.degraded {
        printer.warning(
            "Warning",
            &format!("could not parse SVG ({}), embedding it as metadata", reason),
        );
    }

    let mut written = Vec::new();

    if args.format.wants_svg() {
        written.push(save_svg(&args, &report, printer)?);
    }

    if args.format.wants_png() {
        let size = converter.style().size;
        match rasterize(&report.svg, size) {
            Ok(Rasterized::Image(img)) => {
                let path = icon_path(&args.svg_path, "png");
                write_png(&img, &path)?;
                printer.status(
                    "Created",
                    &format!("PNG logo: {}", printer.cyan(&display_path(&path))),
                );
                written.push(path);
            }
            Ok(Rasterized::Unavailable) => {
                let why = "PNG rendering is not available in this build";
                written.extend(fall_back_to_svg(&args, &report, printer, why)?);
            }
            // A degraded icon is already a best effort; it never fails the run
            Err(e) if report.degraded.is_some() => {
                let why = format!("could not render the degraded icon ({})", e);
                written.extend(fall_back_to_svg(&args, &report, printer, &why)?);
            }
            Err(e) => return Err(e),
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| MediaError::Render {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", json);
    }

    Ok(written)
}

/// Warn and write the SVG in place of a PNG, unless `both` already did.
fn fall_back_to_svg(
    args: &LogoCli,
    report: &IconReport,
    printer: &Printer,
    why: &str,
) -> Result<Option<PathBuf>> {
    printer.warning("Warning", &format!("{}, saving SVG instead", why));
    if args.format.wants_svg() {
        return Ok(None);
    }
    save_svg(args, report, printer).map(Some)
}

fn save_svg(args: &LogoCli, report: &IconReport, printer: &Printer) -> Result<PathBuf> {
    let path = icon_path(&args.svg_path, "svg");
    write_svg(&report.svg, &path)?;
    printer.status(
        "Created",
        &format!("SVG logo: {}", printer.cyan(&display_path(&path))),
    );
    Ok(path)
}

fn describe(report: &IconReport, printer: &Printer) {
    if !printer.is_verbose() {
        return;
    }

    printer.verbose(
        "Colours",
        &format!(
            "{}: {}",
            plural(report.colours.len(), "colour", "colours"),
            report.colours.join(", ")
        ),
    );
    printer.verbose("Average", &report.average.to_string());
    printer.verbose("Background", &report.background.to_string());
    printer.verbose("ViewBox", &report.view_box.to_string());
    printer.verbose("Placement", &report.placement.transform());
}
