//! Command-line front ends, one per binary.

pub mod blur;
pub mod logo;

pub use blur::BlurCli;
pub use logo::{LogoCli, OutputFormat};
