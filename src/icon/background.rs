//! Background colour selection.
//!
//! The artwork is reduced to one representative colour (the channel-wise
//! mean of its hex colours) and the palette entry with the highest contrast
//! against it wins.

use crate::types::{BackgroundPalette, Rgb};

/// Channel-wise mean of the hex colours among `tokens`, truncated.
///
/// Non-hex tokens (named colours, gradients) are ignored. Without any hex
/// colour the artwork is assumed to be black.
pub fn average_colour<S: AsRef<str>>(tokens: &[S]) -> Rgb {
    let parsed: Vec<Rgb> = tokens
        .iter()
        .filter_map(|t| Rgb::from_token(t.as_ref()))
        .collect();

    if parsed.is_empty() {
        return Rgb::BLACK;
    }

    let n = parsed.len() as u64;
    let (r, g, b) = parsed.iter().fold((0u64, 0u64, 0u64), |(r, g, b), c| {
        (r + c.r as u64, g + c.g as u64, b + c.b as u64)
    });

    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}

/// Pick the palette entry that contrasts most with `artwork`.
///
/// Strictly greater wins, so the earliest entry takes ties. An empty
/// palette falls back to white.
pub fn most_contrasting(artwork: Rgb, palette: &BackgroundPalette) -> Rgb {
    let mut best = palette.first().unwrap_or(Rgb::WHITE);
    let mut best_contrast = 0.0;

    for candidate in palette.colours() {
        let contrast = artwork.contrast_ratio(candidate);
        if contrast > best_contrast {
            best_contrast = contrast;
            best = candidate;
        }
    }

    best
}

/// Choose a background for artwork drawn with `tokens`.
pub fn select_background<S: AsRef<str>>(tokens: &[S], palette: &BackgroundPalette) -> Rgb {
    most_contrasting(average_colour(tokens), palette)
}
