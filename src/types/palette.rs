//! Candidate background colours for app icons.

use super::Rgb;

/// The builtin background candidates, in tie-break order.
const BUILTIN: [(&str, Rgb); 7] = [
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("light-grey", Rgb::new(0xf0, 0xf0, 0xf0)),
    ("sky-blue", Rgb::new(0xe0, 0xf7, 0xfa)),
    ("light-blue", Rgb::new(0xe3, 0xf2, 0xfd)),
    ("light-yellow", Rgb::new(0xff, 0xfd, 0xe7)),
    ("light-pink", Rgb::new(0xfc, 0xe4, 0xec)),
    ("light-green", Rgb::new(0xe8, 0xf5, 0xe9)),
];

/// An ordered list of named background colours.
///
/// Order matters: when two entries contrast equally with the artwork, the
/// earlier one wins.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundPalette {
    entries: Vec<(String, Rgb)>,
}

impl BackgroundPalette {
    /// The fixed pastel palette used for app icons.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb))
                .collect(),
        }
    }

    /// Build a palette from explicit entries.
    pub fn from_entries(entries: Vec<(String, Rgb)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, Rgb)> {
        self.entries.iter().map(|(name, rgb)| (name.as_str(), *rgb))
    }

    pub fn colours(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().map(|(_, rgb)| *rgb)
    }

    pub fn first(&self) -> Option<Rgb> {
        self.entries.first().map(|(_, rgb)| *rgb)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BackgroundPalette {
    fn default() -> Self {
        Self::builtin()
    }
}
