//! SVG viewBox value type.

use std::fmt;

use serde::Serialize;

/// An SVG coordinate rectangle: origin plus dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Box used when the source declares neither a viewBox nor a size.
    pub const DEFAULT: Self = Self::sized(24.0, 24.0);

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A box of the given size at the origin.
    pub const fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Parse a `viewBox` attribute value.
    ///
    /// Accepts four numbers separated by whitespace and/or commas. The box
    /// must have a positive width and height to be usable.
    pub fn parse(value: &str) -> Option<Self> {
        let numbers = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok())
            .collect::<Option<Vec<f64>>>()?;

        match numbers[..] {
            [x, y, width, height] => Self::new(x, y, width, height).usable(),
            _ => None,
        }
    }

    /// Build a box from `width`/`height` attribute values such as `"64px"`.
    ///
    /// Everything but digits and `.` is stripped before parsing; both sides
    /// must come out positive.
    pub fn from_dimensions(width: &str, height: &str) -> Option<Self> {
        let width = parse_length(width)?;
        let height = parse_length(height)?;
        Self::sized(width, height).usable()
    }

    /// The same box moved to the origin.
    pub fn normalized(self) -> Self {
        Self::sized(self.width, self.height)
    }

    pub fn is_at_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// The longer of the two sides.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    fn usable(self) -> Option<Self> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|n| n.is_finite());
        (finite && self.width > 0.0 && self.height > 0.0).then_some(self)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

fn parse_length(value: &str) -> Option<f64> {
    let digits: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            ViewBox::parse("0 0 200 100"),
            Some(ViewBox::new(0.0, 0.0, 200.0, 100.0))
        );
        assert_eq!(
            ViewBox::parse("  -5\t10\n48   48 "),
            Some(ViewBox::new(-5.0, 10.0, 48.0, 48.0))
        );
    }

    #[test]
    fn test_parse_commas() {
        assert_eq!(
            ViewBox::parse("0,0,24,24"),
            Some(ViewBox::sized(24.0, 24.0))
        );
        assert_eq!(
            ViewBox::parse("10, 20, 30, 40"),
            Some(ViewBox::new(10.0, 20.0, 30.0, 40.0))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert_eq!(ViewBox::parse("0 0 24"), None);
        assert_eq!(ViewBox::parse("0 0 24 24 24"), None);
        assert_eq!(ViewBox::parse(""), None);
    }

    #[test]
    fn test_parse_rejects_garbage_and_empty_boxes() {
        assert_eq!(ViewBox::parse("0 0 auto 24"), None);
        assert_eq!(ViewBox::parse("0 0 0 24"), None);
        assert_eq!(ViewBox::parse("0 0 24 -1"), None);
        assert_eq!(ViewBox::parse("0 0 inf 24"), None);
    }

    #[test]
    fn test_from_dimensions_strips_units() {
        assert_eq!(
            ViewBox::from_dimensions("64px", "32px"),
            Some(ViewBox::sized(64.0, 32.0))
        );
        assert_eq!(
            ViewBox::from_dimensions("12.5", "100%"),
            Some(ViewBox::sized(12.5, 100.0))
        );
    }

    #[test]
    fn test_from_dimensions_requires_both_positive() {
        assert_eq!(ViewBox::from_dimensions("0", "24"), None);
        assert_eq!(ViewBox::from_dimensions("auto", "24"), None);
        assert_eq!(ViewBox::from_dimensions("1.2.3", "24"), None);
    }

    #[test]
    fn test_normalized() {
        let vb = ViewBox::new(-10.0, 5.0, 20.0, 30.0);
        assert_eq!(vb.normalized(), ViewBox::sized(20.0, 30.0));
        assert!(vb.normalized().is_at_origin());
    }

    #[test]
    fn test_normalized_is_idempotent_at_origin() {
        let vb = ViewBox::sized(200.0, 100.0);
        assert_eq!(vb.normalized(), vb);
        assert_eq!(vb.normalized().normalized(), vb);
    }

    #[test]
    fn test_display() {
        assert_eq!(ViewBox::new(0.0, -2.5, 24.0, 24.0).to_string(), "0 -2.5 24 24");
    }
}
