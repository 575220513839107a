//! Colour token extraction from SVG markup.
//!
//! Colours come from `fill`/`stroke` attributes, `fill:`/`stroke:`
//! declarations in `style` attributes, and the same declarations inside
//! `<style>` elements. Paint keywords that are not colours are dropped.

use std::sync::OnceLock;

use regex::Regex;
use roxmltree::{Document, Node};

use super::parse_svg;

/// Paint values that never name a colour.
const NON_COLOURS: [&str; 3] = ["none", "transparent", "currentcolor"];

/// Extract colour tokens from SVG markup, in document order.
///
/// Markup that is not well-formed XML is scanned lexically instead, so a
/// broken file still yields whatever colours can be recognised.
pub fn extract_colours(markup: &str) -> Vec<String> {
    match parse_svg(markup) {
        Ok(doc) => extract_from_document(&doc),
        Err(_) => extract_lexical(markup),
    }
}

/// Walk a parsed document and collect its colour tokens.
///
/// Per element: the `fill` attribute, the `stroke` attribute, then the
/// `style` declarations in source order.
pub fn extract_from_document(doc: &Document) -> Vec<String> {
    let mut colours = Vec::new();

    for node in doc.descendants().filter(Node::is_element) {
        for attr in ["fill", "stroke"] {
            if let Some(value) = node.attribute(attr) {
                push_token(&mut colours, value.trim());
            }
        }

        if let Some(style) = node.attribute("style") {
            for value in paint_declarations(style) {
                push_token(&mut colours, value);
            }
        }

        if node.tag_name().name() == "style" {
            let css: String = node
                .descendants()
                .filter(Node::is_text)
                .filter_map(|n| n.text())
                .collect();
            for value in paint_declarations(&css) {
                push_token(&mut colours, value);
            }
        }
    }

    colours
}

/// Pattern-based scan for markup that does not parse.
///
/// Attributes need matching quote characters around a non-empty value;
/// anything else is skipped silently.
pub fn extract_lexical(markup: &str) -> Vec<String> {
    static PAINT: OnceLock<Regex> = OnceLock::new();
    let re = PAINT.get_or_init(|| {
        Regex::new(r#"(?:fill|stroke)=["']([^"']+)["']|(?:fill|stroke):\s*([^;"'\s]+)"#).unwrap()
    });

    let mut colours = Vec::new();
    for caps in re.captures_iter(markup) {
        if let Some(value) = caps.get(1).or_else(|| caps.get(2)) {
            push_token(&mut colours, value.as_str());
        }
    }
    colours
}

/// Whether a paint token names an actual colour.
pub fn is_colour_token(token: &str) -> bool {
    !token.is_empty() && !NON_COLOURS.iter().any(|k| token.eq_ignore_ascii_case(k))
}

fn push_token(colours: &mut Vec<String>, token: &str) {
    if is_colour_token(token) {
        colours.push(token.to_string());
    }
}

/// Values of `fill`/`stroke` declarations in CSS text.
///
/// Works for both a bare declaration list (`fill: red; stroke: blue`) and
/// rule blocks (`.a { fill: red }`). A value is its first
/// whitespace-delimited word.
fn paint_declarations(css: &str) -> impl Iterator<Item = &str> {
    css.split(|c: char| matches!(c, ';' | '{' | '}'))
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(property, _)| matches!(property.trim(), "fill" | "stroke"))
        .filter_map(|(_, value)| value.split_whitespace().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_in_document_order() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg">
            <rect fill="#ff0000" stroke="#00ff00"/>
            <circle fill="#0000ff"/>
            <path stroke="black"/>
        </svg>"##;

        assert_eq!(
            extract_colours(svg),
            vec!["#ff0000", "#00ff00", "#0000ff", "black"]
        );
    }

    #[test]
    fn test_duplicates_retained() {
        let svg = r##"<svg><rect fill="#fff"/><rect fill="#fff"/></svg>"##;
        assert_eq!(extract_colours(svg), vec!["#fff", "#fff"]);
    }

    #[test]
    fn test_excludes_non_colours_case_insensitive() {
        let svg = r##"<svg>
            <rect fill="none" stroke="NONE"/>
            <rect fill="Transparent" stroke="currentColor"/>
            <rect fill="CURRENTCOLOR" stroke="#123"/>
        </svg>"##;

        assert_eq!(extract_colours(svg), vec!["#123"]);
    }

    #[test]
    fn test_named_colours_kept() {
        let svg = r#"<svg><rect fill="red"/><rect fill="url(#grad)"/></svg>"#;
        assert_eq!(extract_colours(svg), vec!["red", "url(#grad)"]);
    }

    #[test]
    fn test_inline_style() {
        let svg = r##"<svg><path style="fill: #abcdef; stroke:#111;stroke-width:2"/></svg>"##;
        assert_eq!(extract_colours(svg), vec!["#abcdef", "#111"]);
    }

    #[test]
    fn test_inline_style_takes_first_word() {
        let svg = r##"<svg><path style="fill: #abc !important"/></svg>"##;
        assert_eq!(extract_colours(svg), vec!["#abc"]);
    }

    #[test]
    fn test_attribute_before_style_on_same_element() {
        let svg = r##"<svg><path style="stroke:#222" fill="#111"/></svg>"##;
        assert_eq!(extract_colours(svg), vec!["#111", "#222"]);
    }

    #[test]
    fn test_style_element() {
        let svg = r##"<svg>
            <style>.a { fill: #010203; } .b{stroke:none}</style>
            <rect class="a"/>
        </svg>"##;
        assert_eq!(extract_colours(svg), vec!["#010203"]);
    }

    #[test]
    fn test_style_element_cdata() {
        let svg = r##"<svg><style><![CDATA[ path { stroke: #fedcba } ]]></style></svg>"##;
        assert_eq!(extract_colours(svg), vec!["#fedcba"]);
    }

    #[test]
    fn test_ignores_lookalike_properties() {
        let svg = r##"<svg><path fill-rule="evenodd" fill-opacity="0.5" style="stroke-width: 2; fill-opacity: 1"/></svg>"##;
        assert!(extract_colours(svg).is_empty());
    }

    #[test]
    fn test_no_colours() {
        assert!(extract_colours(r#"<svg><path d="M0 0h24v24H0z"/></svg>"#).is_empty());
        assert!(extract_colours("").is_empty());
    }

    #[test]
    fn test_malformed_markup_falls_back_to_scan() {
        let svg = r##"<svg><rect fill="#ff0000"><path stroke='#00f' style="fill: blue"</svg>"##;
        assert_eq!(extract_colours(svg), vec!["#ff0000", "#00f", "blue"]);
    }

    #[test]
    fn test_malformed_quoting_not_matched() {
        let svg = r##"<svg <rect fill=#ff0000 stroke="#00ff00/>"##;
        assert!(extract_colours(svg).is_empty());
    }

    #[test]
    fn test_is_colour_token() {
        assert!(is_colour_token("#fff"));
        assert!(is_colour_token("red"));
        assert!(!is_colour_token(""));
        assert!(!is_colour_token("None"));
        assert!(!is_colour_token("currentColor"));
    }
}
