//! SVG normalization.
//!
//! Resolves the artwork's coordinate space and moves it to the origin so
//! placement only has to deal with a width and a height. The child elements
//! of the root are re-serialized from the parsed tree, so entity references
//! are already expanded and the result never depends on the source DTD.

use std::fmt::Write;

use roxmltree::{Document, Node, NodeType};

use super::{escape_attr, escape_text, format_number, parse_svg};
use crate::types::ViewBox;

/// Artwork ready to be placed into an icon.
#[derive(Debug, Clone, PartialEq)]
pub struct Artwork {
    /// Serialized top-level elements.
    pub children: Vec<String>,

    /// Coordinate space of `children`, always at the origin.
    pub view_box: ViewBox,

    /// Prefixed namespace declarations of the source root, as
    /// `(prefix, uri)`, which the children may rely on.
    pub namespaces: Vec<(String, String)>,
}

/// Outcome of normalizing SVG markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The markup parsed and its children were extracted.
    Clean(Artwork),

    /// The markup could not be parsed; the artwork carries it verbatim as
    /// character data in a default box.
    Degraded { artwork: Artwork, reason: String },
}

impl Normalized {
    /// Wrap unparseable markup so the icon document stays well-formed.
    pub fn fallback(markup: &str, reason: impl Into<String>) -> Self {
        Normalized::Degraded {
            artwork: Artwork {
                children: vec![embed_raw(strip_prolog(markup))],
                view_box: ViewBox::DEFAULT,
                namespaces: Vec::new(),
            },
            reason: reason.into(),
        }
    }

    pub fn artwork(&self) -> &Artwork {
        match self {
            Normalized::Clean(artwork) => artwork,
            Normalized::Degraded { artwork, .. } => artwork,
        }
    }

    pub fn into_artwork(self) -> Artwork {
        match self {
            Normalized::Clean(artwork) => artwork,
            Normalized::Degraded { artwork, .. } => artwork,
        }
    }

    /// Why processing fell back, if it did.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            Normalized::Clean(_) => None,
            Normalized::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Parse and normalize SVG markup.
pub fn normalize_svg(markup: &str) -> Normalized {
    match parse_svg(markup) {
        Ok(doc) => normalize_document(&doc),
        Err(e) => Normalized::fallback(markup, e.to_string()),
    }
}

/// Normalize an already parsed document.
///
/// The root's element children are used whatever the root is called.
pub fn normalize_document(doc: &Document) -> Normalized {
    let root = doc.root_element();
    let source = source_view_box(root);

    let children: Vec<String> = root
        .children()
        .filter(Node::is_element)
        .map(|child| {
            let mut out = String::new();
            write_node(&mut out, child);
            out
        })
        .collect();

    let children = if source.is_at_origin() {
        children
    } else {
        vec![format!(
            "<g transform=\"translate({}, {})\">{}</g>",
            format_number(-source.x),
            format_number(-source.y),
            children.concat()
        )]
    };

    let namespaces = root
        .namespaces()
        .filter_map(|ns| {
            let prefix = ns.name()?;
            (prefix != "xml").then(|| (prefix.to_string(), ns.uri().to_string()))
        })
        .collect();

    Normalized::Clean(Artwork {
        children,
        view_box: source.normalized(),
        namespaces,
    })
}

/// The coordinate space declared by the root element.
///
/// `viewBox` wins; otherwise `width`/`height` at the origin; otherwise the
/// 24x24 default.
pub fn source_view_box(root: Node) -> ViewBox {
    if let Some(vb) = root.attribute("viewBox").and_then(ViewBox::parse) {
        return vb;
    }

    match (root.attribute("width"), root.attribute("height")) {
        (Some(w), Some(h)) => ViewBox::from_dimensions(w, h).unwrap_or_default(),
        _ => ViewBox::DEFAULT,
    }
}

fn write_node(out: &mut String, node: Node) {
    match node.node_type() {
        NodeType::Element => write_element(out, node),
        NodeType::Text => out.push_str(&escape_text(node.text().unwrap_or_default())),
        NodeType::Comment => {
            let _ = write!(out, "<!--{}-->", node.text().unwrap_or_default());
        }
        NodeType::Root | NodeType::PI => {}
    }
}

fn write_element(out: &mut String, node: Node) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name());
    let _ = write!(out, "<{}", name);

    // Declarations introduced below the root; the root's own are re-declared
    // on the icon's <svg>
    if let Some(parent) = node.parent_element() {
        for ns in node.namespaces() {
            let inherited = parent
                .namespaces()
                .any(|p| p.name() == ns.name() && p.uri() == ns.uri());
            if inherited {
                continue;
            }
            match ns.name() {
                Some(prefix) => {
                    let _ = write!(out, " xmlns:{}=\"{}\"", prefix, escape_attr(ns.uri()));
                }
                None => {
                    let _ = write!(out, " xmlns=\"{}\"", escape_attr(ns.uri()));
                }
            }
        }
    }

    for attr in node.attributes() {
        let attr_name = qualified_name(node, attr.namespace(), attr.name());
        let _ = write!(out, " {}=\"{}\"", attr_name, escape_attr(attr.value()));
    }

    if node.has_children() {
        out.push('>');
        for child in node.children() {
            write_node(out, child);
        }
        let _ = write!(out, "</{}>", name);
    } else {
        out.push_str("/>");
    }
}

fn qualified_name(node: Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

/// Carry raw markup as character data so it cannot break the document.
fn embed_raw(markup: &str) -> String {
    format!(
        "<metadata><![CDATA[{}]]></metadata>",
        markup.replace("]]>", "]]]]><![CDATA[>")
    )
}

/// Drop an XML declaration and doctype from raw markup.
fn strip_prolog(markup: &str) -> &str {
    let mut rest = markup.trim_start();
    loop {
        let skipped = if rest.starts_with("<?xml") {
            rest.find("?>").map(|end| end + 2)
        } else if rest.starts_with("<!DOCTYPE") {
            rest.find('>').map(|end| end + 1)
        } else {
            None
        };

        match skipped {
            Some(end) => rest = rest[end..].trim_start(),
            None => return rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clean(markup: &str) -> Artwork {
        match normalize_svg(markup) {
            Normalized::Clean(artwork) => artwork,
            Normalized::Degraded { reason, .. } => panic!("unexpected fallback: {}", reason),
        }
    }

    #[test]
    fn test_children_pass_through_at_origin() {
        let artwork = clean(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 48 32"><rect width="48" height="32" fill="#000"/>
  <circle cx="5" cy="5" r="2"/></svg>"##,
        );

        assert_eq!(
            artwork.children,
            vec![
                r##"<rect width="48" height="32" fill="#000"/>"##,
                r#"<circle cx="5" cy="5" r="2"/>"#,
            ]
        );
        assert_eq!(artwork.view_box, ViewBox::sized(48.0, 32.0));
    }

    #[test]
    fn test_offset_origin_is_wrapped() {
        let artwork = clean(
            r#"<svg viewBox="-10 5 20 20"><path d="M0 0"/><path d="M1 1"/></svg>"#,
        );

        assert_eq!(
            artwork.children,
            vec![r#"<g transform="translate(10, -5)"><path d="M0 0"/><path d="M1 1"/></g>"#]
        );
        assert_eq!(artwork.view_box, ViewBox::sized(20.0, 20.0));
    }

    #[test]
    fn test_single_axis_offset_has_no_negative_zero() {
        let artwork = clean(r#"<svg viewBox="0 2.5 10 10"><path d="M0 0"/></svg>"#);
        assert_eq!(
            artwork.children,
            vec![r#"<g transform="translate(0, -2.5)"><path d="M0 0"/></g>"#]
        );
    }

    #[test]
    fn test_dimensions_without_viewbox() {
        let artwork = clean(r##"<svg width="24" height="24"><rect width="24" height="24" fill="#000000"/></svg>"##);
        assert_eq!(artwork.view_box, ViewBox::sized(24.0, 24.0));
    }

    #[test]
    fn test_dimensions_with_units() {
        let artwork = clean(r#"<svg width="200px" height="100px"><g/></svg>"#);
        assert_eq!(artwork.view_box, ViewBox::sized(200.0, 100.0));
    }

    #[test]
    fn test_viewbox_beats_dimensions() {
        let artwork = clean(r#"<svg width="512" height="512" viewBox="0 0 64 64"><g/></svg>"#);
        assert_eq!(artwork.view_box, ViewBox::sized(64.0, 64.0));
    }

    #[test]
    fn test_bad_viewbox_falls_back_to_dimensions() {
        let artwork = clean(r#"<svg width="40" height="30" viewBox="0 0 auto"><g/></svg>"#);
        assert_eq!(artwork.view_box, ViewBox::sized(40.0, 30.0));
    }

    #[test]
    fn test_default_box() {
        assert_eq!(clean("<svg><g/></svg>").view_box, ViewBox::DEFAULT);
        assert_eq!(clean(r#"<svg width="40"><g/></svg>"#).view_box, ViewBox::DEFAULT);
        assert_eq!(
            clean(r#"<svg width="0" height="10"><g/></svg>"#).view_box,
            ViewBox::DEFAULT
        );
    }

    #[test]
    fn test_idempotent_at_origin() {
        let markup = r#"<svg viewBox="0 0 200 100"><rect width="200" height="100"/></svg>"#;
        let artwork = clean(markup);
        assert_eq!(artwork.view_box, ViewBox::sized(200.0, 100.0));
        assert_eq!(artwork.view_box.normalized(), artwork.view_box);
    }

    #[test]
    fn test_keeps_style_and_defs() {
        let artwork = clean(
            r#"<svg viewBox="0 0 10 10"><defs><linearGradient id="g"/></defs><style>.a{fill:red}</style><!-- note --><rect class="a"/></svg>"#,
        );
        assert_eq!(artwork.children.len(), 3);
        assert!(artwork.children[0].starts_with("<defs>"));
        assert!(artwork.children[1].starts_with("<style>"));
        assert!(artwork.children[2].starts_with("<rect"));
    }

    #[test]
    fn test_collects_prefixed_namespaces() {
        let artwork = clean(
            r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 8 8"><use xlink:href="#a"/></svg>"##,
        );
        assert_eq!(
            artwork.namespaces,
            vec![("xlink".to_string(), "http://www.w3.org/1999/xlink".to_string())]
        );
    }

    #[test]
    fn test_doctype_is_accepted() {
        let artwork = clean(
            r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg viewBox="0 0 16 16"><path d="M0 0"/></svg>"#,
        );
        assert_eq!(artwork.view_box, ViewBox::sized(16.0, 16.0));
        assert_eq!(artwork.children, vec![r#"<path d="M0 0"/>"#]);
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let markup = r#"<svg viewBox="0 0 100 100"><rect width="10"></svg>"#;
        let normalized = normalize_svg(markup);

        assert!(normalized.degraded_reason().is_some());
        let artwork = normalized.artwork();
        assert_eq!(
            artwork.children,
            vec![format!("<metadata><![CDATA[{}]]></metadata>", markup)]
        );
        assert_eq!(artwork.view_box, ViewBox::DEFAULT);
    }

    #[test]
    fn test_degraded_child_is_well_formed() {
        let markup = r#"<svg><text>a]]>b</text><rect></svg>"#;
        let normalized = normalize_svg(markup);
        let child = &normalized.artwork().children[0];

        let doc = roxmltree::Document::parse(child).unwrap();
        let text: String = doc
            .root_element()
            .children()
            .filter_map(|n| n.text())
            .collect();
        assert_eq!(text, markup);
    }

    #[test]
    fn test_non_svg_root_is_processed() {
        let normalized = normalize_svg(r#"<html><body class="x"/></html>"#);
        assert!(normalized.degraded_reason().is_none());
        assert_eq!(normalized.artwork().children, vec![r#"<body class="x"/>"#]);
        assert_eq!(normalized.artwork().view_box, ViewBox::DEFAULT);
    }

    #[test]
    fn test_fallback_strips_prolog() {
        let markup = "<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<svg><rect></svg>";
        let normalized = normalize_svg(markup);
        assert_eq!(
            normalized.artwork().children,
            vec!["<metadata><![CDATA[<svg><rect></svg>]]></metadata>"]
        );
    }

    #[test]
    fn test_internal_entities_are_expanded() {
        let artwork = clean(
            r#"<!DOCTYPE svg [<!ENTITY st "fill:#f00">]>
<svg viewBox="0 0 10 10"><rect style="&st;" width="10"/><text>&st;</text></svg>"#,
        );
        assert_eq!(
            artwork.children,
            vec![
                r##"<rect style="fill:#f00" width="10"/>"##,
                r##"<text>fill:#f00</text>"##,
            ]
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let artwork = clean(
            r#"<svg><text title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp;&amp; 3</text></svg>"#,
        );
        assert_eq!(
            artwork.children,
            vec![r#"<text title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp;&amp; 3</text>"#]
        );
    }

    #[test]
    fn test_nested_formatting_and_comments_kept() {
        let artwork = clean("<svg><g>\n  <!-- dot -->\n  <circle r=\"1\"/>\n</g></svg>");
        assert_eq!(
            artwork.children,
            vec!["<g>\n  <!-- dot -->\n  <circle r=\"1\"/>\n</g>"]
        );
    }

    #[test]
    fn test_nested_namespace_declaration_is_kept() {
        let artwork = clean(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><metadata><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/></metadata></svg>"#,
        );
        assert_eq!(
            artwork.children,
            vec![r#"<metadata><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/></metadata>"#]
        );
    }

    #[test]
    fn test_into_artwork() {
        let normalized = normalize_svg("<svg><g/></svg>");
        assert!(normalized.degraded_reason().is_none());
        assert_eq!(normalized.into_artwork().children, vec!["<g/>"]);
    }
}
