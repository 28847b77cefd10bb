//! Reference HTML serializer for render nodes.
//!
//! Used for server output and tests. Component tags are written as-is so the
//! result can be embedded in Astro templates. Elements whose name is not a
//! valid tag name are unwrapped: only their children are written.

use super::node::Node;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input", "source"];

/// Serializes `node` to HTML.
///
/// # Examples
///
/// ```
/// use slotwire_astro::renderer::{Node, to_html};
///
/// let node = Node::element("p").attr("id", "a").child(Node::text("Fish & chips"));
/// assert_eq!(to_html(&node), r#"<p id="a">Fish &amp; chips</p>"#);
/// ```
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { value } => out.push_str(&html_escape::encode_text(value)),
        Node::Element {
            tag,
            attributes,
            children,
            ..
        } => {
            let name = tag.name();
            if !tag.is_valid() {
                log::warn!("unwrapping element with invalid name {:?}", name);
                for child in children {
                    write_node(child, out);
                }
                return;
            }
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes.iter() {
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }

            if VOID_ELEMENTS.contains(&name) {
                if !children.is_empty() {
                    log::warn!("dropping children of void element <{}>", name);
                }
                out.push('>');
                return;
            }

            out.push('>');
            for child in children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}
