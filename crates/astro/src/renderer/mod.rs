//! Render output: node tree and HTML serialization.

/// Reference HTML serializer.
pub mod html;
/// Render node tree.
pub mod node;

pub use html::to_html;
pub use node::Node;
