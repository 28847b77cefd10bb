#![deny(missing_docs)]
//! slotwire Astro layer: article archetypes, archetype registry, and render output.

/// Composite archetype entry points.
pub mod archetypes;
/// Archetype registry and built-in definitions.
pub mod registry;
/// Render node tree and HTML serialization.
pub mod renderer;

pub use archetypes::{
    Composer, article_card, article_list_item, article_preview, plan_archetype, render_archetype,
};
pub use registry::{ArchetypeDefinition, ArchetypeRegistry};
pub use renderer::{Node, to_html};
