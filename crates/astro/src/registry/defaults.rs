//! Built-in archetypes for article listings.
//!
//! Each archetype names its incomplete-data policy explicitly:
//!
//! - `ArticleCard` and `ArticleListItem` use the partial policy: they render
//!   whatever slots the record supports.
//! - `ArticlePreview` uses the strict policy: without a title, slug,
//!   parseable date and description it renders nothing.

use super::types::{ArchetypeDefinition, ArchetypeRegistry};
use slotwire_core::{ElementRef, SlotPolicy};

/// Card used in article grids.
pub const ARTICLE_CARD: &str = "ArticleCard";
/// Featured preview that only renders complete articles.
pub const ARTICLE_PREVIEW: &str = "ArticlePreview";
/// Compact entry for article lists.
pub const ARTICLE_LIST_ITEM: &str = "ArticleListItem";

/// Creates the default article registry.
///
/// # Example
///
/// ```
/// use slotwire_astro::registry::defaults::default_article_registry;
/// use slotwire_core::SlotPolicy;
///
/// let registry = default_article_registry();
/// assert_eq!(registry.get("ArticlePreview").unwrap().policy, SlotPolicy::Strict);
/// ```
pub fn default_article_registry() -> ArchetypeRegistry {
    ArchetypeRegistry {
        archetypes: vec![article_card(), article_preview(), article_list_item()],
    }
}

/// Definition of [`ARTICLE_CARD`].
pub fn article_card() -> ArchetypeDefinition {
    ArchetypeDefinition {
        show_tags: true,
        show_image: true,
        ..ArchetypeDefinition::new(ARTICLE_CARD, SlotPolicy::Partial, ElementRef::tag("article"))
    }
}

/// Definition of [`ARTICLE_PREVIEW`].
pub fn article_preview() -> ArchetypeDefinition {
    ArchetypeDefinition {
        heading_tag: "h2".to_string(),
        show_tags: true,
        show_image: true,
        ..ArchetypeDefinition::new(ARTICLE_PREVIEW, SlotPolicy::Strict, ElementRef::tag("article"))
    }
}

/// Definition of [`ARTICLE_LIST_ITEM`].
pub fn article_list_item() -> ArchetypeDefinition {
    ArchetypeDefinition {
        show_cta: false,
        ..ArchetypeDefinition::new(ARTICLE_LIST_ITEM, SlotPolicy::Partial, ElementRef::tag("li"))
    }
}
