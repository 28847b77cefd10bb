//! Registry type definitions for composite archetypes.

use serde::{Deserialize, Serialize};
use slotwire_core::collaborators::CTA_LABEL_KEY;
use slotwire_core::{ElementRef, SlotPolicy, SlotwireError};

/// Archetype registry, usually passed from JavaScript as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeRegistry {
    /// Available archetypes.
    pub archetypes: Vec<ArchetypeDefinition>,
}

/// A single composite archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeDefinition {
    /// Archetype name (e.g., "ArticleCard").
    pub name: String,
    /// Incomplete-data policy for this archetype.
    pub policy: SlotPolicy,
    /// Root element when the caller passes no `as`.
    pub default_tag: ElementRef,
    /// Heading element wrapping the title.
    #[serde(default = "default_heading_tag")]
    pub heading_tag: String,
    /// Whether the call-to-action link is rendered when eligible.
    #[serde(default = "default_true")]
    pub show_cta: bool,
    /// Whether the tag list is rendered.
    #[serde(default)]
    pub show_tags: bool,
    /// Whether the cover image is rendered.
    #[serde(default)]
    pub show_image: bool,
    /// Label key for the call-to-action text.
    #[serde(default = "default_cta_label_key")]
    pub cta_label_key: String,
}

fn default_heading_tag() -> String {
    "h3".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cta_label_key() -> String {
    CTA_LABEL_KEY.to_string()
}

impl ArchetypeDefinition {
    /// Creates a definition with default slot layout.
    pub fn new(name: impl Into<String>, policy: SlotPolicy, default_tag: ElementRef) -> Self {
        Self {
            name: name.into(),
            policy,
            default_tag,
            heading_tag: default_heading_tag(),
            show_cta: true,
            show_tags: false,
            show_image: false,
            cta_label_key: default_cta_label_key(),
        }
    }
}

impl ArchetypeRegistry {
    /// Parses a registry from JSON.
    pub fn from_json(input: &str) -> Result<Self, SlotwireError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Check if an archetype name is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.archetypes.iter().any(|a| a.name == name)
    }

    /// Get the definition for an archetype.
    pub fn get(&self, name: &str) -> Option<&ArchetypeDefinition> {
        self.archetypes.iter().find(|a| a.name == name)
    }

    /// Get the definition for an archetype, or an unknown-archetype error.
    pub fn require(&self, name: &str) -> Result<&ArchetypeDefinition, SlotwireError> {
        self.get(name)
            .ok_or_else(|| SlotwireError::unknown_archetype(name))
    }

    /// Adds definitions, replacing same-named ones.
    pub fn merge(&mut self, other: ArchetypeRegistry) {
        for definition in other.archetypes {
            match self.archetypes.iter_mut().find(|a| a.name == definition.name) {
                Some(existing) => *existing = definition,
                None => self.archetypes.push(definition),
            }
        }
    }
}
