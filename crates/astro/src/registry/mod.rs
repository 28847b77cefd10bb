//! Archetype registry: which composites exist and how each one behaves.

/// Built-in archetype definitions.
pub mod defaults;
/// Registry types.
pub mod types;

pub use types::{ArchetypeDefinition, ArchetypeRegistry};
