#![deny(missing_docs)]
//! slotwire core: content checks, slot planning, accessibility wiring and
//! instance identity for content composites.

/// Accessibility cross-references between a root and its slots.
pub mod aria;
/// Date formatting, label lookup and route building.
pub mod collaborators;
/// Presence checks for slot content.
pub mod content;
/// Output element resolution.
pub mod element;
/// Core error type.
pub mod error;
/// Per-instance identity registry.
pub mod identity;
/// Source record normalization.
pub mod normalize;
/// Per-render planning pipeline.
pub mod pipeline;
/// Slot eligibility policies.
pub mod slots;

pub use aria::AriaLinkage;
pub use collaborators::{ChronoDateFormatter, DateFormatter, LabelCatalog, RouteTemplate, Translate};
pub use content::{Renderable, is_renderable};
pub use element::{
    Attributes, ElementRef, ElementRequest, NodeRef, ResolvedElement, is_valid_attribute_name,
    is_valid_element_name, resolve_element,
};
pub use error::SlotwireError;
pub use identity::{
    IdentityContext, IdentityRegistry, IdentityRequest, InstanceHandle, is_valid_instance_id,
};
pub use normalize::{CanonicalProjection, FieldNormalizer, Normalized};
pub use pipeline::{CompositePlan, CompositeRequest, EmitPlan, Pipeline, PipelineConfig};
pub use slots::{Slot, SlotEligibility, SlotPlan, SlotPolicy, plan_slots};
