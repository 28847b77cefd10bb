//! Per-render planning pipeline.
//!
//! normalize → plan slots → link aria → resolve element. The result is either
//! [`CompositePlan::Suppressed`] or a fully determined [`EmitPlan`].

use crate::aria::AriaLinkage;
use crate::collaborators::{
    ChronoDateFormatter, DEFAULT_COLLECTION, DEFAULT_DATE_FORMAT, DateFormatter, LabelCatalog,
    RouteTemplate, Translate,
};
use crate::element::{
    Attributes, ElementRef, ElementRequest, NodeRef, ResolvedElement, resolve_element,
};
use crate::error::SlotwireError;
use crate::identity::{
    DEFAULT_ID_NAMESPACE, IdentityContext, IdentityRequest, is_valid_instance_id,
};
use crate::normalize::{CanonicalProjection, FieldNormalizer, Normalized};
use crate::slots::{Slot, SlotEligibility, SlotPlan, SlotPolicy, plan_slots};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Pipeline configuration, usually loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Collection name used for article paths.
    pub collection: String,
    /// strftime pattern for display dates.
    pub date_format: String,
    /// Label overrides, layered over the built-in labels.
    pub labels: LabelCatalog,
    /// Prefix for generated instance ids.
    pub id_namespace: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            labels: LabelCatalog::builtin(),
            id_namespace: DEFAULT_ID_NAMESPACE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON config. Missing keys take their defaults.
    pub fn from_json(input: &str) -> Result<Self, SlotwireError> {
        let config: PipelineConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot: the id namespace prefixes element ids, so
    /// it must be non-empty and free of whitespace.
    pub fn validate(&self) -> Result<(), SlotwireError> {
        if !is_valid_instance_id(&self.id_namespace) {
            return Err(SlotwireError::invalid_config(
                "idNamespace",
                "must be non-empty and contain no whitespace",
            ));
        }
        Ok(())
    }
}

/// Props for one composite render.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeRequest {
    /// Loosely-shaped content record.
    #[serde(default)]
    pub source_record: JsonValue,
    /// Explicit id and debug flag.
    #[serde(flatten)]
    pub identity: IdentityRequest,
    /// `as` override for the root element.
    #[serde(default, rename = "as")]
    pub explicit_tag: Option<ElementRef>,
    /// Caller's ref.
    #[serde(default, rename = "ref")]
    pub node_ref: Option<NodeRef>,
    /// Passthrough attributes for the root.
    #[serde(default)]
    pub attributes: Attributes,
}

impl CompositeRequest {
    /// Creates a request for `record` with no overrides.
    pub fn new(record: JsonValue) -> Self {
        Self {
            source_record: record,
            ..Default::default()
        }
    }
}

/// A non-suppressed render decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitPlan {
    /// Root element with forwarded ref and attributes, plus aria and diagnostics.
    pub root: ResolvedElement,
    /// Eligible slots.
    pub slots: SlotEligibility,
    /// Slot ids and root references.
    pub aria: AriaLinkage,
    /// Instance identity.
    pub identity: IdentityContext,
    /// Canonical content.
    pub projection: CanonicalProjection,
}

impl EmitPlan {
    /// Attributes a slot element carries: its linkage id and, in debug mode,
    /// the diagnostic attributes.
    pub fn slot_attributes(&self, slot: Slot) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(id) = self.aria.slot_id(slot) {
            attrs.set("id", id);
        }
        attrs.extend(self.identity.diagnostic_attributes());
        if self.identity.debug_mode {
            attrs.set("data-slot", slot.name());
        }
        attrs
    }
}

/// Terminal outcome of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositePlan {
    /// Render nothing.
    Suppressed,
    /// Render the root and eligible slots.
    Emit(Box<EmitPlan>),
}

impl CompositePlan {
    /// Returns the emit plan, if any.
    pub fn emitted(&self) -> Option<&EmitPlan> {
        match self {
            CompositePlan::Emit(plan) => Some(plan),
            CompositePlan::Suppressed => None,
        }
    }

    /// Returns true if nothing renders.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, CompositePlan::Suppressed)
    }
}

/// Stateless planner holding the external collaborators.
pub struct Pipeline {
    formatter: Box<dyn DateFormatter>,
    route: RouteTemplate,
    labels: Box<dyn Translate>,
}

impl Pipeline {
    /// Creates a pipeline with default collaborators.
    pub fn new() -> Self {
        Self {
            formatter: Box::new(ChronoDateFormatter::new()),
            route: RouteTemplate::default(),
            labels: Box::new(LabelCatalog::builtin()),
        }
    }

    /// Creates a pipeline from configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, SlotwireError> {
        let formatter = ChronoDateFormatter::with_pattern(&config.date_format).ok_or_else(|| {
            SlotwireError::invalid_config("dateFormat", format!("'{}'", config.date_format))
        })?;
        let mut labels = LabelCatalog::builtin();
        labels.merge(config.labels.clone());
        Ok(Self {
            formatter: Box::new(formatter),
            route: RouteTemplate::for_collection(&config.collection),
            labels: Box::new(labels),
        })
    }

    /// Replaces the date formatter.
    pub fn with_formatter(mut self, formatter: impl DateFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replaces the label lookup.
    pub fn with_translator(mut self, labels: impl Translate + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    /// Route template used for article paths.
    pub fn route(&self) -> &RouteTemplate {
        &self.route
    }

    /// Looks up a label, falling back to the key.
    pub fn translate(&self, key: &str) -> String {
        self.labels.translate(key)
    }

    /// Normalizes a record with this pipeline's collaborators.
    pub fn normalize(&self, record: &JsonValue) -> Normalized {
        FieldNormalizer::new(self.formatter.as_ref(), &self.route).normalize(record)
    }

    /// Plans one render.
    pub fn plan(
        &self,
        request: CompositeRequest,
        policy: SlotPolicy,
        default_tag: &ElementRef,
        identity: &IdentityContext,
    ) -> CompositePlan {
        let projection = match self.normalize(&request.source_record) {
            Normalized::Content(projection) => projection,
            Normalized::Suppressed => return CompositePlan::Suppressed,
        };

        let slots = match plan_slots(&projection, policy) {
            SlotPlan::Eligible(slots) => slots,
            SlotPlan::Suppressed => return CompositePlan::Suppressed,
        };

        let aria = AriaLinkage::link(&identity.instance_id, &slots);

        let mut root = resolve_element(ElementRequest {
            explicit: request.explicit_tag,
            default: default_tag.clone(),
            node_ref: request.node_ref,
            attributes: request.attributes,
        });
        root.apply_managed(aria.root_attributes());
        root.apply_managed(identity.diagnostic_attributes());

        CompositePlan::Emit(Box::new(EmitPlan {
            root,
            slots,
            aria,
            identity: identity.clone(),
            projection,
        }))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
