//! Composite archetype entry points.
//!
//! An archetype turns one [`CompositeRequest`] into either nothing or a root
//! node whose slots are wired through the plan's [`slotwire_core::AriaLinkage`].

use crate::registry::defaults::{
    article_card as article_card_definition, article_list_item as article_list_item_definition,
    article_preview as article_preview_definition, default_article_registry,
};
use crate::registry::{ArchetypeDefinition, ArchetypeRegistry};
use crate::renderer::Node;
use slotwire_core::{
    CompositePlan, CompositeRequest, EmitPlan, IdentityContext, Pipeline, PipelineConfig,
    Renderable, Slot, SlotwireError,
};

/// Plans one render of `definition`.
pub fn plan_archetype(
    pipeline: &Pipeline,
    definition: &ArchetypeDefinition,
    request: CompositeRequest,
    identity: &IdentityContext,
) -> CompositePlan {
    pipeline.plan(
        request,
        definition.policy,
        &definition.default_tag,
        identity,
    )
}

/// Renders one composite of `definition`, or `None` when suppressed.
pub fn render_archetype(
    pipeline: &Pipeline,
    definition: &ArchetypeDefinition,
    request: CompositeRequest,
    identity: &IdentityContext,
) -> Option<Node> {
    match plan_archetype(pipeline, definition, request, identity) {
        CompositePlan::Suppressed => {
            log::debug!("{} suppressed", definition.name);
            None
        }
        CompositePlan::Emit(plan) => Some(build_node(pipeline, definition, &plan)),
    }
}

/// Grid card: partial policy, `article` root.
pub fn article_card(
    pipeline: &Pipeline,
    request: CompositeRequest,
    identity: &IdentityContext,
) -> Option<Node> {
    render_archetype(pipeline, &article_card_definition(), request, identity)
}

/// Featured preview: strict policy, `article` root.
pub fn article_preview(
    pipeline: &Pipeline,
    request: CompositeRequest,
    identity: &IdentityContext,
) -> Option<Node> {
    render_archetype(pipeline, &article_preview_definition(), request, identity)
}

/// List entry: partial policy, `li` root, no call-to-action.
pub fn article_list_item(
    pipeline: &Pipeline,
    request: CompositeRequest,
    identity: &IdentityContext,
) -> Option<Node> {
    render_archetype(pipeline, &article_list_item_definition(), request, identity)
}

fn build_node(pipeline: &Pipeline, definition: &ArchetypeDefinition, plan: &EmitPlan) -> Node {
    let projection = &plan.projection;
    let slots = if definition.show_cta {
        plan.slots
    } else {
        plan.slots.without_cta()
    };
    let path = projection.path_slug.as_deref().unwrap_or_default();

    let mut children = Vec::new();

    if definition.show_image
        && let Some(src) = &projection.image
    {
        children.push(
            Node::element("img")
                .attr("src", src.as_str())
                .attr("alt", "")
                .attr("loading", "lazy"),
        );
    }

    if slots.date() {
        let raw = projection.date.as_deref().unwrap_or_default();
        children.push(
            Node::element("time")
                .attrs(&plan.slot_attributes(Slot::Date))
                .attr("datetime", raw)
                .child(Node::text(projection.formatted_date.as_str())),
        );
    }

    if slots.title() {
        let title = Node::text(projection.title.as_str());
        let content = if slots.link() {
            Node::element("a")
                .attr("href", path)
                .attrs(&plan.slot_attributes(Slot::Link))
                .child(title)
        } else {
            title
        };
        children.push(
            Node::element(definition.heading_tag.as_str())
                .attrs(&plan.slot_attributes(Slot::Title))
                .child(content),
        );
    }

    if slots.description() {
        children.push(
            Node::element("p")
                .attrs(&plan.slot_attributes(Slot::Description))
                .child(Node::text(projection.description.as_str())),
        );
    }

    if definition.show_tags && projection.tags.is_renderable() {
        let list = projection
            .tags
            .iter()
            .fold(Node::element("ul"), |list, tag| {
                list.child(Node::element("li").child(Node::text(tag.as_str())))
            });
        children.push(list);
    }

    if slots.cta() {
        let label = pipeline.translate(&definition.cta_label_key);
        if label.is_renderable() {
            children.push(
                Node::element("a")
                    .attr("href", path)
                    .attrs(&plan.slot_attributes(Slot::Cta))
                    .child(Node::text(label)),
            );
        }
    }

    Node::Element {
        tag: plan.root.element().clone(),
        node_ref: plan.root.node_ref().cloned(),
        attributes: plan.root.attributes().clone(),
        children,
    }
}

/// Pipeline plus archetype registry: the render entry point for hosts.
pub struct Composer {
    pipeline: Pipeline,
    registry: ArchetypeRegistry,
}

impl Composer {
    /// Creates a composer from its parts.
    pub fn new(pipeline: Pipeline, registry: ArchetypeRegistry) -> Self {
        Self { pipeline, registry }
    }

    /// Creates a composer from config, layering `overrides` onto the built-in
    /// archetypes.
    pub fn from_config(
        config: &PipelineConfig,
        overrides: Option<ArchetypeRegistry>,
    ) -> Result<Self, SlotwireError> {
        let mut registry = default_article_registry();
        if let Some(overrides) = overrides {
            registry.merge(overrides);
        }
        Ok(Self::new(Pipeline::from_config(config)?, registry))
    }

    /// The archetype registry.
    pub fn registry(&self) -> &ArchetypeRegistry {
        &self.registry
    }

    /// Plans a render of the named archetype.
    pub fn plan(
        &self,
        archetype: &str,
        request: CompositeRequest,
        identity: &IdentityContext,
    ) -> Result<CompositePlan, SlotwireError> {
        let definition = self.registry.require(archetype)?;
        Ok(plan_archetype(&self.pipeline, definition, request, identity))
    }

    /// Renders the named archetype.
    pub fn render(
        &self,
        archetype: &str,
        request: CompositeRequest,
        identity: &IdentityContext,
    ) -> Result<Option<Node>, SlotwireError> {
        let definition = self.registry.require(archetype)?;
        Ok(render_archetype(
            &self.pipeline,
            definition,
            request,
            identity,
        ))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(Pipeline::new(), default_article_registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::to_html;
    use serde_json::{Value as JsonValue, json};
    use slotwire_core::{Attributes, ElementRef, IdentityRegistry, IdentityRequest, NodeRef};

    fn complete() -> JsonValue {
        json!({
            "title": " Hello World ",
            "description": "Summary",
            "date": "2024-03-04",
            "slug": "hello-world",
            "tags": ["rust", " "],
        })
    }

    fn id(instance: &str) -> IdentityContext {
        IdentityContext::new(instance, false)
    }

    #[test]
    fn card_html_for_complete_record() {
        let node = article_card(&Pipeline::new(), CompositeRequest::new(complete()), &id("c1"))
            .expect("card should render");
        insta::assert_snapshot!(
            to_html(&node),
            @r#"<article aria-labelledby="c1-title" aria-describedby="c1-description"><time id="c1-date" datetime="2024-03-04">March 4, 2024</time><h3 id="c1-title"><a href="/articles/hello-world">Hello World</a></h3><p id="c1-description">Summary</p><ul><li>rust</li></ul><a href="/articles/hello-world">Read more</a></article>"#
        );
    }

    #[test]
    fn cross_references_always_resolve() {
        let node = article_card(&Pipeline::new(), CompositeRequest::new(complete()), &id("c2"))
            .unwrap();
        let root = node.attributes().unwrap();
        let labelled_by = root.get("aria-labelledby").unwrap();
        let described_by = root.get("aria-describedby").unwrap();
        assert_eq!(
            node.find_by_attr("id", labelled_by).unwrap().text_content(),
            "Hello World"
        );
        assert_eq!(
            node.find_by_attr("id", described_by).unwrap().text_content(),
            "Summary"
        );
    }

    #[test]
    fn every_archetype_suppresses_non_records() {
        let composer = Composer::default();
        for name in ["ArticleCard", "ArticlePreview", "ArticleListItem"] {
            for record in [JsonValue::Null, json!("just a string"), json!(3)] {
                let rendered = composer
                    .render(name, CompositeRequest::new(record), &id("n"))
                    .unwrap();
                assert!(rendered.is_none(), "{name} rendered a non-record");
            }
        }
    }

    #[test]
    fn missing_date_card_vs_preview() {
        let mut record = complete();
        record.as_object_mut().unwrap().remove("date");
        let pipeline = Pipeline::new();

        let card = article_card(&pipeline, CompositeRequest::new(record.clone()), &id("m"))
            .expect("card renders partial data");
        let html = to_html(&card);
        assert!(!html.contains("<time"));
        assert!(!html.contains("Read more"));
        assert!(html.contains(r#"<h3 id="m-title">"#));
        assert!(html.contains(r#"aria-describedby="m-description""#));

        assert!(article_preview(&pipeline, CompositeRequest::new(record), &id("m")).is_none());
    }

    #[test]
    fn slug_only_record_renders_nothing() {
        let composer = Composer::default();
        for name in ["ArticleCard", "ArticleListItem"] {
            let rendered = composer
                .render(name, CompositeRequest::new(json!({ "slug": "x" })), &id("s"))
                .unwrap();
            assert!(rendered.is_none(), "{name} rendered an empty root");
        }
    }

    #[test]
    fn unrelated_label_override_keeps_cta_text() {
        let config = PipelineConfig::from_json(r#"{"labels":{"nav.home":"Home"}}"#).unwrap();
        let composer = Composer::from_config(&config, None).unwrap();
        let node = composer
            .render("ArticleCard", CompositeRequest::new(complete()), &id("l"))
            .unwrap()
            .unwrap();
        let html = to_html(&node);
        assert!(html.ends_with(r#"<a href="/articles/hello-world">Read more</a></article>"#));
        assert!(!html.contains("cta.readMore"));
    }

    #[test]
    fn unparseable_date_keeps_blank_eyebrow_in_card() {
        let mut record = complete();
        record["date"] = json!("sometime");
        let pipeline = Pipeline::new();
        let card = article_card(&pipeline, CompositeRequest::new(record.clone()), &id("u"))
            .unwrap();
        assert!(to_html(&card).contains(r#"<time id="u-date" datetime="sometime"></time>"#));
        assert!(article_preview(&pipeline, CompositeRequest::new(record), &id("u")).is_none());
    }

    #[test]
    fn title_without_slug_is_not_linked() {
        let record = json!({ "title": "Lonely" });
        let node =
            article_card(&Pipeline::new(), CompositeRequest::new(record), &id("t")).unwrap();
        insta::assert_snapshot!(
            to_html(&node),
            @r#"<article aria-labelledby="t-title"><h3 id="t-title">Lonely</h3></article>"#
        );
    }

    #[test]
    fn list_item_has_no_cta() {
        let node = article_list_item(&Pipeline::new(), CompositeRequest::new(complete()), &id("l"))
            .unwrap();
        insta::assert_snapshot!(
            to_html(&node),
            @r#"<li aria-labelledby="l-title" aria-describedby="l-description"><time id="l-date" datetime="2024-03-04">March 4, 2024</time><h3 id="l-title"><a href="/articles/hello-world">Hello World</a></h3><p id="l-description">Summary</p></li>"#
        );
    }

    #[test]
    fn preview_renders_image_and_h2() {
        let mut record = complete();
        record["image"] = json!({ "src": "/covers/hello.png" });
        let node =
            article_preview(&Pipeline::new(), CompositeRequest::new(record), &id("p")).unwrap();
        let html = to_html(&node);
        assert!(html.starts_with(
            r#"<article aria-labelledby="p-title" aria-describedby="p-description"><img src="/covers/hello.png" alt="" loading="lazy">"#
        ));
        assert!(html.contains(r#"<h2 id="p-title">"#));
    }

    #[test]
    fn as_override_keeps_ref_and_attributes() {
        let request = CompositeRequest {
            explicit_tag: Some(ElementRef::component("Card")),
            node_ref: Some(NodeRef::new("r9")),
            attributes: Attributes::new().with("data-track", "grid"),
            ..CompositeRequest::new(complete())
        };
        let node = article_card(&Pipeline::new(), request, &id("a")).unwrap();
        match &node {
            Node::Element {
                tag,
                node_ref,
                attributes,
                ..
            } => {
                assert_eq!(tag, &ElementRef::component("Card"));
                assert_eq!(node_ref.as_ref().map(NodeRef::token), Some("r9"));
                assert_eq!(attributes.get("data-track"), Some("grid"));
                assert_eq!(attributes.get("aria-labelledby"), Some("a-title"));
            }
            Node::Text { .. } => panic!("root must be an element"),
        }
    }

    #[test]
    fn debug_mode_marks_root_and_slots() {
        let mut registry = IdentityRegistry::new("card");
        let handle = registry.mount();
        let identity = registry
            .resolve(
                handle,
                &IdentityRequest {
                    explicit_id: None,
                    debug_mode: true,
                },
            )
            .unwrap();
        let node = article_card(&Pipeline::new(), CompositeRequest::new(complete()), &identity)
            .unwrap();
        let root = node.attributes().unwrap();
        assert_eq!(root.get("data-instance-id"), Some("card-1"));
        assert_eq!(root.get("data-debug"), Some("true"));
        let title = node.find_by_attr("id", "card-1-title").unwrap();
        assert_eq!(title.attributes().unwrap().get("data-slot"), Some("title"));
    }

    #[test]
    fn same_instance_renders_identically() {
        let mut registry = IdentityRegistry::default();
        let handle = registry.mount();
        let pipeline = Pipeline::new();
        let render = || {
            let identity = registry
                .resolve(handle, &IdentityRequest::default())
                .unwrap();
            article_card(&pipeline, CompositeRequest::new(complete()), &identity)
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn unknown_archetype_is_an_error() {
        let err = Composer::default()
            .render("Hero", CompositeRequest::new(complete()), &id("h"))
            .unwrap_err();
        assert!(matches!(err, SlotwireError::UnknownArchetype { .. }));
    }

    #[test]
    fn custom_cta_label_from_config() {
        let config = PipelineConfig::from_json(r#"{"labels":{"cta.readMore":"Lire"}}"#).unwrap();
        let composer = Composer::from_config(&config, None).unwrap();
        let node = composer
            .render("ArticleCard", CompositeRequest::new(complete()), &id("f"))
            .unwrap()
            .unwrap();
        assert!(to_html(&node).ends_with(r#"<a href="/articles/hello-world">Lire</a></article>"#));
    }

    #[test]
    fn blank_cta_label_hides_cta() {
        let config = PipelineConfig::from_json(r#"{"labels":{"cta.readMore":"  "}}"#).unwrap();
        let composer = Composer::from_config(&config, None).unwrap();
        let node = composer
            .render("ArticleCard", CompositeRequest::new(complete()), &id("b"))
            .unwrap()
            .unwrap();
        assert!(!to_html(&node).ends_with("</a></article>"));
    }

    #[test]
    fn registry_overrides_change_policy() {
        let overrides = crate::registry::ArchetypeRegistry::from_json(
            r#"{"archetypes":[{"name":"ArticleCard","policy":"strict","defaultTag":"div"}]}"#,
        )
        .unwrap();
        let composer = Composer::from_config(&PipelineConfig::default(), Some(overrides)).unwrap();
        let plan = composer
            .plan(
                "ArticleCard",
                CompositeRequest::new(json!({ "title": "Only" })),
                &id("o"),
            )
            .unwrap();
        assert!(plan.is_suppressed());
        assert_eq!(composer.registry().archetypes.len(), 3);
    }
}
