use serde::{Deserialize, Serialize};
use slotwire_wasm::CompositeHost;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
struct NodeJson {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    attributes: std::collections::HashMap<String, String>,
    #[serde(default)]
    children: Vec<NodeJson>,
}

fn js<T: Serialize>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .expect("serialize test input")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Props<'a> {
    source_record: Record<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explicit_id: Option<&'a str>,
    debug_mode: bool,
}

#[derive(Serialize)]
struct Record<'a> {
    title: &'a str,
    description: &'a str,
    date: &'a str,
    slug: &'a str,
}

const RECORD: Record<'static> = Record {
    title: " Hello ",
    description: "World",
    date: "2024-03-04",
    slug: "hello",
};

fn props(explicit_id: Option<&'static str>, debug_mode: bool) -> JsValue {
    js(&Props {
        source_record: RECORD,
        explicit_id,
        debug_mode,
    })
}

#[wasm_bindgen_test]
fn render_complete_card() {
    let mut host = CompositeHost::new(JsValue::UNDEFINED).expect("default host");
    let handle = host.mount();
    let node = host
        .render(handle, "ArticleCard", props(None, false))
        .expect("render should succeed");
    let node: NodeJson = serde_wasm_bindgen::from_value(node).expect("deserialize node");

    assert_eq!(node.kind, "element");
    assert_eq!(node.tag.as_deref(), Some("article"));
    let labelled_by = node.attributes.get("aria-labelledby").expect("labelled");
    assert!(labelled_by.starts_with("slotwire-"));
    assert!(labelled_by.ends_with("-title"));
    assert_eq!(node.children.len(), 4);
}

#[wasm_bindgen_test]
fn ids_stable_per_handle() {
    let mut host = CompositeHost::new(JsValue::UNDEFINED).unwrap();
    let a = host.mount();
    let b = host.mount();
    let first = host.render_html(a, "ArticleCard", props(None, false)).unwrap();
    let again = host.render_html(a, "ArticleCard", props(None, false)).unwrap();
    let other = host.render_html(b, "ArticleCard", props(None, false)).unwrap();
    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[wasm_bindgen_test]
fn explicit_id_and_debug_mode() {
    let mut host = CompositeHost::new(JsValue::UNDEFINED).unwrap();
    let handle = host.mount();
    let html = host
        .render_html(handle, "ArticlePreview", props(Some("hero"), true))
        .unwrap()
        .expect("preview renders a complete record");
    assert!(html.contains(r#"aria-labelledby="hero-title""#));
    assert!(html.contains(r#"data-instance-id="hero""#));
    assert!(html.contains(r#"data-debug="true""#));
}

#[wasm_bindgen_test]
fn suppressed_render_is_null() {
    let mut host = CompositeHost::new(JsValue::UNDEFINED).unwrap();
    let handle = host.mount();
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct BareString {
        source_record: &'static str,
    }
    let props = js(&BareString {
        source_record: "not a record",
    });
    let node = host.render(handle, "ArticleCard", props).unwrap();
    assert!(node.is_null());
}

#[wasm_bindgen_test]
fn unmounted_handle_is_an_error() {
    let mut host = CompositeHost::new(JsValue::UNDEFINED).unwrap();
    let handle = host.mount();
    assert!(host.unmount(handle));
    assert!(host.render(handle, "ArticleCard", props(None, false)).is_err());
}

#[wasm_bindgen_test]
fn config_overrides_collection() {
    #[derive(Serialize)]
    struct Config {
        collection: &'static str,
    }
    let mut host = CompositeHost::new(js(&Config { collection: "blog" })).unwrap();
    let handle = host.mount();
    let html = host
        .render_html(handle, "ArticleCard", props(None, false))
        .unwrap()
        .unwrap();
    assert!(html.contains(r#"href="/blog/hello""#));
    assert_eq!(
        host.archetypes(),
        vec!["ArticleCard", "ArticlePreview", "ArticleListItem"]
    );
}


#[wasm_bindgen_test]
fn hosts_with_distinct_namespaces_do_not_share_ids() {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Config {
        id_namespace: &'static str,
    }
    let mut sidebar = CompositeHost::new(js(&Config { id_namespace: "sidebar" })).unwrap();
    let mut main = CompositeHost::new(js(&Config { id_namespace: "main" })).unwrap();
    let a = sidebar.mount();
    let b = main.mount();
    let left = sidebar.render_html(a, "ArticleCard", props(None, false)).unwrap().unwrap();
    let right = main.render_html(b, "ArticleCard", props(None, false)).unwrap().unwrap();
    assert!(left.contains(r#"id="sidebar-1-title""#));
    assert!(right.contains(r#"id="main-1-title""#));

    assert!(CompositeHost::new(js(&Config { id_namespace: "two words" })).is_err());
}
