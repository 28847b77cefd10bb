use serde::{Deserialize, Serialize};
use slotwire_astro::{ArchetypeDefinition, ArchetypeRegistry, Composer, Node, to_html};
use slotwire_core::{
    CompositePlan, CompositeRequest, IdentityContext, IdentityRegistry, InstanceHandle,
    PipelineConfig, SlotwireError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Host Config
// ============================================================================

/// Configuration accepted by the `CompositeHost` constructor.
///
/// Pipeline keys (`collection`, `dateFormat`, `labels`, `idNamespace`) sit at
/// the top level next to optional archetype overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasmHostConfig {
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub archetypes: Option<Vec<ArchetypeDefinition>>,
}

fn parse_config(config: JsValue) -> Result<WasmHostConfig, SlotwireError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmHostConfig::default());
    }
    let cfg: WasmHostConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| SlotwireError::invalid_config("config", e.to_string()))?;
    cfg.pipeline.validate()?;
    Ok(cfg)
}

fn parse_props(props: JsValue) -> Result<CompositeRequest, JsError> {
    if props.is_undefined() || props.is_null() {
        return Ok(CompositeRequest::default());
    }
    serde_wasm_bindgen::from_value(props)
        .map_err(|e| JsError::new(&format!("Invalid props: {}", e)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn js_error(err: SlotwireError) -> JsError {
    JsError::new(&err.to_string())
}

/// One entry of a `renderMany` call.
#[derive(Debug, Deserialize)]
struct BatchItem {
    handle: u32,
    #[serde(default)]
    props: Option<CompositeRequest>,
}

// ============================================================================
// Composite Host
// ============================================================================

/// Renders article composites for mounted instances.
///
/// The host framework mounts one handle per component instance and passes it
/// back on every render, so generated ids stay stable for the instance's
/// lifetime.
///
/// Generated ids are unique within one host only. When several hosts render
/// into the same page, give each its own `idNamespace` to avoid duplicate
/// DOM ids.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { CompositeHost } from './slotwire_wasm';
///
/// const host = new CompositeHost({ collection: 'blog', idNamespace: 'blog-list' });
/// const handle = host.mount();
/// const node = host.render(handle, 'ArticleCard', {
///   sourceRecord: { title: 'Hello', slug: 'hello', date: '2024-03-04' },
///   debugMode: true,
/// });
/// // node = { type: "element", tag: "article", attributes: {...}, children: [...] }
/// host.unmount(handle);
/// ```
#[wasm_bindgen]
pub struct CompositeHost {
    composer: Composer,
    identities: IdentityRegistry,
}

#[wasm_bindgen]
impl CompositeHost {
    /// Creates a host from an optional config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CompositeHost, JsError> {
        let cfg = parse_config(config).map_err(js_error)?;
        let overrides = cfg
            .archetypes
            .map(|archetypes| ArchetypeRegistry { archetypes });
        let composer = Composer::from_config(&cfg.pipeline, overrides).map_err(js_error)?;
        Ok(CompositeHost {
            composer,
            identities: IdentityRegistry::new(cfg.pipeline.id_namespace),
        })
    }

    /// Mounts a new instance and returns its handle.
    pub fn mount(&mut self) -> u32 {
        self.identities.mount().raw()
    }

    /// Unmounts an instance. Returns false if it was not mounted.
    pub fn unmount(&mut self, handle: u32) -> bool {
        self.identities.unmount(InstanceHandle::new(handle))
    }

    /// Returns the render plan for an instance, or `null` when suppressed.
    pub fn plan(&self, handle: u32, archetype: &str, props: JsValue) -> Result<JsValue, JsError> {
        let request = parse_props(props)?;
        let identity = self.identity_for(handle, &request)?;
        match self
            .composer
            .plan(archetype, request, &identity)
            .map_err(js_error)?
        {
            CompositePlan::Suppressed => Ok(JsValue::NULL),
            CompositePlan::Emit(plan) => to_js(&*plan),
        }
    }

    /// Renders an instance to a node tree, or `null` when suppressed.
    pub fn render(&self, handle: u32, archetype: &str, props: JsValue) -> Result<JsValue, JsError> {
        match self.render_node(handle, archetype, props)? {
            Some(node) => to_js(&node),
            None => Ok(JsValue::NULL),
        }
    }

    /// Renders an instance to HTML, or `undefined` when suppressed.
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(
        &self,
        handle: u32,
        archetype: &str,
        props: JsValue,
    ) -> Result<Option<String>, JsError> {
        Ok(self
            .render_node(handle, archetype, props)?
            .map(|node| to_html(&node)))
    }

    /// Renders several mounted instances of one archetype.
    ///
    /// `items` is an array of `{ handle, props }`; the result holds one node
    /// (or `null`) per item, in order.
    #[wasm_bindgen(js_name = renderMany)]
    pub fn render_many(&self, archetype: &str, items: js_sys::Array) -> Result<js_sys::Array, JsError> {
        let out = js_sys::Array::new();
        for item in items.iter() {
            let item: BatchItem = serde_wasm_bindgen::from_value(item)
                .map_err(|e| JsError::new(&format!("Invalid batch item: {}", e)))?;
            let request = item.props.unwrap_or_default();
            let node = self.render_request(item.handle, archetype, request)?;
            out.push(&match node {
                Some(node) => to_js(&node)?,
                None => JsValue::NULL,
            });
        }
        Ok(out)
    }

    /// Names of the registered archetypes.
    pub fn archetypes(&self) -> Vec<String> {
        self.composer
            .registry()
            .archetypes
            .iter()
            .map(|a| a.name.clone())
            .collect()
    }
}

impl CompositeHost {
    fn identity_for(
        &self,
        handle: u32,
        request: &CompositeRequest,
    ) -> Result<IdentityContext, JsError> {
        self.identities
            .resolve(InstanceHandle::new(handle), &request.identity)
            .map_err(js_error)
    }

    fn render_node(
        &self,
        handle: u32,
        archetype: &str,
        props: JsValue,
    ) -> Result<Option<Node>, JsError> {
        self.render_request(handle, archetype, parse_props(props)?)
    }

    fn render_request(
        &self,
        handle: u32,
        archetype: &str,
        request: CompositeRequest,
    ) -> Result<Option<Node>, JsError> {
        let identity = self.identity_for(handle, &request)?;
        self.composer
            .render(archetype, request, &identity)
            .map_err(js_error)
    }
}
