//! Output element resolution (the `as` prop).
//!
//! Every composite picks its root tag through [`resolve_element`]. The
//! caller's ref and passthrough attributes travel inside the request and come
//! out on the resolved element whichever tag wins.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// A plain HTML tag or a host component reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementRef {
    /// Lowercase HTML tag such as `article` or `li`.
    Tag(String),
    /// Capitalized component name resolved by the host, e.g. `Card`.
    Component(String),
}

impl ElementRef {
    /// Creates a tag reference.
    pub fn tag(name: impl Into<String>) -> Self {
        ElementRef::Tag(name.into())
    }

    /// Creates a component reference.
    pub fn component(name: impl Into<String>) -> Self {
        ElementRef::Component(name.into())
    }

    /// Classifies a name the way JSX does: capitalized names are components.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            ElementRef::Component(name.to_string())
        } else {
            ElementRef::Tag(name.to_string())
        }
    }

    /// Returns the tag or component name.
    pub fn name(&self) -> &str {
        match self {
            ElementRef::Tag(name) | ElementRef::Component(name) => name,
        }
    }

    /// Returns true for component references.
    pub fn is_component(&self) -> bool {
        matches!(self, ElementRef::Component(_))
    }

    /// Returns true if the name can be written as a tag name.
    pub fn is_valid(&self) -> bool {
        is_valid_element_name(self.name())
    }
}

/// Tag and component names: an ASCII letter followed by ASCII letters,
/// digits or `-`.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Attribute names: non-empty, with no whitespace, control characters,
/// quotes, `<`, `>`, `/` or `=`.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

impl From<String> for ElementRef {
    fn from(name: String) -> Self {
        ElementRef::parse(&name)
    }
}

impl From<&str> for ElementRef {
    fn from(name: &str) -> Self {
        ElementRef::parse(name)
    }
}

impl From<ElementRef> for String {
    fn from(element: ElementRef) -> Self {
        match element {
            ElementRef::Tag(name) | ElementRef::Component(name) => name,
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque instance handle the host wants attached to the rendered root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    /// Wraps a host ref token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Ordered attribute list. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, JsonValue>")]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. Names that cannot be written as HTML
    /// attributes are dropped.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !is_valid_attribute_name(&name) {
            log::warn!("dropping attribute with invalid name {:?}", name);
            return;
        }
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style variant of [`Attributes::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets every pair in order.
    pub fn extend<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    /// Returns the value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Converts a JSON attribute map. `null` and `false` drop the attribute,
/// `true` becomes an empty (boolean) attribute, other scalars are stringified.
impl From<Map<String, JsonValue>> for Attributes {
    fn from(map: Map<String, JsonValue>) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in map {
            match value {
                JsonValue::Null | JsonValue::Bool(false) => {}
                JsonValue::Bool(true) => attrs.set(name, ""),
                JsonValue::String(text) => attrs.set(name, text),
                JsonValue::Number(n) => attrs.set(name, n.to_string()),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    log::warn!("dropping structured attribute '{}'", name);
                }
            }
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Inputs for resolving a composite's output element.
#[derive(Debug, Clone)]
pub struct ElementRequest {
    /// Caller's `as` override.
    pub explicit: Option<ElementRef>,
    /// Archetype default.
    pub default: ElementRef,
    /// Caller's ref.
    pub node_ref: Option<NodeRef>,
    /// Attributes the composite does not recognize.
    pub attributes: Attributes,
}

impl ElementRequest {
    /// Creates a request with only a default element.
    pub fn new(default: ElementRef) -> Self {
        Self {
            explicit: None,
            default,
            node_ref: None,
            attributes: Attributes::new(),
        }
    }
}

/// The element a composite root renders as, with forwarded ref and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedElement {
    element: ElementRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_ref: Option<NodeRef>,
    attributes: Attributes,
}

impl ResolvedElement {
    /// Chosen element.
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Forwarded ref.
    pub fn node_ref(&self) -> Option<&NodeRef> {
        self.node_ref.as_ref()
    }

    /// Forwarded attributes plus any set by the pipeline.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Sets attributes owned by the pipeline, overriding forwarded ones.
    pub(crate) fn apply_managed<N, V>(&mut self, pairs: impl IntoIterator<Item = (N, V)>)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.attributes.extend(pairs);
    }
}

/// Picks the explicit element if supplied and valid, else the default.
///
/// # Examples
///
/// ```
/// use slotwire_core::element::{Attributes, ElementRef, ElementRequest, NodeRef, resolve_element};
///
/// let resolved = resolve_element(ElementRequest {
///     explicit: Some(ElementRef::tag("section")),
///     default: ElementRef::tag("article"),
///     node_ref: Some(NodeRef::new("r1")),
///     attributes: Attributes::new().with("data-track", "hero"),
/// });
/// assert_eq!(resolved.element().name(), "section");
/// assert_eq!(resolved.node_ref().map(NodeRef::token), Some("r1"));
/// assert_eq!(resolved.attributes().get("data-track"), Some("hero"));
/// ```
pub fn resolve_element(request: ElementRequest) -> ResolvedElement {
    let ElementRequest {
        explicit,
        default,
        node_ref,
        attributes,
    } = request;
    let element = match explicit {
        Some(explicit) if explicit.is_valid() => explicit,
        Some(explicit) => {
            log::warn!(
                "ignoring invalid element name {:?}, using <{}>",
                explicit.name(),
                default
            );
            default
        }
        None => default,
    };
    ResolvedElement {
        element,
        node_ref,
        attributes,
    }
}
