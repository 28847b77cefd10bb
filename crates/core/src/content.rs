//! Presence checks for slot content.
//!
//! A value is "renderable" when showing it would put something visible on the
//! page: non-blank strings, sequences with at least one renderable element, and
//! any other non-null value (numbers, booleans, objects, pre-built nodes).

use serde_json::Value as JsonValue;

/// Returns true if the value counts as present content.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use slotwire_core::content::is_renderable;
///
/// assert!(is_renderable(&json!("Hello")));
/// assert!(!is_renderable(&json!("   ")));
/// assert!(!is_renderable(&json!([null, ""])));
/// assert!(is_renderable(&json!({ "type": "element" })));
/// ```
pub fn is_renderable(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(text) => !text.trim().is_empty(),
        JsonValue::Array(items) => items.iter().any(is_renderable),
        JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Object(_) => true,
    }
}

/// Presence contract for typed caller-supplied values.
///
/// Mirrors [`is_renderable`] so slot overrides passed as Rust values follow the
/// same rule as loosely-typed record fields.
pub trait Renderable {
    /// Returns true if this value would render something visible.
    fn is_renderable(&self) -> bool;
}

impl Renderable for str {
    fn is_renderable(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Renderable for String {
    fn is_renderable(&self) -> bool {
        self.as_str().is_renderable()
    }
}

impl Renderable for JsonValue {
    fn is_renderable(&self) -> bool {
        is_renderable(self)
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn is_renderable(&self) -> bool {
        (**self).is_renderable()
    }
}

impl<T: Renderable> Renderable for Option<T> {
    fn is_renderable(&self) -> bool {
        self.as_ref().is_some_and(Renderable::is_renderable)
    }
}

impl<T: Renderable> Renderable for [T] {
    fn is_renderable(&self) -> bool {
        self.iter().any(Renderable::is_renderable)
    }
}

impl<T: Renderable> Renderable for Vec<T> {
    fn is_renderable(&self) -> bool {
        self.as_slice().is_renderable()
    }
}
