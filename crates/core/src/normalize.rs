//! Turns loosely-shaped source records into canonical, trimmed projections.

use crate::collaborators::{DateFormatter, RouteTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Trimmed, canonical view of a source record.
///
/// Serializing a projection and normalizing it again yields an equal value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProjection {
    /// Trimmed title, empty when absent.
    pub title: String,
    /// Trimmed description, empty when absent.
    pub description: String,
    /// Trimmed raw date, `None` when absent or blank.
    pub date: Option<String>,
    /// Display date from the date formatter, empty when unparseable.
    pub formatted_date: String,
    /// Whether the date formatter accepted the raw date.
    #[serde(skip)]
    pub date_parseable: bool,
    /// Trimmed raw slug, empty when absent.
    pub slug: String,
    /// Route prefix plus percent-encoded slug, `None` when the slug is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_slug: Option<String>,
    /// Trimmed, non-empty tags in source order.
    pub tags: Vec<String>,
    /// Trimmed image source, `None` when absent or blank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CanonicalProjection {
    /// Returns true if the raw date is present.
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    /// Returns true if the raw date is present and the formatter accepted it.
    pub fn has_parseable_date(&self) -> bool {
        self.date.is_some() && self.date_parseable
    }
}

/// Outcome of normalizing a source record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The record is record-shaped; its canonical projection.
    Content(CanonicalProjection),
    /// The record is absent or not record-shaped; render nothing.
    Suppressed,
}

impl Normalized {
    /// Returns the projection, if any.
    pub fn projection(&self) -> Option<&CanonicalProjection> {
        match self {
            Normalized::Content(projection) => Some(projection),
            Normalized::Suppressed => None,
        }
    }

    /// Returns true if the record was suppressed.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Normalized::Suppressed)
    }
}

/// Validating constructor for [`CanonicalProjection`].
pub struct FieldNormalizer<'a> {
    formatter: &'a dyn DateFormatter,
    route: &'a RouteTemplate,
}

impl<'a> FieldNormalizer<'a> {
    /// Creates a normalizer using the given collaborators.
    pub fn new(formatter: &'a dyn DateFormatter, route: &'a RouteTemplate) -> Self {
        Self { formatter, route }
    }

    /// Normalizes `record`. Total over every JSON value.
    pub fn normalize(&self, record: &JsonValue) -> Normalized {
        let JsonValue::Object(fields) = record else {
            log::debug!("suppressing non-record source: {}", kind_of(record));
            return Normalized::Suppressed;
        };

        let title = text_field(fields, "title");
        let description = text_field(fields, "description");
        let raw_date = text_field(fields, "date");
        let slug = text_field(fields, "slug");

        let (formatted_date, date_parseable) = if raw_date.is_empty() {
            (String::new(), false)
        } else {
            (
                self.formatter.format(&raw_date),
                self.formatter.is_parseable(&raw_date),
            )
        };
        let date = (!raw_date.is_empty()).then_some(raw_date);
        let path_slug = self.route.path_for(&slug);

        Normalized::Content(CanonicalProjection {
            title,
            description,
            date,
            formatted_date,
            date_parseable,
            slug,
            path_slug,
            tags: tag_list(fields.get("tags")),
            image: image_source(fields.get("image")),
        })
    }
}

/// Reads a string field, trimmed. Missing or non-string values become empty.
fn text_field(fields: &Map<String, JsonValue>, key: &str) -> String {
    match fields.get(key) {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(text)) => text.trim().to_string(),
        Some(other) => {
            log::warn!(
                "ignoring non-string '{}' field ({})",
                key,
                kind_of(other)
            );
            String::new()
        }
    }
}

fn tag_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(JsonValue::as_str)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        None | Some(JsonValue::Null) => Vec::new(),
        Some(other) => {
            log::warn!("ignoring non-sequence 'tags' field ({})", kind_of(other));
            Vec::new()
        }
    }
}

/// Accepts `"src"` or `{ "src": "..." }`.
fn image_source(value: Option<&JsonValue>) -> Option<String> {
    let raw = match value? {
        JsonValue::String(src) => src.as_str(),
        JsonValue::Object(image) => image.get("src")?.as_str()?,
        _ => return None,
    };
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
