//! External collaborators consulted by the pipeline: date formatting, label
//! lookup and route building.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

/// Default output pattern, e.g. `March 4, 2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Default collection used when building article paths.
pub const DEFAULT_COLLECTION: &str = "articles";

/// Label key for the call-to-action link.
pub const CTA_LABEL_KEY: &str = "cta.readMore";

/// Formats raw record dates for display.
///
/// Implementations must never panic and must return an empty string for input
/// they cannot parse.
pub trait DateFormatter {
    /// Formats `raw` for display, or returns an empty string.
    fn format(&self, raw: &str) -> String;

    /// Returns true if `raw` parses as a date.
    fn is_parseable(&self, raw: &str) -> bool {
        !self.format(raw).is_empty()
    }
}

/// Date formatter backed by chrono.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY/MM/DD`.
#[derive(Debug, Clone)]
pub struct ChronoDateFormatter {
    pattern: String,
}

impl ChronoDateFormatter {
    /// Creates a formatter with the default display pattern.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Creates a formatter with a custom strftime pattern.
    ///
    /// Returns `None` if the pattern is blank or contains invalid specifiers.
    pub fn with_pattern(pattern: impl Into<String>) -> Option<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return None;
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return None;
        }
        Some(Self { pattern })
    }

    /// Returns the display pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.date());
        }
        ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }
}

impl Default for ChronoDateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DateFormatter for ChronoDateFormatter {
    fn format(&self, raw: &str) -> String {
        let Some(date) = Self::parse(raw) else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.pattern)).is_err() {
            return String::new();
        }
        out
    }

    fn is_parseable(&self, raw: &str) -> bool {
        Self::parse(raw).is_some()
    }
}

/// Label lookup with key fallback.
pub trait Translate {
    /// Returns the label for `key`, or `key` itself on a miss.
    fn translate(&self, key: &str) -> String;
}

/// In-memory label catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelCatalog {
    labels: HashMap<String, String>,
}

impl LabelCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the English labels composites use out of the box.
    pub fn builtin() -> Self {
        Self::new().with(CTA_LABEL_KEY, "Read more")
    }

    /// Adds or replaces a label.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(key.into(), label.into());
    }

    /// Builder-style variant of [`LabelCatalog::insert`].
    pub fn with(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.insert(key, label);
        self
    }

    /// Layers `overrides` on top of this catalog. Keys missing from
    /// `overrides` keep their current label.
    pub fn merge(&mut self, overrides: LabelCatalog) {
        self.labels.extend(overrides.labels);
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the catalog has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Translate for LabelCatalog {
    fn translate(&self, key: &str) -> String {
        self.labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Builds `/{collection}/{encoded-slug}` paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTemplate {
    collection: String,
}

impl RouteTemplate {
    /// Creates a template for the given collection name.
    ///
    /// Leading and trailing slashes on the collection are ignored.
    pub fn for_collection(collection: &str) -> Self {
        Self {
            collection: collection.trim().trim_matches('/').to_string(),
        }
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the fixed prefix every path starts with.
    pub fn prefix(&self) -> String {
        if self.collection.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", self.collection)
        }
    }

    /// Builds the path for `slug`, or `None` when the trimmed slug is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotwire_core::collaborators::RouteTemplate;
    ///
    /// let route = RouteTemplate::for_collection("articles");
    /// assert_eq!(route.path_for(" hello world ").as_deref(), Some("/articles/hello%20world"));
    /// assert_eq!(route.path_for("   "), None);
    /// ```
    pub fn path_for(&self, slug: &str) -> Option<String> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }
        Some(format!("{}{}", self.prefix(), urlencoding::encode(slug)))
    }

    /// Recovers the decoded slug from a path built by this template.
    pub fn slug_from_path(&self, path: &str) -> Option<String> {
        let encoded = path.strip_prefix(&self.prefix())?;
        if encoded.is_empty() {
            return None;
        }
        urlencoding::decode(encoded).ok().map(|s| s.into_owned())
    }
}

impl Default for RouteTemplate {
    fn default() -> Self {
        Self::for_collection(DEFAULT_COLLECTION)
    }
}
