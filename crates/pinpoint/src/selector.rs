//! Attribute selector synthesis.
//!
//! A selector is built from the first entry of an ordered preference list
//! whose attributes are all present on the element:
//!
//! - `id` renders as `#value`
//! - `class` renders as `.a.b` (one segment per class name)
//! - anything else renders as `[name="value"]`
//! - a composite entry `data-cy+role` requires every part and renders as
//!   `[data-cy="…"][role="…"]`
//!
//! When nothing matches, the lowercase tag name is used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::dom::ElementView;
use crate::result::{PinpointError, PinpointResult};

/// Default preference order
pub const DEFAULT_SELECTOR_ORDER: [&str; 3] = ["data-cy", "id", "class"];

/// Attribute names offered when editing the preference order
pub const KNOWN_ATTRIBUTES: [&str; 7] = [
    "data-cy",
    "id",
    "class",
    "role",
    "data-testid",
    "name",
    "type",
];

/// One entry of the preference list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AttributePreference {
    /// A single attribute name
    Single(String),
    /// Attribute names that must all be present, in render order
    Composite(Vec<String>),
}

impl AttributePreference {
    /// Parse an entry; `+` separates the parts of a composite entry
    pub fn parse(entry: &str) -> PinpointResult<Self> {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            return Err(PinpointError::invalid_preference(entry, "empty entry"));
        }

        if !trimmed.contains('+') {
            return Ok(Self::Single(trimmed.to_string()));
        }

        let parts: Vec<String> = trimmed.split('+').map(|p| p.trim().to_string()).collect();
        if parts.iter().any(String::is_empty) {
            return Err(PinpointError::invalid_preference(
                entry,
                "empty composite part",
            ));
        }
        Ok(Self::Composite(parts))
    }

    /// The attribute names this entry reads, in render order
    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Composite(parts) => parts,
        }
    }

    /// Render this entry against an attribute map, or `None` if it does not
    /// fully match
    #[must_use]
    pub fn render(&self, attributes: &BTreeMap<String, String>) -> Option<String> {
        self.render_with(|name| attributes.get(name).map(String::as_str))
    }

    /// Render this entry using a per-name attribute lookup
    #[must_use]
    pub fn render_with<'a, F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let rendered = match self {
            Self::Single(name) => value(name).map(|v| render_single(name, v)),
            Self::Composite(parts) => parts
                .iter()
                .map(|name| value(name).map(|v| bracket(name, v)))
                .collect::<Option<Vec<_>>>()
                .map(|parts| parts.concat()),
        };
        rendered.filter(|s| !s.is_empty())
    }
}

impl fmt::Display for AttributePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Composite(parts) => f.write_str(&parts.join("+")),
        }
    }
}

impl FromStr for AttributePreference {
    type Err = PinpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AttributePreference {
    type Error = PinpointError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AttributePreference> for String {
    fn from(value: AttributePreference) -> Self {
        value.to_string()
    }
}

/// Ordered preference list; the first full match wins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorOrder(Vec<AttributePreference>);

impl Default for SelectorOrder {
    fn default() -> Self {
        Self(
            DEFAULT_SELECTOR_ORDER
                .iter()
                .map(|name| AttributePreference::Single((*name).to_string()))
                .collect(),
        )
    }
}

impl SelectorOrder {
    /// Create an order from parsed entries
    #[must_use]
    pub fn new(entries: Vec<AttributePreference>) -> Self {
        Self(entries)
    }

    /// Parse a list of entries
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> PinpointResult<Self> {
        entries
            .iter()
            .map(|e| AttributePreference::parse(e.as_ref()))
            .collect::<PinpointResult<Vec<_>>>()
            .map(Self)
    }

    /// Parse a comma-separated list (`"data-cy, id, class"`)
    pub fn parse_csv(list: &str) -> PinpointResult<Self> {
        let entries: Vec<&str> = list.split(',').filter(|e| !e.trim().is_empty()).collect();
        Self::parse(&entries)
    }

    /// The entries in priority order
    #[must_use]
    pub fn entries(&self) -> &[AttributePreference] {
        &self.0
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the order has no entries (every element falls back to its tag)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names that are neither in [`KNOWN_ATTRIBUTES`] nor `data-*` attributes.
    ///
    /// These are legal but often a typo, so editors can point them out.
    #[must_use]
    pub fn uncommon_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .flat_map(|entry| entry.names().iter().map(String::as_str))
            .filter(|name| !name.starts_with("data-") && !KNOWN_ATTRIBUTES.contains(name))
            .collect()
    }
}

impl fmt::Display for SelectorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&names.join(", "))
    }
}

fn bracket(name: &str, value: &str) -> String {
    format!("[{name}=\"{value}\"]")
}

fn render_single(name: &str, value: &str) -> String {
    match name {
        "id" => format!("#{value}"),
        "class" => {
            let classes: Vec<&str> = value.split_whitespace().collect();
            if classes.is_empty() {
                String::new()
            } else {
                format!(".{}", classes.join("."))
            }
        }
        _ => bracket(name, value),
    }
}

/// Build a selector from an attribute map.
///
/// Returns the render of the first entry in `order` whose attributes are all
/// present (empty values count as absent), or `tag_fallback` otherwise.
#[must_use]
pub fn synthesize(
    attributes: &BTreeMap<String, String>,
    order: &SelectorOrder,
    tag_fallback: &str,
) -> String {
    order
        .entries()
        .iter()
        .find_map(|entry| entry.render(attributes))
        .unwrap_or_else(|| tag_fallback.to_string())
}

/// Build a selector for an element, falling back to its tag name
#[must_use]
pub fn selector_for<E: ElementView>(element: &E, order: &SelectorOrder) -> String {
    order
        .entries()
        .iter()
        .find_map(|entry| entry.render_with(|name| element.attribute(name)))
        .unwrap_or_else(|| element.tag_name())
}
