//! Template configuration parsing.
//!
//! A configuration is either a JSON object `{"type": ..., "options": {...}}`
//! or a bare strategy name such as `cypress`. Parsing never fails: anything
//! that is not a structured object is taken as the strategy name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::strategy::StrategyKind;
use crate::result::{PinpointError, PinpointResult};

/// Configuration used when nothing is stored
pub const DEFAULT_TEMPLATE_CONFIG: &str = "{\n  \"type\": \"selector\"\n}";

/// Built-in presets offered in the settings panel
pub const PRESETS: [(&str, &str); 3] = [
    (
        "cypress",
        "{\n  \"type\": \"cypress\",\n  \"options\": {\n    \"command\": \"get\"\n  }\n}",
    ),
    (
        "playwright",
        "{\n  \"type\": \"playwright\",\n  \"options\": {\n    \"method\": \"locator\"\n  }\n}",
    ),
    (
        "selenium",
        "{\n  \"type\": \"selenium\",\n  \"options\": {\n    \"method\": \"cssSelector\"\n  }\n}",
    ),
];

/// Reference text listing every strategy with an example configuration
pub const TEMPLATE_HELP: &str = r#"Available template types and examples:

1. Simple selector:
{ "type": "selector" }

2. Cypress commands:
{ "type": "cypress", "options": { "command": "get", "assertion": "be.visible" } }

3. Playwright locators:
{ "type": "playwright", "options": { "method": "locator", "action": "click" } }

4. Playwright by role:
{ "type": "playwright", "options": { "role": "button", "action": "click" } }

5. Selenium:
{ "type": "selenium", "options": { "method": "cssSelector" } }

6. TestCafe:
{ "type": "testcafe" }

7. Element info:
{ "type": "element-info", "options": { "includeTag": true, "includeText": true, "includeId": true } }

8. Data attributes:
{ "type": "data-attribute", "options": { "attribute": "data-cy" } }

9. Custom template:
{ "type": "custom-format", "options": { "template": "${element.tagName} - ${element.textContent}" } }

Custom template tokens: ${selector} ${element.tagName} ${element.textContent}
${element.id} ${element.className} ${element.dataCy} ${element.role}
"#;

/// Strategy name plus its raw options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Strategy name
    #[serde(rename = "type")]
    pub kind: String,
    /// Strategy-specific options
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self::named(StrategyKind::Selector.name())
    }
}

impl TemplateConfig {
    /// Configuration for a strategy with no options
    #[must_use]
    pub fn named(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            options: Map::new(),
        }
    }

    /// Add an option
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The registry entry this configuration names, if any
    #[must_use]
    pub fn strategy(&self) -> Option<StrategyKind> {
        StrategyKind::from_name(&self.kind)
    }
}

/// Parse a raw configuration string.
///
/// `/* ... */` comments outside string literals are ignored, so a stored
/// configuration may carry its own help text. Input that is neither an object
/// nor a JSON string becomes the strategy name verbatim.
#[must_use]
pub fn parse(raw: &str) -> TemplateConfig {
    try_parse(raw).unwrap_or_else(|e| {
        debug!(error = %e, "template config is not an object, using it as a type name");
        TemplateConfig::named(raw)
    })
}

/// Parse a raw configuration string, reporting input that is not structured.
///
/// # Errors
///
/// Returns [`PinpointError::ConfigParse`] when the input is neither a JSON
/// object nor a JSON string. [`parse`] recovers from this by treating the
/// input as a bare type name.
pub fn try_parse(raw: &str) -> PinpointResult<TemplateConfig> {
    let cleaned = strip_block_comments(raw);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Ok(TemplateConfig::default());
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => Ok(from_object(object)),
        Ok(Value::String(name)) => Ok(TemplateConfig::named(name.trim())),
        Ok(other) => Err(PinpointError::ConfigParse {
            message: format!("expected an object, found {other}"),
        }),
        Err(e) => Err(PinpointError::ConfigParse {
            message: e.to_string(),
        }),
    }
}

fn from_object(mut object: Map<String, Value>) -> TemplateConfig {
    let kind = match object.remove("type") {
        Some(Value::String(kind)) if !kind.trim().is_empty() => kind.trim().to_string(),
        _ => StrategyKind::Selector.name().to_string(),
    };
    let options = match object.remove("options") {
        Some(Value::Object(options)) => options,
        _ => Map::new(),
    };
    TemplateConfig { kind, options }
}

/// Look up a preset configuration by name
#[must_use]
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .map(|(_, config)| *config)
}

/// The default configuration followed by the help text as a comment
#[must_use]
pub fn default_config_with_help() -> String {
    format!("{DEFAULT_TEMPLATE_CONFIG}\n\n/* {TEMPLATE_HELP}*/")
}

fn strip_block_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            // An unterminated comment runs to the end of input
            let mut prev = '\0';
            for inner in chars.by_ref() {
                if prev == '*' && inner == '/' {
                    break;
                }
                prev = inner;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name_equals_object_form() {
        assert_eq!(parse("cypress"), parse(r#"{"type":"cypress"}"#));
    }

    #[test]
    fn test_object_with_options() {
        let config = parse(r#"{"type":"playwright","options":{"role":"button","action":"click"}}"#);
        assert_eq!(config.kind, "playwright");
        assert_eq!(config.options.get("role").unwrap(), "button");
        assert_eq!(config.strategy(), Some(StrategyKind::Playwright));
    }

    #[test]
    fn test_malformed_json_becomes_type_name() {
        let config = parse(r#"{"type": "cypress""#);
        assert_eq!(config.kind, r#"{"type": "cypress""#);
        assert!(config.options.is_empty());
        assert_eq!(config.strategy(), None);
    }

    #[test]
    fn test_unstructured_input_is_kept_verbatim() {
        let config = parse(" cypress\n");
        assert_eq!(config.kind, " cypress\n");
        assert_eq!(config.strategy(), None);
        assert_eq!(parse("cypress").strategy(), Some(StrategyKind::Cypress));
    }

    #[test]
    fn test_try_parse_reports_bare_names() {
        let err = try_parse("cypress").unwrap_err();
        assert!(matches!(err, PinpointError::ConfigParse { .. }));
        assert!(matches!(try_parse("42"), Err(PinpointError::ConfigParse { .. })));
        assert_eq!(try_parse(r#"{"type":"cypress"}"#).unwrap().kind, "cypress");
    }

    #[test]
    fn test_empty_input_is_selector() {
        assert_eq!(parse("   ").kind, "selector");
        assert_eq!(parse("").kind, "selector");
    }

    #[test]
    fn test_json_string_literal_is_type_name() {
        assert_eq!(parse(r#""selenium""#).kind, "selenium");
    }

    #[test]
    fn test_object_without_type_is_selector() {
        let config = parse(r#"{"options":{"command":"get"}}"#);
        assert_eq!(config.kind, "selector");
        assert_eq!(config.options.len(), 1);
    }

    #[test]
    fn test_non_object_options_are_dropped() {
        let config = parse(r#"{"type":"cypress","options":[1,2]}"#);
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_comments_are_ignored() {
        let config = parse("{\"type\": \"testcafe\"} /* help */");
        assert_eq!(config.kind, "testcafe");
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let config = parse(r#"{"type":"custom-format","options":{"template":"a/*b*/c"}}"#);
        assert_eq!(config.options.get("template").unwrap(), "a/*b*/c");
    }

    #[test]
    fn test_default_with_help_parses_to_selector() {
        let config = parse(&default_config_with_help());
        assert_eq!(config, TemplateConfig::default());
    }

    #[test]
    fn test_presets_parse() {
        for (name, raw) in PRESETS {
            let config = parse(raw);
            assert_eq!(config.kind, name);
            assert!(config.strategy().is_some());
        }
        assert!(preset("Cypress").is_some());
        assert!(preset("puppeteer").is_none());
    }

    #[test]
    fn test_builder_options() {
        let config = TemplateConfig::named("cypress").with_option("assertion", "be.visible");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"type":"cypress","options":{"assertion":"be.visible"}}"#);
    }
}
