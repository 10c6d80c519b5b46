//! The closed registry of rendering strategies.
//!
//! Every strategy is a variant of [`Template`] carrying its own typed options.
//! Dispatch is an exhaustive match, so no configuration can reach code that is
//! not listed here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::config::TemplateConfig;
use crate::dom::ElementSnapshot;
use crate::result::{PinpointError, PinpointResult};

/// Names of the registry entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// The selector itself
    Selector,
    /// `cy.get(...)`
    Cypress,
    /// `page.locator(...)` / `page.getByRole(...)`
    Playwright,
    /// `driver.findElement(By...)`
    Selenium,
    /// `Selector(...)`
    TestCafe,
    /// Tag / text / id / class summary
    ElementInfo,
    /// Attribute selector for a chosen attribute
    DataAttribute,
    /// Token substitution into a user template
    CustomFormat,
}

impl StrategyKind {
    /// Every registry entry
    pub const ALL: [Self; 8] = [
        Self::Selector,
        Self::Cypress,
        Self::Playwright,
        Self::Selenium,
        Self::TestCafe,
        Self::ElementInfo,
        Self::DataAttribute,
        Self::CustomFormat,
    ];

    /// The name used in configurations
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Selector => "selector",
            Self::Cypress => "cypress",
            Self::Playwright => "playwright",
            Self::Selenium => "selenium",
            Self::TestCafe => "testcafe",
            Self::ElementInfo => "element-info",
            Self::DataAttribute => "data-attribute",
            Self::CustomFormat => "custom-format",
        }
    }

    /// Look up an entry by its configuration name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cypress query commands that take a selector argument
pub const CYPRESS_QUERY_COMMANDS: [&str; 2] = ["get", "find"];

/// Options for `cypress`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CypressOptions {
    /// Query command, `get` by default
    pub command: Option<String>,
    /// Chained `.should(...)` assertion
    pub assertion: Option<String>,
    /// Expected value for the assertion, element text by default
    pub expected_value: Option<String>,
}

/// Options for `playwright`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaywrightOptions {
    /// Page method, `locator` by default
    pub method: Option<String>,
    /// Chained action such as `click`
    pub action: Option<String>,
    /// ARIA role for a role-based locator
    pub role: Option<String>,
}

/// Options for `selenium`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeleniumOptions {
    /// `By` method, `cssSelector` by default
    pub method: Option<String>,
}

/// Options for `element-info`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementInfoOptions {
    /// Include the tag name (default on)
    pub include_tag: Option<bool>,
    /// Include the quoted text (default on)
    pub include_text: Option<bool>,
    /// Include `#id` (default off)
    pub include_id: Option<bool>,
    /// Include `.class` (default off)
    pub include_class: Option<bool>,
}

/// Options for `data-attribute`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataAttributeOptions {
    /// Attribute to look up, `data-cy` by default
    pub attribute: Option<String>,
}

/// Options for `custom-format`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomFormatOptions {
    /// Template text, `${selector}` by default
    pub template: Option<String>,
}

/// Placeholder for the selector in custom templates
pub const TOKEN_SELECTOR: &str = "${selector}";
/// Placeholder for the tag name
pub const TOKEN_TAG_NAME: &str = "${element.tagName}";
/// Placeholder for the trimmed text
pub const TOKEN_TEXT_CONTENT: &str = "${element.textContent}";
/// Placeholder for the `id` attribute
pub const TOKEN_ID: &str = "${element.id}";
/// Placeholder for the `class` attribute
pub const TOKEN_CLASS_NAME: &str = "${element.className}";
/// Placeholder for the `data-cy` attribute
pub const TOKEN_DATA_CY: &str = "${element.dataCy}";
/// Placeholder for the `role` attribute
pub const TOKEN_ROLE: &str = "${element.role}";

/// A resolved strategy with its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Identity
    Selector,
    /// Cypress query
    Cypress(CypressOptions),
    /// Playwright locator
    Playwright(PlaywrightOptions),
    /// Selenium `findElement`
    Selenium(SeleniumOptions),
    /// TestCafe `Selector`
    TestCafe,
    /// Descriptive summary
    ElementInfo(ElementInfoOptions),
    /// Attribute selector
    DataAttribute(DataAttributeOptions),
    /// Token substitution
    CustomFormat(CustomFormatOptions),
}

fn decode<T: DeserializeOwned>(kind: StrategyKind, config: &TemplateConfig) -> PinpointResult<T> {
    serde_json::from_value(Value::Object(config.options.clone()))
        .map_err(|e| PinpointError::strategy(kind.name(), format!("invalid options: {e}")))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl Template {
    /// Resolve a configuration against the registry.
    ///
    /// Fails with `UnknownStrategy` for names outside the registry and with
    /// `StrategyExecution` when the options do not fit the strategy.
    pub fn from_config(config: &TemplateConfig) -> PinpointResult<Self> {
        let kind = config
            .strategy()
            .ok_or_else(|| PinpointError::UnknownStrategy {
                name: config.kind.clone(),
            })?;

        Ok(match kind {
            StrategyKind::Selector => Self::Selector,
            StrategyKind::Cypress => Self::Cypress(decode(kind, config)?),
            StrategyKind::Playwright => Self::Playwright(decode(kind, config)?),
            StrategyKind::Selenium => Self::Selenium(decode(kind, config)?),
            StrategyKind::TestCafe => Self::TestCafe,
            StrategyKind::ElementInfo => Self::ElementInfo(decode(kind, config)?),
            StrategyKind::DataAttribute => Self::DataAttribute(decode(kind, config)?),
            StrategyKind::CustomFormat => Self::CustomFormat(decode(kind, config)?),
        })
    }

    /// Registry entry of this template
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Selector => StrategyKind::Selector,
            Self::Cypress(_) => StrategyKind::Cypress,
            Self::Playwright(_) => StrategyKind::Playwright,
            Self::Selenium(_) => StrategyKind::Selenium,
            Self::TestCafe => StrategyKind::TestCafe,
            Self::ElementInfo(_) => StrategyKind::ElementInfo,
            Self::DataAttribute(_) => StrategyKind::DataAttribute,
            Self::CustomFormat(_) => StrategyKind::CustomFormat,
        }
    }

    /// Produce the snippet for an element
    #[must_use]
    pub fn apply(&self, element: &ElementSnapshot, selector: &str) -> String {
        match self {
            Self::Selector => selector.to_string(),
            Self::Cypress(options) => cypress(options, element, selector),
            Self::Playwright(options) => playwright(options, element, selector),
            Self::Selenium(options) => {
                let method = non_empty(options.method.as_ref()).unwrap_or("cssSelector");
                format!("driver.findElement(By.{method}('{selector}'))")
            }
            Self::TestCafe => format!("Selector('{selector}')"),
            Self::ElementInfo(options) => element_info(options, element, selector),
            Self::DataAttribute(options) => {
                let name = non_empty(options.attribute.as_ref()).unwrap_or("data-cy");
                element
                    .attribute(name)
                    .map_or_else(|| selector.to_string(), |value| format!("[{name}=\"{value}\"]"))
            }
            Self::CustomFormat(options) => {
                let template = options.template.as_deref().unwrap_or(TOKEN_SELECTOR);
                custom_format(template, element, selector)
            }
        }
    }
}

fn cypress(options: &CypressOptions, element: &ElementSnapshot, selector: &str) -> String {
    let command = match non_empty(options.command.as_ref()) {
        Some(command) if CYPRESS_QUERY_COMMANDS.contains(&command) => command,
        Some(command) => {
            tracing::debug!(command, "cypress command does not take a selector, using get");
            "get"
        }
        None => "get",
    };

    let assertion = non_empty(options.assertion.as_ref()).map_or_else(String::new, |assertion| {
        let expected = non_empty(options.expected_value.as_ref())
            .or_else(|| element.text())
            .unwrap_or("");
        format!(".should('{assertion}', '{expected}')")
    });

    format!("cy.{command}('{selector}'){assertion}")
}

fn playwright(options: &PlaywrightOptions, element: &ElementSnapshot, selector: &str) -> String {
    let action = non_empty(options.action.as_ref())
        .map_or_else(String::new, |action| format!(".{action}()"));

    if let (Some(role), Some(text)) = (non_empty(options.role.as_ref()), element.text()) {
        return format!("await page.getByRole('{role}', {{ name: '{text}' }}){action}");
    }

    let method = non_empty(options.method.as_ref()).unwrap_or("locator");
    format!("await page.{method}('{selector}'){action}")
}

fn element_info(options: &ElementInfoOptions, element: &ElementSnapshot, selector: &str) -> String {
    let mut parts = Vec::with_capacity(4);

    if options.include_tag.unwrap_or(true) {
        parts.push(element.tag_name.clone());
    }
    if options.include_text.unwrap_or(true) {
        if let Some(text) = element.text() {
            parts.push(format!("\"{text}\""));
        }
    }
    if options.include_id.unwrap_or(false) && !element.id.is_empty() {
        parts.push(format!("#{}", element.id));
    }
    if options.include_class.unwrap_or(false) {
        let classes: Vec<&str> = element.class_name.split_whitespace().collect();
        if !classes.is_empty() {
            parts.push(format!(".{}", classes.join(".")));
        }
    }

    parts.retain(|part| !part.is_empty());
    if parts.is_empty() {
        selector.to_string()
    } else {
        parts.join(" - ")
    }
}

/// Substitute placeholder tokens in a single left-to-right pass.
///
/// Substituted values are never rescanned, and unknown `${...}` markers are
/// copied through unchanged.
#[must_use]
pub fn custom_format(template: &str, element: &ElementSnapshot, selector: &str) -> String {
    let values: [(&str, &str); 7] = [
        (TOKEN_SELECTOR, selector),
        (TOKEN_TAG_NAME, element.tag_name.as_str()),
        (TOKEN_TEXT_CONTENT, element.text_content.as_str()),
        (TOKEN_ID, element.id.as_str()),
        (TOKEN_CLASS_NAME, element.class_name.as_str()),
        (TOKEN_DATA_CY, element.attribute("data-cy").unwrap_or("")),
        (TOKEN_ROLE, element.attribute("role").unwrap_or("")),
    ];

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find("${") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match values.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push_str("${");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}
