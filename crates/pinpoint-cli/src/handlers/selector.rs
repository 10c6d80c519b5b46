//! Selector command handler

use pinpoint::{selector_for, ElementView};
use serde::Serialize;
use tracing::debug;

use super::{load_tree, resolve_order};
use crate::commands::SelectorArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat};

/// JSON shape of the selector command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorReport {
    /// Element tag name
    pub tag_name: String,
    /// Synthesized selector
    pub selector: String,
    /// Preference order used
    pub order: String,
}

/// Execute the selector command
pub fn execute_selector(config: &CliConfig, args: &SelectorArgs) -> CliResult<String> {
    let tree = load_tree(&args.element.tree)?;
    let element = tree.resolve(&args.element.path)?;
    let order = resolve_order(config, args.order.as_deref())?;

    let selector = selector_for(&element, &order);
    debug!(path = %args.element.path, %selector, "selector synthesized");

    match config.format {
        OutputFormat::Text => Ok(selector),
        OutputFormat::Json => to_json(&SelectorReport {
            tag_name: element.tag_name(),
            selector,
            order: order.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::ElementArgs;
    use crate::handlers::fixtures;

    fn args(tree: &std::path::Path, path: &str, order: Option<&str>) -> SelectorArgs {
        SelectorArgs {
            element: ElementArgs {
                tree: tree.to_path_buf(),
                path: path.to_string(),
            },
            order: order.map(str::to_string),
        }
    }

    #[test]
    fn test_default_order() {
        let (_dir, tree, config) = fixtures::workspace();
        assert_eq!(execute_selector(&config, &args(&tree, "", None)).unwrap(), "#login");
        assert_eq!(
            execute_selector(&config, &args(&tree, "1", None)).unwrap(),
            "[data-cy=\"submit-btn\"]"
        );
        assert_eq!(execute_selector(&config, &args(&tree, "0", None)).unwrap(), "input");
    }

    #[test]
    fn test_composite_order_override() {
        let (_dir, tree, config) = fixtures::workspace();
        let out = execute_selector(&config, &args(&tree, "0", Some("data-testid+name"))).unwrap();
        assert_eq!(out, "[data-testid=\"email\"][name=\"email\"]");
    }

    #[test]
    fn test_json_output() {
        let (_dir, tree, config) = fixtures::workspace();
        let config = config.with_format(OutputFormat::Json);
        let out = execute_selector(&config, &args(&tree, "1", Some("class"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["selector"], ".btn.primary");
        assert_eq!(value["tagName"], "button");
        assert_eq!(value["order"], "class");
    }

    #[test]
    fn test_bad_path() {
        let (_dir, tree, config) = fixtures::workspace();
        let err = execute_selector(&config, &args(&tree, "5", None)).unwrap_err();
        assert!(err.to_string().contains("No element at path '5'"));
    }
}
