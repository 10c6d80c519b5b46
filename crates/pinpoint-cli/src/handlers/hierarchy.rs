//! Hierarchy command handler

use pinpoint::{build_hierarchy, format_tree};

use super::{load_tree, resolve_order};
use crate::commands::HierarchyArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat};

/// Execute the hierarchy command
pub fn execute_hierarchy(config: &CliConfig, args: &HierarchyArgs) -> CliResult<String> {
    let tree = load_tree(&args.element.tree)?;
    let element = tree.resolve(&args.element.path)?;
    let order = resolve_order(config, args.order.as_deref())?;
    let snapshot = build_hierarchy(&element, &order);

    match config.format {
        OutputFormat::Text => Ok(format_tree(&snapshot)),
        OutputFormat::Json => to_json(&snapshot),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::ElementArgs;
    use crate::handlers::fixtures;

    fn args(tree: &std::path::Path, path: &str) -> HierarchyArgs {
        HierarchyArgs {
            element: ElementArgs {
                tree: tree.to_path_buf(),
                path: path.to_string(),
            },
            order: None,
        }
    }

    #[test]
    fn test_text_tree_for_button() {
        let (_dir, tree, config) = fixtures::workspace();
        let out = execute_hierarchy(&config, &args(&tree, "1")).unwrap();
        assert_eq!(
            out,
            "└─ form #login ↑\n  └─ button [data-cy=\"submit-btn\"] \"Sign in\"\n    └─ \"Sign in\""
        );
    }

    #[test]
    fn test_root_with_several_children_has_no_child_row() {
        let (_dir, tree, config) = fixtures::workspace();
        let out = execute_hierarchy(&config, &args(&tree, "")).unwrap();
        assert_eq!(out, "└─ form #login \"Sign in\"");
    }

    #[test]
    fn test_json_snapshot() {
        let (_dir, tree, config) = fixtures::workspace();
        let config = config.with_format(OutputFormat::Json);
        let out = execute_hierarchy(&config, &args(&tree, "1/0")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["parent"]["tagName"], "button");
        assert_eq!(value["current"]["selector"], "span");
        assert_eq!(value["children"][0]["type"], "text");
        assert_eq!(value["children"][0]["content"], "Sign in");
    }
}
