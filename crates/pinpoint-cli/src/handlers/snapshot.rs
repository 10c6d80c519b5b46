//! Snapshot command handler

use pinpoint::ElementSnapshot;

use super::load_tree;
use crate::commands::SnapshotArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat};

/// Execute the snapshot command
pub fn execute_snapshot(config: &CliConfig, args: &SnapshotArgs) -> CliResult<String> {
    let tree = load_tree(&args.element.tree)?;
    let element = tree.resolve(&args.element.path)?;
    let snapshot = ElementSnapshot::capture(&element);

    match config.format {
        OutputFormat::Text => Ok(format_snapshot(&snapshot)),
        OutputFormat::Json => to_json(&snapshot),
    }
}

/// One `name: value` line per populated field
#[must_use]
pub fn format_snapshot(snapshot: &ElementSnapshot) -> String {
    let mut lines = vec![format!("tagName: {}", snapshot.tag_name)];
    let fields = [
        ("textContent", &snapshot.text_content),
        ("id", &snapshot.id),
        ("className", &snapshot.class_name),
    ];
    for (name, value) in fields {
        if !value.is_empty() {
            lines.push(format!("{name}: {value}"));
        }
    }
    for (key, value) in &snapshot.dataset {
        lines.push(format!("dataset.{key}: {value}"));
    }
    lines.join("\n")
}
