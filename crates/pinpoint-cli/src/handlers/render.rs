//! Render command handler

use pinpoint::template::{preset, PRESETS};
use pinpoint::{
    build_hierarchy, copy_snippet, preview, selector_for, ElementSnapshot, InProcessChannel,
    RenderRequest, SettingsStore,
};
use serde::Serialize;

use super::{load_tree, resolve_order};
use crate::commands::RenderArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{to_json, OutputFormat, Reporter};

/// JSON shape of the render command
#[derive(Debug, Serialize)]
pub struct RenderReport {
    /// Text to copy
    pub text: String,
    /// Set when the selector was copied because rendering failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Template configuration chosen by flags, falling back to the stored one
pub fn resolve_template(config: &CliConfig, args: &RenderArgs) -> CliResult<String> {
    if let Some(raw) = &args.config {
        return Ok(raw.clone());
    }
    if let Some(name) = &args.preset {
        return preset_config(name);
    }
    Ok(config.settings_store().load_or_default().template_config)
}

/// Look up a preset, listing the known names on a miss
pub fn preset_config(name: &str) -> CliResult<String> {
    preset(name).map(str::to_string).ok_or_else(|| {
        let known: Vec<&str> = PRESETS.iter().map(|(name, _)| *name).collect();
        CliError::invalid_argument(format!(
            "unknown preset '{name}' (available: {})",
            known.join(", ")
        ))
    })
}

/// Execute the render command
pub fn execute_render(
    config: &CliConfig,
    args: &RenderArgs,
    reporter: &Reporter,
) -> CliResult<String> {
    let tree = load_tree(&args.element.tree)?;
    let element = tree.resolve(&args.element.path)?;
    let order = resolve_order(config, args.order.as_deref())?;
    let template = resolve_template(config, args)?;

    let request = RenderRequest::new(
        template,
        ElementSnapshot::capture(&element),
        selector_for(&element, &order),
    )
    .with_hierarchy(build_hierarchy(&element, &order));

    let outcome = copy_snippet(&InProcessChannel, &request);
    if let Some(notice) = &outcome.notice {
        reporter.failure(notice);
    } else if config.verbosity.is_verbose() {
        reporter.info(&format!("Copied: {}", preview(&outcome.text)));
    }

    match config.format {
        OutputFormat::Text => Ok(outcome.text),
        OutputFormat::Json => to_json(&RenderReport {
            text: outcome.text,
            notice: outcome.notice,
        }),
    }
}
