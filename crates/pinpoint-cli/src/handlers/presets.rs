//! Presets command handler

use pinpoint::template::{default_config_with_help, parse, TemplateConfig, PRESETS};
use std::collections::BTreeMap;

use super::render::preset_config;
use crate::commands::PresetsArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{heading, to_json, OutputFormat};

/// Execute the presets command
pub fn execute_presets(config: &CliConfig, args: &PresetsArgs) -> CliResult<String> {
    if args.reference {
        return Ok(default_config_with_help());
    }

    let selected: Vec<(&str, String)> = match &args.name {
        Some(name) => vec![(name.as_str(), preset_config(name)?)],
        None => PRESETS
            .iter()
            .map(|(name, raw)| (*name, (*raw).to_string()))
            .collect(),
    };

    match config.format {
        OutputFormat::Text => {
            let color = config.color.should_color();
            Ok(selected
                .iter()
                .map(|(name, raw)| format!("{}\n{raw}", heading(name, color)))
                .collect::<Vec<_>>()
                .join("\n\n"))
        }
        OutputFormat::Json => {
            let parsed: BTreeMap<String, TemplateConfig> = selected
                .iter()
                .map(|(name, raw)| (name.to_lowercase(), parse(raw)))
                .collect();
            to_json(&parsed)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    fn config() -> CliConfig {
        CliConfig::new().with_color(ColorChoice::Never)
    }

    #[test]
    fn test_lists_all_presets() {
        let args = PresetsArgs {
            name: None,
            reference: false,
        };
        let out = execute_presets(&config(), &args).unwrap();
        assert!(out.starts_with("cypress\n{"));
        assert!(out.contains("\n\nplaywright\n"));
        assert!(out.contains("\"method\": \"cssSelector\""));
    }

    #[test]
    fn test_single_preset_json() {
        let args = PresetsArgs {
            name: Some("Playwright".to_string()),
            reference: false,
        };
        let out = execute_presets(&config().with_format(OutputFormat::Json), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["playwright"]["type"], "playwright");
        assert_eq!(value["playwright"]["options"]["method"], "locator");
    }

    #[test]
    fn test_reference_text() {
        let args = PresetsArgs {
            name: None,
            reference: true,
        };
        let out = execute_presets(&config(), &args).unwrap();
        assert!(out.starts_with("{\n  \"type\": \"selector\"\n}"));
        assert!(out.contains("custom-format"));
    }
}
