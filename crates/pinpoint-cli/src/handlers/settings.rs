//! Settings command handler

use pinpoint::template::try_parse;
use pinpoint::{SelectorOrder, Settings, SettingsStore, KNOWN_ATTRIBUTES};
use tracing::info;

use super::render::preset_config;
use crate::commands::{SettingsAction, SettingsArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat, Reporter};

/// Execute the settings command
pub fn execute_settings(
    config: &CliConfig,
    args: &SettingsArgs,
    reporter: &Reporter,
) -> CliResult<String> {
    let store = config.settings_store();
    let action = args.action.clone().unwrap_or(SettingsAction::Show);

    let settings = match action {
        SettingsAction::Show => return show(config, &store.load()?),
        SettingsAction::SetOrder { order } => {
            let order = SelectorOrder::parse_csv(&order)?;
            check_order(&order, reporter);
            Settings {
                selector_order: order,
                ..store.load_or_default()
            }
        }
        SettingsAction::SetTemplate { config: raw, preset } => {
            let raw = match (raw, preset) {
                (_, Some(name)) => preset_config(&name)?,
                (Some(raw), None) => raw,
                (None, None) => String::new(),
            };
            check_template(&raw, reporter);
            store.load_or_default().with_template_config(raw)
        }
        SettingsAction::SetFixed { fixed } => store.load_or_default().with_popup_fixed(fixed),
        SettingsAction::Reset => Settings::default(),
    };

    store.save(&settings)?;
    reporter.success(&format!("Settings saved to {}", store.path().display()));
    show(config, &settings)
}

fn check_order(order: &SelectorOrder, reporter: &Reporter) {
    let uncommon = order.uncommon_names();
    if !uncommon.is_empty() {
        reporter.warning(&format!(
            "Uncommon attribute name(s): {} (known: {})",
            uncommon.join(", "),
            KNOWN_ATTRIBUTES.join(", ")
        ));
    }
}

fn check_template(raw: &str, reporter: &Reporter) {
    if let Err(e) = try_parse(raw) {
        info!(error = %e, "template config stored as a bare strategy name");
    }
    let parsed = pinpoint::parse_template(raw);
    if parsed.strategy().is_none() {
        reporter.warning(&format!(
            "Unknown template type '{}', snippets will use the plain selector",
            parsed.kind
        ));
    }
}

fn show(config: &CliConfig, settings: &Settings) -> CliResult<String> {
    match config.format {
        OutputFormat::Json => to_json(settings),
        OutputFormat::Text => Ok(format!(
            "Selector order: {}\nFixed panel: {}\nTemplate: {}",
            settings.selector_order,
            settings.popup_fixed,
            settings.template().kind,
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::handlers::fixtures;

    fn run(config: &CliConfig, action: SettingsAction) -> CliResult<String> {
        execute_settings(
            config,
            &SettingsArgs {
                action: Some(action),
            },
            &Reporter::new(false, true),
        )
    }

    #[test]
    fn test_show_defaults() {
        let (_dir, _, config) = fixtures::workspace();
        let out = run(&config, SettingsAction::Show).unwrap();
        assert_eq!(
            out,
            "Selector order: data-cy, id, class\nFixed panel: false\nTemplate: selector"
        );
    }

    #[test]
    fn test_set_order_persists() {
        let (_dir, _, config) = fixtures::workspace();
        run(
            &config,
            SettingsAction::SetOrder {
                order: "data-testid+name, id".to_string(),
            },
        )
        .unwrap();
        let stored = config.settings_store().load().unwrap();
        assert_eq!(stored.selector_order.to_string(), "data-testid+name, id");
    }

    #[test]
    fn test_set_order_rejects_empty_part() {
        let (_dir, _, config) = fixtures::workspace();
        let result = run(
            &config,
            SettingsAction::SetOrder {
                order: "data-cy+".to_string(),
            },
        );
        assert!(result.is_err());
        assert!(!config.settings_path.exists());
    }

    #[test]
    fn test_set_template_from_preset() {
        let (_dir, _, config) = fixtures::workspace();
        run(
            &config,
            SettingsAction::SetTemplate {
                config: None,
                preset: Some("cypress".to_string()),
            },
        )
        .unwrap();
        assert_eq!(config.settings_store().load().unwrap().template().kind, "cypress");
    }

    #[test]
    fn test_set_fixed_then_reset() {
        let (_dir, _, config) = fixtures::workspace();
        run(&config, SettingsAction::SetFixed { fixed: true }).unwrap();
        assert!(config.settings_store().load().unwrap().popup_fixed);
        run(&config, SettingsAction::Reset).unwrap();
        assert_eq!(config.settings_store().load().unwrap(), Settings::default());
    }

    #[test]
    fn test_show_json() {
        let (_dir, _, config) = fixtures::workspace();
        let config = config.with_format(OutputFormat::Json);
        let out = run(&config, SettingsAction::Show).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["selector_order"][0], "data-cy");
        assert_eq!(value["popup_fixed"], false);
    }
}
