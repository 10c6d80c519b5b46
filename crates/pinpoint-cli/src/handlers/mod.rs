//! Command handlers - kept out of main.rs for testability
//!
//! Each handler returns the text destined for stdout; status messages go
//! through the [`Reporter`](crate::output::Reporter) on stderr.

pub mod hierarchy;
pub mod place;
pub mod presets;
pub mod render;
pub mod selector;
pub mod serve;
pub mod settings;
pub mod snapshot;

use pinpoint::{DomTree, SelectorOrder, SettingsStore};
use std::fs;
use std::path::Path;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

pub use hierarchy::execute_hierarchy;
pub use place::execute_place;
pub use presets::execute_presets;
pub use render::execute_render;
pub use selector::execute_selector;
pub use serve::execute_serve;
pub use settings::execute_settings;
pub use snapshot::execute_snapshot;

/// Load a JSON element tree from disk
pub fn load_tree(path: &Path) -> CliResult<DomTree> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::invalid_argument(format!("cannot read {}: {e}", path.display())))?;
    Ok(DomTree::from_json(&json)?)
}

/// The `--order` override, or the stored preference order
pub fn resolve_order(config: &CliConfig, order: Option<&str>) -> CliResult<SelectorOrder> {
    match order {
        Some(list) => Ok(SelectorOrder::parse_csv(list)?),
        None => Ok(config.settings_store().load_or_default().selector_order),
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_tree_missing_file() {
        let err = load_tree(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn test_load_tree_malformed() {
        let (dir, _, _) = fixtures::workspace();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"tag\": ").unwrap();
        assert!(matches!(load_tree(&path), Err(CliError::Pinpoint(_))));
    }

    #[test]
    fn test_resolve_order_override_and_default() {
        let (_dir, _, config) = fixtures::workspace();
        let order = resolve_order(&config, Some("id, class")).unwrap();
        assert_eq!(order.to_string(), "id, class");
        assert_eq!(resolve_order(&config, None).unwrap(), SelectorOrder::default());
        assert!(resolve_order(&config, Some("id,+name")).is_err());
    }
}
