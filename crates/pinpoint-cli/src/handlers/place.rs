//! Place command handler

use pinpoint::{place, PlacementMode, PlacementRequest, SettingsStore};
use serde::Serialize;

use crate::commands::PlaceArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{to_json, OutputFormat};

/// JSON shape of the place command
#[derive(Debug, Serialize)]
pub struct PlaceReport {
    /// Mode used
    pub mode: PlacementMode,
    /// Computed placement
    pub placement: pinpoint::Placement,
    /// Resolved left coordinate
    pub left: f64,
    /// Resolved top coordinate
    pub top: f64,
}

/// Execute the place command
pub fn execute_place(config: &CliConfig, args: &PlaceArgs) -> CliResult<String> {
    let mode = match args.mode {
        Some(mode) => mode.into(),
        None => config.settings_store().load_or_default().placement_mode(),
    };
    let request = PlacementRequest::new(args.cursor, args.panel, args.viewport).with_mode(mode);
    let placement = place(&request);

    match config.format {
        OutputFormat::Text => Ok(placement.to_css()),
        OutputFormat::Json => {
            let (left, top) = placement.left_top(args.panel, args.viewport);
            to_json(&PlaceReport {
                mode,
                placement,
                left,
                top,
            })
        }
    }
}
