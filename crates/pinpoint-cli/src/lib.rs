//! Pinpoint CLI Library
//!
//! Command-line interface over the Pinpoint core: synthesize selectors,
//! summarize hierarchies and render test snippets for elements of a JSON
//! element tree, compute panel placement, and manage stored settings.

#![warn(missing_docs)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{
    parse_point, parse_size, Cli, ColorArg, Commands, ElementArgs, FormatArg, HierarchyArgs,
    ModeArg, PlaceArgs, PresetsArgs, RenderArgs, SelectorArgs, SettingsAction, SettingsArgs,
    SnapshotArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{heading, to_json, OutputFormat, Reporter};
