//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use pinpoint::{PlacementMode, Point, Size};
use std::path::PathBuf;

use crate::config::ColorChoice;
use crate::output::OutputFormat;

/// Pinpoint: selectors, hierarchy summaries and test snippets for page elements
#[derive(Parser, Debug)]
#[command(name = "pinpoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: FormatArg,

    /// Settings file
    #[arg(
        long,
        env = "PINPOINT_SETTINGS",
        default_value = ".pinpoint.yaml",
        global = true
    )]
    pub settings: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize the selector of an element
    Selector(SelectorArgs),

    /// Summarize an element with its parent and child
    Hierarchy(HierarchyArgs),

    /// Capture the fields sent to the renderer
    Snapshot(SnapshotArgs),

    /// Render a test snippet for an element
    Render(RenderArgs),

    /// Compute the inspector panel position
    Place(PlaceArgs),

    /// List template presets
    Presets(PresetsArgs),

    /// Show or change stored settings
    Settings(SettingsArgs),

    /// Answer JSON-lines render requests on stdin
    Serve,
}

/// Element selection shared by element commands
#[derive(Args, Debug, Clone)]
pub struct ElementArgs {
    /// JSON element tree file
    pub tree: PathBuf,

    /// Child-index path of the element, e.g. 0/2/1 (root when empty)
    #[arg(short, long, default_value = "")]
    pub path: String,
}

/// Arguments for the selector command
#[derive(Parser, Debug)]
pub struct SelectorArgs {
    /// Element to inspect
    #[command(flatten)]
    pub element: ElementArgs,

    /// Attribute preference order, comma-separated (overrides settings)
    #[arg(short, long)]
    pub order: Option<String>,
}

/// Arguments for the hierarchy command
#[derive(Parser, Debug)]
pub struct HierarchyArgs {
    /// Element to inspect
    #[command(flatten)]
    pub element: ElementArgs,

    /// Attribute preference order, comma-separated (overrides settings)
    #[arg(short, long)]
    pub order: Option<String>,
}

/// Arguments for the snapshot command
#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    /// Element to inspect
    #[command(flatten)]
    pub element: ElementArgs,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Element to inspect
    #[command(flatten)]
    pub element: ElementArgs,

    /// Attribute preference order, comma-separated (overrides settings)
    #[arg(short, long)]
    pub order: Option<String>,

    /// Template configuration (overrides settings)
    #[arg(short, long, conflicts_with = "preset")]
    pub config: Option<String>,

    /// Use a named preset (cypress, playwright, selenium)
    #[arg(long)]
    pub preset: Option<String>,
}

/// Arguments for the place command
#[derive(Parser, Debug)]
pub struct PlaceArgs {
    /// Cursor position as X,Y
    #[arg(long, value_parser = parse_point)]
    pub cursor: Point,

    /// Panel size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub panel: Size,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub viewport: Size,

    /// Placement mode (defaults to the stored setting)
    #[arg(long)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the presets command
#[derive(Parser, Debug)]
pub struct PresetsArgs {
    /// Show only this preset
    pub name: Option<String>,

    /// Print the default configuration with the template reference
    #[arg(long)]
    pub reference: bool,
}

/// Arguments for the settings command
#[derive(Parser, Debug)]
pub struct SettingsArgs {
    /// Settings action (defaults to show)
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

/// Settings actions
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// Print the stored settings
    Show,

    /// Replace the attribute preference order
    SetOrder {
        /// Entries, comma-separated; join composite parts with '+'
        order: String,
    },

    /// Replace the template configuration
    SetTemplate {
        /// Configuration string or bare strategy name
        #[arg(required_unless_present = "preset", conflicts_with = "preset")]
        config: Option<String>,

        /// Store a named preset instead
        #[arg(long)]
        preset: Option<String>,
    },

    /// Anchor the panel (true) or let it follow the cursor (false)
    SetFixed {
        /// New value
        #[arg(action = clap::ArgAction::Set)]
        fixed: bool,
    },

    /// Restore defaults
    Reset,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Output format argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Placement mode argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    /// Top-right corner
    Fixed,
    /// Next to the cursor
    Floating,
}

impl From<ModeArg> for PlacementMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Fixed => Self::Fixed,
            ModeArg::Floating => Self::Floating,
        }
    }
}

fn parse_pair(raw: &str, separator: char, what: &str) -> Result<(f64, f64), String> {
    let (a, b) = raw
        .split_once(separator)
        .ok_or_else(|| format!("expected {what}, got '{raw}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{part}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

/// Parse `X,Y`
pub fn parse_point(raw: &str) -> Result<Point, String> {
    parse_pair(raw, ',', "X,Y").map(|(x, y)| Point::new(x, y))
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_size(raw: &str) -> Result<Size, String> {
    let (width, height) = parse_pair(raw, 'x', "WIDTHxHEIGHT")?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("size must not be negative, got '{raw}'"));
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_selector_command() {
            let cli = Cli::parse_from(["pinpoint", "selector", "page.json", "--path", "0/1"]);
            match cli.command {
                Commands::Selector(args) => {
                    assert_eq!(args.element.path, "0/1");
                    assert_eq!(args.element.tree, PathBuf::from("page.json"));
                    assert!(args.order.is_none());
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from([
                "pinpoint", "-vv", "--format", "json", "--settings", "s.yaml", "presets",
            ]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.format, FormatArg::Json));
            assert_eq!(cli.settings, PathBuf::from("s.yaml"));
        }

        #[test]
        fn test_render_config_conflicts_with_preset() {
            let result = Cli::try_parse_from([
                "pinpoint", "render", "t.json", "--config", "cypress", "--preset", "cypress",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_place_command() {
            let cli = Cli::parse_from([
                "pinpoint",
                "place",
                "--cursor",
                "100,200",
                "--panel",
                "300x150",
                "--viewport",
                "1280x720",
                "--mode",
                "fixed",
            ]);
            match cli.command {
                Commands::Place(args) => {
                    assert_eq!(args.cursor, Point::new(100.0, 200.0));
                    assert_eq!(args.panel, Size::new(300.0, 150.0));
                    assert!(matches!(args.mode, Some(ModeArg::Fixed)));
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_settings_set_fixed() {
            let cli = Cli::parse_from(["pinpoint", "settings", "set-fixed", "true"]);
            match cli.command {
                Commands::Settings(SettingsArgs {
                    action: Some(SettingsAction::SetFixed { fixed }),
                }) => assert!(fixed),
                other => panic!("unexpected command: {other:?}"),
            }
        }

        #[test]
        fn test_settings_set_template_requires_value() {
            let result = Cli::try_parse_from(["pinpoint", "settings", "set-template"]);
            assert!(result.is_err());
        }
    }

    mod parser_tests {
        use super::*;

        #[test]
        fn test_parse_point() {
            assert_eq!(parse_point("10, 20.5").unwrap(), Point::new(10.0, 20.5));
            assert!(parse_point("10").is_err());
            assert!(parse_point("a,b").is_err());
        }

        #[test]
        fn test_parse_size() {
            assert_eq!(parse_size("300x200").unwrap(), Size::new(300.0, 200.0));
            assert!(parse_size("300").is_err());
            assert!(parse_size("-1x5").is_err());
        }
    }
}
