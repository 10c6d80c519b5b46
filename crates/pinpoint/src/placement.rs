//! Floating-panel placement.
//!
//! In fixed mode the panel sits in the top-right corner of the viewport. In
//! floating mode it follows the cursor at a (20, 20) offset, flips to the
//! other side of the cursor when it would run off the viewport, and is then
//! clamped to a 10px margin.
//!
//! # Oversized panels
//!
//! When `panel + 2 * margin > viewport` on an axis, no position satisfies both
//! margins. The panel then sits at `viewport - panel`, capped to `[0, 10]`:
//! it keeps as much of the leading margin as fits and never crosses the
//! trailing edge while the panel is no larger than the viewport. A panel
//! larger than the viewport sits at `0` and overflows past the trailing edge.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gap between the cursor and the floating panel
pub const CURSOR_OFFSET: f64 = 20.0;

/// Minimum distance between a floating panel and the viewport edges
pub const VIEWPORT_MARGIN: f64 = 10.0;

/// Top margin of the fixed panel
pub const FIXED_TOP: f64 = 20.0;

/// Right margin of the fixed panel
pub const FIXED_RIGHT: f64 = 20.0;

/// A point in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Create a new size
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How the panel is positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    /// Anchored to the top-right corner
    Fixed,
    /// Follows the cursor
    #[default]
    Floating,
}

impl PlacementMode {
    /// Mode for a stored "fixed position" flag
    #[must_use]
    pub const fn from_fixed(fixed: bool) -> Self {
        if fixed {
            Self::Fixed
        } else {
            Self::Floating
        }
    }
}

/// Inputs to [`place`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Last known cursor position
    pub cursor: Point,
    /// Measured panel size
    pub panel: Size,
    /// Viewport size
    pub viewport: Size,
    /// Placement mode
    pub mode: PlacementMode,
}

impl PlacementRequest {
    /// Create a floating-mode request
    #[must_use]
    pub const fn new(cursor: Point, panel: Size, viewport: Size) -> Self {
        Self {
            cursor,
            panel,
            viewport,
            mode: PlacementMode::Floating,
        }
    }

    /// Set the mode
    #[must_use]
    pub const fn with_mode(mut self, mode: PlacementMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Where the panel goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "anchor", rename_all = "lowercase")]
pub enum Placement {
    /// Offsets from the top and right viewport edges
    Corner {
        /// Distance from the top edge
        top: f64,
        /// Distance from the right edge
        right: f64,
    },
    /// Offsets from the top-left corner
    Cursor {
        /// Distance from the left edge
        left: f64,
        /// Distance from the top edge
        top: f64,
    },
}

fn px(value: f64) -> String {
    format!("{value}px")
}

impl Placement {
    /// Left/top coordinates for a panel of `panel` size in `viewport`
    #[must_use]
    pub fn left_top(&self, panel: Size, viewport: Size) -> (f64, f64) {
        match *self {
            Self::Corner { top, right } => (viewport.width - panel.width - right, top),
            Self::Cursor { left, top } => (left, top),
        }
    }

    /// Style declarations applied to the panel element
    #[must_use]
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::Corner { top, right } => vec![
                ("position", "fixed".to_string()),
                ("top", px(top)),
                ("right", px(right)),
                ("left", "auto".to_string()),
            ],
            Self::Cursor { left, top } => vec![
                ("position", "fixed".to_string()),
                ("right", "auto".to_string()),
                ("left", px(left)),
                ("top", px(top)),
            ],
        }
    }

    /// Declarations joined into an inline style string
    #[must_use]
    pub fn to_css(&self) -> String {
        self.css_declarations()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn floating_axis(cursor: f64, panel: f64, viewport: f64) -> f64 {
    let mut position = cursor + CURSOR_OFFSET;
    if position + panel > viewport {
        position = cursor - panel - CURSOR_OFFSET;
    }

    let low = VIEWPORT_MARGIN;
    let high = viewport - panel - VIEWPORT_MARGIN;
    if high < low {
        debug!(panel, viewport, "panel does not fit within margins");
        (viewport - panel).clamp(0.0, VIEWPORT_MARGIN)
    } else {
        position.clamp(low, high)
    }
}

/// Compute the panel position
#[must_use]
pub fn place(request: &PlacementRequest) -> Placement {
    match request.mode {
        PlacementMode::Fixed => Placement::Corner {
            top: FIXED_TOP,
            right: FIXED_RIGHT,
        },
        PlacementMode::Floating => {
            let panel_w = finite(request.panel.width).max(0.0);
            let panel_h = finite(request.panel.height).max(0.0);
            Placement::Cursor {
                left: floating_axis(
                    finite(request.cursor.x),
                    panel_w,
                    finite(request.viewport.width),
                ),
                top: floating_axis(
                    finite(request.cursor.y),
                    panel_h,
                    finite(request.viewport.height),
                ),
            }
        }
    }
}
