//! Pinpoint: selector synthesis and test-snippet rendering for page elements
//!
//! Pinpoint is the core of an element inspector. Given an element of a host
//! document it produces a stable attribute selector, a short parent/current/child
//! summary, a copy-ready snippet for a test framework, and the on-screen
//! position of the floating panel that shows all of it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │ ElementView  │──►│ selector         │──►│ template       │──► snippet
//! │ (host DOM)   │   │ hierarchy        │   │ parse/render   │
//! └──────────────┘   └──────────────────┘   └────────────────┘
//!        │                                          ▲
//!        └────────► ElementSnapshot ───── bridge ───┘
//!
//! placement: cursor + panel + viewport ──► left/top
//! ```
//!
//! # Example
//!
//! ```
//! use pinpoint::{render_raw, selector_for, DomNode, DomTree, ElementSnapshot, SelectorOrder};
//!
//! let tree = DomTree::from_root(
//!     DomNode::new("button")
//!         .with_attr("data-cy", "submit-btn")
//!         .with_text("Submit"),
//! );
//! let button = tree.root();
//! let selector = selector_for(&button, &SelectorOrder::default());
//! let snippet = render_raw("cypress", &ElementSnapshot::capture(&button), &selector);
//! assert_eq!(snippet, "cy.get('[data-cy=\"submit-btn\"]')");
//! ```

#![warn(missing_docs)]

/// Render request/response exchange and the copy flow
pub mod bridge;
/// Element tree access and snapshots
pub mod dom;
pub mod hierarchy;
/// Floating panel placement
#[allow(clippy::suboptimal_flops)]
pub mod placement;
mod result;
pub mod selector;
pub mod settings;
pub mod template;

pub use bridge::{
    copy_snippet, handle_request_line, preview, respond, serve_lines, CopyOutcome,
    InProcessChannel, RenderChannel, RenderRequest, RenderResponse, FALLBACK_NOTICE_PREFIX,
};
pub use dom::{DomNode, DomTree, ElementSnapshot, ElementView, NodeRef};
pub use hierarchy::{
    build as build_hierarchy, format_tree, ElementDescriptor, HierarchyChild, HierarchySnapshot,
    TextPreview,
};
pub use placement::{place, Placement, PlacementMode, PlacementRequest, Point, Size};
pub use result::{PinpointError, PinpointResult};
pub use selector::{
    selector_for, synthesize, AttributePreference, SelectorOrder, DEFAULT_SELECTOR_ORDER,
    KNOWN_ATTRIBUTES,
};
pub use settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore};
pub use template::{
    parse as parse_template, render, render_raw, try_parse as try_parse_template, try_render,
    StrategyKind, Template, TemplateConfig,
};
