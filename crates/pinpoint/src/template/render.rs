//! Snippet rendering with error containment.
//!
//! Parse → registry lookup → strategy → string. An unknown strategy renders
//! the selector unchanged; a strategy that cannot run also yields the
//! selector, and [`try_render`] reports why.

use tracing::{debug, warn};

use super::config::{parse, TemplateConfig};
use super::strategy::Template;
use crate::dom::ElementSnapshot;
use crate::result::{PinpointError, PinpointResult};

/// Render a snippet, surfacing strategy failures.
///
/// Unknown strategy names are not an error here: they resolve to the
/// identity strategy. An empty strategy result is replaced by the selector.
pub fn try_render(
    config: &TemplateConfig,
    element: &ElementSnapshot,
    selector: &str,
) -> PinpointResult<String> {
    let template = match Template::from_config(config) {
        Ok(template) => template,
        Err(PinpointError::UnknownStrategy { name }) => {
            debug!(strategy = %name, "unknown template strategy, using selector");
            Template::Selector
        }
        Err(e) => return Err(e),
    };

    debug!(strategy = %template.kind(), selector, "rendering snippet");
    let rendered = template.apply(element, selector);
    if rendered.is_empty() {
        Ok(selector.to_string())
    } else {
        Ok(rendered)
    }
}

/// Render a snippet; never fails, falling back to the selector
#[must_use]
pub fn render(config: &TemplateConfig, element: &ElementSnapshot, selector: &str) -> String {
    try_render(config, element, selector).unwrap_or_else(|e| {
        warn!(error = %e, "template render failed, using selector");
        selector.to_string()
    })
}

/// Parse a raw configuration string and render it
#[must_use]
pub fn render_raw(raw: &str, element: &ElementSnapshot, selector: &str) -> String {
    render(&parse(raw), element, selector)
}
