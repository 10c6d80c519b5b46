//! Request/response bridge between the inspector and the renderer.
//!
//! The inspector side captures an element into a [`RenderRequest`] and sends
//! it over a [`RenderChannel`]. The renderer side answers with a
//! [`RenderResponse`]. [`copy_snippet`] runs one exchange and always produces
//! text to copy: the rendered snippet, or the selector plus a notice when the
//! exchange failed.
//!
//! Requests are serialized as single-line JSON so a renderer can run out of
//! process and be driven through [`serve_lines`].

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::dom::ElementSnapshot;
use crate::hierarchy::HierarchySnapshot;
use crate::result::{PinpointError, PinpointResult};
use crate::template::{parse, try_render};

/// Notice prefix shown when a snippet could not be rendered
pub const FALLBACK_NOTICE_PREFIX: &str = "Function error, copied selector: ";

/// Preview length for copied text
pub const PREVIEW_LIMIT: usize = 50;

/// Everything the renderer needs for one snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Raw template configuration
    pub template_config: String,
    /// Captured element
    pub element: ElementSnapshot,
    /// Synthesized selector
    pub selector: String,
    /// Hierarchy around the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<HierarchySnapshot>,
}

impl RenderRequest {
    /// Create a request without hierarchy context
    #[must_use]
    pub fn new(
        template_config: impl Into<String>,
        element: ElementSnapshot,
        selector: impl Into<String>,
    ) -> Self {
        Self {
            template_config: template_config.into(),
            element,
            selector: selector.into(),
            hierarchy: None,
        }
    }

    /// Attach the hierarchy snapshot
    #[must_use]
    pub fn with_hierarchy(mut self, hierarchy: HierarchySnapshot) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }
}

/// The renderer's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    /// Whether rendering succeeded
    pub success: bool,
    /// Rendered snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderResponse {
    /// A successful response
    #[must_use]
    pub fn success(result: impl Into<String>) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
        }
    }

    /// A failed response
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

/// Transport for render requests
pub trait RenderChannel {
    /// Send one request and wait for its response
    ///
    /// # Errors
    ///
    /// Returns an error when no response could be obtained at all.
    fn request(&self, request: &RenderRequest) -> PinpointResult<RenderResponse>;
}

/// Answer a request with the in-process renderer
#[must_use]
pub fn respond(request: &RenderRequest) -> RenderResponse {
    let config = parse(&request.template_config);
    match try_render(&config, &request.element, &request.selector) {
        Ok(snippet) => RenderResponse::success(snippet),
        Err(e) => {
            debug!(error = %e, "render request failed");
            RenderResponse::failure(e.to_string())
        }
    }
}

/// Channel that renders in the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessChannel;

impl RenderChannel for InProcessChannel {
    fn request(&self, request: &RenderRequest) -> PinpointResult<RenderResponse> {
        Ok(respond(request))
    }
}

/// Handle one JSON-encoded request line, returning the JSON response line.
///
/// A line that is not a valid request gets a failure response rather than an
/// error, so a driving loop keeps running.
///
/// # Errors
///
/// Returns an error only if the response cannot be serialized.
pub fn handle_request_line(line: &str) -> PinpointResult<String> {
    let response = match serde_json::from_str::<RenderRequest>(line) {
        Ok(request) => respond(&request),
        Err(e) => {
            warn!(error = %e, "malformed render request");
            RenderResponse::failure(format!("malformed request: {e}"))
        }
    };
    Ok(serde_json::to_string(&response)?)
}

/// Answer every non-blank request line from `input` on `output`.
///
/// A line that is not valid UTF-8 gets a failure response like any other
/// malformed request. Returns the number of requests answered.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn serve_lines<R: BufRead, W: Write>(mut input: R, mut output: W) -> PinpointResult<usize> {
    let mut answered = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let response = match std::str::from_utf8(trim_line_ending(&buf)) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_request_line(line)?,
            Err(e) => {
                warn!(error = %e, "render request is not valid UTF-8");
                serde_json::to_string(&RenderResponse::failure(
                    "malformed request: invalid UTF-8",
                ))?
            }
        };
        writeln!(output, "{response}")?;
        output.flush()?;
        answered += 1;
    }
    info!(answered, "render bridge input closed");
    Ok(answered)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Result of a copy action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Text to place on the clipboard
    pub text: String,
    /// Informational message when the selector was copied instead
    pub notice: Option<String>,
}

impl CopyOutcome {
    fn fallback(selector: &str, reason: &str) -> Self {
        Self {
            text: selector.to_string(),
            notice: Some(format!("{FALLBACK_NOTICE_PREFIX}{reason}")),
        }
    }

    /// Whether the selector was copied because rendering failed
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.notice.is_some()
    }
}

/// Run one render exchange and decide what to copy.
///
/// Exactly one request is sent; failures are never retried.
pub fn copy_snippet<C: RenderChannel + ?Sized>(channel: &C, request: &RenderRequest) -> CopyOutcome {
    match channel.request(request) {
        Ok(RenderResponse {
            success: true,
            result,
            ..
        }) => CopyOutcome {
            text: result
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| request.selector.clone()),
            notice: None,
        },
        Ok(RenderResponse { error, .. }) => {
            let reason = error.unwrap_or_else(|| "unknown error".to_string());
            CopyOutcome::fallback(&request.selector, &reason)
        }
        Err(e) => {
            let reason = match e {
                PinpointError::Channel { message } => message,
                other => other.to_string(),
            };
            CopyOutcome::fallback(&request.selector, &reason)
        }
    }
}

/// Short preview of copied text: 50 chars, then `...`
#[must_use]
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
