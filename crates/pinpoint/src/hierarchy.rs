//! Hierarchy summarization.
//!
//! Builds the three-tier view shown next to an inspected element: its parent,
//! itself, and at most one obvious neighbor below it. The view is a linear
//! chain on purpose; elements with several children get no child row.
//!
//! ```text
//! └─ form #login ↑
//!   └─ button [data-cy="submit"] "Sign in"
//!     └─ "Sign in"
//! ```

use serde::{Deserialize, Serialize};

use crate::dom::ElementView;
use crate::selector::{selector_for, SelectorOrder};

/// Text preview length for element descriptors
pub const DESCRIPTOR_TEXT_LIMIT: usize = 30;

/// Text preview length for text-only children
pub const TEXT_PREVIEW_LIMIT: usize = 50;

/// Suffix appended to truncated previews
pub const ELLIPSIS: char = '…';

/// Read-only summary of one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Lowercase tag name
    pub tag_name: String,
    /// Synthesized selector
    pub selector: String,
    /// Trimmed text, at most 30 chars plus an ellipsis
    pub text_content: String,
}

/// Text standing in for a leaf child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPreview {
    /// Trimmed text, at most 50 chars plus an ellipsis
    pub content: String,
}

/// One row below the current element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HierarchyChild {
    /// A child element
    Element(ElementDescriptor),
    /// Text content
    Text(TextPreview),
}

/// Parent / current / children view of one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchySnapshot {
    /// Parent element, absent at the root
    pub parent: Option<ElementDescriptor>,
    /// The inspected element
    pub current: ElementDescriptor,
    /// Zero or one summarized child
    pub children: Vec<HierarchyChild>,
}

/// Truncate to `limit` chars, appending [`ELLIPSIS`] when anything was cut
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

/// Describe a single element
#[must_use]
pub fn describe<E: ElementView>(element: &E, order: &SelectorOrder) -> ElementDescriptor {
    ElementDescriptor {
        tag_name: element.tag_name(),
        selector: selector_for(element, order),
        text_content: truncate(element.text_content().trim(), DESCRIPTOR_TEXT_LIMIT),
    }
}

fn text_preview(text: &str) -> Option<HierarchyChild> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| {
        HierarchyChild::Text(TextPreview {
            content: truncate(trimmed, TEXT_PREVIEW_LIMIT),
        })
    })
}

/// Build the hierarchy snapshot for `element`.
///
/// Child rules:
/// - one leaf child: its text as a preview, or its descriptor if it has none
/// - one child with children of its own: its descriptor (not expanded)
/// - no children: the element's own text as a preview, if any
/// - several children: nothing
#[must_use]
pub fn build<E: ElementView>(element: &E, order: &SelectorOrder) -> HierarchySnapshot {
    let children = element.children();

    let summarized = match children.as_slice() {
        [only] if only.children().is_empty() => {
            Some(text_preview(&only.text_content()).unwrap_or_else(|| {
                HierarchyChild::Element(describe(only, order))
            }))
        }
        [only] => Some(HierarchyChild::Element(describe(only, order))),
        [] => text_preview(&element.text_content()),
        _ => None,
    };

    HierarchySnapshot {
        parent: element.parent().map(|parent| describe(&parent, order)),
        current: describe(element, order),
        children: summarized.into_iter().collect(),
    }
}

/// Render a snapshot as the indented text tree shown in the panel
#[must_use]
pub fn format_tree(snapshot: &HierarchySnapshot) -> String {
    let mut lines = Vec::with_capacity(2 + snapshot.children.len());

    let (current_indent, child_indent) = match &snapshot.parent {
        Some(parent) => {
            lines.push(format!("└─ {} {} ↑", parent.tag_name, parent.selector));
            ("  └─", "    └─")
        }
        None => ("└─", "  └─"),
    };

    let current = &snapshot.current;
    let mut line = format!("{current_indent} {} {}", current.tag_name, current.selector);
    if !current.text_content.is_empty() {
        line.push_str(&format!(" \"{}\"", current.text_content));
    }
    lines.push(line);

    for child in &snapshot.children {
        lines.push(match child {
            HierarchyChild::Text(text) => format!("{child_indent} \"{}\"", text.content),
            HierarchyChild::Element(el) => {
                format!("{child_indent} {} {} ↓", el.tag_name, el.selector)
            }
        });
    }

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::dom::{DomNode, DomTree};

    fn order() -> SelectorOrder {
        SelectorOrder::default()
    }

    // ========================================================================
    // Truncation boundaries
    // ========================================================================

    mod truncate_tests {
        use super::*;

        #[test]
        fn test_exactly_at_limit_is_untouched() {
            let text = "a".repeat(30);
            assert_eq!(truncate(&text, DESCRIPTOR_TEXT_LIMIT), text);
        }

        #[test]
        fn test_one_over_limit_gets_ellipsis() {
            let text = "a".repeat(31);
            let out = truncate(&text, DESCRIPTOR_TEXT_LIMIT);
            assert_eq!(out, format!("{}…", "a".repeat(30)));
        }

        #[test]
        fn test_counts_chars_not_bytes() {
            let text = "é".repeat(50);
            assert_eq!(truncate(&text, TEXT_PREVIEW_LIMIT), text);
            let longer = "é".repeat(51);
            assert!(truncate(&longer, TEXT_PREVIEW_LIMIT).ends_with(ELLIPSIS));
        }
    }

    // ========================================================================
    // Child-list rules
    // ========================================================================

    mod build_tests {
        use super::*;

        #[test]
        fn test_single_leaf_child_with_text_becomes_preview() {
            let tree = DomTree::from_root(
                DomNode::new("button")
                    .with_attr("id", "go")
                    .with_child(DomNode::new("span").with_text("  Go now  ")),
            );
            let snap = build(&tree.root(), &order());
            assert!(snap.parent.is_none());
            assert_eq!(snap.current.selector, "#go");
            assert_eq!(
                snap.children,
                vec![HierarchyChild::Text(TextPreview {
                    content: "Go now".to_string()
                })]
            );
        }

        #[test]
        fn test_single_empty_leaf_child_becomes_descriptor() {
            let tree = DomTree::from_root(
                DomNode::new("div").with_child(DomNode::new("img").with_attr("class", "logo")),
            );
            let snap = build(&tree.root(), &order());
            match &snap.children[..] {
                [HierarchyChild::Element(el)] => {
                    assert_eq!(el.tag_name, "img");
                    assert_eq!(el.selector, ".logo");
                }
                other => panic!("unexpected children: {other:?}"),
            }
        }

        #[test]
        fn test_single_branch_child_is_not_expanded() {
            let tree = DomTree::from_root(
                DomNode::new("nav").with_child(
                    DomNode::new("ul")
                        .with_child(DomNode::new("li").with_text("a"))
                        .with_child(DomNode::new("li").with_text("b")),
                ),
            );
            let snap = build(&tree.root(), &order());
            assert_eq!(snap.children.len(), 1);
            match &snap.children[0] {
                HierarchyChild::Element(el) => {
                    assert_eq!(el.tag_name, "ul");
                    assert_eq!(el.text_content, "ab");
                }
                HierarchyChild::Text(_) => panic!("expected element descriptor"),
            }
        }

        #[test]
        fn test_leaf_element_previews_own_text() {
            let tree = DomTree::from_root(
                DomNode::new("p").with_child(DomNode::new("em").with_text("x".repeat(60))),
            );
            let em = tree.resolve("0").unwrap();
            let snap = build(&em, &order());
            assert_eq!(snap.parent.as_ref().unwrap().tag_name, "p");
            match &snap.children[..] {
                [HierarchyChild::Text(t)] => {
                    assert_eq!(t.content.chars().count(), 51);
                    assert!(t.content.ends_with(ELLIPSIS));
                }
                other => panic!("unexpected children: {other:?}"),
            }
            assert_eq!(snap.current.text_content.chars().count(), 31);
        }

        #[test]
        fn test_leaf_element_without_text_has_no_children() {
            let tree = DomTree::from_root(DomNode::new("hr"));
            assert!(build(&tree.root(), &order()).children.is_empty());
        }

        #[test]
        fn test_multi_child_yields_empty_list() {
            let tree = DomTree::from_root(
                DomNode::new("ul")
                    .with_child(DomNode::new("li").with_text("one"))
                    .with_child(DomNode::new("li").with_text("two")),
            );
            let first = build(&tree.root(), &order());
            let second = build(&tree.root(), &order());
            assert!(first.children.is_empty());
            assert_eq!(first, second);
        }
    }

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_with_parent_and_text_child() {
            let tree = DomTree::from_root(
                DomNode::new("form").with_attr("id", "login").with_child(
                    DomNode::new("button")
                        .with_attr("data-cy", "submit")
                        .with_child(DomNode::new("span").with_text("Sign in")),
                ),
            );
            let snap = build(&tree.resolve("0").unwrap(), &order());
            assert_eq!(
                format_tree(&snap),
                "└─ form #login ↑\n  └─ button [data-cy=\"submit\"] \"Sign in\"\n    └─ \"Sign in\""
            );
        }

        #[test]
        fn test_format_root_with_element_child() {
            let tree = DomTree::from_root(
                DomNode::new("div").with_child(DomNode::new("br")),
            );
            let snap = build(&tree.root(), &order());
            assert_eq!(format_tree(&snap), "└─ div div\n  └─ br br ↓");
        }

        #[test]
        fn test_child_serializes_with_type_tag() {
            let child = HierarchyChild::Text(TextPreview {
                content: "hi".to_string(),
            });
            let json = serde_json::to_string(&child).unwrap();
            assert_eq!(json, r#"{"type":"text","content":"hi"}"#);
        }
    }
}
