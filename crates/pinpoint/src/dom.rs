//! Element tree model and owned element snapshots.
//!
//! The inspected document belongs to the host, not to Pinpoint. Synthesis and
//! summarization read it through the [`ElementView`] trait, and everything that
//! crosses into the renderer is first captured into an owned
//! [`ElementSnapshot`].
//!
//! [`DomTree`] is the arena-backed tree the CLI and tests use: it is loaded
//! from nested [`DomNode`] values (JSON on disk) and addressed by child-index
//! paths such as `"0/2/1"`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::result::{PinpointError, PinpointResult};

/// Read access to one element of a host document.
///
/// Implementations hand out cheap handles: `parent` and `children` return new
/// views of the same tree, never copies of it.
pub trait ElementView: Sized {
    /// Tag name, lowercased
    fn tag_name(&self) -> String;

    /// Value of a single attribute, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// All attributes, sorted by name
    fn attributes(&self) -> BTreeMap<String, String>;

    /// Concatenated text of the element and all its descendants
    fn text_content(&self) -> String;

    /// The parent element, if any
    fn parent(&self) -> Option<Self>;

    /// Element children in document order
    fn children(&self) -> Vec<Self>;
}

/// A nested element description, as stored in JSON fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomNode {
    /// Tag name (any case)
    pub tag: String,
    /// Attribute map
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Text directly inside this element
    #[serde(default)]
    pub text: String,
    /// Child elements
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    /// Create a node with the given tag
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the direct text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
struct StoredNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-backed element tree with parent links.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<StoredNode>,
}

impl DomTree {
    /// Build a tree from a nested root node
    #[must_use]
    pub fn from_root(root: DomNode) -> Self {
        let mut nodes = Vec::new();
        let mut pending = vec![(root, None::<usize>)];

        while let Some((node, parent)) = pending.pop() {
            let index = nodes.len();
            nodes.push(StoredNode {
                tag: node.tag.to_lowercase(),
                attributes: node.attributes,
                text: node.text,
                parent,
                children: Vec::with_capacity(node.children.len()),
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }
            // Reverse so children are visited (and indexed) in document order
            for child in node.children.into_iter().rev() {
                pending.push((child, Some(index)));
            }
        }

        Self { nodes }
    }

    /// Parse a tree from a JSON document
    pub fn from_json(json: &str) -> PinpointResult<Self> {
        let root: DomNode = serde_json::from_str(json)?;
        Ok(Self::from_root(root))
    }

    /// Number of elements in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never true for a loaded tree)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root element
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            index: 0,
        }
    }

    /// Resolve a child-index path (`"0/2"`); an empty path is the root
    pub fn resolve(&self, path: &str) -> PinpointResult<NodeRef<'_>> {
        let not_found = || PinpointError::NodeNotFound {
            path: path.to_string(),
        };

        let mut current = self.root();
        for step in path.split('/').map(str::trim).filter(|s| !s.is_empty()) {
            let position: usize = step.parse().map_err(|_| not_found())?;
            let child = *self.nodes[current.index]
                .children
                .get(position)
                .ok_or_else(not_found)?;
            current = NodeRef {
                tree: self,
                index: child,
            };
        }
        Ok(current)
    }
}

/// Handle to one element of a [`DomTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    index: usize,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a StoredNode {
        &self.tree.nodes[self.index]
    }

    fn at(&self, index: usize) -> Self {
        Self {
            tree: self.tree,
            index,
        }
    }

    fn collect_text(&self, out: &mut String) {
        let node = self.node();
        out.push_str(&node.text);
        for &child in &node.children {
            self.at(child).collect_text(out);
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl ElementView for NodeRef<'_> {
    fn tag_name(&self) -> String {
        self.node().tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.node().attributes.get(name).map(String::as_str)
    }

    fn attributes(&self) -> BTreeMap<String, String> {
        self.node().attributes.clone()
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn parent(&self) -> Option<Self> {
        self.node().parent.map(|index| self.at(index))
    }

    fn children(&self) -> Vec<Self> {
        self.node()
            .children
            .iter()
            .map(|&index| self.at(index))
            .collect()
    }
}

/// Owned capture of one element, safe to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Lowercase tag name
    pub tag_name: String,
    /// Trimmed text content
    pub text_content: String,
    /// `id` attribute, empty if absent
    pub id: String,
    /// `class` attribute, empty if absent
    pub class_name: String,
    /// Every attribute on the element
    pub attributes: BTreeMap<String, String>,
    /// `data-*` attributes keyed by their camel-cased names
    pub dataset: BTreeMap<String, String>,
}

impl ElementSnapshot {
    /// Capture an element's fields into an owned value
    #[must_use]
    pub fn capture<E: ElementView>(element: &E) -> Self {
        let attributes = element.attributes();
        let dataset = attributes
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|rest| (dataset_key(rest), value.clone()))
            })
            .collect();

        Self {
            tag_name: element.tag_name(),
            text_content: element.text_content().trim().to_string(),
            id: attributes.get("id").cloned().unwrap_or_default(),
            class_name: attributes.get("class").cloned().unwrap_or_default(),
            attributes,
            dataset,
        }
    }

    /// Attribute value, treating empty values as absent
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Trimmed text, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        Some(self.text_content.as_str()).filter(|t| !t.is_empty())
    }
}

/// `foo-bar` → `fooBar`, following the DOM dataset naming rule
fn dataset_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('-', Some(next)) if next.is_ascii_lowercase() => {
                key.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => key.push(c),
        }
    }
    key
}
