//! DOM node structure consumed by the renderer.
//!
//! The renderer does not parse HTML; it walks a read-only tree of these
//! nodes. Any parser (scraper, html5ever, a CDP snapshot, ...) can convert
//! its output to this structure. The shape follows the CDP `DOM.Node`
//! convention: uppercase node names for elements, a `#text` sentinel for
//! text nodes, and attributes stored as a flat name/value array.

use crate::utilities::{decode_entities, is_collapsible_whitespace};

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

impl From<u32> for NodeType {
    fn from(value: u32) -> Self {
        match value {
            3 => NodeType::Text,
            8 => NodeType::Comment,
            9 => NodeType::Document,
            11 => NodeType::DocumentFragment,
            _ => NodeType::Element,
        }
    }
}

/// A read-only DOM node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g. "DIV"; "#text" for text nodes)
    pub node_name: String,

    /// Text content for text nodes
    pub node_value: Option<String>,

    /// Attributes as a flat array [name, value, name, value, ...]
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(flat_attrs),
            children: Some(Vec::new()),
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;
        let name_lower = name.to_lowercase();

        let mut iter = attrs.iter();
        while let Some(attr_name) = iter.next() {
            if let Some(attr_value) = iter.next() {
                if attr_name.to_lowercase() == name_lower {
                    return Some(attr_value.as_str());
                }
            }
        }
        None
    }

    /// Check if an attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Get all text content from this node and descendants.
    ///
    /// Walks with an explicit stack so hostile nesting depth cannot
    /// exhaust the call stack.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.node_type == NodeType::Text {
                if let Some(ref value) = node.node_value {
                    out.push_str(value);
                }
            } else if let Some(ref children) = node.children {
                for child in children.iter().rev() {
                    stack.push(child);
                }
            }
        }

        out
    }

    /// Check if this is a text node whose decoded content is entirely
    /// whitespace. Blank text nodes produce no output and do not count
    /// when siblings compute first/last positions.
    pub fn is_blank(&self) -> bool {
        match self.node_type {
            NodeType::Text => {
                let raw = self.node_value.as_deref().unwrap_or("");
                decode_entities(raw)
                    .chars()
                    .all(is_collapsible_whitespace)
            }
            _ => false,
        }
    }
}
