//! # htmldown
//!
//! Convert DOM trees to Markdown, with stylistic options for platforms
//! (Mastodon markup conventions, SwiftUI-renderable output, bolded
//! hashtags and mentions).
//!
//! ## Design
//!
//! The renderer walks a read-only [`Node`] tree; it does not parse HTML
//! itself. Any parser can convert its output into the `Node` structure,
//! and a `scraper`-backed adapter is available behind the default-on
//! `html` feature for callers starting from an HTML string. Rendering is
//! a pure function: one call, one string, no shared state.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use htmldown::{HtmldownService, Node};
//!
//! let service = HtmldownService::new();
//!
//! let mut p = Node::element("p");
//! p.add_child(Node::text("Hello "));
//! let mut b = Node::element("b");
//! b.add_child(Node::text("world"));
//! p.add_child(b);
//!
//! let mut root = Node::document_fragment();
//! root.add_child(p);
//!
//! let markdown = service.render(&root).unwrap();
//! assert_eq!(markdown, "Hello **world**");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use htmldown::HtmldownService;
//!
//! let service = HtmldownService::new();
//! let markdown = service.render_html("<h1>Hello World</h1>").unwrap();
//! assert_eq!(markdown, "# Hello World");
//! ```

#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod render;
mod service;
mod utilities;

#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeType};
pub use service::{HtmldownOptions, HtmldownService};
pub use utilities::*;

/// Error type for htmldown operations
#[derive(Debug, thiserror::Error)]
pub enum HtmldownError {
    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, HtmldownError>;
