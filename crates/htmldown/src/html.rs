//! HTML parsing support.
//!
//! Adapter from a `scraper` fragment parse to the [`Node`](crate::Node)
//! tree the renderer consumes. Embedders with their own parser don't need
//! this module; it exists so HTML strings can be rendered directly.
//! Entity decoding happens inside html5ever here, so the renderer's own
//! decoder sees already-literal text and no-ops.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML string into a [`Node`] tree.
///
/// # Example
///
/// ```rust
/// use htmldown::{parse_html, HtmldownService};
///
/// let root = parse_html("<p>Hello <em>World</em></p>");
/// let markdown = HtmldownService::new().render(&root).unwrap();
/// assert_eq!(markdown, "Hello *World*");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    convert_element(document.root_element())
}

fn convert_element(element: ElementRef) -> Node {
    let value = element.value();
    let attrs: Vec<(&str, &str)> = value.attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(value.name())
    } else {
        Node::element_with_attrs(value.name(), attrs)
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => node.add_child(Node::text(&text.text)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(convert_element(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HtmldownOptions, HtmldownService};

    fn render(html: &str) -> String {
        HtmldownService::new().render_html(html).unwrap()
    }

    fn render_with(options: HtmldownOptions, html: &str) -> String {
        HtmldownService::with_options(options)
            .render_html(html)
            .unwrap()
    }

    #[test]
    fn test_parse_produces_element_root() {
        let node = parse_html("<p>Hello World</p>");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "html");
    }

    #[test]
    fn test_paragraph_with_strong() {
        assert_eq!(render("<p>Hello <strong>World</strong></p>"), "Hello **World**");
    }

    #[test]
    fn test_heading_then_paragraph() {
        assert_eq!(render("<h1>Title</h1><p>Body</p>"), "# Title\n\nBody");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render(r#"<a href="https://x.test">link</a>"#),
            "[link](https://x.test)"
        );
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(render("<pre><code>x=1</code></pre>"), "```\nx=1\n```");
    }

    #[test]
    fn test_entities_decoded_by_parser() {
        assert_eq!(render("<p>fish &amp; chips</p>"), "fish & chips");
    }

    #[test]
    fn test_blank_text_between_list_items() {
        let html = "<ol>\n  <li>One</li>\n  <li>Two</li>\n</ol>";
        assert_eq!(render(html), "1. One\n2. Two");
    }

    #[test]
    fn test_mastodon_adjacent_hashtags() {
        // The blank text between the anchors is filtered out, so the two
        // bold spans land back-to-back and the post-pass splits them.
        let options = HtmldownOptions {
            mastodon: true,
            bold_tag: true,
            ..Default::default()
        };
        let html = concat!(
            r#"<p><a href="https://m.test/tags/rust" class="mention hashtag">#<span>rust</span></a> "#,
            r#"<a href="https://m.test/tags/lang" class="mention hashtag">#<span>lang</span></a></p>"#,
        );
        assert_eq!(render_with(options, html), "**#rust** **#lang**");
    }

    #[test]
    fn test_mastodon_shortened_url_markup() {
        let options = HtmldownOptions {
            mastodon: true,
            ..Default::default()
        };
        let html = concat!(
            r#"<p>See <a href="https://t.test/abc"><span class="invisible">https://</span>"#,
            r#"<span class="ellipsis">t.test/ab</span></a></p>"#,
        );
        assert_eq!(
            render_with(options, html),
            "See [t.test/ab…](https://t.test/abc)"
        );
    }
}
