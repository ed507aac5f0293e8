//! HtmldownService - the main entry point for DOM to Markdown rendering.

use crate::node::Node;
use crate::render::{render_children, Context};
use crate::Result;

/// Options for HtmldownService.
///
/// Each flag toggles independently; the set is read-only for the duration
/// of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HtmldownOptions {
    /// Render unordered list items with `•` instead of `*`
    pub unordered_list_bullets: bool,

    /// Backslash-escape literal `*`, `[`, `]`, `` ` `` and `_` in text content
    pub escape_markdown: bool,

    /// Mastodon conventions: drop `invisible`-classed spans, append `…`
    /// after `ellipsis`-classed spans, keep adjacent rendered links apart
    pub mastodon: bool,

    /// Render headings as bold text instead of `#`-prefixed headings
    /// (for target renderers that cannot show heading levels)
    pub swiftui: bool,

    /// Render `#hashtag` links as bold text with no hyperlink
    pub bold_tag: bool,

    /// Render `@mention` links as bold text with no hyperlink
    pub bold_mention: bool,
}

/// The main service for converting DOM trees to Markdown
pub struct HtmldownService {
    options: HtmldownOptions,
}

impl HtmldownService {
    /// Create a new HtmldownService with default options
    pub fn new() -> Self {
        Self {
            options: HtmldownOptions::default(),
        }
    }

    /// Create a HtmldownService with custom options
    pub fn with_options(options: HtmldownOptions) -> Self {
        Self { options }
    }

    /// Get the current options
    pub fn options(&self) -> &HtmldownOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut HtmldownOptions {
        &mut self.options
    }

    /// Render a DOM tree to Markdown.
    ///
    /// The root itself emits no markup; its renderable children are
    /// rendered with positional context computed over the root's own
    /// filtered child list, then the whole-string post-passes run.
    pub fn render(&self, root: &Node) -> Result<String> {
        let body = render_children(root, Context::default(), true, &self.options, 0);
        Ok(self.post_process(&body))
    }

    /// Parse an HTML string and render it to Markdown
    #[cfg(feature = "html")]
    pub fn render_html(&self, html: &str) -> Result<String> {
        let root = crate::html::parse_html(html);
        self.render(&root)
    }

    /// Post-process the concatenated output
    fn post_process(&self, output: &str) -> String {
        let mut result = collapse_newline_runs(output);

        if self.options.mastodon {
            // Keep consecutive rendered links apart
            result = result.replace(")[", ") [");
        }
        if self.options.bold_tag || self.options.bold_mention {
            // Split back-to-back bold spans so they don't merge visually
            result = result.replace("****", "** **");
        }

        result.trim().to_string()
    }
}

impl Default for HtmldownService {
    fn default() -> Self {
        Self::new()
    }
}

/// Cap vertical whitespace at one blank line: any run of three or more
/// newlines becomes exactly two, shorter runs pass through.
fn collapse_newline_runs(s: &str) -> String {
    let mut newline_count = 0;
    let mut processed = String::with_capacity(s.len());

    for c in s.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                processed.push(c);
            }
        } else {
            newline_count = 0;
            processed.push(c);
        }
    }

    processed
}
