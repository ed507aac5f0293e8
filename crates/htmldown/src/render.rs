//! The recursive renderer: per-tag formatting rules and context propagation.
//!
//! Each node decides, from its tag and the [`Context`] its parent computed
//! for it, what markup wraps the rendered output of its children. Unknown
//! tags are transparent: their children render, the tag itself emits
//! nothing.

use crate::node::{Node, NodeType};
use crate::service::HtmldownOptions;
use crate::utilities::{collapse_whitespace, decode_entities, escape_markdown};

/// Maximum nesting depth the renderer walks. Past the cap a subtree
/// renders as its collapsed text content, so hostile input cannot
/// exhaust the call stack.
const MAX_DEPTH: usize = 512;

/// Semantic flags a node computes freshly for each of its children.
///
/// Positional flags are recomputed at every level over the filtered
/// sibling list; `is_pre`/`is_code` flow down from whichever ancestor
/// established them; the list-kind flags are set only by a direct `ul`/`ol`
/// parent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Context {
    pub is_first_child: bool,
    pub is_final_child: bool,
    pub is_single_child_in_root: bool,
    pub is_pre: bool,
    pub is_code: bool,
    pub is_unordered_list: bool,
    pub is_ordered_list: bool,
    /// 0-based position among rendered siblings; ordinal source for `<li>`.
    pub list_index: usize,
}

impl Context {
    /// Base context for an element's own children: code/pre semantics are
    /// inherited, everything else starts fresh.
    fn inner(self) -> Self {
        Self {
            is_pre: self.is_pre,
            is_code: self.is_code,
            ..Self::default()
        }
    }
}

/// Render the renderable children of `parent`, computing positional flags
/// over the filtered child list. `in_root` marks the document-level call,
/// the only place `is_single_child_in_root` can be set.
pub(crate) fn render_children(
    parent: &Node,
    base: Context,
    in_root: bool,
    options: &HtmldownOptions,
    depth: usize,
) -> String {
    let rendered: Vec<&Node> = parent.children().filter(|c| is_renderable(c)).collect();
    let last = rendered.len().saturating_sub(1);

    let mut out = String::new();
    for (index, child) in rendered.iter().enumerate() {
        let ctx = Context {
            is_first_child: index == 0,
            is_final_child: index == last,
            is_single_child_in_root: in_root && rendered.len() == 1,
            list_index: index,
            ..base
        };
        out.push_str(&render_node(child, ctx, options, depth + 1));
    }
    out
}

fn render_node(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    if depth >= MAX_DEPTH {
        return collapse_whitespace(&node.text_content());
    }

    match node.node_type {
        NodeType::Text => render_text(node, ctx, options),
        NodeType::Element => render_element(node, ctx, options, depth),
        _ => render_children(node, ctx.inner(), false, options, depth),
    }
}

fn render_element(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    let tag = node.tag_name();

    match tag.as_str() {
        "p" => render_paragraph(node, ctx, options, depth),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => render_heading(&tag, node, ctx, options, depth),
        "br" => render_line_break(ctx),
        "ul" => render_list(node, ctx, options, depth, false),
        "ol" => render_list(node, ctx, options, depth, true),
        "li" => render_list_item(node, ctx, options, depth),
        "pre" => render_preformatted(node, ctx, options, depth),
        "code" => render_code(node, ctx, options, depth),
        "b" | "strong" => render_emphasis(node, ctx, options, depth, "**"),
        "i" | "em" => render_emphasis(node, ctx, options, depth, "*"),
        "a" => render_anchor(node, ctx, options, depth),
        "span" => render_span(node, ctx, options, depth),
        _ => render_children(node, ctx.inner(), false, options, depth),
    }
}

fn render_text(node: &Node, ctx: Context, options: &HtmldownOptions) -> String {
    let raw = node.node_value.as_deref().unwrap_or("");
    let decoded = decode_entities(&collapse_whitespace(raw));
    if decoded.is_empty() {
        return decoded;
    }

    if options.escape_markdown && !ctx.is_pre && !ctx.is_code {
        escape_markdown(&decoded)
    } else {
        decoded
    }
}

fn render_paragraph(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    let content = render_children(node, ctx.inner(), false, options, depth);

    let mut out = String::new();
    if !ctx.is_single_child_in_root && !ctx.is_first_child {
        out.push('\n');
    }
    out.push_str(content.trim());
    if !ctx.is_single_child_in_root && !ctx.is_final_child {
        out.push('\n');
    }
    out
}

fn render_heading(
    tag: &str,
    node: &Node,
    ctx: Context,
    options: &HtmldownOptions,
    depth: usize,
) -> String {
    let level: usize = tag[1..].parse().unwrap_or(1);
    let content = render_children(node, ctx.inner(), false, options, depth);
    let content = content.trim();

    let mut out = String::new();
    if !ctx.is_single_child_in_root && !ctx.is_first_child {
        out.push('\n');
    }
    if options.swiftui {
        // Target renderer cannot show heading levels
        out.push_str("**");
        out.push_str(content);
        out.push_str("**");
    } else {
        out.push_str(&"#".repeat(level));
        out.push(' ');
        out.push_str(content);
    }
    if !ctx.is_single_child_in_root && !ctx.is_final_child {
        out.push_str("\n\n");
    }
    out
}

fn render_line_break(ctx: Context) -> String {
    if ctx.is_final_child {
        String::new()
    } else {
        "\n".to_string()
    }
}

fn render_list(
    node: &Node,
    ctx: Context,
    options: &HtmldownOptions,
    depth: usize,
    ordered: bool,
) -> String {
    let base = Context {
        is_unordered_list: !ordered,
        is_ordered_list: ordered,
        ..ctx.inner()
    };
    let content = render_children(node, base, false, options, depth);

    let mut out = String::new();
    if !ctx.is_single_child_in_root && !ctx.is_first_child {
        out.push_str("\n\n");
    }
    out.push_str(content.trim());
    if !ctx.is_single_child_in_root && !ctx.is_final_child {
        out.push_str("\n\n");
    }
    out
}

fn render_list_item(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    let content = render_children(node, ctx.inner(), false, options, depth);

    let mut out = String::new();
    if ctx.is_unordered_list {
        out.push(if options.unordered_list_bullets {
            '•'
        } else {
            '*'
        });
        out.push(' ');
    } else if ctx.is_ordered_list {
        // Ordinal is the position in the filtered sibling list; any
        // start/value attributes on the source list are ignored.
        out.push_str(&format!("{}. ", ctx.list_index + 1));
    }
    out.push_str(content.trim());
    if !ctx.is_final_child {
        out.push('\n');
    }
    out
}

fn render_preformatted(
    node: &Node,
    ctx: Context,
    options: &HtmldownOptions,
    depth: usize,
) -> String {
    // Only one fence per nesting chain
    if ctx.is_pre {
        return render_children(node, ctx.inner(), false, options, depth);
    }

    let base = Context {
        is_pre: true,
        ..ctx.inner()
    };
    let content = render_children(node, base, false, options, depth);
    format!("\n```\n{}\n```\n", content.trim())
}

fn render_code(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    // A fence or an outer backtick pair already establishes code semantics
    if ctx.is_pre || ctx.is_code {
        return render_children(node, ctx.inner(), false, options, depth);
    }

    let base = Context {
        is_code: true,
        ..ctx.inner()
    };
    let content = render_children(node, base, false, options, depth);
    format!("`{}`", content)
}

/// Wrap rendered children in an emphasis delimiter pair, hoisting a single
/// leading/trailing space outside the delimiters so the emitted Markdown
/// stays valid (`** bold **` is ambiguous, `**bold**` is not).
fn render_emphasis(
    node: &Node,
    ctx: Context,
    options: &HtmldownOptions,
    depth: usize,
    delimiter: &str,
) -> String {
    let content = render_children(node, ctx.inner(), false, options, depth);

    let stripped = content.strip_prefix(' ').unwrap_or(content.as_str());
    let leading = if stripped.len() == content.len() { "" } else { " " };
    let inner = stripped.strip_suffix(' ').unwrap_or(stripped);
    let trailing = if inner.len() == stripped.len() { "" } else { " " };

    if inner.is_empty() {
        return String::new();
    }
    format!("{leading}{delimiter}{inner}{delimiter}{trailing}")
}

fn render_anchor(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    let text = render_children(node, ctx.inner(), false, options, depth);

    if !ctx.is_code {
        if options.bold_mention && text.starts_with('@') {
            return format!("**{text}**");
        }
        if options.bold_tag && text.starts_with('#') {
            return format!("**{text}**");
        }
        if let Some(href) = node.attr("href") {
            let href = href.trim();
            if !href.is_empty() {
                return format!("[{text}]({href})");
            }
        }
    }

    text
}

fn render_span(node: &Node, ctx: Context, options: &HtmldownOptions, depth: usize) -> String {
    if options.mastodon {
        if has_class(node, "invisible") {
            return String::new();
        }
        if has_class(node, "ellipsis") {
            let content = render_children(node, ctx.inner(), false, options, depth);
            return format!("{content}…");
        }
    }

    render_children(node, ctx.inner(), false, options, depth)
}

fn has_class(node: &Node, class: &str) -> bool {
    node.attr("class")
        .map(|value| value.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Whether a node produces output: non-blank text, a line break, or a node
/// with at least one such descendant. Walks with an explicit stack.
pub(crate) fn is_renderable(node: &Node) -> bool {
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        match current.node_type {
            NodeType::Text => {
                if !current.is_blank() {
                    return true;
                }
            }
            NodeType::Comment => {}
            _ => {
                if current.is_element() && current.tag_name() == "br" {
                    return true;
                }
                stack.extend(current.children());
            }
        }
    }

    false
}
