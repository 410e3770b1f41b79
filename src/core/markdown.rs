//! Markdown rendering - HTML for the web viewer, styled text for `view`
//!
//! Both outputs come from the same comrak parse. The terminal renderer
//! walks the AST and word-wraps with ANSI-aware width measurement, so
//! styled words never push a line past the requested width.

use std::sync::LazyLock;

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, Options};
use console::{measure_text_width, Style};

fn options() -> Options {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    // Memos are the user's own local files; raw HTML passes through.
    options.render.unsafe_ = true;
    options
}

/// Convert memo markdown to an HTML fragment.
pub fn to_html(source: &str) -> String {
    comrak::markdown_to_html(source, &options())
}

static H1: LazyLock<Style> = LazyLock::new(|| Style::new().magenta().bold());
static HEADING: LazyLock<Style> = LazyLock::new(|| Style::new().cyan().bold());
static CODE: LazyLock<Style> = LazyLock::new(|| Style::new().yellow());
static DIM: LazyLock<Style> = LazyLock::new(|| Style::new().dim());

/// Render memo markdown as styled terminal text, wrapped to `width`.
pub fn render_terminal(source: &str, width: usize) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &options());

    let mut lines = Vec::new();
    render_blocks(root, width.max(20), "", &mut lines);

    while lines.last().is_some_and(|l: &String| l.is_empty()) {
        lines.pop();
    }
    lines.push(String::new());
    lines.join("\n")
}

fn render_blocks<'a>(node: &'a AstNode<'a>, width: usize, indent: &str, out: &mut Vec<String>) {
    for child in node.children() {
        render_block(child, width, indent, out);
    }
}

fn render_block<'a>(node: &'a AstNode<'a>, width: usize, indent: &str, out: &mut Vec<String>) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let style = if heading.level == 1 { &*H1 } else { &*HEADING };
            let marker = "#".repeat(heading.level as usize);
            let text = format!("{} {}", marker, plain_text(node));
            for line in wrap_ansi(&text, width.saturating_sub(indent.len())) {
                out.push(format!("{}{}", indent, style.apply_to(line)));
            }
            out.push(String::new());
        }
        NodeValue::Paragraph => {
            let text = inline_ansi(node, Style::new());
            for line in wrap_ansi(&text, width.saturating_sub(indent.len())) {
                out.push(format!("{}{}", indent, line));
            }
            out.push(String::new());
        }
        NodeValue::CodeBlock(code) => {
            for line in code.literal.lines() {
                out.push(format!("{}    {}", indent, CODE.apply_to(line)));
            }
            out.push(String::new());
        }
        NodeValue::BlockQuote => {
            let mut inner = Vec::new();
            render_blocks(node, width.saturating_sub(2), "", &mut inner);
            while inner.last().is_some_and(|l: &String| l.is_empty()) {
                inner.pop();
            }
            for line in inner {
                out.push(format!("{}{} {}", indent, DIM.apply_to("│"), line));
            }
            out.push(String::new());
        }
        NodeValue::List(list) => {
            let ordered = list.list_type == ListType::Ordered;
            let mut counter = list.start;
            for item in node.children() {
                let checkbox = match &item.data.borrow().value {
                    NodeValue::TaskItem(symbol) => {
                        Some(if symbol.is_some() { "[x] " } else { "[ ] " })
                    }
                    _ => None,
                };
                let marker = match checkbox {
                    Some(checkbox) => format!("{}• {}", indent, checkbox),
                    None if ordered => {
                        let m = format!("{}{}. ", indent, counter);
                        counter += 1;
                        m
                    }
                    None => format!("{}• ", indent),
                };
                let marker_width = measure_text_width(&marker);
                let hanging = " ".repeat(marker_width);

                let mut inner = Vec::new();
                render_item(item, width.saturating_sub(marker_width), &mut inner);
                while inner.last().is_some_and(|l: &String| l.is_empty()) {
                    inner.pop();
                }

                for (i, line) in inner.into_iter().enumerate() {
                    if i == 0 {
                        out.push(format!("{}{}", marker, line));
                    } else {
                        out.push(format!("{}{}", hanging, line));
                    }
                }
            }
            out.push(String::new());
        }
        NodeValue::ThematicBreak => {
            out.push(format!("{}{}", indent, DIM.apply_to("─".repeat(width.min(40)))));
            out.push(String::new());
        }
        NodeValue::Table(_) => {
            render_table(node, indent, out);
            out.push(String::new());
        }
        NodeValue::HtmlBlock(html) => {
            for line in html.literal.lines() {
                out.push(format!("{}{}", indent, DIM.apply_to(line)));
            }
            out.push(String::new());
        }
        _ => render_blocks(node, width, indent, out),
    }
}

/// List items hold block children of their own (paragraphs, nested lists).
fn render_item<'a>(item: &'a AstNode<'a>, width: usize, out: &mut Vec<String>) {
    for child in item.children() {
        match &child.data.borrow().value {
            // Tight list items wrap their text in a paragraph; inline it
            NodeValue::Paragraph => {
                let text = inline_ansi(child, Style::new());
                out.extend(wrap_ansi(&text, width));
            }
            _ => render_block(child, width, "", out),
        }
    }
}

fn render_table<'a>(table: &'a AstNode<'a>, indent: &str, out: &mut Vec<String>) {
    for row in table.children() {
        let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cells: Vec<String> = row.children().map(plain_text).collect();
        out.push(format!("{}{}", indent, cells.join(" | ")));
        if is_header {
            let dashes: Vec<String> = cells
                .iter()
                .map(|c| "-".repeat(measure_text_width(c).max(1)))
                .collect();
            out.push(format!("{}{}", indent, dashes.join(" | ")));
        }
    }
}

/// Flatten inline children to styled ANSI text.
fn inline_ansi<'a>(node: &'a AstNode<'a>, style: Style) -> String {
    let mut text = String::new();
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(literal) => {
                text.push_str(&style.apply_to(literal.as_str()).to_string());
            }
            NodeValue::Code(code) => {
                text.push_str(&CODE.apply_to(code.literal.as_str()).to_string());
            }
            NodeValue::Emph => text.push_str(&inline_ansi(child, style.clone().italic())),
            NodeValue::Strong => text.push_str(&inline_ansi(child, style.clone().bold())),
            NodeValue::Strikethrough => {
                text.push_str(&inline_ansi(child, style.clone().strikethrough()))
            }
            NodeValue::Link(link) => {
                let label = inline_ansi(child, style.clone().underlined());
                text.push_str(&label);
                if link.url != plain_text(child) {
                    text.push_str(&DIM.apply_to(format!(" ({})", link.url)).to_string());
                }
            }
            NodeValue::Image(image) => {
                text.push_str(&DIM.apply_to(format!("[image: {}]", image.url)).to_string());
            }
            NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
            NodeValue::HtmlInline(html) => {
                text.push_str(&DIM.apply_to(html.as_str()).to_string());
            }
            _ => text.push_str(&inline_ansi(child, style.clone())),
        }
    }
    text
}

/// Plain text content of a subtree, styling stripped.
fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    collect_plain(node, &mut text);
    text
}

fn collect_plain<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(literal) => out.push_str(literal),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => collect_plain(child, out),
        }
    }
}

/// Greedy word wrap that measures display width, ignoring ANSI codes.
///
/// Escape sequences contain no whitespace, so splitting on words keeps
/// them attached to the text they style.
fn wrap_ansi(text: &str, width: usize) -> Vec<String> {
    let width = width.max(10);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = measure_text_width(word);
        if line_width > 0 && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_html_basics() {
        let html = to_html("# Groceries\n\nmilk and *eggs*\n");
        assert!(html.contains("<h1>Groceries</h1>"));
        assert!(html.contains("<em>eggs</em>"));
    }

    #[test]
    fn test_to_html_keeps_raw_html() {
        let html = to_html("before\n\n<div class=\"x\">inside</div>\n");
        assert!(html.contains("<div class=\"x\">inside</div>"));
    }

    #[test]
    fn test_terminal_heading_and_paragraph() {
        let text = render_terminal("# Title\n\nsome body text\n", 80);
        assert!(text.contains("# Title"));
        assert!(text.contains("some body text"));
    }

    #[test]
    fn test_terminal_wraps_to_width() {
        let source = "word ".repeat(60);
        let text = render_terminal(&source, 40);
        for line in text.lines() {
            assert!(
                measure_text_width(line) <= 40,
                "line too wide: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_terminal_lists() {
        let text = render_terminal("- first\n- second\n\n1. one\n2. two\n", 80);
        assert!(text.contains("• first"));
        assert!(text.contains("1. one"));
        assert!(text.contains("2. two"));
    }

    #[test]
    fn test_terminal_code_block() {
        let text = render_terminal("```\nlet x = 1;\n```\n", 80);
        assert!(text.contains("    let x = 1;"));
    }

    #[test]
    fn test_wrap_ansi_short_input() {
        assert_eq!(wrap_ansi("hello", 40), vec!["hello"]);
        assert_eq!(wrap_ansi("", 40), vec![""]);
    }

    #[test]
    fn test_wrap_ansi_breaks_lines() {
        let lines = wrap_ansi("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }
}
