//! Small markdown subset used for field descriptions, hints and errors.
//!
//! Supports paragraphs, `-`/`*` bullet lists, inline code, strong, emphasis
//! and links. Everything else is escaped and rendered as paragraph text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code pattern"));
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("strong pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*|\b_([^_]+)_\b").expect("emphasis pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").expect("link pattern"));

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

pub fn render(source: &str) -> String {
    let mut out = String::new();
    let normalized = source.replace("\r\n", "\n");
    for block in normalized.split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            continue;
        }
        if lines.iter().all(|line| list_item(line).is_some()) {
            out.push_str("<ul>\n");
            for line in &lines {
                let item = list_item(line).unwrap_or(line);
                out.push_str("<li>");
                out.push_str(&inline(item));
                out.push_str("</li>\n");
            }
            out.push_str("</ul>\n");
        } else {
            let text: Vec<String> = lines.iter().map(|line| inline(line.trim_start())).collect();
            out.push_str("<p>");
            out.push_str(&text.join("\n"));
            out.push_str("</p>\n");
        }
    }
    out
}

fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

fn inline(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for caps in CODE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&decorate(&text[last..whole.start()]));
        out.push_str("<code>");
        out.push_str(&escape(&caps[1]));
        out.push_str("</code>");
        last = whole.end();
    }
    out.push_str(&decorate(&text[last..]));
    out
}

/// Links are cut out first so emphasis never reaches an href.
fn decorate(text: &str) -> String {
    let mut out = String::new();
    let mut last = 0;
    for caps in LINK.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&emphasize(&text[last..whole.start()]));
        let href = &caps[2];
        if is_safe_href(href) {
            out.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape(href),
                emphasize(&caps[1])
            ));
        } else {
            out.push_str(&escape(whole.as_str()));
        }
        last = whole.end();
    }
    out.push_str(&emphasize(&text[last..]));
    out
}

fn emphasize(text: &str) -> String {
    let escaped = escape(text);
    let strong = STRONG.replace_all(&escaped, |caps: &Captures<'_>| {
        let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        format!("<strong>{inner}</strong>")
    });
    EMPHASIS
        .replace_all(&strong, |caps: &Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("<em>{inner}</em>")
        })
        .into_owned()
}

/// Relative references and `http`, `https` and `mailto` URLs.
fn is_safe_href(href: &str) -> bool {
    let cleaned: String = href
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace() && !ch.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    let scheme_end = cleaned.find(|ch: char| matches!(ch, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(end) if cleaned[end..].starts_with(':') => SAFE_SCHEMES.contains(&&cleaned[..end]),
        _ => true,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn wraps_plain_text_in_a_paragraph() {
        assert_eq!(render("a"), "<p>a</p>\n");
    }

    #[test]
    fn splits_paragraphs_on_blank_lines() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p>\n<p>two</p>\n");
    }

    #[test]
    fn renders_inline_markup() {
        assert_eq!(
            render("Use **bold**, *em* and `<code>`"),
            "<p>Use <strong>bold</strong>, <em>em</em> and <code>&lt;code&gt;</code></p>\n"
        );
    }

    #[test]
    fn renders_links_and_lists() {
        assert_eq!(
            render("- see [docs](https://example.com)\n- done"),
            "<ul>\n<li>see <a href=\"https://example.com\">docs</a></li>\n<li>done</li>\n</ul>\n"
        );
    }

    #[test]
    fn leaves_unsafe_links_as_text() {
        assert_eq!(
            render("[click](javascript:alert(1))"),
            "<p>[click](javascript:alert(1))</p>\n"
        );
        for href in ["JavaScript:x", "data:text/html,x", "file:///etc", "VBScript:x"] {
            let html = render(&format!("[a]({href})"));
            assert!(!html.contains("<a"), "{href}: {html}");
        }
        assert_eq!(render("[a](/docs?q=1#top)"), "<p><a href=\"/docs?q=1#top\">a</a></p>\n");
        assert_eq!(
            render("[mail](mailto:ann@example.com)"),
            "<p><a href=\"mailto:ann@example.com\">mail</a></p>\n"
        );
    }

    #[test]
    fn emphasis_stays_out_of_hrefs() {
        assert_eq!(
            render("[docs](https://example.com/*wild*/_private_/x) and *this*"),
            "<p><a href=\"https://example.com/*wild*/_private_/x\">docs</a> and <em>this</em></p>\n"
        );
        assert_eq!(
            render("[**bold** docs](https://example.com)"),
            "<p><a href=\"https://example.com\"><strong>bold</strong> docs</a></p>\n"
        );
    }

    #[test]
    fn escapes_raw_html() {
        assert_eq!(render("<script>"), "<p>&lt;script&gt;</p>\n");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render("  \n\n"), "");
    }
}
