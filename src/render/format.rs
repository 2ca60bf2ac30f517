//! Lightweight markup to HTML conversion for assistant replies.
//!
//! The reply is HTML-escaped first, so every tag in the output comes from the
//! rules below. Code and math fragments are moved into a stash while the
//! inline rules run and restored at the end, which keeps their asterisks and
//! dollar signs literal.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Opens an inline stash placeholder.
const INLINE_MARK: char = '\u{E000}';
/// Opens a block-level stash placeholder.
const BLOCK_MARK: char = '\u{E002}';
/// Closes either kind of placeholder.
const END_MARK: char = '\u{E001}';

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+\-]*)[ \t]*\n?(.*?)```").expect("fence regex pattern is valid")
});
static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("inline code regex pattern is valid"));
static BLOCK_MATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("block math regex pattern is valid"));
static INLINE_MATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([^$\n]+)\$").expect("inline math regex pattern is valid"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\s*](?:[^\n]*?[^\s*])?)\*\*").expect("bold regex pattern is valid")
});
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*").expect("italic regex pattern is valid")
});
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.+?)[ \t]*$").expect("heading regex pattern is valid"));
static STEP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(<strong>)?(?:Step[ \t]*(\d+):|(\d+)\.)(</strong>)?(?:[ \t]+|$)(.*?)[ \t]*(?:\n[ \t]*(\x{E002}\d+\x{E001})[ \t]*)?$",
    )
    .expect("step regex pattern is valid")
});
static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("paragraph regex pattern is valid"));
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{E000}\x{E002}](\d+)\x{E001}").expect("placeholder regex pattern is valid")
});

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Reverse [`escape_html`] for display outside a browser.
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// Fragments pulled out of the text while the inline rules run.
#[derive(Default)]
struct Stash {
    items: Vec<String>,
}

impl Stash {
    fn inline(&mut self, html: String) -> String {
        self.items.push(html);
        format!("{}{}{}", INLINE_MARK, self.items.len() - 1, END_MARK)
    }

    fn block(&mut self, html: String) -> String {
        self.items.push(html);
        // Block fragments always sit on their own line so paragraph grouping sees them.
        format!("\n{}{}{}\n", BLOCK_MARK, self.items.len() - 1, END_MARK)
    }

    fn restore(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.items.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Convert reply text with lightweight markup into sanitized HTML.
pub fn format_reply(text: &str) -> String {
    let cleaned: String = text
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| !matches!(*c, INLINE_MARK | BLOCK_MARK | END_MARK))
        .collect();
    if cleaned.trim().is_empty() {
        return String::new();
    }

    let escaped = escape_html(&cleaned);
    let mut stash = Stash::default();

    let text = FENCE_RE.replace_all(&escaped, |caps: &Captures| {
        let code = caps[2].trim_end_matches('\n');
        let html = match &caps[1] {
            "" => format!("<pre><code>{}</code></pre>", code),
            lang => format!("<pre><code class=\"language-{}\">{}</code></pre>", lang, code),
        };
        stash.block(html)
    });
    let text = INLINE_CODE_RE.replace_all(&text, |caps: &Captures| {
        stash.inline(format!("<code>{}</code>", &caps[1]))
    });
    let text = BLOCK_MATH_RE.replace_all(&text, |caps: &Captures| {
        stash.block(format!("<div class=\"math-block\">\\[{}\\]</div>", caps[1].trim()))
    });
    let text = INLINE_MATH_RE.replace_all(&text, |caps: &Captures| {
        stash.inline(format!("<span class=\"math-inline\">\\({}\\)</span>", caps[1].trim()))
    });

    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");

    let text = HEADING_RE.replace_all(&text, |caps: &Captures| {
        let level = caps[1].len();
        format!("<h{level}>{}</h{level}>", &caps[2])
    });
    let text = STEP_RE.replace_all(&text, render_step);

    let body = group_paragraphs(text.trim_matches('\n'));
    stash.restore(&body)
}

fn render_step(caps: &Captures) -> String {
    let number = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let mut body = caps.get(5).map(|m| m.as_str()).unwrap_or_default().to_string();

    // "**Step 1: text** more" bolds past the label; the open tag went with the
    // label, so its close tag has to go too.
    if caps.get(1).is_some() && caps.get(4).is_none() {
        body = body.replacen("</strong>", "", 1).trim().to_string();
    }

    // A block fragment on the next line belongs to an otherwise empty step.
    let trailing_block = match caps.get(6) {
        Some(block) if body.is_empty() => {
            body = block.as_str().to_string();
            None
        }
        other => other.map(|m| m.as_str()),
    };

    let step = format!(
        "<div class=\"step\"><span class=\"step-label\">Step {}</span> <span class=\"step-body\">{}</span></div>",
        number, body
    );
    match trailing_block {
        Some(block) => format!("{}\n{}", step, block),
        None => step,
    }
}

fn is_block_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(BLOCK_MARK)
        || line.starts_with("<div")
        || line.starts_with("<pre")
        || (line.starts_with("<h") && line.as_bytes().get(2).is_some_and(u8::is_ascii_digit))
}

/// Wrap runs of text lines in `<p>` and join their lines with `<br>`.
///
/// Blank-line runs separate paragraphs; block elements stand on their own.
fn group_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for chunk in PARAGRAPH_BREAK_RE.split(text) {
        let mut lines: Vec<&str> = Vec::new();
        for line in chunk.split('\n') {
            if is_block_line(line) {
                flush_paragraph(&mut out, &mut lines);
                out.push(line.trim().to_string());
            } else if !line.trim().is_empty() {
                lines.push(line);
            }
        }
        flush_paragraph(&mut out, &mut lines);
    }

    out.join("\n")
}

fn flush_paragraph(out: &mut Vec<String>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    out.push(format!("<p>{}</p>", lines.join("<br>")));
    lines.clear();
}
