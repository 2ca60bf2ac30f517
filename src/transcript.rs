use std::fs;
use std::path::Path;

use crate::render::escape_html;

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Hecker",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// One entry in the transcript
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub timestamp: String,
    pub sender: Sender,
    /// Display text, including any emoji decoration
    pub text: String,
    /// Rendered HTML body
    pub html: String,
}

impl Message {
    pub fn new(timestamp: String, sender: Sender, text: String, html: String) -> Self {
        Self {
            timestamp,
            sender,
            text,
            html,
        }
    }
}

/// Ordered, append-only list of the messages shown in this session
#[derive(Default, Clone, Debug)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Build a standalone HTML page containing every message.
    ///
    /// Math containers use `\[ \]` and `\( \)` delimiters, so the page loads
    /// MathJax to typeset them when opened in a browser.
    pub fn to_html_document(&self, title: &str) -> String {
        let mut body = String::new();
        for msg in &self.messages {
            body.push_str(&format!(
                "<div class=\"message {class}\">\n<div class=\"message-content\">\n{html}\n<span class=\"timestamp\">{sender} · {ts}</span>\n</div>\n</div>\n",
                class = msg.sender.css_class(),
                html = msg.html,
                sender = msg.sender.label(),
                ts = escape_html(&msg.timestamp),
            ));
        }

        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-chtml.js"></script>
<style>
body{{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',sans-serif;max-width:760px;margin:0 auto;padding:20px}}
.message{{display:flex;margin:10px 0}}
.message.user{{justify-content:flex-end}}
.message-content{{max-width:80%;padding:10px 14px;border-radius:12px;background:#f2f3f5}}
.message.user .message-content{{background:#dfe3ff}}
.timestamp{{display:block;font-size:11px;color:#747f8d;margin-top:4px}}
.step{{margin:6px 0}}
.step-label{{font-weight:600;margin-right:6px}}
.math-block{{margin:8px 0;text-align:center}}
pre{{background:#1e1e1e;color:#ddd;padding:8px;border-radius:6px;overflow-x:auto}}
</style>
</head>
<body>
<h1>{title}</h1>
{body}</body>
</html>
"##,
            title = escape_html(title),
            body = body,
        )
    }

    /// Write the HTML export to `path`.
    pub fn export_html(&self, path: &Path, title: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_html_document(title))
    }
}
