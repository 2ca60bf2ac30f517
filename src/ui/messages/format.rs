//! Message HTML to styled text spans.
//!
//! Transcript HTML only holds the small tag set the renderer emits, so a
//! linear tag scan recovers its structure. Blocks and spans are then drawn
//! with `RichText`.

use eframe::egui::{self, RichText};
use std::mem;

use crate::render::unescape_html;
use crate::ui::theme::HeckerTheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Paragraph,
    Heading(u8),
    /// Step block with its label text, e.g. "Step 2"
    Step(String),
    MathBlock,
    CodeBlock,
}

/// A run of text sharing one style
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TextSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub math: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyledBlock {
    pub kind: BlockKind,
    pub spans: Vec<TextSpan>,
}

impl StyledBlock {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    bold: bool,
    italic: bool,
    code: bool,
    math: bool,
}

enum SpanRole {
    Label,
    Math,
    Other,
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<StyledBlock>,
    open: Vec<StyledBlock>,
    /// Text outside any block (emoji decorations)
    loose: Vec<TextSpan>,
    style: Style,
    text: String,
    roles: Vec<SpanRole>,
    label: Option<String>,
}

impl BlockBuilder {
    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() || (self.open.is_empty() && raw.trim().is_empty()) {
            return;
        }
        self.text.push_str(&unescape_html(raw));
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let mut text = mem::take(&mut self.text);

        if let Some(label) = self.label.as_mut() {
            label.push_str(&text);
            return;
        }
        if self.style.math {
            text = text
                .trim()
                .trim_start_matches("\\(")
                .trim_end_matches("\\)")
                .to_string();
        }

        let span = TextSpan {
            text,
            bold: self.style.bold,
            italic: self.style.italic,
            code: self.style.code,
            math: self.style.math,
        };
        match self.open.last_mut() {
            Some(block) => block.spans.push(span),
            None => self.loose.push(span),
        }
    }

    fn open_block(&mut self, kind: BlockKind) {
        self.flush_text();

        // A block nested in another splits the outer one around it.
        let partial = self.open.last_mut().map(|outer| StyledBlock {
            kind: mem::replace(&mut outer.kind, BlockKind::Paragraph),
            spans: mem::take(&mut outer.spans),
        });
        if let Some(partial) = partial {
            self.emit(partial);
        }

        let mut block = StyledBlock::new(kind);
        if matches!(block.kind, BlockKind::Paragraph | BlockKind::Heading(_) | BlockKind::Step(_)) {
            // Prefix emoji sits inline at the start of the first block.
            block.spans = mem::take(&mut self.loose);
            if let Some(last) = block.spans.last_mut() {
                last.text.push(' ');
            }
        } else {
            self.flush_loose();
        }
        self.open.push(block);
    }

    fn close_block(&mut self) {
        self.flush_text();
        if let Some(block) = self.open.pop() {
            self.emit(block);
        }
    }

    fn flush_loose(&mut self) {
        if self.loose.is_empty() {
            return;
        }
        let mut block = StyledBlock::new(BlockKind::Paragraph);
        block.spans = mem::take(&mut self.loose);
        self.emit(block);
    }

    fn emit(&mut self, mut block: StyledBlock) {
        match block.kind {
            BlockKind::CodeBlock => {}
            BlockKind::MathBlock => {
                if let Some(first) = block.spans.first_mut() {
                    first.text = first.text.trim_start().trim_start_matches("\\[").to_string();
                }
                if let Some(last) = block.spans.last_mut() {
                    last.text = last.text.trim_end().trim_end_matches("\\]").to_string();
                }
            }
            _ => {
                if let Some(first) = block.spans.first_mut() {
                    first.text = first.text.trim_start().to_string();
                }
                if let Some(last) = block.spans.last_mut() {
                    last.text = last.text.trim_end().to_string();
                }
            }
        }
        block.spans.retain(|s| !s.text.is_empty());

        if !block.spans.is_empty() || matches!(block.kind, BlockKind::Step(_)) {
            self.blocks.push(block);
        }
    }

    fn set_style(&mut self, apply: impl FnOnce(&mut Style)) {
        self.flush_text();
        apply(&mut self.style);
    }

    fn tag(&mut self, tag: &str) {
        let (closing, body) = match tag.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, tag.trim_end_matches('/')),
        };
        let name = body.split_whitespace().next().unwrap_or_default();
        let class = class_attr(body);

        if let Some(level) = heading_level(name) {
            if closing {
                self.close_block();
            } else {
                self.open_block(BlockKind::Heading(level));
            }
            return;
        }

        match (closing, name) {
            (false, "p") => self.open_block(BlockKind::Paragraph),
            (false, "pre") => self.open_block(BlockKind::CodeBlock),
            (false, "div") => match class {
                Some("step") => self.open_block(BlockKind::Step(String::new())),
                Some("math-block") => self.open_block(BlockKind::MathBlock),
                _ => self.open_block(BlockKind::Paragraph),
            },
            (true, "p") | (true, "pre") | (true, "div") => self.close_block(),
            (false, "br") => self.text.push('\n'),
            (false, "strong") => self.set_style(|s| s.bold = true),
            (true, "strong") => self.set_style(|s| s.bold = false),
            (false, "em") => self.set_style(|s| s.italic = true),
            (true, "em") => self.set_style(|s| s.italic = false),
            (false, "code") => self.set_style(|s| s.code = true),
            (true, "code") => self.set_style(|s| s.code = false),
            (false, "span") => {
                self.flush_text();
                let role = match class {
                    Some("step-label") => {
                        self.label = Some(String::new());
                        SpanRole::Label
                    }
                    Some("math-inline") => {
                        self.style.math = true;
                        SpanRole::Math
                    }
                    _ => SpanRole::Other,
                };
                self.roles.push(role);
            }
            (true, "span") => {
                self.flush_text();
                match self.roles.pop() {
                    Some(SpanRole::Label) => {
                        let label = self.label.take().unwrap_or_default();
                        if let Some(block) = self.open.last_mut() {
                            block.kind = BlockKind::Step(label.trim().to_string());
                        }
                    }
                    Some(SpanRole::Math) => self.style.math = false,
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<StyledBlock> {
        self.flush_text();
        while !self.open.is_empty() {
            self.close_block();
        }

        // Suffix emoji joins the last text block.
        let joins_last = matches!(
            self.blocks.last().map(|b| &b.kind),
            Some(BlockKind::Paragraph | BlockKind::Step(_))
        );
        if joins_last && !self.loose.is_empty() {
            let mut loose = mem::take(&mut self.loose);
            if let Some(first) = loose.first_mut() {
                first.text.insert(0, ' ');
            }
            if let Some(last) = self.blocks.last_mut() {
                last.spans.extend(loose);
            }
        } else {
            self.flush_loose();
        }
        self.blocks
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn class_attr(body: &str) -> Option<&str> {
    let start = body.find("class=\"")? + "class=\"".len();
    let len = body[start..].find('"')?;
    Some(&body[start..start + len])
}

/// Split message HTML into styled blocks.
pub(crate) fn parse_message_html(html: &str) -> Vec<StyledBlock> {
    let mut builder = BlockBuilder::default();
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        builder.push_text(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => {
                builder.tag(&rest[start + 1..start + end]);
                rest = &rest[start + end + 1..];
            }
            None => {
                builder.push_text(&rest[start..]);
                rest = "";
            }
        }
    }
    builder.push_text(rest);

    builder.finish()
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 22.0,
        2 => 20.0,
        3 => 18.0,
        _ => 16.0,
    }
}

fn span_text(word: &str, span: &TextSpan, size: f32, theme: &HeckerTheme) -> RichText {
    let mut rich = RichText::new(word).size(size);
    if span.math {
        return rich.monospace().color(theme.accent);
    }
    rich = if span.bold {
        rich.strong()
    } else {
        rich.color(theme.text_primary)
    };
    if span.italic {
        rich = rich.italics();
    }
    if span.code {
        rich = rich.code();
    }
    rich
}

/// Add spans to a wrapping row, breaking the row at `<br>` newlines.
fn render_spans(ui: &mut egui::Ui, spans: &[TextSpan], size: f32, theme: &HeckerTheme) {
    for span in spans {
        for (i, line) in span.text.split('\n').enumerate() {
            if i > 0 {
                ui.end_row();
            }
            for word in line.split_inclusive(char::is_whitespace) {
                ui.label(span_text(word, span, size, theme));
            }
        }
    }
}

/// Render a message body from its stored HTML
pub(crate) fn render_message_html(ui: &mut egui::Ui, html: &str, theme: &HeckerTheme) {
    for block in parse_message_html(html) {
        match &block.kind {
            BlockKind::Paragraph | BlockKind::Heading(_) | BlockKind::Step(_) => {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    let size = match block.kind {
                        BlockKind::Heading(level) => heading_size(level),
                        _ => 14.0,
                    };
                    if let BlockKind::Step(label) = &block.kind {
                        ui.label(RichText::new(format!("{} ", label)).size(size).strong().color(theme.accent));
                    }
                    if let BlockKind::Heading(_) = block.kind {
                        let bold: Vec<TextSpan> = block
                            .spans
                            .iter()
                            .cloned()
                            .map(|s| TextSpan { bold: true, ..s })
                            .collect();
                        render_spans(ui, &bold, size, theme);
                    } else {
                        render_spans(ui, &block.spans, size, theme);
                    }
                });
            }
            BlockKind::MathBlock => {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(block.plain_text())
                            .monospace()
                            .size(14.0)
                            .color(theme.accent),
                    );
                });
            }
            BlockKind::CodeBlock => {
                egui::Frame::new()
                    .fill(theme.surface[0])
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(block.plain_text())
                                .monospace()
                                .color(theme.text_primary),
                        );
                    });
            }
        }
    }
}
