//! Message rendering: reply text to sanitized HTML plus a contextual emoji.
//!
//! - `format`: the markup-to-HTML rule pipeline
//! - `emoji`: keyword classification and glyph selection

pub mod emoji;
pub mod format;

pub use emoji::{EmojiCategory, EmojiChoice, EmojiPicker, EmojiPosition};
pub use format::{escape_html, format_reply, unescape_html};

/// Re-typesets math inside freshly inserted HTML.
///
/// Calls are best effort: the caller logs and discards any error.
pub trait MathTypesetter: Send {
    fn typeset(&mut self, html: &str) -> Result<(), String>;
}

/// Output of the renderer for one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReply {
    /// Sanitized HTML body.
    pub html: String,
    pub emoji: Option<EmojiChoice>,
}

impl RenderedReply {
    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// HTML body with the emoji placed before or after it.
    pub fn decorated_html(&self) -> String {
        match &self.emoji {
            Some(choice) => {
                let glyph = format!("<span class=\"emoji\">{}</span>", choice.glyph);
                match choice.position {
                    EmojiPosition::Prefix => format!("{}\n{}", glyph, self.html),
                    EmojiPosition::Suffix => format!("{}\n{}", self.html, glyph),
                }
            }
            None => self.html.clone(),
        }
    }

    /// Plain `text` with the same emoji placement, for text-only views and logs.
    pub fn decorate_text(&self, text: &str) -> String {
        match &self.emoji {
            Some(choice) => match choice.position {
                EmojiPosition::Prefix => format!("{} {}", choice.glyph, text),
                EmojiPosition::Suffix => format!("{} {}", text, choice.glyph),
            },
            None => text.to_string(),
        }
    }
}

/// Turns message text into display HTML.
#[derive(Default)]
pub struct MessageRenderer {
    emoji: EmojiPicker,
}

impl MessageRenderer {
    pub fn new() -> Self {
        Self {
            emoji: EmojiPicker::new(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            emoji: EmojiPicker::seeded(seed),
        }
    }

    /// Render an assistant reply. Missing or empty input renders to nothing.
    pub fn render(&mut self, text: Option<&str>) -> RenderedReply {
        let Some(text) = text else {
            return RenderedReply::default();
        };

        let html = format_reply(text);
        if html.is_empty() {
            return RenderedReply::default();
        }

        let emoji = self.emoji.choose_for(text);
        tracing::trace!(
            category = emoji.as_ref().map(|c| c.category.as_str()),
            "rendered reply"
        );
        RenderedReply { html, emoji }
    }

    /// Render text the user typed: escaped, with line breaks kept, no markup.
    pub fn render_user(&self, text: &str) -> String {
        let escaped = escape_html(text.trim());
        if escaped.is_empty() {
            return String::new();
        }
        format!("<p>{}</p>", escaped.replace('\n', "<br>"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_renders_nothing() {
        let mut renderer = MessageRenderer::seeded(1);
        let out = renderer.render(None);
        assert!(out.is_empty());
        assert!(out.emoji.is_none());

        let out = renderer.render(Some(""));
        assert!(out.is_empty());
        assert!(out.emoji.is_none());
    }

    #[test]
    fn test_step_example_gets_mindfulness_prefix() {
        let mut renderer = MessageRenderer::seeded(42);
        let out = renderer.render(Some("**Step 1:** breathe deeply"));
        assert!(out.html.contains("class=\"step\""));
        assert!(out.html.contains("breathe deeply"));

        let choice = out.emoji.clone().expect("mindfulness emoji");
        assert_eq!(choice.category, EmojiCategory::Mindfulness);
        assert_eq!(choice.position, EmojiPosition::Prefix);
        assert!(out.decorated_html().starts_with("<span class=\"emoji\">"));
        assert!(out.decorate_text("breathe").starts_with(choice.glyph));
    }

    #[test]
    fn test_suffix_emoji_goes_last() {
        let mut renderer = MessageRenderer::seeded(5);
        let out = renderer.render(Some("Thank you for asking!"));
        assert!(out.decorated_html().ends_with("</span>"));
        assert!(out.decorated_html().starts_with("<p>"));
    }

    #[test]
    fn test_unmatched_reply_has_no_emoji() {
        let mut renderer = MessageRenderer::seeded(5);
        let out = renderer.render(Some("The integral of $x$ is $x^2/2$"));
        assert!(out.emoji.is_none());
        assert_eq!(out.decorated_html(), out.html);
    }

    #[test]
    fn test_render_user_escapes_without_markup() {
        let renderer = MessageRenderer::seeded(5);
        assert_eq!(
            renderer.render_user("**not bold** <b>\nline"),
            "<p>**not bold** &lt;b&gt;<br>line</p>"
        );
        assert_eq!(renderer.render_user("   "), "");
    }
}
