//! Color themes and global styling for the chat window.
//!
//! Two palettes mirror the persisted `Theme` flag. Surfaces go from the app
//! background (`surface[0]`) up to elevated panels (`surface[3]`).

use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

use crate::config::Theme;

#[derive(Clone, Debug)]
pub struct HeckerTheme {
    pub surface: [Color32; 4],
    pub accent: Color32,
    pub error: Color32,
    pub success: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
    /// Bubble fill for the user's own messages
    pub user_bubble: Color32,
    /// Bubble fill for assistant replies
    pub assistant_bubble: Color32,
    pub star_active: Color32,
}

impl HeckerTheme {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: [
                Color32::from_rgb(10, 10, 15),
                Color32::from_rgb(19, 19, 26),
                Color32::from_rgb(28, 28, 38),
                Color32::from_rgb(46, 46, 62),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            error: Color32::from_rgb(240, 71, 71),
            success: Color32::from_rgb(67, 181, 129),
            text_primary: Color32::WHITE,
            text_muted: Color32::from_rgb(114, 118, 125),
            border_medium: Color32::from_rgb(47, 49, 54),
            user_bubble: Color32::from_rgb(48, 54, 110),
            assistant_bubble: Color32::from_rgb(37, 37, 50),
            star_active: Color32::from_rgb(250, 166, 26),
        }
    }

    pub fn light() -> Self {
        Self {
            surface: [
                Color32::from_rgb(255, 255, 255),
                Color32::from_rgb(246, 246, 247),
                Color32::from_rgb(242, 243, 245),
                Color32::from_rgb(212, 215, 220),
            ],
            accent: Color32::from_rgb(88, 101, 242),
            error: Color32::from_rgb(240, 71, 71),
            success: Color32::from_rgb(67, 181, 129),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_muted: Color32::from_rgb(116, 127, 141),
            border_medium: Color32::from_rgb(210, 213, 219),
            user_bubble: Color32::from_rgb(223, 227, 255),
            assistant_bubble: Color32::from_rgb(242, 243, 245),
            star_active: Color32::from_rgb(243, 156, 18),
        }
    }
}

/// Text hierarchy: 14px body, 11px timestamps, 13px monospace for code.
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(11.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(18.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
    ]
    .into()
}

/// Apply visuals and spacing for `theme`. Called at startup and on every toggle.
pub fn apply_app_style(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    });

    let palette = HeckerTheme::for_theme(theme);
    let mut style = (*ctx.style()).clone();
    style.text_styles = configure_text_styles();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.visuals.widgets.active.bg_fill = palette.accent;
    style.visuals.widgets.active.weak_bg_fill = palette.accent;
    style.visuals.selection.bg_fill = palette.accent.linear_multiply(0.4);

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_theme_flag() {
        assert_eq!(HeckerTheme::for_theme(Theme::Dark).text_primary, Color32::WHITE);
        assert_ne!(
            HeckerTheme::for_theme(Theme::Light).surface[0],
            HeckerTheme::for_theme(Theme::Dark).surface[0]
        );
    }
}
