use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::config::ThemeConfig;

// ─── Glyphs ─────────────────────────────────────────────────────────────
pub const ICON_SWATCH: &str = "■";
pub const ICON_TROPHY: &str = "★";
pub const ICON_SUCCESS: &str = " ✓ ";
pub const ICON_ERROR: &str = " ✗ ";

/// Background: always Reset (transparent), respects terminal background
pub const BG: Color = Color::Reset;

/// Resolved color palette, built once from the `[theme]` table
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub fg_dim: Color,
    pub accent: Color,
    pub border: Color,
    pub rim: Color,
    pub pointer: Color,
    pub hub: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            fg: config.fg,
            fg_dim: config.fg_dim,
            accent: config.accent,
            border: config.border,
            rim: config.rim,
            pointer: config.pointer,
            hub: config.hub,
            success: config.success,
            warning: config.warning,
            error: config.error,
            border_type: BorderType::Rounded,
        }
    }

    // ─── Style Constructors ─────────────────────────────────────────────

    pub fn style_default(&self) -> Style {
        Style::default().fg(self.fg).bg(BG)
    }

    pub fn style_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(BG)
    }

    pub fn style_accent(&self) -> Style {
        Style::default().fg(self.accent).bg(BG)
    }

    pub fn style_accent_bold(&self) -> Style {
        self.style_accent().add_modifier(Modifier::BOLD)
    }

    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border).bg(BG)
    }

    pub fn style_key_hint(&self) -> Style {
        self.style_accent_bold()
    }

    pub fn style_key_desc(&self) -> Style {
        self.style_dim()
    }

    pub fn style_warning(&self) -> Style {
        Style::default().fg(self.warning).bg(BG)
    }

    /// Button label: bold when it can be pressed, dimmed while inert
    pub fn style_button(&self, enabled: bool) -> Style {
        if enabled {
            self.style_accent_bold()
        } else {
            self.style_dim().add_modifier(Modifier::ITALIC)
        }
    }

    /// Swatch / legend color for a segment
    pub fn style_segment(&self, color: Color) -> Style {
        Style::default().fg(color).bg(BG)
    }

    /// Reveal heading, brightness driven by the pulse
    pub fn style_reveal(&self, bright: bool) -> Style {
        if bright {
            Style::default()
                .fg(self.accent)
                .bg(BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.fg).bg(BG).add_modifier(Modifier::BOLD)
        }
    }

    pub fn style_toast(&self, is_error: bool) -> Style {
        let color = if is_error { self.error } else { self.success };
        Style::default().fg(color).bg(BG)
    }
}
