//! Parrot/neon theme tokens for the stockview TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, borders, the closing-price line)
//! - **Positive**: Neon green (up candles, success banner)
//! - **Negative**: Hot pink (down candles, error banner)
//! - **Warning**: Neon orange (empty-result banner)
//! - **Neutral**: Cool purple (headlines)
//! - **Muted**: Steel blue (axis labels, hints, links)

use ratatui::style::{Color, Modifier, Style};

use crate::app::BannerKind;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (up moves, success)
    pub positive: Color,
    /// Hot pink (down moves, errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Cool purple (neutral info, secondary)
    pub neutral: Color,
    /// Steel blue (muted text, disabled)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Green for a close at or above the open, pink below.
    pub fn candle_color(&self, is_up: bool) -> Color {
        if is_up {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn banner_color(&self, kind: BannerKind) -> Color {
        match kind {
            BannerKind::Success => self.positive,
            BannerKind::Info => self.accent,
            BannerKind::Warning => self.warning,
            BannerKind::Error => self.negative,
        }
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn accent_bold(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Border style for a panel; focused panels get the accent.
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.accent_bold()
        } else {
            self.muted()
        }
    }
}
