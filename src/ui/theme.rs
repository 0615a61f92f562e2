//! Night-rose theme for DramaShorts
//!
//! Color palette and style helpers for the TUI: zinc surfaces, rose for
//! brand and primary actions, purple for the AI character, yellow for coins.

use ratatui::style::{Color, Modifier, Style};

/// Night-rose color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #09090b (zinc-950)
    pub const BACKGROUND: Color = Color::Rgb(0x09, 0x09, 0x0b);

    /// Primary: #f43f5e (rose-500)
    pub const PRIMARY: Color = Color::Rgb(0xf4, 0x3f, 0x5e);

    /// Secondary: #a855f7 (purple-500)
    pub const SECONDARY: Color = Color::Rgb(0xa8, 0x55, 0xf7);

    /// Accent: #eab308 (yellow-500, coins)
    pub const ACCENT: Color = Color::Rgb(0xea, 0xb3, 0x08);

    /// Highlight: #fb7185 (rose-400)
    pub const HIGHLIGHT: Color = Color::Rgb(0xfb, 0x71, 0x85);

    /// Text: #e4e4e7 (zinc-200)
    pub const TEXT: Color = Color::Rgb(0xe4, 0xe4, 0xe7);

    /// Dim: #71717a (zinc-500)
    pub const DIM: Color = Color::Rgb(0x71, 0x71, 0x7a);

    /// Success: #22c55e (green-500)
    pub const SUCCESS: Color = Color::Rgb(0x22, 0xc5, 0x5e);

    /// Warning: #f59e0b (amber-500)
    pub const WARNING: Color = Color::Rgb(0xf5, 0x9e, 0x0b);

    /// Error: #ef4444 (red-500)
    pub const ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS (for UI elements)
    // ═══════════════════════════════════════════════════════════════════════

    /// Panels and cards: #18181b (zinc-900)
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x18, 0x18, 0x1b);

    /// Hover and cursor cells: #27272a (zinc-800)
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x27, 0x27, 0x2a);

    /// Border color: #3f3f46 (zinc-700)
    pub const BORDER: Color = Color::Rgb(0x3f, 0x3f, 0x46);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Highlighted text (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text style (purple)
    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Accent text style (yellow)
    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Progress bar filled portion
    pub fn progress_bar() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::BACKGROUND_LIGHT)
    }

    /// Progress bar unfilled portion
    pub fn progress_bar_empty() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND_LIGHT)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    /// Coin balance and prices
    pub fn coins() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Premium/locked marker
    pub fn locked() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Episode card (normal state)
    pub fn episode_card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Episode card under the grid cursor
    pub fn episode_card_cursor() -> Style {
        Style::default()
            .fg(Self::TEXT)
            .bg(Self::BACKGROUND_HOVER)
            .add_modifier(Modifier::BOLD)
    }

    /// Episode currently playing
    pub fn episode_card_playing() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Tab label (inactive)
    pub fn tab() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Tab label (active)
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for input fields
    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Input placeholder text
    pub fn placeholder() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND_LIGHT)
    }

    /// Fan bubble in the chat transcript
    pub fn chat_user() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::PRIMARY)
    }

    /// Character bubble in the chat transcript
    pub fn chat_model() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_HOVER)
    }

    /// Character name and AI badges
    pub fn character() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Liked heart
    pub fn liked() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Typing indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Rating stars
    pub fn rating() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Genre tags
    pub fn tag() -> Style {
        Style::default().fg(Self::HIGHLIGHT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Duration text
    pub fn duration() -> Style {
        Style::default().fg(Self::DIM)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTRAST
// ═══════════════════════════════════════════════════════════════════════════

/// Minimum ratio for body text (WCAG AA)
pub const MIN_TEXT_CONTRAST: f64 = 4.5;
/// Minimum ratio for bold or large text (WCAG AA)
pub const MIN_LARGE_CONTRAST: f64 = 3.0;

/// sRGB channel to linear light
fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of an RGB color, 0.0 (black) to 1.0 (white).
/// Indexed and named terminal colors have no fixed value and yield `None`.
pub fn luminance(color: Color) -> Option<f64> {
    match color {
        Color::Rgb(r, g, b) => {
            Some(0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b))
        }
        _ => None,
    }
}

/// Contrast between two colors, from 1.0 (identical) up to 21.0
pub fn contrast(a: Color, b: Color) -> Option<f64> {
    let (la, lb) = (luminance(a)?, luminance(b)?);
    Some((la.max(lb) + 0.05) / (la.min(lb) + 0.05))
}

/// Whether `fg` on `bg` reaches `min`
pub fn readable(fg: Color, bg: Color, min: f64) -> bool {
    contrast(fg, bg).is_some_and(|ratio| ratio >= min)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Color; 13] = [
        Theme::BACKGROUND,
        Theme::PRIMARY,
        Theme::SECONDARY,
        Theme::ACCENT,
        Theme::HIGHLIGHT,
        Theme::TEXT,
        Theme::DIM,
        Theme::SUCCESS,
        Theme::WARNING,
        Theme::ERROR,
        Theme::BACKGROUND_LIGHT,
        Theme::BACKGROUND_HOVER,
        Theme::BORDER,
    ];

    #[test]
    fn test_palette_is_true_color() {
        for color in PALETTE {
            assert!(luminance(color).is_some(), "{:?} is not RGB", color);
        }
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(Theme::BACKGROUND, Color::Rgb(0x09, 0x09, 0x0b));
        assert_eq!(Theme::PRIMARY, Color::Rgb(0xf4, 0x3f, 0x5e));
        assert_eq!(Theme::SECONDARY, Color::Rgb(0xa8, 0x55, 0xf7));
        assert_eq!(Theme::ACCENT, Color::Rgb(0xea, 0xb3, 0x08));
        assert_eq!(Theme::BORDER_FOCUSED, Theme::PRIMARY);
    }

    #[test]
    fn test_body_text_on_every_surface() {
        for bg in [
            Theme::BACKGROUND,
            Theme::BACKGROUND_LIGHT,
            Theme::BACKGROUND_HOVER,
        ] {
            assert!(
                readable(Theme::TEXT, bg, MIN_TEXT_CONTRAST),
                "text on {:?}: {:.2}:1",
                bg,
                contrast(Theme::TEXT, bg).unwrap_or_default()
            );
        }
    }

    #[test]
    fn test_accents_readable_when_bold() {
        for color in [
            Theme::PRIMARY,
            Theme::SECONDARY,
            Theme::ACCENT,
            Theme::HIGHLIGHT,
            Theme::ERROR,
            Theme::DIM,
        ] {
            assert!(
                readable(color, Theme::BACKGROUND, MIN_LARGE_CONTRAST),
                "{:?} on background: {:.2}:1",
                color,
                contrast(color, Theme::BACKGROUND).unwrap_or_default()
            );
        }
    }

    #[test]
    fn test_mode_badge_readable() {
        // Status bar NORMAL badge: background color on primary
        assert!(readable(Theme::BACKGROUND, Theme::PRIMARY, MIN_LARGE_CONTRAST));
    }

    #[test]
    fn test_style_helpers_use_palette() {
        assert_eq!(Theme::coins().fg, Some(Theme::ACCENT));
        assert_eq!(Theme::character().fg, Some(Theme::SECONDARY));
        assert_eq!(Theme::tab_active().fg, Some(Theme::PRIMARY));
        assert_eq!(Theme::chat_user().bg, Some(Theme::PRIMARY));
        assert_eq!(Theme::border_focused().fg, Some(Theme::BORDER_FOCUSED));
    }

    #[test]
    fn test_contrast_bounds() {
        let black = Color::Rgb(0, 0, 0);
        let white = Color::Rgb(255, 255, 255);
        let grey = Color::Rgb(100, 100, 100);

        assert!((contrast(black, white).unwrap() - 21.0).abs() < 0.1);
        assert!((contrast(white, black).unwrap() - 21.0).abs() < 0.1);
        assert!((contrast(grey, grey).unwrap() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_named_colors_have_no_contrast() {
        assert_eq!(luminance(Color::Red), None);
        assert_eq!(contrast(Color::Red, Theme::BACKGROUND), None);
        assert!(!readable(Color::White, Theme::BACKGROUND, MIN_TEXT_CONTRAST));
    }
}
