//! Screen geometry
//!
//! Pure functions from the terminal area to the rectangles each component
//! draws into. Rendering and mouse hit-testing share these so a click lands
//! on exactly what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Header height (bordered, one text row)
pub const HEADER_HEIGHT: u16 = 3;
/// Rows under the progress bar holding the episode info
pub const PLAYER_INFO_HEIGHT: u16 = 3;

/// Top-level regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub player: PlayerLayout,
    pub sidebar: Rect,
    pub status: Rect,
}

/// Player surface regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    /// Outer bordered block
    pub area: Rect,
    /// Video canvas
    pub screen: Rect,
    /// One-row seek bar
    pub progress_bar: Rect,
    /// Clock and control hints
    pub controls: Rect,
    /// Title, counters and description
    pub info: Rect,
}

/// Split the whole terminal area
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Header
            Constraint::Min(1),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    // Player takes 7 of 12 columns, like the wide desktop layout
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(7, 12), Constraint::Ratio(5, 12)])
        .split(rows[1]);

    ScreenLayout {
        header: rows[0],
        player: player_layout(columns[0]),
        sidebar: columns[1],
        status: rows[2],
    }
}

/// Split the player block
pub fn player_layout(area: Rect) -> PlayerLayout {
    let inner = area.inner(Margin {
        horizontal: 1,
        vertical: 1,
    });

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(PLAYER_INFO_HEIGHT),
        ])
        .split(inner);

    // Keep a one-cell gutter either side of the seek bar
    let progress_bar = rows[1].inner(Margin {
        horizontal: 1,
        vertical: 0,
    });

    PlayerLayout {
        area,
        screen: rows[0],
        progress_bar,
        controls: rows[2],
        info: rows[3],
    }
}

/// Centered popup rectangle clamped to `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
