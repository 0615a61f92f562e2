//! Player surface view
//!
//! Video canvas, seek bar, clock with control hints, and the episode info
//! block underneath.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::stream::{PlaybackState, PlayerSurface};
use crate::ui::layout::PlayerLayout;
use crate::ui::Theme;

/// Like counter shown under the player
pub const LIKE_COUNT_LABEL: &str = "12.5k";

/// Blurb shown under every episode
pub const EPISODE_BLURB: &str =
    "A verdade finalmente é revelada neste episódio emocionante...";

/// Render the whole player surface
pub fn render(frame: &mut Frame, layout: &PlayerLayout, app: &App) {
    let player = &app.player;

    let title = match app.current_episode() {
        Some(ep) => format!(" ▶ EPISÓDIO {} ", ep.id),
        None => " ▶ PLAYER ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if player.state.is_playing() {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()));
    frame.render_widget(block, layout.area);

    render_screen(frame, layout.screen, app);

    let bar = Paragraph::new(progress_line(player, layout.progress_bar.width));
    frame.render_widget(bar, layout.progress_bar);

    render_controls(frame, layout.controls, player);
    render_info(frame, layout.info, app);
}

/// Seek bar as filled and empty cells
pub fn progress_line(player: &PlayerSurface, width: u16) -> Line<'static> {
    let width = width as usize;
    let filled = ((player.progress() * width as f64).round() as usize).min(width);
    Line::from(vec![
        Span::styled("█".repeat(filled), Theme::progress_bar()),
        Span::styled("░".repeat(width - filled), Theme::progress_bar_empty()),
    ])
}

fn render_screen(frame: &mut Frame, area: Rect, app: &App) {
    let player = &app.player;

    let (glyph, caption) = match player.state {
        PlaybackState::Playing => ("▶", "Reproduzindo"),
        PlaybackState::Paused => ("⏸", "Pausado"),
        PlaybackState::AutoplayBlocked => ("⏸", "Reprodução automática bloqueada"),
    };

    let mut lines = Vec::new();
    let pad = area.height.saturating_sub(5) / 2;
    lines.extend((0..pad).map(|_| Line::from("")));

    lines.push(Line::from(Span::styled(
        glyph,
        Style::default()
            .fg(Theme::TEXT)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(caption, Theme::dimmed())));

    if let Some(ep) = app.current_episode() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(ep.title.clone(), Theme::title())));
    }
    if player.state == PlaybackState::AutoplayBlocked {
        lines.push(Line::from(vec![
            Span::styled(" SPACE ", Theme::keybind()),
            Span::styled("para assistir", Theme::keybind_desc()),
        ]));
    }

    let screen = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Theme::BACKGROUND));
    frame.render_widget(screen, area);
}

fn render_controls(frame: &mut Frame, area: Rect, player: &PlayerSurface) {
    let clock = format!(
        " {} / {} ",
        player.format_position(),
        player.format_duration()
    );

    let mute = if player.muted {
        Span::styled(" 🔇 ", Theme::warning())
    } else {
        Span::styled(" 🔊 ", Theme::dimmed())
    };

    let heart = if player.liked {
        Span::styled(" ♥ ", Theme::liked())
    } else {
        Span::styled(" ♡ ", Theme::dimmed())
    };

    let line = Line::from(vec![
        Span::styled(clock, Theme::text()),
        mute,
        heart,
        Span::styled(" SPACE ", Theme::keybind()),
        Span::styled("Play/Pause ", Theme::keybind_desc()),
        Span::styled(" [ ] ", Theme::keybind()),
        Span::styled("±5s ", Theme::keybind_desc()),
        Span::styled(" m ", Theme::keybind()),
        Span::styled("Mudo ", Theme::keybind_desc()),
        Span::styled(" l ", Theme::keybind()),
        Span::styled("Curtir", Theme::keybind_desc()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_info(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ep) = app.current_episode() else {
        return;
    };

    let heart_style = if app.player.liked {
        Theme::liked()
    } else {
        Theme::dimmed()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("Ep {:02} · ", ep.id), Theme::accent()),
            Span::styled(
                ep.title.clone(),
                Style::default()
                    .fg(Theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!("👁 {} visualizações", ep.views), Theme::dimmed()),
            Span::raw("  "),
            Span::styled(format!("♥ {}", LIKE_COUNT_LABEL), heart_style),
        ]),
        Line::from(Span::styled(EPISODE_BLURB, Theme::dimmed())),
    ];

    let info = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(info, area);
}
