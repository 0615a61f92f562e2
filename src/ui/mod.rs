//! Terminal UI components
//!
//! Built with ratatui. Everything here reads `App` and draws; state changes
//! happen in the app and its components, never during rendering.

pub mod layout;
pub mod paywall;
pub mod player;
pub mod sidebar;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, InputMode};
use layout::{centered_rect, screen_layout};

/// Main render function - header, player, panel, status bar, then overlays
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(Theme::BACKGROUND)),
        area,
    );

    let layout = screen_layout(area);

    render_header(frame, layout.header, app);
    player::render(frame, &layout.player, app);
    sidebar::render(frame, layout.sidebar, app);
    render_status_bar(frame, layout.status, app);

    if app.show_unlock_modal {
        paywall::render(frame, area, app);
    }

    if let Some(ref notice) = app.notice {
        render_notice_popup(frame, area, notice);
    }
}

/// Brand on the left, series title in the middle, coin balance on the right
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Logo
            Constraint::Min(1),     // Series
            Constraint::Length(22), // Coins
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "Drama",
            Style::default()
                .fg(Theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Shorts",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, chunks[0]);

    let series = Paragraph::new(Line::from(vec![
        Span::styled(app.series.title.clone(), Theme::text()),
        Span::styled(
            format!("  ★ {:.1}", app.series.rating),
            Theme::rating(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(series, chunks[1]);

    let coins = Paragraph::new(Line::from(vec![
        Span::styled(format!("🪙 {}", app.coins), Theme::coins()),
        Span::styled("  + ", Theme::keybind()),
        Span::styled("recarregar", Theme::keybind_desc()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::ACCENT)),
    );
    frame.render_widget(coins, chunks[2]);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let tab_indicator = Span::styled(
        format!(" {} ", app.panel.active_tab.label().to_uppercase()),
        Style::default().fg(Theme::DIM),
    );

    let episode = Span::styled(format!(" EP {:02} ", app.current_episode), Theme::accent());

    let playback = Span::styled(format!(" {} ", app.player.state), Theme::secondary());

    let help = Span::styled(
        " q:sair  tab:abas  enter:assistir  espaço:play  +:moedas  i:escrever ",
        Theme::dimmed(),
    );

    let status_line = Line::from(vec![
        mode_indicator,
        tab_indicator,
        episode,
        playback,
        Span::raw(" │ "),
        help,
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Render notice popup overlay
fn render_notice_popup(frame: &mut Frame, area: Rect, notice: &str) {
    let popup_area = centered_rect(area, 60, 5);
    frame.render_widget(Clear, popup_area);

    let notice_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice, Theme::success())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::accent())
            .title(Span::styled(" ✓ AVISO ", Theme::accent()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(notice_block, popup_area);
}
