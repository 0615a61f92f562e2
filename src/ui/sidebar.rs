//! Catalogue panel view
//!
//! Tab strip plus the four tab bodies: episode grid, series details,
//! comments with an input box, and the character chat.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};

use crate::app::{App, InputMode};
use crate::catalog::UNLOCK_COST;
use crate::config::DEFAULT_CHARACTER;
use crate::models::{ChatRole, Episode, Tab};
use crate::panel::{TextInput, GRID_COLUMNS};
use crate::ui::Theme;

/// Rows per episode card (borders included)
pub const CARD_HEIGHT: u16 = 4;

pub const COMMENT_PLACEHOLDER: &str = "Adicione um comentário...";
pub const CHAT_PLACEHOLDER: &str = "Pergunte sobre o segredo...";
pub const CHAT_FOOTER: &str = "IA Character Mode • Desenvolvido com Gemini";
pub const TYPING_INDICATOR: &str = "• • •";

/// Render the panel into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    render_tabs(frame, chunks[0], app.panel.active_tab);

    match app.panel.active_tab {
        Tab::Episodes => render_episodes(frame, chunks[1], app),
        Tab::Details => render_details(frame, chunks[1], app),
        Tab::Comments => render_comments(frame, chunks[1], app),
        Tab::AiChat => render_chat(frame, chunks[1], app),
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = if *tab == Tab::AiChat {
                format!("{} ✦{}", i + 1, tab.label())
            } else {
                format!("{} {}", i + 1, tab.label())
            };
            Line::from(label)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Theme::tab())
        .highlight_style(Theme::tab_active())
        .divider(Span::styled("│", Theme::dimmed()))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Theme::border()),
        );
    frame.render_widget(tabs, area);
}

// =============================================================================
// Episodes
// =============================================================================

fn render_episodes(frame: &mut Frame, area: Rect, app: &App) {
    let grid = &app.panel.episodes;
    let total_rows = app.series.episodes.len().div_ceil(GRID_COLUMNS);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);

    // Keep the cursor row on screen
    let first_row = grid.row().saturating_sub(visible_rows - 1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (offset, row_area) in rows.iter().enumerate() {
        let row = first_row + offset;
        if row >= total_rows {
            break;
        }

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let idx = row * GRID_COLUMNS + col;
            if let Some(ep) = app.series.episodes.get(idx) {
                render_card(
                    frame,
                    *cell,
                    ep,
                    idx == grid.cursor,
                    ep.id == app.current_episode,
                );
            }
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, ep: &Episode, cursor: bool, playing: bool) {
    let border_style = if cursor {
        Theme::border_focused()
    } else if playing {
        Theme::episode_card_playing()
    } else {
        Theme::border()
    };

    let status = if ep.locked {
        Span::styled(format!("🔒 {}", UNLOCK_COST), Theme::locked())
    } else if playing {
        Span::styled("▶ tocando", Theme::episode_card_playing())
    } else {
        Span::styled(ep.duration.clone(), Theme::duration())
    };

    let lines = vec![
        Line::from(status),
        Line::from(Span::styled(format!("👁 {}", ep.views), Theme::dimmed())),
    ];

    let card = Paragraph::new(lines)
        .style(if cursor {
            Theme::episode_card_cursor()
        } else {
            Theme::episode_card()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(Span::styled(format!(" Ep {:02} ", ep.id), Theme::text())),
        );
    frame.render_widget(card, area);
}

// =============================================================================
// Details
// =============================================================================

fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let series = &app.series;

    let mut tags: Vec<Span> = Vec::new();
    for tag in &series.tags {
        tags.push(Span::styled(format!(" {} ", tag), Theme::tag()));
        tags.push(Span::raw(" "));
    }

    let mut lines = vec![
        Line::from(Span::styled(series.title.clone(), Theme::title())),
        Line::from(vec![
            Span::styled(format!("★ {:.1}", series.rating), Theme::rating()),
            Span::styled(
                format!("  •  {} Episódios", series.total_episodes),
                Theme::dimmed(),
            ),
        ]),
        Line::from(""),
        Line::from(tags),
        Line::from(""),
        Line::from(Span::styled(series.description.clone(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled("ELENCO PRINCIPAL", Theme::dimmed())),
    ];
    lines.extend(
        series
            .cast
            .iter()
            .map(|name| Line::from(Span::styled(format!("• {}", name), Theme::text()))),
    );

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.panel.details.offset, 0));
    frame.render_widget(details, area);
}

// =============================================================================
// Comments
// =============================================================================

fn render_comments(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let focused = app.input_mode == InputMode::Editing;
    render_input(
        frame,
        chunks[0],
        &app.panel.comments.input,
        COMMENT_PLACEHOLDER,
        focused,
    );

    let mut lines = Vec::new();
    for comment in &app.series.comments {
        lines.push(Line::from(vec![
            Span::styled(
                comment.user.clone(),
                Style::default()
                    .fg(Theme::TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" · {}", comment.timestamp), Theme::dimmed()),
        ]));
        lines.push(Line::from(Span::styled(comment.text.clone(), Theme::text())));
        lines.push(Line::from(Span::styled(
            format!("♡ {}", comment.likes),
            Theme::dimmed(),
        )));
        lines.push(Line::from(""));
    }

    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.panel.comments.scroll.offset, 0));
    frame.render_widget(list, chunks[1]);
}

// =============================================================================
// AI Chat
// =============================================================================

/// Full display name for the chat header
pub fn character_display_name(character: &str) -> String {
    if character == DEFAULT_CHARACTER {
        format!("{} Martins", character)
    } else {
        character.to_string()
    }
}

fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Character header
            Constraint::Min(1),    // Transcript
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            character_display_name(&app.character),
            Theme::character(),
        )),
        Line::from(vec![
            Span::styled("● ", Theme::success()),
            Span::styled("Online agora", Theme::dimmed()),
        ]),
    ]);
    frame.render_widget(header, chunks[0]);

    render_transcript(frame, chunks[1], app);

    let focused = app.input_mode == InputMode::Editing;
    render_input(
        frame,
        chunks[2],
        &app.panel.chat.input,
        CHAT_PLACEHOLDER,
        focused,
    );

    let footer = Paragraph::new(Span::styled(CHAT_FOOTER, Theme::dimmed()))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
    // Bubbles take at most 80% of the width
    let bubble_width = ((area.width as usize) * 4 / 5).max(8);

    let mut lines: Vec<Line> = Vec::new();
    for turn in &app.panel.chat.transcript {
        let (style, alignment) = match turn.role {
            ChatRole::User => (Theme::chat_user(), Alignment::Right),
            ChatRole::Model => (Theme::chat_model(), Alignment::Left),
        };
        for row in wrap_text(&turn.text, bubble_width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(format!(" {} ", row), style)).alignment(alignment));
        }
        lines.push(Line::from(""));
    }

    if app.panel.chat.typing {
        lines.push(Line::from(Span::styled(TYPING_INDICATOR, Theme::loading())));
    }

    // Stick to the newest turn
    let overflow = lines.len().saturating_sub(area.height as usize);
    let transcript = Paragraph::new(lines).scroll((overflow.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(transcript, area);
}

/// Greedy word wrap on character counts
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Hard-split words longer than a row
        while word.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { word.len() + 1 };
        if current_len + needed > width && current_len > 0 {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}

// =============================================================================
// Shared
// =============================================================================

fn render_input(
    frame: &mut Frame,
    area: Rect,
    input: &TextInput,
    placeholder: &str,
    focused: bool,
) {
    let (text, style) = if focused {
        let (before, after) = input.split_at_cursor();
        (format!("{}│{}", before, after), Theme::input().fg(Theme::PRIMARY))
    } else if input.value.is_empty() {
        (placeholder.to_string(), Theme::placeholder())
    } else {
        (input.value.clone(), Theme::input())
    };

    let hint = if focused { " ENTER enviar " } else { " i escrever " };

    let field = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title_bottom(Line::from(Span::styled(hint, Theme::keybind_desc())).right_aligned()),
    );
    frame.render_widget(field, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_fits() {
        assert_eq!(wrap_text("olá mundo", 20), vec!["olá mundo"]);
    }

    #[test]
    fn test_wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("um dois três quatro", 9),
            vec!["um dois", "três", "quatro"]
        );
    }

    #[test]
    fn test_wrap_text_hard_splits_long_words() {
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_character_display_name() {
        assert_eq!(character_display_name("Sofia"), "Sofia Martins");
        assert_eq!(character_display_name("Lucas"), "Lucas");
    }
}
