//! Unlock modal overlay

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::ui::layout::centered_rect;
use crate::ui::Theme;

pub const MODAL_TITLE: &str = " 🔒 Desbloquear Episódio ";

/// Render the paywall over `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let paywall = &app.paywall;
    let affordable = paywall.can_afford(app.coins);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Este é um episódio ", Theme::dimmed()),
            Span::styled("Premium", Theme::selected()),
            Span::styled(".", Theme::dimmed()),
        ]),
    ];

    if let Some(ep) = app.pending_episode() {
        lines.push(Line::from(Span::styled(
            format!("Ep {:02} - {}", ep.id, ep.title),
            Theme::text(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{} Moedas", paywall.cost), Theme::coins()),
        Span::styled(" NECESSÁRIAS", Theme::dimmed()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Seu saldo atual: ", Theme::dimmed()),
        Span::styled(app.coins.to_string(), Theme::text()),
    ]));
    lines.push(Line::from(""));

    if affordable {
        lines.push(Line::from(vec![
            Span::styled(" ENTER ", Theme::highlighted()),
            Span::styled(" Desbloquear Episódio", Theme::text()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            format!("Faltam {} moedas", paywall.shortfall(app.coins)),
            Theme::error(),
        )));
        lines.push(Line::from(Span::styled("RECARREGAR MOEDAS", Theme::dimmed())));
        for (i, pkg) in paywall.packages.iter().enumerate() {
            let is_selected = i == paywall.package_cursor;
            let marker = if is_selected { "▸ " } else { "  " };
            let mut spans = vec![
                Span::styled(
                    marker,
                    if is_selected {
                        Theme::accent()
                    } else {
                        Theme::dimmed()
                    },
                ),
                Span::styled(
                    format!("{} Moedas", pkg.amount),
                    if is_selected {
                        Theme::coins()
                    } else {
                        Theme::text()
                    },
                ),
            ];
            if pkg.bonus > 0 {
                spans.push(Span::styled(format!(" +{} Bônus", pkg.bonus), Theme::success()));
            }
            spans.push(Span::styled(format!("  {}", pkg.price), Theme::text()));
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ESC ", Theme::keybind()),
        Span::styled("Fechar", Theme::keybind_desc()),
    ]));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect(area, 52, height);
    frame.render_widget(Clear, popup);

    let modal = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::border_focused())
            .title(Span::styled(MODAL_TITLE, Theme::title()))
            .style(Style::default().bg(Theme::BACKGROUND_LIGHT)),
    );
    frame.render_widget(modal, popup);
}
