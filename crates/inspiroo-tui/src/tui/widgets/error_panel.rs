// Error panel shown after a failed analysis.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::view::ErrorInfo;

pub const ERROR_TITLE: &str = "A TINTA ACABOU!";
pub const MISSING_KEY_MESSAGE: &str = "Precisamos da chave mestra (API Key). Verifique o código.";
pub const GENERIC_MESSAGE: &str =
    "Ocorreu um erro criativo. Tente amassar o papel e começar de novo.";
pub const RETRY_LABEL: &str = "Amassar e tentar de novo";

/// User-facing message. A missing credential gets its own wording; every
/// other failure shares the generic one.
pub fn headline(info: &ErrorInfo) -> &'static str {
    if info.api_key_missing {
        MISSING_KEY_MESSAGE
    } else {
        GENERIC_MESSAGE
    }
}

pub fn render(frame: &mut Frame, area: Rect, info: &ErrorInfo) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            ERROR_TITLE,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(headline(info), Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            info.message.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    if info.api_key_missing {
        lines.push(Line::from(Span::styled(
            "Defina GEMINI_API_KEY ou preencha config/credentials.toml",
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled(
            " r ",
            Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {RETRY_LABEL}")),
    ]));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, area);
}
