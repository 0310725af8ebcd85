// "Thinking" panel shown while an analysis is in flight.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::analysis::AnalysisMode;

use super::ACCENT;
use crate::tui::ScreenState;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[(tick / 3) % SPINNER.len()]
}

pub fn render(frame: &mut Frame, area: Rect, mode: AnalysisMode, state: &ScreenState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  RABISCANDO O FUTURO...", spinner_frame(state.frame_tick)),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Conectando pontos invisíveis",
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("modo ", Style::default().fg(Color::DarkGray)),
            Span::styled(mode.label(), Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(
            progress_label(state.streamed_chars),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        );
    frame.render_widget(paragraph, area);
}

pub fn progress_label(chars: usize) -> String {
    if chars == 0 {
        "aguardando a primeira linha...".to_string()
    } else {
        format!("{chars} caracteres recebidos")
    }
}
