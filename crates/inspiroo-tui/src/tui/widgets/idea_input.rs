// Idea input panel: the text box, a rotating inspiration placeholder, and
// the analysis mode selector.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::analysis::AnalysisMode;
use inspiroo_core::catalog::inspiration_prompt;

use super::{focused_border_style, ACCENT};
use crate::tui::ScreenState;

pub fn render(frame: &mut Frame, area: Rect, state: &ScreenState, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Qual é a ideia? ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .border_style(focused_border_style(focused, Style::default()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(AnalysisMode::ALL.len() as u16 + 2),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(idea_lines(state, focused)).wrap(Wrap { trim: false }),
        sections[0],
    );
    frame.render_widget(
        Paragraph::new(mode_lines(state.mode)).block(
            Block::default()
                .borders(Borders::TOP)
                .title(" Modo ")
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        sections[1],
    );
}

fn idea_lines(state: &ScreenState, focused: bool) -> Vec<Line<'static>> {
    if state.idea_text.is_empty() {
        return vec![Line::from(Span::styled(
            inspiration_prompt(state.inspiration_tick).to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let cursor = if focused && state.frame_tick % 30 < 15 { "▌" } else { " " };
    vec![Line::from(vec![
        Span::raw(state.idea_text.clone()),
        Span::styled(cursor, Style::default().fg(ACCENT)),
    ])]
}

/// One row per mode, the selected one marked and highlighted.
pub fn mode_lines(selected: AnalysisMode) -> Vec<Line<'static>> {
    AnalysisMode::ALL
        .iter()
        .map(|&mode| {
            let active = mode == selected;
            let marker = if active { "▶ " } else { "  " };
            let label_style = if active {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(mode.label(), label_style),
                Span::styled(
                    format!("  {}", mode.tagline()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::screen_with;
    use crate::tui::widgets::render_to_string;
    use inspiroo_core::catalog::INSPIRATION_PROMPTS;
    use inspiroo_core::view::ViewState;

    #[test]
    fn mode_lines_mark_selection() {
        let lines = mode_lines(AnalysisMode::Partners);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans[0].content, "▶ ");
        assert_eq!(lines[0].spans[0].content, "  ");
    }

    #[test]
    fn empty_input_shows_rotating_prompt() {
        let mut state = screen_with(ViewState::Idle);
        state.inspiration_tick = 1;
        let text = render_to_string(90, 14, |frame| render(frame, frame.area(), &state, true));
        assert!(text.contains(INSPIRATION_PROMPTS[1]));
    }

    #[test]
    fn typed_text_replaces_prompt() {
        let mut state = screen_with(ViewState::Idle);
        state.idea_text = "Horta no telhado".into();
        let text = render_to_string(90, 14, |frame| render(frame, frame.area(), &state, true));
        assert!(text.contains("Horta no telhado"));
        assert!(!text.contains(INSPIRATION_PROMPTS[0]));
    }

    #[test]
    fn render_small_area_does_not_panic() {
        let state = screen_with(ViewState::Idle);
        render_to_string(12, 4, |frame| render(frame, frame.area(), &state, false));
    }
}
