// Analysis result view: the structured idea cards on the left, the
// "what now?" checklist on the right.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::analysis::AnalysisResult;
use inspiroo_core::checklist::Checklist;
use inspiroo_core::community::saved_by;
use inspiroo_core::protocol::AppSnapshot;

use super::{focused_border_style, ACCENT};
use crate::tui::ScreenState;

pub const SAVE_LABEL: &str = "SALVAR IDEIA";
pub const SAVED_LABEL: &str = "SALVO!";

pub fn render(
    frame: &mut Frame,
    area: Rect,
    result: &AnalysisResult,
    state: &ScreenState,
    focused: bool,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let saved = is_saved(&state.snapshot, result);
    let cards = Paragraph::new(result_lines(result))
        .wrap(Wrap { trim: false })
        .scroll((state.result_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", result.structure.title),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(save_button(saved))
                .border_style(focused_border_style(focused, Style::default())),
        );
    frame.render_widget(cards, columns[0]);

    render_checklist(
        frame,
        columns[1],
        &state.snapshot.checklist,
        state.selected_step,
        focused,
    );
}

/// Whether the current user already pinned this result to the mural.
pub fn is_saved(snapshot: &AppSnapshot, result: &AnalysisResult) -> bool {
    snapshot
        .user
        .as_ref()
        .is_some_and(|user| saved_by(&snapshot.sparks, user, result))
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn bullets(items: &[String], marker: &str) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(ACCENT)),
                Span::raw(item.clone()),
            ])
        })
        .collect()
}

/// Every card of the result, top to bottom.
pub fn result_lines(result: &AnalysisResult) -> Vec<Line<'static>> {
    let s = &result.structure;
    let evo = &result.startup_evolution;
    let dim = Style::default().fg(Color::Gray);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("“{}”", result.spark_translation),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            s.one_liner.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(s.value_prop.clone(), dim)),
        Line::from(""),
        heading(">> Error / Problem"),
        Line::from(s.problem.clone()),
        heading(">> Target_User"),
        Line::from(s.target_audience.clone()),
        heading("Timing é tudo!"),
        Line::from(s.why_now.clone()),
        Line::from(""),
        heading("3 CAMINHOS"),
    ];
    lines.extend(
        result
            .creative_paths
            .iter()
            .enumerate()
            .map(|(i, path)| {
                Line::from(vec![
                    Span::styled(format!(" {}. ", i + 1), Style::default().fg(ACCENT)),
                    Span::raw(path.clone()),
                ])
            }),
    );

    lines.push(Line::from(""));
    lines.push(heading("MÓDULO 01: MVP"));
    lines.push(Line::from(evo.first_feature.clone()));
    lines.extend(bullets(&evo.business_models, " $ "));

    lines.push(Line::from(""));
    lines.push(heading("PROTOCOLO DE VALIDAÇÃO"));
    lines.extend(bullets(&evo.validation_steps, " ✓ "));

    lines.push(Line::from(""));
    lines.push(heading("ELEVATOR PITCH"));
    lines.push(Line::from(evo.pitch_30s.clone()));
    lines.push(Line::from(Span::styled(
        format!("{}  ({} car.)", evo.pitch_140_char, evo.pitch_140_char.chars().count()),
        dim,
    )));

    if !result.smart_connections.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading("CONEXÕES"));
        lines.extend(bullets(&result.smart_connections, " ↔ "));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        result.hook_message.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines
}

/// Shown on the bottom border so it stays visible while the cards scroll.
pub fn save_button(saved: bool) -> Line<'static> {
    if saved {
        Line::from(Span::styled(
            format!(" ★ {SAVED_LABEL} "),
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                " s ",
                Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {SAVE_LABEL}"), Style::default().fg(ACCENT)),
        ])
    }
}

fn render_checklist(
    frame: &mut Frame,
    area: Rect,
    checklist: &Checklist,
    selected: usize,
    focused: bool,
) {
    let items: Vec<ListItem> = checklist
        .items()
        .map(|(label, checked)| {
            let (mark, style) = if checked {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, Style::default().fg(ACCENT)),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let title = format!(
        " O QUE FAZER AGORA? {}/{} ",
        checklist.checked_count(),
        items.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
                .border_style(focused_border_style(focused, Style::default())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
