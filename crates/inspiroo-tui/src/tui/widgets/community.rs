// Community mural: shared sparks, newest first, with the selected spark's
// description underneath.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::community::CommunitySpark;

use super::{focused_border_style, ACCENT};
use crate::tui::ScreenState;

pub fn render(frame: &mut Frame, area: Rect, state: &ScreenState, focused: bool) {
    let sparks = &state.snapshot.sparks;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(7)])
        .split(area);

    let items: Vec<ListItem> = sparks.iter().map(spark_item).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" MURAL ({}) ", sparks.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .border_style(focused_border_style(focused, Style::default())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("› ");

    let selected = (!sparks.is_empty()).then_some(state.selected_spark);
    let mut list_state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, sections[0], &mut list_state);

    let detail = sparks
        .get(state.selected_spark)
        .and_then(|s| s.full_description.clone())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(detail)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        sections[1],
    );
}

fn spark_item(spark: &CommunitySpark) -> ListItem<'static> {
    let (heart, heart_style) = like_marker(spark.liked_by_current_user);
    let header = Line::from(vec![
        Span::styled(
            spark.author.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{heart} {}", spark.likes), heart_style),
    ]);
    let tags = Line::from(Span::styled(
        spark
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" "),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(vec![header, Line::from(spark.concept.clone()), tags, Line::from("")])
}

pub fn like_marker(liked: bool) -> (&'static str, Style) {
    if liked {
        ("♥", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        ("♡", Style::default().fg(Color::Gray))
    }
}
