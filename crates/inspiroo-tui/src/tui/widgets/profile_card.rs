// Profile card overlay for the signed-in user.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::identity::User;

use super::auth_modal::stat_lines;
use super::{centered_rect, ACCENT};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 17;

pub fn render(frame: &mut Frame, area: Rect, user: &User) {
    let card = centered_rect(CARD_WIDTH, CARD_HEIGHT, area);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .style(Style::default().bg(Color::Black))
        .title(Span::styled(
            format!(" {} ", user.role_label().to_uppercase()),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1), Constraint::Length(4)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(header_lines(user)).wrap(Wrap { trim: true }),
        rows[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::DarkGray))
        .ratio(user.xp_ratio())
        .label(xp_label(user));
    frame.render_widget(gauge, rows[1]);

    let mut stats = vec![Line::from("")];
    stats.extend(stat_lines(&user.stats));
    frame.render_widget(Paragraph::new(stats), rows[2]);
}

fn header_lines(user: &User) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                user.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  Nível {}", user.level), Style::default().fg(ACCENT)),
        ]),
        Line::from(Span::styled(
            user.avatar_url.clone(),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if let Some(bio) = &user.bio {
        lines.push(Line::from(Span::styled(
            bio.clone(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(joined) = user.joined_at {
        lines.push(Line::from(Span::styled(
            format!("no mural desde {}", joined.format("%d/%m/%Y")),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        "o: sair da conta · Esc: fechar",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

pub fn xp_label(user: &User) -> String {
    let (current, target) = user.xp_progress();
    format!("XP {current}/{target}")
}
