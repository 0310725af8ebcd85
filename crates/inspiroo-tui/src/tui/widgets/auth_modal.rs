// Sign-up overlay: step 1 picks a codename and spirit partner, step 2 an
// avatar style and seed.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use inspiroo_core::catalog::UserStats;
use inspiroo_core::identity::{SignupDraft, SignupStep};

use super::{centered_rect, ACCENT};

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 18;
const STAT_BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, draft: &SignupDraft, error: Option<&str>) {
    let modal = centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
    frame.render_widget(Clear, modal);

    let mut lines = match draft.step {
        SignupStep::Identity => identity_lines(draft),
        SignupStep::Avatar => avatar_lines(draft),
    };
    if let Some(message) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(Span::styled(
                    step_title(draft.step),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )),
        );
    frame.render_widget(paragraph, modal);
}

pub fn step_title(step: SignupStep) -> &'static str {
    match step {
        SignupStep::Identity => " ENTRAR NO MURAL · 1/2 IDENTIDADE ",
        SignupStep::Avatar => " ENTRAR NO MURAL · 2/2 AVATAR ",
    }
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn selector(value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ◀ ", Style::default().fg(ACCENT)),
        Span::styled(
            value.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(ACCENT)),
    ])
}

fn identity_lines(draft: &SignupDraft) -> Vec<Line<'static>> {
    let partner = draft.partner();
    let name = if draft.name.is_empty() {
        Span::styled("seu codinome", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            draft.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![label("Codinome: "), name, Span::styled("▌", Style::default().fg(ACCENT))]),
        Line::from(""),
        Line::from(label("Animal espiritual:")),
        selector(partner.label),
        Line::from(Span::styled(
            format!("  {}", partner.description),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];
    lines.extend(stat_lines(&partner.stats));
    lines
}

fn avatar_lines(draft: &SignupDraft) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(vec![
            label("Codinome: "),
            Span::styled(draft.name.clone(), Style::default().fg(Color::White)),
            label("  ·  "),
            Span::styled(draft.partner().label, Style::default().fg(ACCENT)),
        ]),
        Line::from(""),
        Line::from(label("Estilo do avatar:")),
        selector(draft.style().name),
        Line::from(""),
        Line::from(vec![
            label("Semente: "),
            Span::styled(draft.avatar_seed.clone(), Style::default().fg(Color::White)),
            label("  (r para sortear outra)"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            draft.avatar_url(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(label("Enter confirma · Backspace volta")),
    ]
}

/// Three labelled bars, one per stat.
pub fn stat_lines(stats: &UserStats) -> Vec<Line<'static>> {
    [
        ("Criatividade", stats.creativity),
        ("Visão       ", stats.vision),
        ("Execução    ", stats.execution),
    ]
    .into_iter()
    .map(|(name, value)| {
        Line::from(vec![
            Span::styled(format!("  {name} "), Style::default().fg(Color::Gray)),
            Span::styled(stat_bar(value), Style::default().fg(ACCENT)),
            Span::styled(format!(" {value}"), Style::default().fg(Color::White)),
        ])
    })
    .collect()
}

/// Fixed-width bar for a 0–100 value.
pub fn stat_bar(value: u8) -> String {
    let filled = (value.min(100) as usize * STAT_BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(STAT_BAR_WIDTH - filled))
}
