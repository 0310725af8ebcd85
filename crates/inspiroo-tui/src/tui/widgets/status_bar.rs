// Status bar, notice bar, and help bar: the single-row strips around the
// main panels.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use inspiroo_core::protocol::{Notice, NoticeLevel};
use inspiroo_core::view::Phase;

use super::ACCENT;
use crate::tui::{Focus, Overlay, ScreenState};

pub const BRAND: &str = "INSPIRØØ";
pub const MOTTO: &str = "pense menos / CRIE MAIS";

/// Layout: [brand] [motto] | [online counter] | [user or sign-in hint]
pub fn render(frame: &mut Frame, area: Rect, state: &ScreenState) {
    let mut spans = vec![
        Span::styled(
            format!(" {BRAND} "),
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {MOTTO}"), Style::default().fg(Color::Gray)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled(
            online_label(state.online_count),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
    ];

    match &state.snapshot.user {
        Some(user) => spans.push(Span::styled(
            format!("{} · Nv {}", user.name, user.level),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        None => spans.push(Span::styled(
            "visitante",
            Style::default().fg(Color::DarkGray),
        )),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn online_label(count: u32) -> String {
    format!("{count} CRIADORES ONLINE")
}

// ---------------------------------------------------------------------------
// Notice bar
// ---------------------------------------------------------------------------

pub fn render_notice(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let style = notice_style(notice.level);
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", notice.text), style)));
    frame.render_widget(paragraph, area);
}

pub fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Cyan),
        NoticeLevel::Success => Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

// ---------------------------------------------------------------------------
// Help bar
// ---------------------------------------------------------------------------

pub fn render_help(frame: &mut Frame, area: Rect, state: &ScreenState) {
    let mut spans = Vec::new();
    for (key, action) in help_entries(state) {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        spans.push(Span::styled(
            format!(" {action} "),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Key hints for whatever currently receives input.
pub fn help_entries(state: &ScreenState) -> Vec<(&'static str, &'static str)> {
    match &state.overlay {
        Some(Overlay::ConfirmQuit) => return vec![("y", "sair"), ("n", "voltar")],
        Some(Overlay::Profile) => return vec![("o", "sair da conta"), ("Esc", "fechar")],
        Some(Overlay::SignUp(_)) => {
            return vec![
                ("←/→", "escolher"),
                ("Enter", "avançar"),
                ("r", "novo avatar"),
                ("Esc", "cancelar"),
            ]
        }
        None => {}
    }

    let mut entries = match state.focus {
        Focus::Community => vec![("↑/↓", "navegar"), ("l", "curtir"), ("c", "conectar")],
        Focus::Main => match state.phase() {
            Phase::Idle => vec![("Enter", "enviar"), ("↑/↓", "modo")],
            Phase::Thinking => vec![],
            Phase::Result => vec![
                ("↑/↓", "passo"),
                ("Space", "marcar"),
                ("s", "salvar"),
                ("r", "nova ideia"),
                ("PgUp/PgDn", "rolar"),
            ],
            Phase::Error => vec![("r", "tentar de novo")],
        },
    };
    entries.push(("Tab", "painel"));
    entries.push(("^P", "perfil"));
    entries.push(("Esc", "sair"));
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{sample_result, screen_with};
    use crate::tui::widgets::render_to_string;
    use inspiroo_core::view::ViewState;

    #[test]
    fn online_label_format() {
        assert_eq!(online_label(1420), "1420 CRIADORES ONLINE");
    }

    #[test]
    fn notice_styles_differ_by_level() {
        assert_eq!(notice_style(NoticeLevel::Error).fg, Some(Color::Red));
        assert_eq!(notice_style(NoticeLevel::Success).bg, Some(ACCENT));
    }

    #[test]
    fn help_entries_follow_phase() {
        let idle = screen_with(ViewState::Idle);
        assert!(help_entries(&idle).contains(&("Enter", "enviar")));

        let result = screen_with(ViewState::Result(Box::new(sample_result())));
        assert!(help_entries(&result).contains(&("s", "salvar")));

        let mut community = screen_with(ViewState::Idle);
        community.focus = Focus::Community;
        assert!(help_entries(&community).contains(&("l", "curtir")));
    }

    #[test]
    fn help_entries_for_quit_overlay_are_exclusive() {
        let mut state = screen_with(ViewState::Idle);
        state.overlay = Some(Overlay::ConfirmQuit);
        assert_eq!(help_entries(&state), vec![("y", "sair"), ("n", "voltar")]);
    }

    #[test]
    fn render_shows_brand_and_count() {
        let mut state = screen_with(ViewState::Idle);
        state.online_count = 1418;
        let text = render_to_string(100, 1, |frame| render(frame, frame.area(), &state));
        assert!(text.contains(BRAND));
        assert!(text.contains("1418 CRIADORES ONLINE"));
        assert!(text.contains("visitante"));
    }

    #[test]
    fn render_notice_shows_text() {
        let notice = Notice::success("★ IDEIA COLADA NO MURAL!");
        let text = render_to_string(60, 1, |frame| {
            render_notice(frame, frame.area(), Some(&notice))
        });
        assert!(text.contains("IDEIA COLADA NO MURAL"));
    }

    #[test]
    fn render_help_in_narrow_area_does_not_panic() {
        let state = screen_with(ViewState::Result(Box::new(sample_result())));
        render_to_string(20, 1, |frame| render_help(frame, frame.area(), &state));
    }
}
