// TUI widget modules for each screen zone.

pub mod analysis;
pub mod auth_modal;
pub mod community;
pub mod error_panel;
pub mod idea_input;
pub mod profile_card;
pub mod quit_confirm;
pub mod status_bar;
pub mod thinking;

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};

/// Highlight color shared by titles, the brand, and focused borders.
pub const ACCENT: Color = Color::Yellow;

/// Border style for a panel: the accent when it has keyboard focus,
/// otherwise `base`.
pub fn focused_border_style(focused: bool, base: Style) -> Style {
    if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the rectangle is clamped to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

/// Draw with `render` on a `width`x`height` test terminal and return the
/// buffer contents as one string.
#[cfg(test)]
pub(crate) fn render_to_string<F>(width: u16, height: u16, render: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(render).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}
