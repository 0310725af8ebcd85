// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------------+------------------+
// | Main Panel (68%)              | Community (32%)  |
// |  input / thinking / result /  |  shared sparks   |
// |  error                        |                  |
// +-------------------------------+------------------+
// | Notice Bar (1 row)                                |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: brand, online counter, signed-in user.
    pub status_bar: Rect,
    /// Left side of the middle section: content for the current phase.
    pub main_panel: Rect,
    /// Right side of the middle section: the community mural.
    pub community: Rect,
    /// Transient notices (saved, welcome, errors).
    pub notice_bar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // main + community
            Constraint::Length(1), // notice bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(vertical[1]);

    AppLayout {
        status_bar: vertical[0],
        main_panel: horizontal[0],
        community: horizontal[1],
        notice_bar: vertical[2],
        help_bar: vertical[3],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
