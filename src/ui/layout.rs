//! Layout components (header, status bar)

use crate::app::App;
use crate::state::View;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "Get Your Trade-In Value",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

/// Key hints for the current view
fn status_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    match app.state.current_view {
        View::Completed if app.state.redirect_url.is_some() => vec![
            ("Enter", "open page"),
            ("Esc", "new request"),
            ("Ctrl+C", "quit"),
        ],
        View::Completed => vec![("Enter", "new request"), ("Ctrl+C", "quit")],
        View::Form => {
            let mut hints = vec![("Tab", "next field")];
            let on_select = app
                .state
                .form
                .active_field_id()
                .is_some_and(|id| app.state.form.field(id).is_select());
            if on_select {
                hints.push(("←/→", "change"));
            }
            hints.push((crate::platform::SUBMIT_SHORTCUT, "submit"));
            if app.state.error.is_some() {
                hints.push(("Esc", "dismiss error"));
            }
            hints.push(("Ctrl+C", "quit"));
            hints
        }
    }
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (key, action) in status_hints(app) {
        spans.push(Span::styled(key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let status = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
