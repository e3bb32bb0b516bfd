//! Trade-in form rendering (vehicle step and contact step)

use super::field_renderer::{draw_input, draw_select};
use crate::app::App;
use crate::state::Step;
use crate::ui::components::{render_button, submit_label, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Widest the form gets on large terminals
const FORM_WIDTH: u16 = 60;

const CONTACT_WARNING: &str =
    "Warning! Make sure your information is correct because we will text/email you the final report!";

/// Draw the form for the current step, horizontally centered
pub fn draw_trade_in_form(frame: &mut Frame, area: Rect, app: &App) {
    let width = FORM_WIDTH.min(area.width);
    let area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        width,
        ..area
    };

    let step = app.state.form.step;
    let title = match step {
        Step::One => " Your Vehicle (1/2) ",
        Step::Two => " Your Contact Details (2/2) ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = step.focus_order();
    let mut constraints = vec![Constraint::Length(2)]; // error line
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0)); // warning / filler

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    draw_error_line(frame, chunks[0], app.state.error.as_deref());

    let active = app.state.form.active_field_id();
    for (index, id) in fields.iter().enumerate() {
        let field = app.state.form.field(*id);
        let is_active = active == Some(*id);
        let chunk = chunks[index + 1];
        match app.state.options_for(*id) {
            Some(options) if field.is_select() => draw_select(
                frame,
                chunk,
                field,
                options,
                is_active,
                app.state.is_field_loading(*id),
            ),
            _ => draw_input(frame, chunk, field, is_active),
        }
    }

    let button_area = chunks[fields.len() + 1];
    render_button(
        frame,
        button_area,
        submit_label(step.number(), app.state.is_submitting),
        app.state.form.is_button_active(),
        !app.state.is_submitting,
    );

    if step == Step::Two {
        let warning = Paragraph::new(CONTACT_WARNING)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(warning, chunks[fields.len() + 2]);
    }
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let Some(message) = error else {
        return;
    };
    let line = Line::from(Span::styled(
        message,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}
