//! Field rendering utilities for forms

use crate::state::{FormField, OptionList};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a text input with its label as the block title
pub fn draw_input(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let cursor = if is_active { "▌" } else { "" };

    let value = if field.is_empty() {
        Span::styled(field.placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(field.value.as_str(), Style::default().fg(Color::White))
    };

    let line = if field.is_empty() && is_active {
        // Cursor sits before the placeholder
        Line::from(vec![Span::styled(cursor, Style::default().fg(Color::Cyan)), value])
    } else {
        Line::from(vec![value, Span::styled(cursor, Style::default().fg(Color::Cyan))])
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Text shown inside a select: the chosen value or the list's placeholder
pub fn select_display<'a>(field: &'a FormField, options: &'a OptionList) -> (&'a str, bool) {
    if field.is_empty() {
        let placeholder = options.labels().first().copied().unwrap_or("");
        (placeholder, true)
    } else {
        (field.value.as_str(), false)
    }
}

/// Draw a select with arrows hinting that Left/Right change the value
pub fn draw_select(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    options: &OptionList,
    is_active: bool,
    is_loading: bool,
) {
    let (text, is_placeholder) = select_display(field, options);
    let text_style = if is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    // Position among the options, when the value is still listed
    let position = if is_loading {
        "  loading...".to_string()
    } else {
        options
            .position(&field.value)
            .map(|i| format!("  {}/{}", i + 1, options.len()))
            .unwrap_or_default()
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(text, text_style),
        Span::styled(" ▶", arrow_style),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
