//! Submission-complete dialog

use super::base::{render_dialog, DialogConfig};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Message body shown after a lead was delivered
pub fn completion_message(redirect_url: Option<&str>) -> String {
    let mut message = String::from(
        "Thanks! Your trade-in request was sent. We will text/email you the final report.",
    );
    if let Some(url) = redirect_url {
        message.push_str("\n\nContinue at:\n");
        message.push_str(url);
    }
    message
}

/// Render the completion dialog centered in `area`
pub fn render_completion_dialog(frame: &mut Frame, area: Rect, redirect_url: Option<&str>) {
    let message = completion_message(redirect_url);
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = if redirect_url.is_some() {
        vec![
            Span::styled("Enter", key_style),
            Span::raw(" open page  "),
            Span::styled("Esc", key_style),
            Span::raw(" new request"),
        ]
    } else {
        vec![
            Span::raw("Press "),
            Span::styled("Enter", key_style),
            Span::raw(" to start a new request"),
        ]
    };

    render_dialog(
        frame,
        area,
        DialogConfig {
            title: "Request Submitted",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(hint),
            max_width: 70,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_includes_redirect() {
        let message = completion_message(Some("https://dealer.example.com/thanks"));
        assert!(message.ends_with("Continue at:\nhttps://dealer.example.com/thanks"));
    }

    #[test]
    fn test_message_without_redirect() {
        assert!(!completion_message(None).contains("Continue at"));
    }
}
