//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);
    forms::draw_trade_in_form(frame, main_area, app);

    if app.state.is_loading() {
        components::render_loading_overlay(frame, main_area, app.tick);
    }

    if app.state.current_view == View::Completed {
        components::render_completion_dialog(
            frame,
            main_area,
            app.state.redirect_url.as_deref(),
        );
    }

    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MockUrlOpener;
    use crate::config::SubmissionMode;
    use crate::vehicle::MockVehicleDataApi;
    use crate::webhook::MockLeadSink;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn app() -> App {
        App::with_clients(
            Arc::new(MockVehicleDataApi::new()),
            Arc::new(MockLeadSink::new()),
            Arc::new(MockUrlOpener::new()),
            SubmissionMode::Raw,
            "AL",
            Some("https://dealer.example.com/thanks".into()),
        )
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_step_one_shows_vehicle_fields_and_placeholders() {
        let screen = render(&app());
        assert!(screen.contains("Your Vehicle (1/2)"));
        assert!(screen.contains("Select Years"));
        assert!(screen.contains("Select Makes"));
        assert!(screen.contains("Select Models"));
        assert!(screen.contains("Enter miles"));
        assert!(screen.contains("Next"));
    }

    #[test]
    fn test_step_two_shows_contact_fields_and_warning() {
        let mut app = app();
        app.state.form.advance();
        let screen = render(&app);
        assert!(screen.contains("Your Contact Details (2/2)"));
        assert!(screen.contains("Enter your email"));
        assert!(screen.contains("Get My Trade-In Value"));
        assert!(screen.contains("Warning!"));
    }

    #[test]
    fn test_error_line_is_rendered() {
        let mut app = app();
        app.state.set_error("Please fill in all required fields: year");
        assert!(render(&app).contains("Please fill in all required fields: year"));
    }

    #[test]
    fn test_completion_dialog_shows_redirect() {
        let mut app = app();
        app.state.current_view = View::Completed;
        let screen = render(&app);
        assert!(screen.contains("Request Submitted"));
        assert!(screen.contains("https://dealer.example.com/thanks"));
        assert!(screen.contains("open page"));
    }

    #[test]
    fn test_submitting_label() {
        let mut app = app();
        app.state.form.advance();
        app.state.is_submitting = true;
        assert!(render(&app).contains("Submitting..."));
    }
}
