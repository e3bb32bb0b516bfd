//! Application state and core logic

use crate::browser::{SystemBrowser, UrlOpener};
use crate::config::{SubmissionMode, TradeInConfig};
use crate::platform;
use crate::state::{
    plan_lookups, AppState, FieldId, Form, FormField, LookupKind, LookupRequest, LookupStep, Step,
    View,
};
use crate::submission::{submit_lead, SubmitError, SUBMIT_ERROR_MESSAGE};
use crate::vehicle::{ApiError, VehicleDataApi, VehicleDataClient};
use crate::webhook::{LeadSink, WebhookClient};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

/// Results delivered back to the UI task by spawned work
#[derive(Debug)]
pub enum AppEvent {
    LookupFinished {
        kind: LookupKind,
        generation: u64,
        result: Result<Vec<String>, ApiError>,
    },
    SubmissionFinished(Result<(), SubmitError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Vehicle-data API used for lookups and valuations
    api: Arc<dyn VehicleDataApi>,
    /// Webhook receiving finished leads
    sink: Arc<dyn LeadSink>,
    /// Opens the redirect page once a lead is delivered
    browser: Arc<dyn UrlOpener>,
    mode: SubmissionMode,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
    /// Frame counter driving the loading spinner
    pub tick: usize,
}

impl App {
    /// Create an App talking to the configured endpoints
    pub fn new(config: &TradeInConfig) -> Result<Self> {
        let api = VehicleDataClient::new(&config.api_base_url, &config.auth_key)?;
        let sink = WebhookClient::new(&config.webhook_url)?;
        Ok(Self::with_clients(
            Arc::new(api),
            Arc::new(sink),
            Arc::new(SystemBrowser),
            config.submission_mode,
            &config.default_state,
            config.redirect_url.clone(),
        ))
    }

    /// Create an App from explicit clients
    pub fn with_clients(
        api: Arc<dyn VehicleDataApi>,
        sink: Arc<dyn LeadSink>,
        browser: Arc<dyn UrlOpener>,
        mode: SubmissionMode,
        default_state: &str,
        redirect_url: Option<String>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(default_state, redirect_url),
            api,
            sink,
            browser,
            mode,
            events_tx,
            events_rx,
            quit: false,
            tick: 0,
        }
    }

    /// Kick off the initial years lookup
    pub fn start(&mut self) {
        self.dispatch_lookup(LookupRequest::Years);
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.state.lookups.cancel_all();
        self.quit = true;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Apply every event that has already arrived
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next event from spawned work
    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LookupFinished {
                kind,
                generation,
                result,
            } => {
                if !self.state.lookups.finish(kind, generation) {
                    debug!(kind = kind.label(), generation, "discarding superseded lookup");
                    return;
                }
                match result {
                    Ok(entries) => {
                        info!(kind = kind.label(), count = entries.len(), "options loaded");
                        self.state.apply_options(kind, entries);
                    }
                    Err(err) => {
                        warn!(kind = kind.label(), error = %err, "Error fetching options");
                    }
                }
            }
            AppEvent::SubmissionFinished(result) => {
                self.state.is_submitting = false;
                match result {
                    Ok(()) => {
                        self.state.form.reset();
                        self.state.current_view = View::Completed;
                    }
                    Err(err) => {
                        error!(error = %err, "Error submitting lead");
                        self.state.set_error(SUBMIT_ERROR_MESSAGE);
                    }
                }
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.state.current_view {
            View::Completed => match key.code {
                KeyCode::Enter => {
                    self.open_redirect();
                    self.state.current_view = View::Form;
                }
                KeyCode::Esc => self.state.current_view = View::Form,
                _ => {}
            },
            View::Form => self.handle_form_key(key),
        }
    }

    /// Send the user on to the configured redirect page
    fn open_redirect(&mut self) {
        let Some(url) = self.state.redirect_url.clone() else {
            return;
        };
        info!(%url, "opening redirect");
        if let Err(err) = self.browser.open(&url) {
            warn!(error = ?err, "could not open redirect");
            self.state
                .set_error(format!("Could not open a browser. Continue at {url}"));
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let active = self.state.form.active_field_id();
        let is_select = active.is_some_and(|id| self.state.form.field(id).is_select());

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Char('s') if key.modifiers.intersects(platform::SUBMIT_MODIFIERS) => {
                self.submit()
            }
            KeyCode::Esc => self.state.clear_error(),
            KeyCode::Enter => match active {
                None => self.submit(),
                Some(_) => self.state.form.next_field(),
            },
            KeyCode::Right | KeyCode::Char(' ') if is_select => self.cycle_option(1),
            KeyCode::Left if is_select => self.cycle_option(-1),
            KeyCode::Char(c) => {
                if let Some(id) = active {
                    self.edit_field(id, |field| field.push_char(c));
                }
            }
            KeyCode::Backspace => {
                if let Some(id) = active {
                    self.edit_field(id, FormField::pop_char);
                }
            }
            _ => {}
        }
    }

    /// Move the focused select to a neighbouring option
    fn cycle_option(&mut self, delta: isize) {
        let Some(id) = self.state.form.active_field_id() else {
            return;
        };
        let next = self
            .state
            .options_for(id)
            .and_then(|options| options.cycle(self.state.form.value(id), delta));
        if let Some(value) = next {
            self.select_value(id, value);
        }
    }

    /// Set a field value as if chosen by the user
    pub fn select_value(&mut self, id: FieldId, value: String) {
        self.edit_field(id, |field| {
            if field.value == value {
                return false;
            }
            field.set(value);
            true
        });
    }

    /// Apply an edit and issue whatever lookups the change implies
    fn edit_field(&mut self, id: FieldId, edit: impl FnOnce(&mut FormField) -> bool) {
        let before = self.state.form.selection();
        if !edit(self.state.form.field_mut(id)) {
            return;
        }
        let after = self.state.form.selection();
        for step in plan_lookups(&before, &after) {
            match step {
                LookupStep::Fetch(request) => self.dispatch_lookup(request),
                LookupStep::Cancel(kind) => {
                    debug!(kind = kind.label(), "cancelling lookup");
                    self.state.lookups.cancel(kind);
                }
            }
        }
    }

    fn dispatch_lookup(&mut self, request: LookupRequest) {
        let kind = request.kind();
        let generation = self.state.lookups.begin(kind);
        debug!(?request, generation, "dispatching lookup");

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let result = match &request {
                LookupRequest::Years => api.fetch_years().await,
                LookupRequest::Makes { year } => api.fetch_makes(year).await,
                LookupRequest::Models { year, make } => api.fetch_models(year, make).await,
            };
            // Receiver only goes away on shutdown
            let _ = tx.send(AppEvent::LookupFinished {
                kind,
                generation,
                result,
            });
        });
        self.state.lookups.attach(kind, handle);
    }

    /// Validate the current step, then advance or send the lead
    pub fn submit(&mut self) {
        if self.state.is_submitting {
            return;
        }
        self.state.clear_error();

        if let Err(message) = self.state.form.validate_step() {
            self.state.set_error(message);
            return;
        }

        match self.state.form.step {
            Step::One => self.state.form.advance(),
            Step::Two => self.start_submission(),
        }
    }

    fn start_submission(&mut self) {
        self.state.is_submitting = true;
        let lead = self.state.form.payload();
        let api = Arc::clone(&self.api);
        let sink = Arc::clone(&self.sink);
        let mode = self.mode;
        let tx = self.events_tx.clone();
        info!(?mode, "submitting lead");

        tokio::spawn(async move {
            let result = submit_lead(api.as_ref(), sink.as_ref(), mode, &lead).await;
            let _ = tx.send(AppEvent::SubmissionFinished(result));
        });
    }
}
