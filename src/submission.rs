//! Final lead submission
//!
//! In raw mode the form fields go straight to the webhook. In market-value
//! mode the valuation is fetched and reshaped first, then posted together
//! with the form fields.

use crate::config::SubmissionMode;
use crate::state::LeadPayload;
use crate::vehicle::{reshape_market_value, ApiError, MarketValueQuery, VehicleDataApi};
use crate::webhook::LeadSink;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

/// Message shown to the user for any submission failure
pub const SUBMIT_ERROR_MESSAGE: &str =
    "There was an error submitting your request. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("webhook rejected the lead with status {0}")]
    Rejected(u16),

    #[error("could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<&LeadPayload> for MarketValueQuery {
    fn from(lead: &LeadPayload) -> Self {
        MarketValueQuery {
            year: lead.year.clone(),
            make: lead.make.clone(),
            model: lead.model.clone(),
            state: lead.state.clone(),
            mileage: lead.miles.clone(),
        }
    }
}

/// Webhook body for market-value mode
pub fn market_value_payload(market_value: Value, lead: &LeadPayload) -> Result<Value, SubmitError> {
    Ok(json!({
        "marketValue": market_value,
        "form_data": serde_json::to_value(lead)?,
    }))
}

/// Build the webhook body for `mode`, fetching the valuation when needed
pub async fn build_payload(
    api: &dyn VehicleDataApi,
    mode: SubmissionMode,
    lead: &LeadPayload,
) -> Result<Value, SubmitError> {
    match mode {
        SubmissionMode::Raw => Ok(serde_json::to_value(lead)?),
        SubmissionMode::MarketValue => {
            let raw = api.fetch_market_value(&MarketValueQuery::from(lead)).await?;
            let reshaped = reshape_market_value(&raw)?;
            market_value_payload(reshaped, lead)
        }
    }
}

/// Deliver a lead; any non-2xx webhook status counts as failure
pub async fn submit_lead(
    api: &dyn VehicleDataApi,
    sink: &dyn LeadSink,
    mode: SubmissionMode,
    lead: &LeadPayload,
) -> Result<(), SubmitError> {
    let payload = build_payload(api, mode, lead).await?;
    let status = sink.post(&payload).await?;
    if !(200..300).contains(&status) {
        return Err(SubmitError::Rejected(status));
    }
    info!(status, ?mode, "lead delivered");
    Ok(())
}
