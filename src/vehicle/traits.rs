//! Trait abstraction for the vehicle-data client to enable mocking in tests

use super::{ApiError, MarketValueQuery};
use async_trait::async_trait;
use serde_json::Value;

/// Read operations against the vehicle-data API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleDataApi: Send + Sync {
    /// List model years
    async fn fetch_years(&self) -> Result<Vec<String>, ApiError>;

    /// List makes available for a year
    async fn fetch_makes(&self, year: &str) -> Result<Vec<String>, ApiError>;

    /// List models available for a year and make
    async fn fetch_models(&self, year: &str, make: &str) -> Result<Vec<String>, ApiError>;

    /// Fetch the raw market-value document for a vehicle
    async fn fetch_market_value(&self, query: &MarketValueQuery) -> Result<Value, ApiError>;
}
