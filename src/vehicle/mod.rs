//! Vehicle-data API access
//!
//! Option lookups (years, makes, models) and the market-value estimate are
//! served by a third-party API authenticated with a static key header.

mod client;
mod error;
mod market_value;
mod traits;

pub use client::VehicleDataClient;
pub use error::ApiError;
pub use market_value::{reshape_market_value, MarketValueQuery};
pub use traits::VehicleDataApi;

#[cfg(test)]
pub use traits::MockVehicleDataApi;
