//! Market-value lookup and response reshaping
//!
//! The API nests prices as a list of trims, each holding a list of
//! per-condition rows. The webhook consumer wants flat objects instead:
//!
//! ```text
//! { "item0": { "trim": "LE", "market_value": { "Clean": { "Trade_In": .., "Private_Party": .., "Dealer_Retail": .. } } } }
//! ```

use super::{ApiError, VehicleDataClient};
use reqwest::Url;
use serde_json::{Map, Value};

/// Parameters of a market-value request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketValueQuery {
    pub year: String,
    pub make: String,
    pub model: String,
    pub state: String,
    pub mileage: String,
}

impl MarketValueQuery {
    pub fn url(&self, client: &VehicleDataClient) -> Result<Url, ApiError> {
        let mut url = client.endpoint(&[
            "market-value",
            "v2",
            "ymm",
            &self.year,
            &self.make,
            &self.model,
        ])?;
        url.query_pairs_mut()
            .append_pair("state", &self.state)
            .append_pair("mileage", &self.mileage);
        Ok(url)
    }
}

/// Flatten `data.market_value.market_value_data` into `item<i>` keyed objects
pub fn reshape_market_value(body: &Value) -> Result<Value, ApiError> {
    let trims = body
        .pointer("/data/market_value/market_value_data")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Decode("missing data.market_value.market_value_data".into()))?;

    let mut items = Map::new();
    for (index, trim) in trims.iter().enumerate() {
        let rows = trim
            .get("market value")
            .and_then(Value::as_array)
            .ok_or_else(|| ApiError::Decode(format!("trim {index} has no 'market value' list")))?;

        let mut by_condition = Map::new();
        for row in rows {
            let condition = match row.get("Condition") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => {
                    return Err(ApiError::Decode(format!(
                        "trim {index} has a row without 'Condition'"
                    )))
                }
            };
            let mut prices = Map::new();
            prices.insert("Trade_In".into(), field(row, "Trade-In"));
            prices.insert("Private_Party".into(), field(row, "Private Party"));
            prices.insert("Dealer_Retail".into(), field(row, "Dealer Retail"));
            // Later rows with the same condition win
            by_condition.insert(condition, Value::Object(prices));
        }

        let mut item = Map::new();
        item.insert("trim".into(), field(trim, "trim"));
        item.insert("market_value".into(), Value::Object(by_condition));
        items.insert(format!("item{index}"), Value::Object(item));
    }

    Ok(Value::Object(items))
}

fn field(value: &Value, key: &str) -> Value {
    value.get(key).cloned().unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_query_url() {
        let client = VehicleDataClient::new("https://api.vehicledatabases.com", "k").unwrap();
        let query = MarketValueQuery {
            year: "2020".into(),
            make: "Toyota".into(),
            model: "Camry".into(),
            state: "CA".into(),
            mileage: "30000".into(),
        };
        assert_eq!(
            query.url(&client).unwrap().as_str(),
            "https://api.vehicledatabases.com/market-value/v2/ymm/2020/Toyota/Camry?state=CA&mileage=30000"
        );
    }

    #[test]
    fn test_reshape_flattens_trims_and_conditions() {
        let body = json!({
            "status": "success",
            "data": {
                "market_value": {
                    "market_value_data": [
                        {
                            "trim": "LE",
                            "market value": [
                                {"Condition": "Outstanding", "Trade-In": "$20,100", "Private Party": "$22,000", "Dealer Retail": "$24,500"},
                                {"Condition": "Clean", "Trade-In": "$18,900", "Private Party": "$20,800", "Dealer Retail": "$23,100"}
                            ]
                        },
                        {
                            "trim": "XSE",
                            "market value": [
                                {"Condition": "Rough", "Trade-In": "$15,000", "Private Party": "$16,900", "Dealer Retail": "$19,000"}
                            ]
                        }
                    ]
                }
            }
        });

        let expected = json!({
            "item0": {
                "trim": "LE",
                "market_value": {
                    "Outstanding": {"Trade_In": "$20,100", "Private_Party": "$22,000", "Dealer_Retail": "$24,500"},
                    "Clean": {"Trade_In": "$18,900", "Private_Party": "$20,800", "Dealer_Retail": "$23,100"}
                }
            },
            "item1": {
                "trim": "XSE",
                "market_value": {
                    "Rough": {"Trade_In": "$15,000", "Private_Party": "$16,900", "Dealer_Retail": "$19,000"}
                }
            }
        });

        assert_eq!(reshape_market_value(&body).unwrap(), expected);
    }

    #[test]
    fn test_reshape_empty_list() {
        let body = json!({"data": {"market_value": {"market_value_data": []}}});
        assert_eq!(reshape_market_value(&body).unwrap(), json!({}));
    }

    #[test]
    fn test_reshape_missing_prices_become_null() {
        let body = json!({"data": {"market_value": {"market_value_data": [
            {"trim": "Base", "market value": [{"Condition": "Clean", "Trade-In": 9000}]}
        ]}}});
        let reshaped = reshape_market_value(&body).unwrap();
        assert_eq!(
            reshaped["item0"]["market_value"]["Clean"],
            json!({"Trade_In": 9000, "Private_Party": null, "Dealer_Retail": null})
        );
    }

    #[test]
    fn test_reshape_rejects_unexpected_shape() {
        assert!(matches!(
            reshape_market_value(&json!({"data": {}})),
            Err(ApiError::Decode(_))
        ));
        let no_rows = json!({"data": {"market_value": {"market_value_data": [{"trim": "LE"}]}}});
        assert!(reshape_market_value(&no_rows).is_err());
    }
}
