//! JSON-RPC 2.0 envelope for the Betfair Sports API.
//!
//! Every betting call is a POST of
//! `{"jsonrpc": "2.0", "method": "SportsAPING/v1.0/<op>", "id": 1, "params": {...}}`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Namespace prefix for Sports API method names.
pub const METHOD_PREFIX: &str = "SportsAPING/v1.0/";

const JSONRPC_VERSION: &str = "2.0";
const REQUEST_ID: u64 = 1;

/// Sports API operations exposed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    ListCompetitions,
    ListCountries,
    ListEvents,
    ListEventTypes,
    ListMarketBook,
    ListMarketCatalogue,
    ListMarketProfitAndLoss,
    ListMarketTypes,
    ListRunnerBook,
    ListTimeRanges,
    ListVenues,
    ListCurrentOrders,
    ListClearedOrders,
    PlaceOrders,
    CancelOrders,
    UpdateOrders,
    ReplaceOrders,
}

impl Method {
    /// Operation name as Betfair spells it.
    pub fn operation(&self) -> &'static str {
        match self {
            Method::ListCompetitions => "listCompetitions",
            Method::ListCountries => "listCountries",
            Method::ListEvents => "listEvents",
            Method::ListEventTypes => "listEventTypes",
            Method::ListMarketBook => "listMarketBook",
            Method::ListMarketCatalogue => "listMarketCatalogue",
            Method::ListMarketProfitAndLoss => "listMarketProfitAndLoss",
            Method::ListMarketTypes => "listMarketTypes",
            Method::ListRunnerBook => "listRunnerBook",
            Method::ListTimeRanges => "listTimeRanges",
            Method::ListVenues => "listVenues",
            Method::ListCurrentOrders => "listCurrentOrders",
            Method::ListClearedOrders => "listClearedOrders",
            Method::PlaceOrders => "placeOrders",
            Method::CancelOrders => "cancelOrders",
            Method::UpdateOrders => "updateOrders",
            Method::ReplaceOrders => "replaceOrders",
        }
    }

    /// Fully qualified JSON-RPC method, e.g. `SportsAPING/v1.0/listEvents`.
    pub fn qualified_name(&self) -> String {
        format!("{METHOD_PREFIX}{}", self.operation())
    }
}

/// A single JSON-RPC request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub id: u64,
    pub params: Value,
}

impl RpcRequest {
    /// A fresh envelope for `method` with empty params.
    pub fn new(method: Method) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.qualified_name(),
            id: REQUEST_ID,
            params: Value::Object(Map::new()),
        }
    }

    /// Merge `params` into the envelope.
    ///
    /// Object keys from `params` overwrite existing ones; anything that is
    /// not an object replaces the field outright.
    pub fn merge_params(&mut self, params: Value) {
        match (&mut self.params, params) {
            (Value::Object(existing), Value::Object(incoming)) => existing.extend(incoming),
            (slot, incoming) => *slot = incoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let req = RpcRequest::new(Method::ListEventTypes);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "SportsAPING/v1.0/listEventTypes",
                "id": 1,
                "params": {}
            })
        );
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(
            Method::ListMarketProfitAndLoss.qualified_name(),
            "SportsAPING/v1.0/listMarketProfitAndLoss"
        );
        assert_eq!(Method::CancelOrders.operation(), "cancelOrders");
    }

    #[test]
    fn test_merge_params_into_empty() {
        let mut req = RpcRequest::new(Method::ListVenues);
        req.merge_params(json!({ "filter": {} }));
        assert_eq!(req.params, json!({ "filter": {} }));
    }

    #[test]
    fn test_merge_params_overrides_keys() {
        let mut req = RpcRequest::new(Method::ListEvents);
        req.merge_params(json!({ "filter": {}, "locale": "en" }));
        req.merge_params(json!({ "locale": "it" }));
        assert_eq!(req.params, json!({ "filter": {}, "locale": "it" }));
    }

    #[test]
    fn test_merge_non_object_replaces() {
        let mut req = RpcRequest::new(Method::ListEvents);
        req.merge_params(Value::Null);
        assert_eq!(req.params, Value::Null);
    }
}
