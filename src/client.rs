//! Betfair Exchange betting client.
//!
//! One async method per Sports API operation. Each builds its `params`
//! object, wraps it in a JSON-RPC envelope and posts it to the betting
//! endpoint with the session headers. Responses come back as untyped
//! `serde_json::Value`, exactly as Betfair sent them.
//!
//! API reference: https://docs.developer.betfair.com/display/1smk3cen4v3lu3yomq5qye0ni/Betting+API
//!
//! ```rust,ignore
//! let client = BetfairClient::connect(&AppConfig::default()).await?;
//! let soccer = MarketFilter::new().event_type_ids(["1"]);
//! let competitions = client.list_competitions(&soccer, None).await?;
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{AppConfig, Credentials, EndpointsConfig};
use crate::error::Result;
use crate::params::{
    BookOptions, CancelInstruction, CatalogueOptions, ClearedOrdersQuery, CurrentOrdersQuery,
    MarketFilter, PlaceInstruction, PlaceOptions, ProfitAndLossOptions, ReplaceInstruction,
    ReplaceOptions, UpdateInstruction,
};
use crate::rpc::{Method, RpcRequest};
use crate::session::{self, Session};
use crate::transport::{HttpRequest, HttpTransport, Transport};
use crate::types::{BetStatus, MarketProjection, MarketSort, TimeGranularity};

// ---------------------------------------------------------------------------
// Per-operation params
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct FilterParams<'a> {
    filter: &'a MarketFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    locale: Option<&'a str>,
}

#[derive(Serialize)]
struct TimeRangesParams<'a> {
    filter: &'a MarketFilter,
    granularity: TimeGranularity,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogueParams<'a> {
    filter: &'a MarketFilter,
    market_projection: &'a [MarketProjection],
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<MarketSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    locale: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketBookParams<'a> {
    market_ids: &'a [String],
    #[serde(flatten)]
    options: &'a BookOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunnerBookParams<'a> {
    market_id: &'a str,
    selection_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    handicap: Option<Decimal>,
    #[serde(flatten)]
    options: &'a BookOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfitAndLossParams<'a> {
    market_ids: &'a [String],
    #[serde(flatten)]
    options: &'a ProfitAndLossOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearedOrdersParams<'a> {
    bet_status: BetStatus,
    #[serde(flatten)]
    query: &'a ClearedOrdersQuery,
}

/// `marketId` + `instructions` + whatever optional fields the operation takes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionParams<'a, I, O> {
    market_id: &'a str,
    instructions: &'a [I],
    #[serde(flatten)]
    options: O,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_ref: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated Betfair Exchange client.
pub struct BetfairClient {
    transport: Arc<dyn Transport>,
    session: Session,
    betting_url: String,
}

impl BetfairClient {
    /// Read credentials from the environment, log in over a
    /// certificate-authenticated connection, and return a ready client.
    ///
    /// Credentials are resolved before anything touches the network.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let credentials = Credentials::from_env(&config.credentials)?;
        let transport = HttpTransport::with_client_cert(
            &config.betfair,
            &credentials.cert_path,
            &credentials.cert_key_path,
        )?;
        Self::login(Arc::new(transport), &credentials, &config.betfair).await
    }

    /// Like [`connect`](Self::connect), over a caller-supplied transport.
    pub async fn connect_with(config: &AppConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let credentials = Credentials::from_env(&config.credentials)?;
        Self::login(transport, &credentials, &config.betfair).await
    }

    /// Log in with explicit credentials.
    pub async fn login(
        transport: Arc<dyn Transport>,
        credentials: &Credentials,
        endpoints: &EndpointsConfig,
    ) -> Result<Self> {
        let session = session::login(transport.as_ref(), credentials, &endpoints.identity_url).await?;
        Ok(Self::with_session(transport, session, endpoints.betting_url.clone()))
    }

    /// Wrap an existing session without logging in.
    pub fn with_session(
        transport: Arc<dyn Transport>,
        session: Session,
        betting_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            session,
            betting_url: betting_url.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn betting_url(&self) -> &str {
        &self.betting_url
    }

    // -- Core --------------------------------------------------------------

    /// Merge `params` into `request`, post it with the session headers and
    /// return the decoded response body.
    ///
    /// A JSON-RPC `error` member in a 2xx body is handed back untouched.
    pub async fn execute_request(&self, mut request: RpcRequest, params: Value) -> Result<Value> {
        request.merge_params(params);
        let body = serde_json::to_string(&request)?;

        debug!(method = %request.method, url = %self.betting_url, "Betfair API request");

        let http_request = self.session.authorize(HttpRequest::post(&self.betting_url, body));
        let resp = self.transport.post(http_request).await?.error_for_status()?;
        let value: Value = resp.json()?;

        if let Some(error) = value.get("error") {
            warn!(method = %request.method, error = %error, "Betfair API returned an error");
        }
        Ok(value)
    }

    async fn call<P: Serialize>(&self, method: Method, params: &P) -> Result<Value> {
        let params = serde_json::to_value(params)?;
        self.execute_request(RpcRequest::new(method), params).await
    }

    async fn call_filtered(
        &self,
        method: Method,
        filter: &MarketFilter,
        locale: Option<&str>,
    ) -> Result<Value> {
        self.call(method, &FilterParams { filter, locale }).await
    }

    // -- Navigation --------------------------------------------------------

    pub async fn list_competitions(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListCompetitions, filter, locale).await
    }

    pub async fn list_countries(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListCountries, filter, locale).await
    }

    pub async fn list_events(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListEvents, filter, locale).await
    }

    pub async fn list_event_types(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListEventTypes, filter, locale).await
    }

    pub async fn list_market_types(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListMarketTypes, filter, locale).await
    }

    pub async fn list_venues(&self, filter: &MarketFilter, locale: Option<&str>) -> Result<Value> {
        self.call_filtered(Method::ListVenues, filter, locale).await
    }

    /// Market counts bucketed by start time.
    pub async fn list_time_ranges(
        &self,
        filter: &MarketFilter,
        granularity: TimeGranularity,
    ) -> Result<Value> {
        self.call(Method::ListTimeRanges, &TimeRangesParams { filter, granularity })
            .await
    }

    // -- Markets -----------------------------------------------------------

    /// Static market data. Projection defaults to
    /// [`MarketProjection::DEFAULT_SET`] when the options leave it unset.
    pub async fn list_market_catalogue(
        &self,
        filter: &MarketFilter,
        options: &CatalogueOptions,
    ) -> Result<Value> {
        let market_projection = options
            .market_projection
            .as_deref()
            .unwrap_or(MarketProjection::DEFAULT_SET);
        let params = CatalogueParams {
            filter,
            market_projection,
            max_results: options.max_results,
            sort: options.sort,
            locale: options.locale.as_deref(),
        };
        self.call(Method::ListMarketCatalogue, &params).await
    }

    /// Dynamic market data: prices, status, and the caller's orders.
    pub async fn list_market_book(&self, market_ids: &[String], options: &BookOptions) -> Result<Value> {
        self.call(Method::ListMarketBook, &MarketBookParams { market_ids, options })
            .await
    }

    /// Dynamic data for a single runner.
    pub async fn list_runner_book(
        &self,
        market_id: &str,
        selection_id: u64,
        handicap: Option<Decimal>,
        options: &BookOptions,
    ) -> Result<Value> {
        let params = RunnerBookParams {
            market_id,
            selection_id,
            handicap,
            options,
        };
        self.call(Method::ListRunnerBook, &params).await
    }

    pub async fn list_market_profit_and_loss(
        &self,
        market_ids: &[String],
        options: &ProfitAndLossOptions,
    ) -> Result<Value> {
        self.call(
            Method::ListMarketProfitAndLoss,
            &ProfitAndLossParams { market_ids, options },
        )
        .await
    }

    // -- Order queries -----------------------------------------------------

    pub async fn list_current_orders(&self, query: &CurrentOrdersQuery) -> Result<Value> {
        self.call(Method::ListCurrentOrders, query).await
    }

    pub async fn list_cleared_orders(
        &self,
        bet_status: BetStatus,
        query: &ClearedOrdersQuery,
    ) -> Result<Value> {
        self.call(Method::ListClearedOrders, &ClearedOrdersParams { bet_status, query })
            .await
    }

    // -- Order placement ---------------------------------------------------

    pub async fn place_orders(
        &self,
        market_id: &str,
        instructions: &[PlaceInstruction],
        options: &PlaceOptions,
    ) -> Result<Value> {
        let params = InstructionParams {
            market_id,
            instructions,
            options,
        };
        self.call(Method::PlaceOrders, &params).await
    }

    /// Change the persistence type of unmatched bets.
    pub async fn update_orders(
        &self,
        market_id: &str,
        instructions: &[UpdateInstruction],
        customer_ref: Option<&str>,
    ) -> Result<Value> {
        let params = InstructionParams {
            market_id,
            instructions,
            options: CustomerRef { customer_ref },
        };
        self.call(Method::UpdateOrders, &params).await
    }

    /// Cancel bets and re-place them at new prices.
    pub async fn replace_orders(
        &self,
        market_id: &str,
        instructions: &[ReplaceInstruction],
        options: &ReplaceOptions,
    ) -> Result<Value> {
        let params = InstructionParams {
            market_id,
            instructions,
            options,
        };
        self.call(Method::ReplaceOrders, &params).await
    }

    /// Cancel or reduce unmatched bets. Returns the decoded execution report.
    pub async fn cancel_orders(
        &self,
        market_id: &str,
        instructions: &[CancelInstruction],
        customer_ref: Option<&str>,
    ) -> Result<Value> {
        let params = InstructionParams {
            market_id,
            instructions,
            options: CustomerRef { customer_ref },
        };
        self.call(Method::CancelOrders, &params).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
