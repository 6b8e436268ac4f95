//! Request parameter shapes for the Sports API.
//!
//! Each struct enumerates the fields Betfair recognises for one request
//! object. Unset fields are omitted from the serialized JSON, so a
//! `MarketFilter::default()` goes over the wire as `{}`.
//!
//! Everything here is pure: building or serializing these values never
//! touches the network.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{
    GroupBy, MarketBettingType, MarketProjection, MarketSort, MarketStatus, MatchProjection,
    OrderBy, OrderProjection, OrderStatus, OrderType, PersistenceType, PriceData, Side, SortDir,
    TimeInForce,
};

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

// ---------------------------------------------------------------------------
// Market filter
// ---------------------------------------------------------------------------

/// A `[from, to]` window, either end optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    pub fn since(from: DateTime<Utc>) -> Self {
        Self { from: Some(from), to: None }
    }

    pub fn until(to: DateTime<Utc>) -> Self {
        Self { from: None, to: Some(to) }
    }
}

/// Narrows which markets an operation applies to.
///
/// ```rust,ignore
/// let football = MarketFilter::new()
///     .event_type_ids(["1"])
///     .in_play_only(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venues: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bsp_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_in_play_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_play_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_betting_types: Option<Vec<MarketBettingType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_type_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_start_time: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_orders: Option<Vec<OrderStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_types: Option<Vec<String>>,
}

impl MarketFilter {
    /// An empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = Some(query.into());
        self
    }

    pub fn exchange_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exchange_ids = Some(strings(ids));
        self
    }

    pub fn event_type_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_type_ids = Some(strings(ids));
        self
    }

    pub fn event_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_ids = Some(strings(ids));
        self
    }

    pub fn competition_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.competition_ids = Some(strings(ids));
        self
    }

    pub fn market_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.market_ids = Some(strings(ids));
        self
    }

    pub fn venues<I, S>(mut self, venues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.venues = Some(strings(venues));
        self
    }

    pub fn bsp_only(mut self, bsp_only: bool) -> Self {
        self.bsp_only = Some(bsp_only);
        self
    }

    pub fn turn_in_play_enabled(mut self, enabled: bool) -> Self {
        self.turn_in_play_enabled = Some(enabled);
        self
    }

    pub fn in_play_only(mut self, in_play_only: bool) -> Self {
        self.in_play_only = Some(in_play_only);
        self
    }

    pub fn market_betting_types(mut self, types: impl IntoIterator<Item = MarketBettingType>) -> Self {
        self.market_betting_types = Some(types.into_iter().collect());
        self
    }

    /// ISO 3166-1 alpha-2 country codes.
    pub fn market_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.market_countries = Some(strings(countries));
        self
    }

    pub fn market_type_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.market_type_codes = Some(strings(codes));
        self
    }

    pub fn market_start_time(mut self, range: TimeRange) -> Self {
        self.market_start_time = Some(range);
        self
    }

    /// Restrict to markets where the caller holds orders in these states.
    pub fn with_orders(mut self, states: impl IntoIterator<Item = OrderStatus>) -> Self {
        self.with_orders = Some(states.into_iter().collect());
        self
    }

    pub fn race_types<I, S>(mut self, race_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.race_types = Some(strings(race_types));
        self
    }
}

// ---------------------------------------------------------------------------
// Market book query
// ---------------------------------------------------------------------------

/// A market-book shaped query: market id and data-delay flag, plus any
/// book-level fields the caller wants to pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBookQuery {
    pub market_id: String,
    pub is_market_data_delayed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MarketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inplay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_winners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_active_runners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_matched: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl MarketBookQuery {
    pub fn new(market_id: impl Into<String>, is_market_data_delayed: bool) -> Self {
        Self {
            market_id: market_id.into(),
            is_market_data_delayed,
            status: None,
            bet_delay: None,
            inplay: None,
            number_of_winners: None,
            number_of_active_runners: None,
            total_matched: None,
            total_available: None,
            version: None,
        }
    }

    pub fn status(mut self, status: MarketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn bet_delay(mut self, seconds: u32) -> Self {
        self.bet_delay = Some(seconds);
        self
    }

    pub fn inplay(mut self, inplay: bool) -> Self {
        self.inplay = Some(inplay);
        self
    }

    pub fn number_of_winners(mut self, n: u32) -> Self {
        self.number_of_winners = Some(n);
        self
    }

    pub fn number_of_active_runners(mut self, n: u32) -> Self {
        self.number_of_active_runners = Some(n);
        self
    }

    pub fn total_matched(mut self, amount: Decimal) -> Self {
        self.total_matched = Some(amount);
        self
    }

    pub fn total_available(mut self, amount: Decimal) -> Self {
        self.total_available = Some(amount);
        self
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }
}

// ---------------------------------------------------------------------------
// Book / catalogue options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceProjection {
    pub price_data: Vec<PriceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtualise: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollover_stakes: Option<bool>,
}

impl PriceProjection {
    pub fn new(price_data: impl IntoIterator<Item = PriceData>) -> Self {
        Self {
            price_data: price_data.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Optional fields shared by `listMarketBook` and `listRunnerBook`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_projection: Option<PriceProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_projection: Option<OrderProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_projection: Option<MatchProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_overall_position: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_matched_by_strategy_ref: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_strategy_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Options for `listMarketCatalogue`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueOptions {
    /// `None` sends [`MarketProjection::DEFAULT_SET`].
    pub market_projection: Option<Vec<MarketProjection>>,
    pub sort: Option<MarketSort>,
    pub max_results: u32,
    pub locale: Option<String>,
}

impl Default for CatalogueOptions {
    fn default() -> Self {
        Self {
            market_projection: None,
            sort: None,
            max_results: 1000,
            locale: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLossOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_settled_bets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_bsp_bets: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_of_commission: Option<bool>,
}

// ---------------------------------------------------------------------------
// Order queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOrdersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_projection: Option<OrderProjection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_order_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_strategy_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_record: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearedOrdersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_order_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_strategy_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_date_range: Option<TimeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_item_description: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_record: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u32>,
}

// ---------------------------------------------------------------------------
// Order instructions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    pub size: Decimal,
    pub price: Decimal,
    pub persistence_type: PersistenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_fill_size: Option<Decimal>,
}

impl LimitOrder {
    pub fn new(size: Decimal, price: Decimal, persistence_type: PersistenceType) -> Self {
        Self {
            size,
            price,
            persistence_type,
            time_in_force: None,
            min_fill_size: None,
        }
    }

    /// Fill-or-kill, optionally accepting a partial fill of at least `min_fill_size`.
    pub fn fill_or_kill(mut self, min_fill_size: Option<Decimal>) -> Self {
        self.time_in_force = Some(TimeInForce::FillOrKill);
        self.min_fill_size = min_fill_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOnCloseOrder {
    pub liability: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOnCloseOrder {
    pub liability: Decimal,
}

/// One bet in a `placeOrders` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceInstruction {
    pub order_type: OrderType,
    pub selection_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handicap: Option<Decimal>,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_order: Option<LimitOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_on_close_order: Option<LimitOnCloseOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_on_close_order: Option<MarketOnCloseOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_order_ref: Option<String>,
}

impl PlaceInstruction {
    fn base(order_type: OrderType, selection_id: u64, side: Side) -> Self {
        Self {
            order_type,
            selection_id,
            handicap: None,
            side,
            limit_order: None,
            limit_on_close_order: None,
            market_on_close_order: None,
            customer_order_ref: None,
        }
    }

    pub fn limit(selection_id: u64, side: Side, order: LimitOrder) -> Self {
        Self {
            limit_order: Some(order),
            ..Self::base(OrderType::Limit, selection_id, side)
        }
    }

    pub fn limit_on_close(selection_id: u64, side: Side, liability: Decimal, price: Decimal) -> Self {
        Self {
            limit_on_close_order: Some(LimitOnCloseOrder { liability, price }),
            ..Self::base(OrderType::LimitOnClose, selection_id, side)
        }
    }

    pub fn market_on_close(selection_id: u64, side: Side, liability: Decimal) -> Self {
        Self {
            market_on_close_order: Some(MarketOnCloseOrder { liability }),
            ..Self::base(OrderType::MarketOnClose, selection_id, side)
        }
    }

    pub fn handicap(mut self, handicap: Decimal) -> Self {
        self.handicap = Some(handicap);
        self
    }

    pub fn customer_order_ref(mut self, reference: impl Into<String>) -> Self {
        self.customer_order_ref = Some(reference.into());
        self
    }
}

/// Cancel a bet outright, or reduce its unmatched size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelInstruction {
    pub bet_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_reduction: Option<Decimal>,
}

impl CancelInstruction {
    pub fn new(bet_id: impl Into<String>, size_reduction: Decimal) -> Self {
        Self {
            bet_id: bet_id.into(),
            size_reduction: Some(size_reduction),
        }
    }

    /// Cancel all remaining unmatched volume.
    pub fn full(bet_id: impl Into<String>) -> Self {
        Self {
            bet_id: bet_id.into(),
            size_reduction: None,
        }
    }
}

/// Change the persistence of an unmatched bet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstruction {
    pub bet_id: String,
    pub new_persistence_type: PersistenceType,
}

impl UpdateInstruction {
    pub fn new(bet_id: impl Into<String>, new_persistence_type: PersistenceType) -> Self {
        Self {
            bet_id: bet_id.into(),
            new_persistence_type,
        }
    }
}

/// Cancel a bet and re-place it at a new price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceInstruction {
    pub bet_id: String,
    pub new_price: Decimal,
}

impl ReplaceInstruction {
    pub fn new(bet_id: impl Into<String>, new_price: Decimal) -> Self {
        Self {
            bet_id: bet_id.into(),
            new_price,
        }
    }
}

/// Guard against the market having moved since the caller last looked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketVersion {
    pub version: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_version: Option<MarketVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_strategy_ref: Option<String>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub async_flag: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_version: Option<MarketVersion>,
    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub async_flag: Option<bool>,
}

// ---------------------------------------------------------------------------
// Betting type string
// ---------------------------------------------------------------------------

/// A value in a [`betting_type_string`] entry.
#[derive(Debug, Clone, PartialEq)]
pub enum BettingTypeValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for BettingTypeValue {
    fn from(value: &str) -> Self {
        BettingTypeValue::Scalar(value.to_string())
    }
}

impl From<String> for BettingTypeValue {
    fn from(value: String) -> Self {
        BettingTypeValue::Scalar(value)
    }
}

impl From<bool> for BettingTypeValue {
    fn from(value: bool) -> Self {
        BettingTypeValue::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for BettingTypeValue {
    fn from(values: Vec<&str>) -> Self {
        BettingTypeValue::List(strings(values))
    }
}

impl From<Vec<String>> for BettingTypeValue {
    fn from(values: Vec<String>) -> Self {
        BettingTypeValue::List(values)
    }
}

/// Render key/value pairs in Betfair's loose filter-literal notation:
/// `{eventTypeIds:["1", "2"], inPlayOnly:true}`.
///
/// Keys are not quoted; list items are. Order follows the input.
pub fn betting_type_string<K: AsRef<str>>(entries: &[(K, BettingTypeValue)]) -> String {
    let rendered: Vec<String> = entries
        .iter()
        .map(|(key, value)| {
            let value = match value {
                BettingTypeValue::Scalar(s) => s.clone(),
                BettingTypeValue::List(items) => {
                    let quoted: Vec<String> = items.iter().map(|i| format!("\"{i}\"")).collect();
                    format!("[{}]", quoted.join(", "))
                }
            };
            format!("{}:{}", key.as_ref(), value)
        })
        .collect();
    format!("{{{}}}", rendered.join(", "))
}
