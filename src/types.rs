//! Enumerated wire values of the Betfair Sports API.
//!
//! Each enum serializes to the exact upper-case token Betfair expects and
//! parses back from it. Parsing is strict: anything outside the enum's
//! allow-list is rejected with [`BetfairError::InvalidParameter`], which is
//! how bet status, market sort and time granularity are validated before a
//! request can be built.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::BetfairError;

/// Declares a fieldless enum mapped 1:1 onto Betfair wire tokens.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Accepted wire tokens, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($wire),+];

            /// The wire token for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = BetfairError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(BetfairError::InvalidParameter {
                        field: $field,
                        value: other.to_string(),
                        allowed: Self::NAMES,
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Allow-listed parameters
// ---------------------------------------------------------------------------

wire_enum! {
    /// Settlement state accepted by `listClearedOrders`.
    BetStatus("bet status") {
        Settled => "SETTLED",
        Voided => "VOIDED",
        Lapsed => "LAPSED",
        Cancelled => "CANCELLED",
    }
}

wire_enum! {
    /// Ordering of `listMarketCatalogue` results.
    MarketSort("sort") {
        MinimumTraded => "MINIMUM_TRADED",
        MaximumTraded => "MAXIMUM_TRADED",
        MinimumAvailable => "MINIMUM_AVAILABLE",
        MaximumAvailable => "MAXIMUM_AVAILABLE",
        FirstToStart => "FIRST_TO_START",
        LastToStart => "LAST_TO_START",
    }
}

wire_enum! {
    /// Bucket size for `listTimeRanges`.
    TimeGranularity("granularity") {
        Days => "DAYS",
        Hours => "HOURS",
        Minutes => "MINUTES",
    }
}

impl Default for TimeGranularity {
    fn default() -> Self {
        TimeGranularity::Minutes
    }
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

wire_enum! {
    /// Which parts of a market catalogue to return.
    MarketProjection("market projection") {
        Competition => "COMPETITION",
        Event => "EVENT",
        EventType => "EVENT_TYPE",
        MarketStartTime => "MARKET_START_TIME",
        MarketDescription => "MARKET_DESCRIPTION",
        RunnerDescription => "RUNNER_DESCRIPTION",
        RunnerMetadata => "RUNNER_METADATA",
    }
}

impl MarketProjection {
    /// Projection sent by `list_market_catalogue` when the caller gives none.
    pub const DEFAULT_SET: &'static [MarketProjection] = &[
        MarketProjection::Competition,
        MarketProjection::Event,
        MarketProjection::EventType,
        MarketProjection::MarketStartTime,
        MarketProjection::MarketDescription,
        MarketProjection::RunnerDescription,
        MarketProjection::RunnerMetadata,
    ];
}

wire_enum! {
    /// Price data requested in a price projection.
    PriceData("price data") {
        SpAvailable => "SP_AVAILABLE",
        SpTraded => "SP_TRADED",
        ExBestOffers => "EX_BEST_OFFERS",
        ExAllOffers => "EX_ALL_OFFERS",
        ExTraded => "EX_TRADED",
    }
}

wire_enum! {
    /// Which orders to include in book and current-order queries.
    OrderProjection("order projection") {
        All => "ALL",
        Executable => "EXECUTABLE",
        ExecutionComplete => "EXECUTION_COMPLETE",
    }
}

wire_enum! {
    /// How matched amounts are rolled up in book responses.
    MatchProjection("match projection") {
        NoRollup => "NO_ROLLUP",
        RolledUpByPrice => "ROLLED_UP_BY_PRICE",
        RolledUpByAvgPrice => "ROLLED_UP_BY_AVG_PRICE",
    }
}

// ---------------------------------------------------------------------------
// Markets
// ---------------------------------------------------------------------------

wire_enum! {
    MarketBettingType("market betting type") {
        Odds => "ODDS",
        Line => "LINE",
        Range => "RANGE",
        AsianHandicapDoubleLine => "ASIAN_HANDICAP_DOUBLE_LINE",
        AsianHandicapSingleLine => "ASIAN_HANDICAP_SINGLE_LINE",
        FixedOdds => "FIXED_ODDS",
    }
}

wire_enum! {
    MarketStatus("market status") {
        Inactive => "INACTIVE",
        Open => "OPEN",
        Suspended => "SUSPENDED",
        Closed => "CLOSED",
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

wire_enum! {
    /// Back (bet for) or lay (bet against) a selection.
    Side("side") {
        Back => "BACK",
        Lay => "LAY",
    }
}

impl Side {
    /// The opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Back => Side::Lay,
            Side::Lay => Side::Back,
        }
    }
}

wire_enum! {
    /// Lifecycle state of an order, as used by `MarketFilter::with_orders`.
    OrderStatus("order status") {
        Pending => "PENDING",
        ExecutionComplete => "EXECUTION_COMPLETE",
        Executable => "EXECUTABLE",
        Expired => "EXPIRED",
    }
}

wire_enum! {
    OrderType("order type") {
        Limit => "LIMIT",
        LimitOnClose => "LIMIT_ON_CLOSE",
        MarketOnClose => "MARKET_ON_CLOSE",
    }
}

wire_enum! {
    /// What happens to unmatched volume when the market turns in-play.
    PersistenceType("persistence type") {
        Lapse => "LAPSE",
        Persist => "PERSIST",
        MarketOnClose => "MARKET_ON_CLOSE",
    }
}

wire_enum! {
    TimeInForce("time in force") {
        FillOrKill => "FILL_OR_KILL",
    }
}

wire_enum! {
    OrderBy("order by") {
        ByBet => "BY_BET",
        ByMarket => "BY_MARKET",
        ByMatchTime => "BY_MATCH_TIME",
        ByPlaceTime => "BY_PLACE_TIME",
        BySettledTime => "BY_SETTLED_TIME",
        ByVoidTime => "BY_VOID_TIME",
    }
}

wire_enum! {
    SortDir("sort direction") {
        EarliestToLatest => "EARLIEST_TO_LATEST",
        LatestToEarliest => "LATEST_TO_EARLIEST",
    }
}

wire_enum! {
    /// Aggregation level for `listClearedOrders`.
    GroupBy("group by") {
        EventType => "EVENT_TYPE",
        Event => "EVENT",
        Market => "MARKET",
        Side => "SIDE",
        Bet => "BET",
        Runner => "RUNNER",
    }
}
