/// Data models for Upbit API types.
///
/// Amounts and prices on the exchange API are decimal strings and stay
/// `String` here to avoid precision loss. Quotation numbers are plain JSON
/// numbers and map to `f64`.
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize an optional value that may be a JSON number or a string, storing as String.
fn deserialize_optional_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::Null) | None => Ok(None),
        Some(v) => Ok(Some(v.to_string())),
    }
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
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
    };
}

// ---------------------------------------------------------------------------
// Request enums
// ---------------------------------------------------------------------------

wire_enum!(
    /// Order side.
    OrderSide {
        Ask => "ask",
        Bid => "bid",
    }
);

wire_enum!(
    /// Order type. `Price` is a market buy by total, `Market` a market sell by volume.
    OrderType {
        Limit => "limit",
        Price => "price",
        Market => "market",
    }
);

wire_enum!(
    /// Order state.
    OrderState {
        Wait => "wait",
        Watch => "watch",
        Done => "done",
        Cancel => "cancel",
    }
);

wire_enum!(
    /// Sort direction for order lists.
    OrderBy {
        Asc => "asc",
        Desc => "desc",
    }
);

// ---------------------------------------------------------------------------
// Exchange API
// ---------------------------------------------------------------------------

/// A held asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub currency: String,
    pub balance: String,
    pub locked: String,
    pub avg_buy_price: String,
    pub avg_buy_price_modified: bool,
    pub unit_currency: String,
}

/// Per-side order constraints of a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConstraint {
    pub currency: String,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    pub price_unit: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    pub min_total: Option<String>,
}

/// Market section of an order-chance response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChanceMarket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub ask_types: Vec<String>,
    #[serde(default)]
    pub bid_types: Vec<String>,
    #[serde(default)]
    pub order_sides: Vec<String>,
    pub bid: OrderConstraint,
    pub ask: OrderConstraint,
    #[serde(default, deserialize_with = "deserialize_optional_string_or_number")]
    pub max_total: Option<String>,
    pub state: String,
}

/// Response of `GET /v1/orders/chance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChance {
    pub bid_fee: String,
    pub ask_fee: String,
    pub market: OrderChanceMarket,
    pub bid_account: Account,
    pub ask_account: Account,
}

/// A fill belonging to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub market: String,
    pub uuid: String,
    pub price: String,
    pub volume: String,
    pub funds: String,
    pub side: OrderSide,
    pub created_at: String,
}

/// Order as returned by list and placement endpoints.
///
/// `price` and `volume` are absent for market orders of the opposite kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub uuid: String,
    pub side: OrderSide,
    pub ord_type: OrderType,
    #[serde(default)]
    pub price: Option<String>,
    pub state: OrderState,
    pub market: String,
    pub created_at: String,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub remaining_volume: Option<String>,
    pub reserved_fee: String,
    pub remaining_fee: String,
    pub paid_fee: String,
    pub locked: String,
    pub executed_volume: String,
    pub trades_count: u64,
    #[serde(default)]
    pub identifier: Option<String>,
}

/// Response of `POST /v1/orders`.
pub type PlaceOrderResponse = OrderSummary;

/// Single order with its fills, from `GET /v1/order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub summary: OrderSummary,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

// ---------------------------------------------------------------------------
// Quotation API
// ---------------------------------------------------------------------------

/// Warning flag attached to a market when details are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketWarning {
    None,
    Caution,
}

/// A listed market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub market: String,
    pub korean_name: String,
    pub english_name: String,
    #[serde(default)]
    pub market_warning: Option<MarketWarning>,
}

/// Price movement against the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Change {
    Even,
    Rise,
    Fall,
}

/// Ticker snapshot from `GET /v1/ticker`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSnapshot {
    pub market: String,
    pub trade_date: String,
    pub trade_time: String,
    pub trade_date_kst: String,
    pub trade_time_kst: String,
    pub trade_timestamp: i64,
    pub opening_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub trade_price: f64,
    pub prev_closing_price: f64,
    pub change: Change,
    pub change_price: f64,
    pub change_rate: f64,
    pub signed_change_price: f64,
    pub signed_change_rate: f64,
    pub trade_volume: f64,
    pub acc_trade_price: f64,
    pub acc_trade_price_24h: f64,
    pub acc_trade_volume: f64,
    pub acc_trade_volume_24h: f64,
    pub highest_52_week_price: f64,
    pub highest_52_week_date: String,
    pub lowest_52_week_price: f64,
    pub lowest_52_week_date: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}
