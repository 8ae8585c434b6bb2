/// High-level UpbitClient with typed endpoint wrappers.
///
/// Each method builds a fresh [`Params`], calls the matching [`UpbitApi`]
/// primitive and decodes the payload into a [`models`](crate::models) type.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::UpbitApi;
use crate::auth::Credentials;
use crate::config::UpbitConfig;
use crate::errors::UpbitError;
use crate::models::*;
use crate::params::Params;

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, UpbitError> {
    serde_json::from_value(value).map_err(|e| {
        UpbitError::Json(format!(
            "Failed to decode {}: {e}",
            std::any::type_name::<T>()
        ))
    })
}

/// Filters for `GET /v1/orders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOrdersRequest {
    pub market: Option<String>,
    pub uuids: Vec<String>,
    pub identifiers: Vec<String>,
    pub state: Option<OrderState>,
    /// Open (`wait`, `watch`) and closed (`done`, `cancel`) states cannot be mixed.
    pub states: Vec<OrderState>,
    pub page: u32,
    pub limit: u32,
    pub order_by: OrderBy,
}

impl Default for GetOrdersRequest {
    fn default() -> Self {
        Self {
            market: None,
            uuids: Vec::new(),
            identifiers: Vec::new(),
            state: None,
            states: Vec::new(),
            page: 1,
            limit: 100,
            order_by: OrderBy::Desc,
        }
    }
}

impl GetOrdersRequest {
    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("page", self.page)
            .with("limit", self.limit)
            .with("order_by", self.order_by.as_str());
        params.insert_opt("market", self.market.as_deref());
        params.insert_list("uuids[]", &self.uuids);
        params.insert_list("identifiers[]", &self.identifiers);
        params.insert_opt("state", self.state.map(|s| s.as_str()));
        let states: Vec<String> = self.states.iter().map(|s| s.to_string()).collect();
        params.insert_list("states[]", &states);
        params
    }
}

/// Body of `POST /v1/orders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrderRequest {
    pub market: String,
    pub side: OrderSide,
    pub ord_type: OrderType,
    pub volume: Option<String>,
    pub price: Option<String>,
    pub identifier: Option<String>,
}

impl PlaceOrderRequest {
    /// Limit order for `volume` at `price`.
    pub fn limit(
        market: impl Into<String>,
        side: OrderSide,
        volume: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            ord_type: OrderType::Limit,
            volume: Some(volume.into()),
            price: Some(price.into()),
            identifier: None,
        }
    }

    /// Market buy spending `total` in the quote currency.
    pub fn market_buy(market: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Bid,
            ord_type: OrderType::Price,
            volume: None,
            price: Some(total.into()),
            identifier: None,
        }
    }

    /// Market sell of `volume`.
    pub fn market_sell(market: impl Into<String>, volume: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            side: OrderSide::Ask,
            ord_type: OrderType::Market,
            volume: Some(volume.into()),
            price: None,
            identifier: None,
        }
    }

    /// Attach a caller-chosen identifier for later lookup.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("market", self.market.as_str())
            .with("side", self.side.as_str())
            .with("ord_type", self.ord_type.as_str());
        params.insert_opt("volume", self.volume.as_deref());
        params.insert_opt("price", self.price.as_deref());
        params.insert_opt("identifier", self.identifier.as_deref());
        params
    }
}

/// The high-level Upbit client.
#[derive(Debug, Clone)]
pub struct UpbitClient {
    pub api: UpbitApi,
}

impl UpbitClient {
    /// Client for authenticated and public endpoints.
    pub fn new(credentials: Credentials) -> Result<Self, UpbitError> {
        Self::with_config(UpbitConfig::default(), Some(credentials))
    }

    /// Client for public quotation endpoints only.
    pub fn public() -> Result<Self, UpbitError> {
        Self::with_config(UpbitConfig::default(), None)
    }

    pub fn with_config(
        config: UpbitConfig,
        credentials: Option<Credentials>,
    ) -> Result<Self, UpbitError> {
        Ok(Self {
            api: UpbitApi::new(config, credentials)?,
        })
    }

    pub fn from_api(api: UpbitApi) -> Self {
        Self { api }
    }

    // -----------------------------------------------------------------------
    // Exchange API
    // -----------------------------------------------------------------------

    /// GET /v1/accounts - Held assets.
    pub async fn get_accounts(&self) -> Result<Vec<Account>, UpbitError> {
        decode(self.api.get_for_exchange("v1/accounts", &Params::new()).await?)
    }

    /// GET /v1/orders/chance - Order constraints and balances for a market.
    pub async fn get_order_chance(&self, market: &str) -> Result<OrderChance, UpbitError> {
        let params = Params::new().with("market", market);
        decode(self.api.get_for_exchange("v1/orders/chance", &params).await?)
    }

    /// GET /v1/order - Single order by uuid and/or identifier.
    pub async fn get_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Order, UpbitError> {
        let uuid = uuid.filter(|u| !u.is_empty());
        let identifier = identifier.filter(|i| !i.is_empty());
        if uuid.is_none() && identifier.is_none() {
            return Err(UpbitError::InvalidRequest(
                "get_order needs a uuid or an identifier".into(),
            ));
        }
        let mut params = Params::new();
        params.insert_opt("uuid", uuid);
        params.insert_opt("identifier", identifier);
        decode(self.api.get_for_exchange("v1/order", &params).await?)
    }

    /// GET /v1/orders - Order list.
    ///
    /// List filters go on the wire as repeated `uuids[]`, `identifiers[]` and `states[]` keys.
    pub async fn get_orders(
        &self,
        request: &GetOrdersRequest,
    ) -> Result<Vec<OrderSummary>, UpbitError> {
        decode(
            self.api
                .get_for_exchange("v1/orders", &request.to_params())
                .await?,
        )
    }

    /// POST /v1/orders - Place an order.
    pub async fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> Result<PlaceOrderResponse, UpbitError> {
        decode(
            self.api
                .post_for_exchange("v1/orders", &request.to_params())
                .await?,
        )
    }

    // -----------------------------------------------------------------------
    // Quotation API
    // -----------------------------------------------------------------------

    /// GET /v1/market/all - Listed markets.
    pub async fn get_markets(&self, is_details: bool) -> Result<Vec<Market>, UpbitError> {
        let params = Params::new().with("isDetails", is_details);
        decode(self.api.get_for_quotation("v1/market/all", &params).await?)
    }

    /// GET /v1/ticker - Snapshot for each of `markets`.
    ///
    /// Markets are sent as a single comma-joined `markets` value, e.g. `KRW-BTC,KRW-ETH`.
    pub async fn get_ticker_snapshots(
        &self,
        markets: &[&str],
    ) -> Result<Vec<TickerSnapshot>, UpbitError> {
        if markets.is_empty() {
            return Err(UpbitError::InvalidRequest(
                "get_ticker_snapshots needs at least one market".into(),
            ));
        }
        let params = Params::new().with("markets", markets.join(","));
        decode(self.api.get_for_quotation("v1/ticker", &params).await?)
    }
}
