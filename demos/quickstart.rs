/// Quickstart example: balances, order constraints, and a far-from-market limit order.
///
/// Requires UPBIT_OPEN_API_ACCESS_KEY and UPBIT_OPEN_API_SECRET_KEY.
use upbit_sdk::{
    ApiErrorKind, Credentials, GetOrdersRequest, OrderSide, OrderState, PlaceOrderRequest,
    UpbitClient, UpbitError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = UpbitClient::new(Credentials::from_env()?)?;

    // 1. Balances
    for account in client.get_accounts().await? {
        println!(
            "{:>6} balance={} locked={}",
            account.currency, account.balance, account.locked
        );
    }

    // 2. Order constraints for the market
    let market = "KRW-BTC";
    let chance = client.get_order_chance(market).await?;
    println!(
        "{}: bid fee {}, min bid total {:?}",
        chance.market.id, chance.bid_fee, chance.market.bid.min_total
    );

    // 3. Place a bid well below the market, unlikely to fill
    let tickers = client.get_ticker_snapshots(&[market]).await?;
    let ticker = &tickers[0];
    let price = ((ticker.trade_price * 0.5) / 1000.0).floor() * 1000.0;
    let request = PlaceOrderRequest::limit(market, OrderSide::Bid, "0.0001", format!("{price:.0}"))
        .with_identifier(format!("quickstart-{}", ticker.trade_timestamp));

    match client.place_order(&request).await {
        Ok(order) => println!("Placed order {} at {:?}", order.uuid, order.price),
        Err(UpbitError::Api(err)) if err.kind == ApiErrorKind::UnderMinTotal => {
            println!("Order rejected ({}): {}", err.name, err.message);
        }
        Err(err) => return Err(err.into()),
    }

    // 4. Open orders
    let open = GetOrdersRequest {
        market: Some(market.into()),
        state: Some(OrderState::Wait),
        ..Default::default()
    };
    for order in client.get_orders(&open).await? {
        println!("open {} {} {:?} @ {:?}", order.uuid, order.side, order.volume, order.price);
    }

    Ok(())
}
