#![cfg(feature = "integration")]
/// Integration tests against the live Upbit API.
///
/// Quotation tests need only network access. Exchange tests additionally need
/// `UPBIT_OPEN_API_ACCESS_KEY` / `UPBIT_OPEN_API_SECRET_KEY` and are skipped
/// when they are unset.
///
/// Run with: cargo test --features integration --test integration_tests -- --test-threads=1
use serial_test::serial;

use upbit_sdk::*;

fn signed_client() -> Option<UpbitClient> {
    let credentials = Credentials::from_env().ok()?;
    Some(UpbitClient::new(credentials).unwrap())
}

#[tokio::test]
#[serial]
async fn test_live_markets() {
    let client = UpbitClient::public().unwrap();
    let markets = client.get_markets(true).await.unwrap();
    assert!(markets.iter().any(|m| m.market == "KRW-BTC"));
    assert!(markets.iter().all(|m| m.market_warning.is_some()));
}

#[tokio::test]
#[serial]
async fn test_live_ticker_snapshots() {
    let client = UpbitClient::public().unwrap();
    let tickers = client
        .get_ticker_snapshots(&["KRW-BTC", "KRW-ETH"])
        .await
        .unwrap();
    assert_eq!(tickers.len(), 2);
    assert!(tickers.iter().all(|t| t.trade_price > 0.0));
}

#[tokio::test]
#[serial]
async fn test_live_unknown_market_is_classified() {
    let client = UpbitClient::public().unwrap();
    let err = client
        .get_ticker_snapshots(&["KRW-DOESNOTEXIST"])
        .await
        .unwrap_err();
    assert!(err.api_error().is_some(), "got {err:?}");
}

#[tokio::test]
#[serial]
async fn test_live_bad_credentials_rejected() {
    let client = UpbitClient::new(Credentials::new("not-a-key", "not-a-secret")).unwrap();
    let err = client.get_accounts().await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
#[serial]
async fn test_live_accounts_and_chance() {
    let Some(client) = signed_client() else {
        eprintln!("skipping: no credentials in environment");
        return;
    };
    client.get_accounts().await.unwrap();
    let chance = client.get_order_chance("KRW-BTC").await.unwrap();
    assert_eq!(chance.market.id, "KRW-BTC");

    let done = GetOrdersRequest {
        market: Some("KRW-BTC".into()),
        states: vec![OrderState::Done, OrderState::Cancel],
        limit: 5,
        ..Default::default()
    };
    let orders = client.get_orders(&done).await.unwrap();
    assert!(orders.len() <= 5);
}
