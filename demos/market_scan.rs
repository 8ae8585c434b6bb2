/// Market scan example: list KRW markets and print the biggest 24h movers.
///
/// Uses only public quotation endpoints; no credentials needed.
use upbit_sdk::{MarketWarning, UpbitClient};

#[tokio::main]
async fn main() -> Result<(), upbit_sdk::UpbitError> {
    let client = UpbitClient::public()?;

    let markets = client.get_markets(true).await?;
    let krw: Vec<&str> = markets
        .iter()
        .filter(|m| m.market.starts_with("KRW-"))
        .filter(|m| m.market_warning != Some(MarketWarning::Caution))
        .map(|m| m.market.as_str())
        .collect();
    println!("{} KRW markets without warnings", krw.len());

    let mut tickers = Vec::new();
    for batch in krw.chunks(50) {
        tickers.extend(client.get_ticker_snapshots(batch).await?);
    }
    tickers.sort_by(|a, b| b.signed_change_rate.total_cmp(&a.signed_change_rate));

    for t in tickers.iter().take(10) {
        println!(
            "{:<12} {:>14.2} {:>+7.2}%",
            t.market,
            t.trade_price,
            t.signed_change_rate * 100.0
        );
    }
    Ok(())
}
