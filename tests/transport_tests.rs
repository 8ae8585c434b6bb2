/// Tests for ReqwestTransport against an in-process mock HTTP server.
///
/// The server accepts one connection, records the raw request and replies
/// with a canned response, so the real wire encoding of query strings,
/// headers and JSON bodies is exercised without hitting Upbit.
///
/// Run with: cargo test --test transport_tests
use std::time::Duration;

use serde_json::json;
use sha2::{Digest, Sha512};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use upbit_sdk::auth::decode_token;
use upbit_sdk::*;

const SECRET: &str = "transport-secret";

/// A captured request: head (request line + headers) and body.
#[derive(Debug)]
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim()
                .eq_ignore_ascii_case(name)
                .then(|| v.trim().to_string())
        })
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Spawn a one-shot HTTP server returning `status` and `body`.
async fn create_mock_server(
    status_line: &'static str,
    body: String,
) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_head_end(&buf) {
                break pos;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (k, v) = line.split_once(':')?;
                k.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| v.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        let body_start = head_end + 4;
        while buf.len() < body_start + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body =
            String::from_utf8_lossy(&buf[body_start..(body_start + content_length).min(buf.len())])
                .into_owned();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.flush().await.unwrap();

        let _ = tx.send(Captured {
            head,
            body: request_body,
        });
    });

    (format!("http://{addr}"), rx)
}

fn api_for(base: &str, credentials: Option<Credentials>) -> api::UpbitApi {
    let config = UpbitConfig::new()
        .with_api_base(base)
        .with_timeout(Duration::from_secs(5));
    api::UpbitApi::new(config, credentials).unwrap()
}

fn bearer_claims(captured: &Captured) -> TokenClaims {
    let header = captured.header("authorization").expect("no Authorization");
    let token = header.strip_prefix("Bearer ").expect("not bearer");
    decode_token(token, SECRET).unwrap()
}

#[tokio::test]
async fn test_signed_get_over_http() {
    let (base, captured) = create_mock_server("200 OK", json!([]).to_string()).await;
    let api = api_for(&base, Some(Credentials::new("ak", SECRET)));

    let params = Params::new()
        .with("market", "KRW-BTC")
        .with("states[]", vec!["done", "cancel"]);
    let value = api.get_for_exchange("v1/orders", &params).await.unwrap();
    assert_eq!(value, json!([]));

    let captured = captured.await.unwrap();
    assert_eq!(
        captured.request_line(),
        "GET /v1/orders?market=KRW-BTC&states%5B%5D=done&states%5B%5D=cancel HTTP/1.1"
    );

    let claims = bearer_claims(&captured);
    let expected = hex::encode(Sha512::digest(
        b"market=KRW-BTC&states[]=done&states[]=cancel",
    ));
    assert_eq!(claims.query_hash.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_signed_post_over_http() {
    let (base, captured) =
        create_mock_server("201 Created", json!({"uuid": "o-1"}).to_string()).await;
    let api = api_for(&base, Some(Credentials::new("ak", SECRET)));

    let params = Params::new()
        .with("market", "KRW-BTC")
        .with("side", "ask")
        .with("ord_type", "market")
        .with("volume", "0.5");
    let value = api.post_for_exchange("v1/orders", &params).await.unwrap();
    assert_eq!(value, json!({"uuid": "o-1"}));

    let captured = captured.await.unwrap();
    assert_eq!(captured.request_line(), "POST /v1/orders HTTP/1.1");
    assert_eq!(
        captured.header("content-type").as_deref(),
        Some("application/json")
    );
    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(sent, params.to_json());

    let claims = bearer_claims(&captured);
    let expected = hex::encode(Sha512::digest(
        b"market=KRW-BTC&ord_type=market&side=ask&volume=0.5",
    ));
    assert_eq!(claims.query_hash.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_quotation_get_over_http() {
    let (base, captured) = create_mock_server("200 OK", json!([]).to_string()).await;
    let api = api_for(&base, None);

    let params = Params::new().with("isDetails", false);
    api.get_for_quotation("/v1/market/all", &params).await.unwrap();

    let captured = captured.await.unwrap();
    assert_eq!(
        captured.request_line(),
        "GET /v1/market/all?isDetails=false HTTP/1.1"
    );
    assert_eq!(captured.header("accept").as_deref(), Some("application/json"));
    assert!(captured.header("authorization").is_none());
}

#[tokio::test]
async fn test_error_envelope_over_http() {
    let body = json!({"error": {"name": "under_min_total_ask", "message": "too small"}}).to_string();
    let (base, _captured) = create_mock_server("400 Bad Request", body).await;
    let client = UpbitClient::from_api(api_for(&base, Some(Credentials::new("ak", SECRET))));

    let err = client
        .place_order(&PlaceOrderRequest::market_sell("KRW-BTC", "0.00000001"))
        .await
        .unwrap_err();
    let api = err.api_error().unwrap();
    assert_eq!(api.kind, ApiErrorKind::UnderMinTotal);
    assert_eq!(api.status_code, 400);
    assert_eq!(api.message, "too small");
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = api_for(&format!("http://{addr}"), None);
    let err = api
        .get_for_quotation("v1/ticker", &Params::new().with("markets", "KRW-BTC"))
        .await
        .unwrap_err();
    assert!(matches!(err, UpbitError::Http(_)));
}
