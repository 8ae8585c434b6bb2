/// Request execution for the Upbit REST API.
///
/// Exchange calls are signed with a fresh JWT over exactly the parameters that
/// go on the wire. Quotation calls are unsigned. Every call issues one
/// transport request and passes the raw response through
/// [`response::interpret`](crate::response::interpret).
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::auth::{authorization_header, Credentials};
use crate::config::UpbitConfig;
use crate::errors::UpbitError;
use crate::params::Params;
use crate::response::interpret;
use crate::transport::{HttpMethod, HttpRequest, ReqwestTransport, Transport};

/// Low-level REST API client for Upbit.
#[derive(Debug, Clone)]
pub struct UpbitApi {
    transport: Arc<dyn Transport>,
    config: UpbitConfig,
    credentials: Option<Credentials>,
}

impl UpbitApi {
    /// Create an API client over the default `reqwest` transport.
    ///
    /// Without credentials only quotation endpoints are usable.
    pub fn new(config: UpbitConfig, credentials: Option<Credentials>) -> Result<Self, UpbitError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, credentials, Arc::new(transport)))
    }

    /// Create an API client over a caller-supplied transport.
    pub fn with_transport(
        config: UpbitConfig,
        credentials: Option<Credentials>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            config,
            credentials,
        }
    }

    pub fn config(&self) -> &UpbitConfig {
        &self.config
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn authorization(&self, params: &Params) -> Result<String, UpbitError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            UpbitError::Configuration("exchange endpoints require credentials".into())
        })?;
        authorization_header(credentials, params)
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value, UpbitError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        debug!(
            "api.execute method={} url={} status={} body_len={}",
            method,
            url,
            response.status,
            response.body.len()
        );
        interpret(response.status, &response.body)
    }

    /// Signed GET; `params` become the query string.
    pub async fn get_for_exchange(&self, path: &str, params: &Params) -> Result<Value, UpbitError> {
        debug!(
            "api.get_for_exchange path={} params={:?}",
            path,
            params.keys().collect::<Vec<_>>()
        );
        let authorization = self.authorization(params)?;
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: self.config.url_for(path),
            headers: vec![("Authorization".into(), authorization)],
            query: params.pairs(),
            body: None,
        };
        self.execute(request).await
    }

    /// Signed POST; `params` become the JSON body.
    pub async fn post_for_exchange(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<Value, UpbitError> {
        debug!(
            "api.post_for_exchange path={} params={:?}",
            path,
            params.keys().collect::<Vec<_>>()
        );
        let authorization = self.authorization(params)?;
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.config.url_for(path),
            headers: vec![
                ("Authorization".into(), authorization),
                ("Content-Type".into(), "application/json".into()),
            ],
            query: Vec::new(),
            body: Some(params.to_json()),
        };
        self.execute(request).await
    }

    /// Unsigned GET for public market data.
    pub async fn get_for_quotation(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<Value, UpbitError> {
        debug!(
            "api.get_for_quotation path={} params={:?}",
            path,
            params.keys().collect::<Vec<_>>()
        );
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: self.config.url_for(path),
            headers: vec![("Accept".into(), "application/json".into())],
            query: params.pairs(),
            body: None,
        };
        self.execute(request).await
    }
}
