//! Client and retry dispatch.

use std::time::Duration;

use http::{Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, Cookie};
use crate::error::{ClientError, Result};
use crate::payload::Payload;
use crate::request::{self, Param};
use crate::response::Response;

/// Delay between attempts. A constant pause, not a backoff schedule.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// HTTP / WebSocket client with default headers, cookies, and a
/// fixed-count retry policy.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client with the given configuration.
    pub fn new(mut config: ClientConfig) -> Self {
        let http = config.http.take().unwrap_or_default();
        Self { http, config }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get a configured default header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.config.headers.get(key).map(String::as_str)
    }

    /// Replace the cookie sequence applied to HTTP requests.
    ///
    /// Requests already in flight keep the cookies they were built with.
    pub fn set_cookies(&mut self, cookies: Vec<Cookie>) {
        self.config.cookies = cookies;
    }

    /// Issue a GET request through the retry dispatcher.
    pub async fn get(&self, url: &str, payload: Payload, params: &[Param]) -> Result<Response> {
        self.dispatch(Method::GET, url, payload, params).await
    }

    /// Issue a POST request through the retry dispatcher.
    pub async fn post(&self, url: &str, payload: Payload, params: &[Param]) -> Result<Response> {
        self.dispatch(Method::POST, url, payload, params).await
    }

    /// Run up to `retry + 1` attempts with a fixed delay in between.
    ///
    /// Fatal errors (payload encoding, URL parsing, request building)
    /// return immediately. Retryable errors consume an attempt; once
    /// the budget is exhausted the final attempt's error is returned.
    async fn dispatch(
        &self,
        method: Method,
        url: &str,
        payload: Payload,
        params: &[Param],
    ) -> Result<Response> {
        let (body, content_type) = payload.encode()?;
        let target = request::target_url(url, params);
        let target = Url::parse(&target).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let mut attempt: u32 = 0;
        loop {
            let request = request::build(
                &self.http,
                &self.config,
                method.clone(),
                target.clone(),
                body.clone(),
                content_type.as_deref(),
            )?;

            let error = match self.invoke(request).await {
                Ok(response) => return Ok(response),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            if attempt >= self.config.retry {
                return Err(error);
            }
            attempt += 1;
            debug!(attempt, error = %error, "retrying after fixed delay");
            tokio::time::sleep(RETRY_DELAY).await;
        }
    }

    /// Submit one built request to the transport and classify the
    /// outcome. Exactly 200 OK is success; any other status becomes a
    /// retryable status error. The configured cancellation token aborts
    /// the in-flight call only, not the retry loop.
    async fn invoke(&self, request: reqwest::Request) -> Result<Response> {
        let in_flight = self.http.execute(request);
        let response = match &self.config.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ClientError::Cancelled),
                result = in_flight => result?,
            },
            None => in_flight.await?,
        };

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }
        Response::from_http(response).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
