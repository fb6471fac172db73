//! Client configuration.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A cookie attached to every HTTP request issued through a client.
///
/// Rendered as `name=value` on the `Cookie` request header. Cookies are
/// not applied to the WebSocket dial path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl Cookie {
    /// Create a new cookie.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Client configuration.
///
/// Fixed at construction; the client reads it during dispatch and does
/// not lock it. Configure fully before issuing concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Caller-supplied cancellation token. When it fires, the in-flight
    /// transport call aborts; remaining retry attempts still run.
    pub cancel: Option<CancellationToken>,
    /// Per-request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
    /// Number of retries after the first attempt. Total attempts are
    /// `retry + 1`; zero means exactly one attempt.
    pub retry: u32,
    /// Default headers applied to every request. Keys are unique, last
    /// write wins.
    pub headers: HashMap<String, String>,
    /// Cookies applied to every HTTP request, in order.
    pub cookies: Vec<Cookie>,
    /// Injected HTTP transport. `None` builds a default client.
    pub http: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the cancellation token bound to every HTTP request.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.config.cancel = Some(token);
        self
    }

    /// Add a default header, overwriting any earlier value for the key.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the retry count. Total attempts are `retry + 1`.
    pub fn retry(mut self, retry: u32) -> Self {
        self.config.retry = retry;
        self
    }

    /// Replace the cookie sequence.
    pub fn cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.config.cookies = cookies;
        self
    }

    /// Inject the HTTP transport to use instead of the default one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.config.http = Some(client);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
