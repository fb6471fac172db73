//! Query parameters and request construction.

use std::fmt;
use std::fmt::Write as _;

use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use http::Method;
use tracing::warn;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// One `key=value` query string fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    key: String,
    value: String,
}

impl Param {
    /// Create a query parameter.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Render the target URL: base, `?`, then the fragments joined with `&`
/// in the order supplied.
///
/// With zero parameters the bare trailing `?` remains; callers depend
/// on that exact shape.
pub(crate) fn target_url(url: &str, params: &[Param]) -> String {
    let mut target = String::with_capacity(url.len() + 1);
    target.push_str(url);
    target.push('?');
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            target.push('&');
        }
        let _ = write!(target, "{param}");
    }
    target
}

/// Construct one outgoing request.
///
/// Application order matters: the form content-type lands first, then
/// the configured headers (so a configured `Content-Type` overwrites
/// it), then the cookie header, then the per-request timeout.
pub(crate) fn build(
    http: &reqwest::Client,
    config: &ClientConfig,
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
    content_type: Option<&str>,
) -> Result<reqwest::Request> {
    let mut headers = HeaderMap::new();

    if let Some(content_type) = content_type {
        match HeaderValue::try_from(content_type) {
            Ok(value) => {
                headers.insert(CONTENT_TYPE, value);
            }
            Err(_) => warn!(content_type, "skipping invalid content-type value"),
        }
    }

    for (name, value) in &config.headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "skipping invalid header"),
        }
    }

    if !config.cookies.is_empty() {
        let joined = config
            .cookies
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        match HeaderValue::try_from(joined.as_str()) {
            Ok(value) => {
                headers.insert(COOKIE, value);
            }
            Err(_) => warn!("skipping invalid cookie value"),
        }
    }

    let mut builder = http.request(method, url).headers(headers);
    if let Some(body) = body {
        builder = builder.body(body);
    }
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| ClientError::RequestBuild(e.to_string()))
}
