//! WebSocket dial path.

use std::collections::HashMap;

use http::header::{HeaderName, HeaderValue};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::{Request, Response};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::warn;

use crate::client::Client;
use crate::error::Result;

/// The connected WebSocket stream returned by [`Client::websocket`].
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Build the handshake request: target URL plus the configured default
/// headers. Cookies and the cancellation token stay on the HTTP path.
pub(crate) fn handshake_request(url: &str, headers: &HashMap<String, String>) -> Result<Request> {
    let mut request = url.into_client_request()?;
    for (name, value) in headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                request.headers_mut().insert(name, value);
            }
            _ => warn!(header = %name, "skipping invalid header"),
        }
    }
    Ok(request)
}

impl Client {
    /// Dial a WebSocket endpoint once.
    ///
    /// A single handshake attempt outside the retry dispatcher; the
    /// connection and handshake response are returned verbatim.
    pub async fn websocket(&self, url: &str) -> Result<(WsStream, Response)> {
        let request = handshake_request(url, &self.config().headers)?;
        let (stream, response) = connect_async(request).await?;
        Ok((stream, response))
    }
}
