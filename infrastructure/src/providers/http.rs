//! HTTP plumbing shared by the provider backends

use consensus_application::GatewayError;
use consensus_domain::truncate;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Longest slice of an error body carried into a [`GatewayError`]
const ERROR_BODY_PREVIEW: usize = 300;

pub(crate) fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

pub(crate) fn map_status(status: StatusCode, body: &str) -> GatewayError {
    let detail = format!(
        "HTTP {}: {}",
        status.as_u16(),
        truncate(body.trim(), ERROR_BODY_PREVIEW)
    );
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::AuthenticationFailed(detail),
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited(detail),
        _ => GatewayError::RequestFailed(detail),
    }
}

/// Send `request` and decode a successful JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GatewayError> {
    let response = request.send().await.map_err(map_send_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(map_status(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

/// Join a base URL and an absolute API path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// One-shot HTTP server for exercising the backends without the network.
#[cfg(test)]
pub(crate) mod stub {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Client that never routes through a proxy from the environment
    pub(crate) fn stub_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// Serve a single request with `status` and `body`.
    ///
    /// Returns the base URL and a handle resolving to the raw request.
    pub(crate) async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if is_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn is_complete(request: &[u8]) -> bool {
        let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&request[..end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= end + 4 + content_length
    }
}
