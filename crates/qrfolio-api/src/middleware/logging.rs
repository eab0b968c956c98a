//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Share tokens are capabilities; only a short prefix is ever logged.
fn loggable_path(path: &str) -> String {
    match path.strip_prefix("/share/") {
        Some(token) => {
            let prefix: String = token.chars().take(8).collect();
            format!("/share/{prefix}...")
        }
        None => path.to_string(),
    }
}

/// Logs request method, path, status and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = loggable_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    if status.is_server_error() {
        warn!(method = %method, path = %path, status = status.as_u16(), duration_ms, "HTTP request");
    } else {
        info!(method = %method, path = %path, status = status.as_u16(), duration_ms, "HTTP request");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_token_truncated() {
        assert_eq!(
            loggable_path("/share/abcdefghijklmnopqrstuvwxyz"),
            "/share/abcdefgh..."
        );
        assert_eq!(loggable_path("/api/qr-codes"), "/api/qr-codes");
    }
}
