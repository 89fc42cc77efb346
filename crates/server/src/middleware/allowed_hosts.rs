//! Host header validation middleware.
//!
//! Rejects requests whose Host header matches none of the configured
//! allowed hosts. Behind the load balancer the list is resolved from ECS
//! task metadata at startup; locally it is just localhost.

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::HOST},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Reject requests for hosts this server does not answer for.
pub async fn allowed_hosts_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(strip_port);

    let allowed = host.is_some_and(|host| {
        state
            .config()
            .allowed_hosts
            .iter()
            .any(|pattern| pattern.matches(host))
    });

    if allowed {
        next.run(request).await
    } else {
        tracing::warn!(host = host.unwrap_or("<missing>"), "Rejected disallowed host");
        (StatusCode::BAD_REQUEST, "Bad request").into_response()
    }
}

/// Strip a `:port` suffix, leaving IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8000 - cut after the closing bracket.
        host.split_once(']')
            .map_or(host, |(addr, _)| addr.trim_start_matches('['))
    } else {
        host.split_once(':').map_or(host, |(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("localhost:8000"), "localhost");
        assert_eq!(strip_port("foodbee.dk"), "foodbee.dk");
        assert_eq!(strip_port("[::1]:8000"), "::1");
    }
}
