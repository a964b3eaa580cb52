// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request timing.
//!
//! Outermost application middleware: measures the whole auth chain plus the
//! handler and logs one summary line per request. Purely diagnostic; it
//! never changes the response.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn stopwatch(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;
    use tracing_test::traced_test;

    fn teapot() -> Router {
        Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(middleware::from_fn(stopwatch))
    }

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let response = teapot()
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"short and stout");
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_path_status_and_elapsed_time() {
        teapot()
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(logs_contain("request completed"));
        assert!(logs_contain("path=/teapot"));
        assert!(logs_contain("status=418"));
        assert!(logs_contain("elapsed_ms="));
    }
}
