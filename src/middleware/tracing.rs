// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request IDs and creates one span per HTTP request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use http::{HeaderValue, Request, Response};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{info, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates `req_<uuid>` request IDs for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&format!("req_{}", Uuid::new_v4().simple()))
            .ok()
            .map(RequestId::new)
    }
}

/// Create a tracing span for an HTTP request
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record status and latency on the request span
pub fn record_response<B>(response: &Response<B>, latency: Duration, span: &Span) {
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", response.status().as_u16());
    span.record("duration_ms", duration_ms);
    info!(
        status = response.status().as_u16(),
        duration_ms, "Request completed"
    );
}
