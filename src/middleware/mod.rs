// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, per-request spans, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{create_request_span, record_response, MakeRequestUuid, REQUEST_ID_HEADER};
