// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request helper and the in-process mock upstream server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;
pub mod mock_upstream;
