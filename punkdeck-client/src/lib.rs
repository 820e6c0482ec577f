// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides a convenient library for writing a Punkdeck client
//! application: wallet sessions, holdings synchronization, mint and transfer
//! submission, and the historical transfer log.

pub mod client_context;
pub mod client_options;
pub mod collection;
pub mod config;
pub mod metadata;
pub mod mint_listener;
pub mod mutation;
pub mod session;
pub mod transfer_log;

/// Helper types for tests.
#[cfg(feature = "test")]
pub mod test_utils;
