// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides typed access to the Punks collection contract on an
//! Ethereum blockchain node.

pub mod client;
pub mod common;
pub mod contract;

/// Helper types for tests.
#[cfg(feature = "test")]
pub mod test_utils;
