// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This crate implements the `punkdeck` terminal client on top of [`punkdeck_client`].

pub mod tracing;
pub mod views;
