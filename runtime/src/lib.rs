// Copyright 2026 Jobscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Jobscope runtime library: HTTP fetching, SQLite storage, word-cloud
//! artifacts, REST API and CLI around the `jobscope` core.
//!
//! This library crate exposes the modules for integration testing.

pub mod cli;
pub mod config;
pub mod http_client;
pub mod rest;
pub mod sink;
pub mod state;
pub mod storage;
