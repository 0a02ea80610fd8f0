//! Integration testing module
//!
//! End-to-end tests for the transcript server:
//! - Real listener bound on a loopback port
//! - In-memory transcript source standing in for YouTube
//! - JSON and SRT responses checked over HTTP

pub mod e2e;
pub mod fixtures;
