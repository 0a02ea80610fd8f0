//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the transcript, language and SRT endpoints
//! - Request handlers and response schemas
//! - Request logging middleware with request ids
//! - CORS middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
