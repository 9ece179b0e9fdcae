//! HTTP API layer for Credential Gate.
//!
//! Provides the login endpoint plus health and documentation routes.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
