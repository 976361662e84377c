//! HTTP surface of the one-time code service
//!
//! Exposes the app factory and its building blocks so integration tests can
//! mount the same routes against in-process collaborators.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::{AppState, DynAppState};
