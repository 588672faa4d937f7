//! HTTP transport layer (axum).

pub mod reservations;
