//! Marea - Beachfront Watersports Reservation Backend
//!
//! This crate implements the booking engine for a beach rental operation:
//! fixed 30-minute equipment slots, capacity-safe slot allocation under
//! concurrency, deterministic bundle pricing, and a time-based
//! cancellation policy.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
