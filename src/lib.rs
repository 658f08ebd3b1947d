//! Parlay evaluation engine and the HTTP service that exposes it.
//!
//! [`engine::evaluate`] is the whole computation: a pure function from a
//! [`types::ParlayRequest`] to a [`types::ParlayResult`]. The `api` module
//! wraps it in an axum router.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod types;
