//! Library crate for roll-for-teams-back, exposing modules for the binary and integration tests.

mod config;
/// Data access layer for pool persistence.
pub mod dao;
mod dto;
mod error;
/// HTTP route handlers and router composition.
pub mod routes;
/// Business logic services.
pub mod services;
/// Shared application state.
pub mod state;
