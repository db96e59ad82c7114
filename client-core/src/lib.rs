pub mod api;
pub mod api_config;
pub mod auth;
pub mod config;
pub mod constants;
pub mod correlator;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;
pub mod notice;
pub mod orchestrator;
pub mod registry;
pub mod validation;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{DashboardError, GatewayError, Result};
