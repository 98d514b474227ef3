//! HTTP route handlers.

pub mod echo;
pub mod health;
pub mod metrics;
pub mod telemetry;
