//! HTTP handler modules.
//! Used by: server.

pub mod documents;
pub mod health;
pub mod metrics;
