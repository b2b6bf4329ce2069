//! docgate: a document gateway that serves files behind signed, expiring
//! access tokens.
//! Used by: docgate and docgate-token binaries, integration tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod serve;
pub mod server;
pub mod source;
pub mod state;
pub mod telemetry;
pub mod token;
