//! Request authentication: credential extraction and the access gate.
//! Used by: server, handlers::documents.

pub mod credential;
pub mod gate;

pub use credential::extract_credential;
pub use gate::{access_grant, require_token, AccessGrant};
