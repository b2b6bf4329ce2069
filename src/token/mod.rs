//! Token issuance, signing, and verification.
//! Used by: auth, state, bin/docgate-token.

pub mod claims;
pub mod codec;
pub mod duration;
pub mod manager;

pub use claims::Token;
pub use duration::parse_duration;
pub use manager::TokenManager;
