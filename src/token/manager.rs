//! Token manager: owns the signing secret and enforces expiry.
//! Used by: state, auth::gate, bin/docgate-token.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::token::claims::Token;
use crate::token::codec;

pub struct TokenManager {
    secret: Box<[u8]>,
}

impl TokenManager {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().into(),
        }
    }

    /// Mints a token valid for `ttl`. A zero or negative ttl yields an
    /// already-expired token.
    pub fn issue(&self, ttl: Duration) -> Result<String> {
        self.issue_token(ttl).map(|(_, wire)| wire)
    }

    pub fn issue_token(&self, ttl: Duration) -> Result<(Token, String)> {
        let token = Token::new(ttl)?;
        let wire = codec::encode(&token, &self.secret)?;
        Ok((token, wire))
    }

    pub fn verify(&self, wire: &str) -> Result<Token> {
        self.verify_at(wire, Utc::now())
    }

    pub fn verify_at(&self, wire: &str, now: DateTime<Utc>) -> Result<Token> {
        let token = codec::decode(wire, &self.secret)?;
        if token.is_expired_at(now) {
            return Err(Error::Expired);
        }
        Ok(token)
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenManager([REDACTED])")
    }
}
