//! Claims carried by a docgate access token.
//! Used by: token::codec, token::manager, auth::gate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub id: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl Token {
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::issued_at(Utc::now(), ttl)
    }

    /// Fails with `InvalidDuration` when `now + ttl` falls outside the
    /// representable range.
    pub fn issued_at(now: DateTime<Utc>, ttl: Duration) -> Result<Self> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| Error::InvalidDuration(format!("ttl of {ttl} is out of range")))?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            expires_at,
            issued_at: now,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn ttl(&self) -> Duration {
        self.expires_at - self.issued_at
    }
}
