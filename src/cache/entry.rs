//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == TTL ==
/// Time-to-live argument accepted by every write operation.
///
/// Distinguishes "the caller said nothing" from "the caller explicitly asked
/// for no expiry", which a bare `Option` cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Fall back to the configured `default_ttl`
    #[default]
    Default,
    /// The entry never expires
    Never,
    /// Expire this many seconds from now (must be positive)
    Seconds(u64),
}

impl Ttl {
    /// Resolves this argument against the configured default.
    ///
    /// Returns the effective TTL in seconds, or `None` for entries that
    /// never expire.
    ///
    /// # Errors
    /// `InvalidTtl` if an explicit TTL of zero seconds was requested.
    pub fn resolve(self, default_ttl: u64) -> Result<Option<u64>> {
        match self {
            Ttl::Default if default_ttl == 0 => Ok(None),
            Ttl::Default => Ok(Some(default_ttl)),
            Ttl::Never => Ok(None),
            Ttl::Seconds(0) => Err(CacheError::InvalidTtl(0)),
            Ttl::Seconds(secs) => Ok(Some(secs)),
        }
    }
}

// == Cache Entry ==
/// A single cache entry: the stored value plus expiry and access metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute creation timestamp, refreshed on overwrite
    pub created_at: DateTime<Utc>,
    /// Absolute expiration timestamp, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
    /// Successful reads plus overwrites, starting at 1 on creation
    pub access_count: u64,
    /// Timestamp of the most recent read or write
    pub last_access: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_secs` from `now`, or never.
    pub fn new(value: V, ttl_secs: Option<u64>, now: DateTime<Utc>) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: ttl_secs.map(|secs| now + Duration::seconds(secs as i64)),
            access_count: 1,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Touch ==
    /// Records a successful read: bumps the access count and refreshes
    /// `last_access`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.access_count += 1;
        self.last_access = now;
    }

    // == Overwrite ==
    /// Replaces the value in place, refreshing creation and expiry metadata.
    ///
    /// The access count carries over and is bumped, since an overwrite
    /// counts as an access.
    pub fn overwrite(&mut self, value: V, ttl_secs: Option<u64>, now: DateTime<Utc>) {
        self.value = value;
        self.created_at = now;
        self.expires_at = ttl_secs.map(|secs| now + Duration::seconds(secs as i64));
        self.access_count += 1;
        self.last_access = now;
    }

    // == Reschedule ==
    /// Replaces the expiry deadline without touching the value.
    pub fn reschedule(&mut self, ttl_secs: Option<u64>, now: DateTime<Utc>) {
        self.expires_at = ttl_secs.map(|secs| now + Duration::seconds(secs as i64));
        self.last_access = now;
    }

    /// Returns remaining TTL in seconds as of `now`, or None if the entry
    /// never expires. Expired entries report 0.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Option<u64> {
        self.expires_at.map(|expires| {
            if expires > now {
                (expires - now).num_seconds() as u64
            } else {
                0
            }
        })
    }
}
