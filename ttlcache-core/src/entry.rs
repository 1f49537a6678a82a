use bytes::Bytes;
use parking_lot::RwLock;
use std::time::{Duration, Instant};

use crate::id::{EntryId, IdGenerator, RandomIds};

/// Longest TTL honoured; anything above is clamped so `Instant` math can't overflow.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A cached value with its identifier and absolute expiration time
///
/// The value sits behind the entry's own lock, so updating it never touches
/// the lock of the [`Store`](crate::Store) holding the entry. The expiration
/// time is fixed at construction; reads do not extend it.
#[derive(Debug)]
pub struct Entry {
    id: EntryId,
    value: RwLock<Bytes>,
    expires_at: Instant,
}

impl Entry {
    /// Creates an entry with a fresh random id that expires `ttl` from now
    ///
    /// A zero `ttl` produces an entry that is already expired.
    pub fn new(value: impl Into<Bytes>, ttl: Duration) -> Self {
        Self::with_generator(&RandomIds, value, ttl)
    }

    /// Creates an entry whose id is drawn from `ids`
    pub fn with_generator<G>(ids: &G, value: impl Into<Bytes>, ttl: Duration) -> Self
    where
        G: IdGenerator + ?Sized,
    {
        Self::with_id(ids.next_id(), value, ttl)
    }

    /// Creates an entry under a caller-chosen id
    pub fn with_id(id: EntryId, value: impl Into<Bytes>, ttl: Duration) -> Self {
        Self {
            id,
            value: RwLock::new(value.into()),
            expires_at: Instant::now() + ttl.min(MAX_TTL),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Returns the current value (cheap reference-counted clone)
    pub fn value(&self) -> Bytes {
        self.value.read().clone()
    }

    /// Replaces the stored value
    pub fn set_value(&self, value: impl Into<Bytes>) {
        *self.value.write() = value.into();
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Time left before expiry, zero once expired
    pub fn time_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Checks if this entry has expired
    ///
    /// The deadline itself counts as expired, so a zero TTL is expired from the start.
    /// Reads only the immutable expiration time, so it never waits on the value lock.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
