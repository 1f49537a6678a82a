use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Unique, immutable identifier of an [`Entry`](crate::Entry), used as the map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Generates a fresh random (v4) identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Source of entry identifiers
///
/// Implementations must hand out values that never repeat for the lifetime
/// of the stores they feed.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> EntryId;
}

/// Default generator: random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> EntryId {
        EntryId::new()
    }
}

/// Deterministic generator handing out 1, 2, 3, ... encoded as UUIDs
///
/// Useful for tests and reproducible runs where ids must be predictable.
///
/// # Example
///
/// ```rust
/// use ttlcache_core::{IdGenerator, SequentialIds};
///
/// let ids = SequentialIds::new();
/// let first = ids.next_id();
/// let second = ids.next_id();
/// assert!(first < second);
/// ```
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts the sequence so that the first id handed out is `start`
    ///
    /// The counter wraps around after `u64::MAX`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> EntryId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        EntryId(Uuid::from_u128(u128::from(n)))
    }
}
