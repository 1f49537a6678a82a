use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::config::StoreConfig;
use crate::entry::Entry;
use crate::error::StoreError;
use crate::id::EntryId;

/// Internal shared state for the store
struct StoreInner {
    items: RwLock<HashMap<EntryId, Arc<Entry>>>,
    /// Sender to signal shutdown to the cleanup task
    shutdown_tx: watch::Sender<bool>,
}

/// Thread-safe in-memory store of [`Entry`] values keyed by [`EntryId`]
///
/// The map sits behind a single reader/writer lock: lookups run in parallel,
/// inserts, deletes and sweeps take it exclusively. Entry values have their
/// own locks and the store lock is never held while waiting on one of them.
///
/// Expiration is enforced twice. Every lookup re-checks the entry's deadline
/// and hides expired entries, and a background task spawned at construction
/// periodically removes them from the map. The task runs until
/// [`stop_cleanup`](Store::stop_cleanup) is called or the last handle to the
/// store is dropped.
///
/// # Example
///
/// ```rust,no_run
/// use ttlcache_core::{Entry, Store, StoreConfig};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let config = StoreConfig::default()
///         .with_cleanup_interval(Duration::from_secs(30));
///     let store = Store::with_config(config);
///
///     let entry = Arc::new(Entry::new("session-token", Duration::from_secs(300)));
///     store.set(Arc::clone(&entry));
///
///     if let Some(found) = store.get(&entry.id()) {
///         println!("{:?}", found.value());
///     }
///
///     store.stop_cleanup();
/// }
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Creates a new store with default configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The store requires
    /// a runtime to spawn its background cleanup task.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates a new store with custom configuration
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context or if the cleanup
    /// interval is zero. Use [`try_with_config`](Store::try_with_config) to get
    /// these conditions back as a [`StoreError`].
    pub fn with_config(config: StoreConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(store) => store,
            Err(err) => panic!("ttlcache_core::Store: {err}"),
        }
    }

    /// Creates a new store and starts its cleanup task on the current runtime
    pub fn try_with_config(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| StoreError::MissingRuntime)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let inner = Arc::new(StoreInner {
            items: RwLock::new(HashMap::new()),
            shutdown_tx,
        });

        // The task only holds a weak handle so dropping the last store ends it
        runtime.spawn(Self::cleanup_task(
            Arc::downgrade(&inner),
            config.cleanup_interval,
            shutdown_rx,
        ));
        tracing::debug!(interval = ?config.cleanup_interval, "cleanup task started");

        Ok(Self { inner })
    }

    /// Background task that periodically sweeps expired entries
    async fn cleanup_task(
        inner: Weak<StoreInner>,
        interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Skip the first immediate tick - we want to wait for the interval first
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    // Err: the sender went away with the last store handle
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let Some(inner) = inner.upgrade() else {
                        break;
                    };
                    let removed = Self::sweep_internal(&inner);
                    if removed > 0 {
                        tracing::debug!(removed, "swept expired entries");
                    } else {
                        tracing::trace!("sweep found nothing to remove");
                    }
                }
            }
        }

        tracing::debug!("cleanup task stopped");
    }

    /// Removes every expired entry while holding the write lock for the whole scan
    fn sweep_internal(inner: &StoreInner) -> usize {
        let mut items = inner.items.write();
        let before = items.len();
        items.retain(|_, entry| !entry.is_expired());
        before - items.len()
    }

    /// Inserts an entry under its id, replacing any entry already stored there
    pub fn set(&self, entry: impl Into<Arc<Entry>>) {
        let entry = entry.into();
        self.inner.items.write().insert(entry.id(), entry);
    }

    /// Looks up an entry by id
    ///
    /// Returns `None` if the id is unknown or the entry has expired. Expired
    /// entries are only hidden here; removing them is left to the sweep.
    pub fn get(&self, id: &EntryId) -> Option<Arc<Entry>> {
        let items = self.inner.items.read();
        items
            .get(id)
            .filter(|entry| !entry.is_expired())
            .map(Arc::clone)
    }

    /// Removes the entry stored under `id`
    ///
    /// Returns `true` if an entry was removed (regardless of expiration).
    /// Deleting an unknown id is a no-op.
    pub fn delete(&self, id: &EntryId) -> bool {
        self.inner.items.write().remove(id).is_some()
    }

    /// Runs one sweep immediately and returns the number of entries removed
    ///
    /// Note: This is also done automatically by the background task.
    pub fn sweep(&self) -> usize {
        Self::sweep_internal(&self.inner)
    }

    /// Returns the number of entries held (including expired, unswept ones)
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.read().len()
    }

    /// Returns `true` if the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.items.read().is_empty()
    }

    /// Signals the background cleanup task to stop
    ///
    /// A sweep already in progress runs to completion; no further sweeps start.
    /// Lookups, inserts and deletes keep working, expired entries are then only
    /// hidden on read. Calling this more than once is a no-op, and the task
    /// cannot be restarted.
    pub fn stop_cleanup(&self) {
        let already_stopped = self.inner.shutdown_tx.send_replace(true);
        if !already_stopped {
            tracing::debug!("cleanup stop requested");
        }
    }

    /// Returns `true` while the background cleanup task is alive
    pub fn is_cleanup_running(&self) -> bool {
        !self.inner.shutdown_tx.is_closed()
    }

    /// Waits until the background cleanup task has exited
    pub async fn cleanup_stopped(&self) {
        self.inner.shutdown_tx.closed().await;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("len", &self.len())
            .field("cleanup_running", &self.is_cleanup_running())
            .finish()
    }
}
