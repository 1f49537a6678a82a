use anyhow::{ensure, Context, Result};
use bytes::Bytes;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttlcache_core::{Entry, EntryId, SequentialIds, Store, StoreConfig};

const CLEANUP_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttlcache_demo=info,ttlcache_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Store::try_with_config(
        StoreConfig::default().with_cleanup_interval(CLEANUP_INTERVAL),
    )
    .context("failed to build store")?;

    tracing::info!("🧪 TTL cache demo");
    tracing::info!("   Cleanup interval: {:?}", CLEANUP_INTERVAL);

    basic_operations(&store)?;
    parallel_set_get(&store).await?;
    expiration(&store).await?;
    sweep_reclamation(&store).await?;

    store.stop_cleanup();
    store.cleanup_stopped().await;

    tracing::info!("✅ All scenarios passed!");

    Ok(())
}

/// Set, get, update in place, delete
fn basic_operations(store: &Store) -> Result<()> {
    tracing::info!("Scenario: Basic Operations");

    let item = Arc::new(Entry::new("test-value", Duration::from_secs(5)));
    store.set(Arc::clone(&item));

    let found = store.get(&item.id()).context("entry not found after set")?;
    ensure!(found.value() == Bytes::from_static(b"test-value"), "unexpected value");

    item.set_value("new-value");
    let found = store.get(&item.id()).context("entry not found after update")?;
    ensure!(found.value() == Bytes::from_static(b"new-value"), "update not visible");

    store.delete(&item.id());
    ensure!(store.get(&item.id()).is_none(), "entry still present after delete");

    ensure!(store.get(&EntryId::new()).is_none(), "unknown id was found");

    tracing::info!("   ✓ Basic operations work correctly");
    Ok(())
}

/// Concurrent writers and readers on disjoint entries - verify no data mixing
async fn parallel_set_get(store: &Store) -> Result<()> {
    let num_operations = 500;
    tracing::info!("Scenario: Parallel SET/GET ({} concurrent tasks)", num_operations);

    let ids = Arc::new(SequentialIds::new());
    let errors = Arc::new(AtomicUsize::new(0));
    let start = Instant::now();

    let tasks: Vec<_> = (0..num_operations)
        .map(|i| {
            let store = store.clone();
            let ids = Arc::clone(&ids);
            let errors = Arc::clone(&errors);
            tokio::spawn(async move {
                let expected = format!("value-{}", i);
                let item = Arc::new(Entry::with_generator(
                    &*ids,
                    expected.clone(),
                    Duration::from_secs(300),
                ));
                store.set(Arc::clone(&item));
                tokio::task::yield_now().await;

                match store.get(&item.id()) {
                    Some(found) if found.value() == expected.as_bytes() => {}
                    Some(found) => {
                        tracing::error!(
                            "Value mismatch for {}: expected '{}', got '{:?}'",
                            item.id(),
                            expected,
                            found.value()
                        );
                        errors.fetch_add(1, Ordering::SeqCst);
                    }
                    None => {
                        tracing::error!("Entry not found: {}", item.id());
                        errors.fetch_add(1, Ordering::SeqCst);
                    }
                }
                store.delete(&item.id());
            })
        })
        .collect();

    for result in join_all(tasks).await {
        result.context("task panicked")?;
    }

    let elapsed = start.elapsed();
    let error_count = errors.load(Ordering::SeqCst);
    tracing::info!(
        "   {} set/get/delete rounds in {:?} ({:.0} rounds/sec)",
        num_operations,
        elapsed,
        num_operations as f64 / elapsed.as_secs_f64()
    );

    ensure!(error_count == 0, "{} mismatches detected", error_count);
    tracing::info!("   ✓ All {} values verified correctly", num_operations);
    Ok(())
}

/// Entries vanish from lookups once their TTL passes, sweep or not
async fn expiration(store: &Store) -> Result<()> {
    tracing::info!("Scenario: TTL Expiration");

    let item = Arc::new(Entry::new("x", Duration::from_millis(1)));
    store.set(Arc::clone(&item));

    tokio::time::sleep(Duration::from_millis(200)).await;
    ensure!(store.get(&item.id()).is_none(), "entry should have expired");

    tracing::info!("   ✓ TTL expiration works correctly");
    Ok(())
}

/// The background task physically removes expired entries
async fn sweep_reclamation(store: &Store) -> Result<()> {
    tracing::info!("Scenario: Sweep Reclamation");

    // Start from a clean map so the count below only tracks this scenario
    store.sweep();
    let before = store.len();
    for i in 0..100 {
        store.set(Entry::new(format!("short-{}", i), Duration::from_millis(10)));
    }
    ensure!(store.len() == before + 100, "entries were not inserted");

    tokio::time::sleep(CLEANUP_INTERVAL * 2 + Duration::from_millis(20)).await;
    ensure!(
        store.len() == before,
        "sweep left {} entries behind",
        store.len().saturating_sub(before)
    );

    tracing::info!("   ✓ Expired entries reclaimed within two sweep intervals");
    Ok(())
}
