use crate::ports::outbound::PackageInfo;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// How long a registry answer stays valid without re-fetching.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

const MAX_ENTRIES: u64 = 10_000;

/// Snapshot of cache effectiveness counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: u64,
}

/// RegistryCache holds registry lookups keyed by package name
///
/// Entries expire after a fixed TTL so long-lived processes eventually
/// see new releases. Capacity is bounded; the least recently used
/// entries are evicted first.
pub struct RegistryCache {
    cache: Cache<String, PackageInfo>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RegistryCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_ENTRIES)
                .build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached info for a package if present and not expired.
    pub async fn get(&self, package_name: &str) -> Option<PackageInfo> {
        match self.cache.get(package_name).await {
            Some(info) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("registry cache hit for {}", package_name);
                Some(info)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub async fn set(&self, package_name: &str, info: PackageInfo) {
        self.cache.insert(package_name.to_string(), info).await;
    }

    /// Drops every cached entry immediately.
    pub async fn flush(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}

impl Default for RegistryCache {
    fn default() -> Self {
        Self::new()
    }
}
