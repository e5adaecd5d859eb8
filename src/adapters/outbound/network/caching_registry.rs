use super::registry_cache::RegistryCache;
use crate::ports::outbound::{PackageInfo, PackageRegistry};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// CachingRegistry wraps a PackageRegistry and adds TTL-bounded caching.
///
/// This adapter implements the decorator pattern to add caching
/// capability to any PackageRegistry implementation. The cache is
/// thread-safe and suitable for concurrent access.
///
/// # Architecture
/// In hexagonal architecture, caching is an implementation detail of the
/// adapter layer. The domain only cares about package metadata - whether
/// it comes from cache or network is transparent to it.
pub struct CachingRegistry<R: PackageRegistry> {
    inner: R,
    cache: Arc<RegistryCache>,
}

impl<R: PackageRegistry> CachingRegistry<R> {
    /// Creates a caching registry with a fresh default cache
    pub fn new(inner: R) -> Self {
        Self::with_cache(inner, Arc::new(RegistryCache::new()))
    }

    /// Creates a caching registry backed by a shared cache
    pub fn with_cache(inner: R, cache: Arc<RegistryCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &RegistryCache {
        &self.cache
    }
}

#[async_trait]
impl<R: PackageRegistry> PackageRegistry for CachingRegistry<R> {
    async fn fetch_package_info(&self, name: &str) -> Result<PackageInfo> {
        // Check cache first
        if let Some(cached) = self.cache.get(name).await {
            return Ok(cached);
        }

        // Cache miss: fetch from inner registry
        let info = self.inner.fetch_package_info(name).await?;

        // Unknown placeholders are not cached, so a transient failure
        // does not suppress retries for the rest of the TTL.
        if !info.is_unknown() {
            self.cache.set(name, info.clone()).await;
        }

        Ok(info)
    }
}
