/// Network adapters for external API calls
mod advisory_client;
mod caching_registry;
mod npm_client;
mod registry_cache;

pub use advisory_client::BulkAdvisoryClient;
pub use caching_registry::CachingRegistry;
pub use npm_client::{NpmRegistryClient, DEFAULT_REGISTRY_URL};
pub use registry_cache::{CacheStats, RegistryCache, DEFAULT_TTL};
