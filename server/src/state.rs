//! Application State
//!
//! Arc-wrapped state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use landing_content::{
    AbTestStore, ContentCache, ContentStore, MemoryCache, NoopCache, RedisCache,
};

use crate::config::{CacheConfig, ServerConfig};
use crate::error::ApiError;
use crate::service::{LandingService, ServiceError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    service: LandingService,
    config: ServerConfig,
    started_at: Instant,
}

impl AppState {
    /// Build state around an already constructed cache.
    pub fn new(config: ServerConfig, cache: Arc<dyn ContentCache>) -> Self {
        let service = LandingService::new(
            ContentStore::new(&config.content_path),
            AbTestStore::new(&config.ab_tests_path),
            cache,
        );
        Self {
            inner: Arc::new(InnerState {
                service,
                config,
                started_at: Instant::now(),
            }),
        }
    }

    /// Build state, connecting the cache backend the config asks for.
    pub async fn from_config(config: ServerConfig) -> Self {
        let cache = connect_cache(&config.cache).await;
        Self::new(config, cache)
    }

    pub fn service(&self) -> &LandingService {
        &self.inner.service
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    pub fn uptime_s(&self) -> u64 {
        self.inner.started_at.elapsed().as_secs()
    }

    /// Map a service error, exposing 500 details only in development.
    pub fn api_error(&self, err: ServiceError) -> ApiError {
        ApiError::from_service(err, self.inner.config.environment.is_development())
    }
}

/// Pick the cache backend.
///
/// Redis when a URL is configured and reachable, otherwise the in-process
/// cache. An unreachable Redis at startup is logged, not fatal.
pub async fn connect_cache(config: &CacheConfig) -> Arc<dyn ContentCache> {
    if !config.enabled {
        tracing::info!("landing page cache disabled");
        return Arc::new(NoopCache);
    }

    if let Some(url) = config.redis_url.as_deref() {
        match RedisCache::connect(url, config.ttl()).await {
            Ok(cache) => {
                tracing::info!("using Redis cache at {url}");
                return Arc::new(cache);
            }
            Err(e) => {
                tracing::warn!("Redis unavailable ({e}), falling back to in-process cache");
            }
        }
    }

    Arc::new(MemoryCache::new(config.max_entries, config.ttl()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_cache_is_noop() {
        let config = CacheConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(connect_cache(&config).await.backend(), "disabled");
    }

    #[tokio::test]
    async fn no_redis_url_uses_memory() {
        let cache = connect_cache(&CacheConfig::default()).await;
        assert_eq!(cache.backend(), "memory");
    }

    #[tokio::test]
    async fn bad_redis_url_falls_back_to_memory() {
        let config = CacheConfig {
            redis_url: Some("not a redis url".to_string()),
            ..Default::default()
        };
        assert_eq!(connect_cache(&config).await.backend(), "memory");
    }
}
