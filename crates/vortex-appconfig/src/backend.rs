//! AppConfig backend implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use vortex_kv::{BackendError, KvBackend, KvPair, KvPairs, Result, WatchEvent};

use crate::cache::VersionedCache;
use crate::config::AppConfigSettings;
use crate::fetcher::{ConfigFetcher, FetchRequest, FetchedConfig};
use crate::sync::{WatchHandle, Watcher};

/// State shared between the backend and its watch tasks.
pub(crate) struct BackendInner {
    /// Latest known version and value per key.
    cache: VersionedCache,
    /// The remote service.
    fetcher: Arc<dyn ConfigFetcher>,
    /// The backend settings.
    settings: AppConfigSettings,
}

impl BackendInner {
    pub(crate) fn cache(&self) -> &VersionedCache {
        &self.cache
    }

    pub(crate) fn settings(&self) -> &AppConfigSettings {
        &self.settings
    }

    /// Fetches `key` from the service, mapping failures to a fetch error.
    pub(crate) async fn fetch(
        &self,
        key: &str,
        known_version: Option<String>,
    ) -> Result<FetchedConfig> {
        let request = FetchRequest::new(
            self.settings.application(),
            self.settings.environment(),
            key,
            self.settings.client_id(),
        )
        .with_known_version(known_version);

        debug!("Fetching {} from {}", request, self.fetcher.name());

        self.fetcher
            .fetch(&request)
            .await
            .map_err(|cause| BackendError::fetch(key, cause))
    }
}

/// A read-only configuration backend over an AppConfig-style service.
///
/// Values are cached per key on first read. Watches poll the service with
/// the cached version as change token and keep the cache current.
pub struct AppConfigBackend {
    /// State shared with watch tasks.
    inner: Arc<BackendInner>,
    /// Stops every watch started by this backend.
    shutdown_tx: watch::Sender<bool>,
}

impl AppConfigBackend {
    /// Creates a new backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, e.g. no application is
    /// defined. No partial backend is created.
    pub fn new(settings: AppConfigSettings, fetcher: Arc<dyn ConfigFetcher>) -> Result<Self> {
        settings.validate()?;

        info!(
            "AppConfig backend initialized for application '{}' in environment '{}'",
            settings.application(),
            settings.environment()
        );

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            inner: Arc::new(BackendInner {
                cache: VersionedCache::new(),
                fetcher,
                settings,
            }),
            shutdown_tx,
        })
    }

    /// Creates a backend from a machine list; the first entry names the
    /// application.
    pub fn from_machines(
        machines: &[String],
        environment: impl Into<String>,
        fetcher: Arc<dyn ConfigFetcher>,
    ) -> Result<Self> {
        let settings = AppConfigSettings::from_machines(machines, environment)?;
        Self::new(settings, fetcher)
    }

    /// Returns the cache.
    pub fn cache(&self) -> &VersionedCache {
        &self.inner.cache
    }

    /// Returns the settings.
    pub fn settings(&self) -> &AppConfigSettings {
        &self.inner.settings
    }

    /// Starts a watch on `key` that is stopped through the returned handle.
    pub fn subscribe(&self, key: &str) -> (WatchHandle, mpsc::Receiver<WatchEvent>) {
        let (handle, stop_rx) = WatchHandle::new();
        let events = self.watch(key, stop_rx);
        (handle, events)
    }

    /// Stops every watch started by this backend.
    ///
    /// Watches started afterwards terminate immediately.
    pub fn shutdown(&self) {
        info!("Shutting down AppConfig watches");
        self.shutdown_tx.send_replace(true);
    }

    /// Returns true once `shutdown` has been called.
    pub fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}

#[async_trait]
impl KvBackend for AppConfigBackend {
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        if let Some(value) = self.inner.cache.value(key) {
            debug!("Cache hit for '{}'", key);
            return Ok(value);
        }

        debug!("Cache miss for '{}'", key);

        let fetched = self.inner.fetch(key, None).await.inspect_err(|e| {
            warn!("Failed to get '{}': {}", key, e);
        })?;

        // A watch may have stored a value while this first fetch was in
        // flight; it is never overwritten by a first fetch.
        let (version, content) = fetched.into_parts();
        Ok(self.inner.cache.write_if_absent(key, version, content).value)
    }

    async fn list(&self, key: &str) -> Result<KvPairs> {
        let value = self.get(key).await?;
        Ok(vec![KvPair::new(key, value)])
    }

    /// The service is read-only from this client; writes are accepted and
    /// ignored.
    async fn set(&self, key: &str, _value: &[u8]) -> Result<()> {
        debug!("Ignoring set for '{}' on read-only backend", key);
        Ok(())
    }

    fn watch(&self, key: &str, stop: watch::Receiver<bool>) -> mpsc::Receiver<WatchEvent> {
        Watcher::new(Arc::clone(&self.inner), key).start(stop, self.shutdown_tx.subscribe())
    }

    fn name(&self) -> &str {
        "appconfig"
    }
}

impl Drop for AppConfigBackend {
    fn drop(&mut self) {
        self.shutdown_tx.send_replace(true);
    }
}

impl std::fmt::Debug for AppConfigBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfigBackend")
            .field("application", &self.inner.settings.application())
            .field("environment", &self.inner.settings.environment())
            .field("fetcher", &self.inner.fetcher.name())
            .field("cached_keys", &self.inner.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use crate::fetcher::FetchFailure;

    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl ConfigFetcher for CountingFetcher {
        async fn fetch(
            &self,
            request: &FetchRequest,
        ) -> std::result::Result<FetchedConfig, FetchFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("throttled".into());
            }
            assert!(request.is_first_fetch());
            Ok(FetchedConfig::new(b"a".to_vec()).with_version("1"))
        }
    }

    /// Holds the first fetch open until released.
    struct GatedFetcher {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ConfigFetcher for GatedFetcher {
        async fn fetch(
            &self,
            _request: &FetchRequest,
        ) -> std::result::Result<FetchedConfig, FetchFailure> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(FetchedConfig::new(b"new".to_vec()).with_version("v2"))
        }
    }

    fn settings() -> AppConfigSettings {
        AppConfigSettings::builder()
            .application("billing")
            .environment("prod")
            .build()
            .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings: AppConfigSettings = serde_json::from_str(r#"{"application": ""}"#).unwrap();
        let result = AppConfigBackend::new(settings, CountingFetcher::new(false));

        assert!(matches!(result, Err(BackendError::Initialization(_))));
    }

    #[test]
    fn test_from_machines_requires_application() {
        let result = AppConfigBackend::from_machines(&[], "prod", CountingFetcher::new(false));
        assert!(result.is_err());

        let machines = vec!["billing".to_string()];
        let backend =
            AppConfigBackend::from_machines(&machines, "prod", CountingFetcher::new(false)).unwrap();
        assert_eq!(backend.settings().application(), "billing");
    }

    #[tokio::test]
    async fn test_get_populates_cache() {
        let fetcher = CountingFetcher::new(false);
        let backend = AppConfigBackend::new(settings(), fetcher.clone()).unwrap();

        assert_eq!(backend.get("flags").await.unwrap(), b"a");
        assert_eq!(backend.get("flags").await.unwrap(), b"a");

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.cache().version("flags").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_first_get_keeps_value_stored_while_in_flight() {
        let fetcher = Arc::new(GatedFetcher {
            started: Notify::new(),
            release: Notify::new(),
        });
        let backend = Arc::new(AppConfigBackend::new(settings(), fetcher.clone()).unwrap());

        let pending = {
            let backend = Arc::clone(&backend);
            tokio::spawn(async move { backend.get("flags").await })
        };

        fetcher.started.notified().await;
        backend
            .cache()
            .write("flags", Some("v1".into()), b"old".to_vec());
        fetcher.release.notify_one();

        assert_eq!(pending.await.unwrap().unwrap(), b"old");
        assert_eq!(backend.cache().version("flags").as_deref(), Some("v1"));
        assert_eq!(backend.cache().value("flags").unwrap(), b"old");
    }

    #[tokio::test]
    async fn test_get_failure_leaves_cache_untouched() {
        let fetcher = CountingFetcher::new(true);
        let backend = AppConfigBackend::new(settings(), fetcher).unwrap();

        let err = backend.get("flags").await.unwrap_err();
        assert_eq!(err.key(), Some("flags"));
        assert_eq!(err.to_string(), "getting configuration for flags: throttled");
        assert!(backend.cache().is_empty());
    }

    #[tokio::test]
    async fn test_set_is_noop() {
        let fetcher = CountingFetcher::new(false);
        let backend = AppConfigBackend::new(settings(), fetcher.clone()).unwrap();

        assert!(backend.set("flags", b"ignored").await.is_ok());
        assert!(backend.cache().is_empty());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shutdown_flag() {
        let backend = AppConfigBackend::new(settings(), CountingFetcher::new(false)).unwrap();
        assert!(!backend.is_shut_down());

        backend.shutdown();
        assert!(backend.is_shut_down());
    }

    #[test]
    fn test_debug_output() {
        let backend = AppConfigBackend::new(settings(), CountingFetcher::new(false)).unwrap();
        let debug = format!("{:?}", backend);

        assert!(debug.contains("billing"));
        assert!(debug.contains("appconfig"));
    }
}
