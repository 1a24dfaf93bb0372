//! Configuration fetcher trait definition.

use async_trait::async_trait;

use super::{FetchRequest, FetchedConfig};

/// Opaque failure reported by a fetcher.
///
/// The backend passes it through verbatim as the source of a
/// [`BackendError::Fetch`](vortex_kv::BackendError::Fetch).
pub type FetchFailure = vortex_kv::BoxError;

/// The capability of fetching one configuration from the remote service.
///
/// Implementations wrap the service client together with its session and
/// credentials. They must be safe to call concurrently and repeatedly with
/// the same request.
///
/// When the request carries a known version that is still current, the
/// service may either answer at once with the same version or hold the call
/// open for a while (long polling). Either way it must eventually return.
///
/// # Example
///
/// ```ignore
/// use vortex_appconfig::{ConfigFetcher, FetchFailure, FetchRequest, FetchedConfig};
///
/// struct HttpFetcher {
///     client: reqwest::Client,
///     base_url: String,
/// }
///
/// #[async_trait]
/// impl ConfigFetcher for HttpFetcher {
///     async fn fetch(&self, request: &FetchRequest) -> Result<FetchedConfig, FetchFailure> {
///         // Call the service here
///     }
/// }
/// ```
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Fetches the current configuration for the request.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedConfig, FetchFailure>;

    /// Returns the name of this fetcher, used for logging.
    fn name(&self) -> &str {
        "appconfig"
    }
}
