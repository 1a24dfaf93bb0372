//! Fetch request types.

/// A request for the current configuration of one key.
///
/// Mirrors the coordinates an AppConfig-style service expects: the
/// application and environment select the deployment, the configuration
/// names the key, and the client configuration version carries the last
/// version this client has seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The application (namespace) to query.
    application: String,

    /// The deployment environment.
    environment: String,

    /// The configuration name, i.e. the cache key.
    configuration: String,

    /// Identifier of this client instance.
    client_id: String,

    /// Last version seen by this client. `None` on a first fetch.
    client_configuration_version: Option<String>,
}

impl FetchRequest {
    /// Creates a first-fetch request (no known version).
    ///
    /// # Example
    ///
    /// ```
    /// use vortex_appconfig::FetchRequest;
    ///
    /// let request = FetchRequest::new("billing", "prod", "feature-flags", "client-1");
    /// assert_eq!(request.configuration(), "feature-flags");
    /// assert!(request.client_configuration_version().is_none());
    /// ```
    pub fn new(
        application: impl Into<String>,
        environment: impl Into<String>,
        configuration: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            application: application.into(),
            environment: environment.into(),
            configuration: configuration.into(),
            client_id: client_id.into(),
            client_configuration_version: None,
        }
    }

    /// Returns the request with the given known version set.
    pub fn with_known_version(mut self, version: Option<String>) -> Self {
        self.client_configuration_version = version;
        self
    }

    /// Returns the application name.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Returns the environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the configuration name.
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Returns the client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the last version seen by this client.
    pub fn client_configuration_version(&self) -> Option<&str> {
        self.client_configuration_version.as_deref()
    }

    /// Returns true if this is a first fetch for the key.
    pub fn is_first_fetch(&self) -> bool {
        self.client_configuration_version.is_none()
    }
}

impl std::fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.application, self.environment, self.configuration
        )?;
        if let Some(version) = &self.client_configuration_version {
            write!(f, "@{}", version)?;
        }
        Ok(())
    }
}
