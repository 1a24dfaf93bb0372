//! AppConfig backend settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use vortex_kv::{BackendError, Result};

/// Settings for the AppConfig backend.
///
/// Everything that locates the service and selects a namespace is passed in
/// explicitly; nothing is read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfigSettings {
    /// The application (namespace) to query.
    application: String,

    /// The deployment environment.
    #[serde(default)]
    environment: String,

    /// Identifier sent with every request.
    #[serde(default = "default_client_id")]
    client_id: String,

    /// Interval between watch polls.
    #[serde(default = "default_poll_interval", with = "duration_secs")]
    poll_interval: Duration,

    /// Pause after a failed watch poll.
    #[serde(default = "default_cooldown", with = "duration_secs")]
    cooldown: Duration,

    /// Buffer size of each watch channel.
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,
}

fn default_client_id() -> String {
    "crypt-app-config".to_string()
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_cooldown() -> Duration {
    Duration::from_secs(5)
}

fn default_channel_capacity() -> usize {
    1
}

impl AppConfigSettings {
    /// Creates a new builder for AppConfigSettings.
    pub fn builder() -> AppConfigSettingsBuilder {
        AppConfigSettingsBuilder::default()
    }

    /// Creates settings from a machine list, as generic backend factories
    /// pass them.
    ///
    /// The first entry names the application; the rest are ignored.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Initialization` if `machines` is empty.
    pub fn from_machines(machines: &[String], environment: impl Into<String>) -> Result<Self> {
        let application = machines
            .first()
            .ok_or_else(|| BackendError::initialization("application should be defined"))?;

        Self::builder()
            .application(application)
            .environment(environment)
            .build()
    }

    /// Returns the application name.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Returns the environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Returns the client identifier.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the watch poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the cooldown after a failed poll.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Returns the watch channel capacity.
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Checks the settings for values the backend cannot run with.
    ///
    /// Deserialized settings bypass the builder, so the backend validates
    /// again on construction.
    pub fn validate(&self) -> Result<()> {
        if self.application.trim().is_empty() {
            return Err(BackendError::initialization(
                "application should be defined",
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(BackendError::invalid_config(
                "poll_interval must be greater than zero",
            ));
        }
        if self.channel_capacity == 0 {
            return Err(BackendError::invalid_config(
                "channel_capacity must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builder for AppConfigSettings.
#[derive(Debug, Default)]
pub struct AppConfigSettingsBuilder {
    application: Option<String>,
    environment: Option<String>,
    client_id: Option<String>,
    poll_interval: Option<Duration>,
    cooldown: Option<Duration>,
    channel_capacity: Option<usize>,
}

impl AppConfigSettingsBuilder {
    /// Sets the application name.
    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Sets the environment name.
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Sets the client identifier.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Sets the watch poll interval.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets the cooldown after a failed poll.
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    /// Sets the watch channel capacity.
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the application is missing or a value is invalid.
    pub fn build(self) -> Result<AppConfigSettings> {
        let application = self
            .application
            .ok_or_else(|| BackendError::initialization("application should be defined"))?;

        let settings = AppConfigSettings {
            application,
            environment: self.environment.unwrap_or_default(),
            client_id: self.client_id.unwrap_or_else(default_client_id),
            poll_interval: self.poll_interval.unwrap_or_else(default_poll_interval),
            cooldown: self.cooldown.unwrap_or_else(default_cooldown),
            channel_capacity: self
                .channel_capacity
                .unwrap_or_else(default_channel_capacity),
        };
        settings.validate()?;

        Ok(settings)
    }
}

mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
