//! Fetch response types.

/// Configuration returned by a [`ConfigFetcher`](super::ConfigFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedConfig {
    /// The version token of the returned content.
    version: Option<String>,

    /// The configuration payload.
    content: Vec<u8>,

    /// The media type reported by the service, if any.
    content_type: Option<String>,
}

impl FetchedConfig {
    /// Creates a response carrying `content` with no version.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            version: None,
            content: content.into(),
            content_type: None,
        }
    }

    /// Sets the version token.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the version token.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the payload.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the content type.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Splits the response into its version and payload.
    pub fn into_parts(self) -> (Option<String>, Vec<u8>) {
        (self.version, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let fetched = FetchedConfig::new(b"{}".to_vec())
            .with_version("2")
            .with_content_type("application/json");

        assert_eq!(fetched.version(), Some("2"));
        assert_eq!(fetched.content(), b"{}");
        assert_eq!(fetched.content_type(), Some("application/json"));

        let (version, content) = fetched.into_parts();
        assert_eq!(version.as_deref(), Some("2"));
        assert_eq!(content, b"{}");
    }
}
