//! Provider types and configuration.

/// Enumeration of supported queue providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    AwsSqs,
    InMemory,
}

impl ProviderType {
    /// Get maximum message size for provider
    pub fn max_message_size(&self) -> usize {
        match self {
            Self::AwsSqs => 256 * 1024,   // 256KB
            Self::InMemory => 256 * 1024, // mirrors SQS
        }
    }

    /// Maximum number of entries in one receive, send or delete batch
    pub fn max_batch_size(&self) -> u32 {
        match self {
            Self::AwsSqs => 10,
            Self::InMemory => 10,
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwsSqs => write!(f, "AwsSqs"),
            Self::InMemory => write!(f, "InMemory"),
        }
    }
}

/// AWS SQS configuration
#[derive(Clone)]
pub struct AwsSqsConfig {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Temporary credentials token, sent as `x-amz-security-token`
    pub session_token: Option<String>,
    /// Overrides the regional endpoint (e.g. LocalStack)
    pub endpoint_url: Option<String>,
}

impl AwsSqsConfig {
    /// Configuration for a region with no credentials or endpoint override
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint_url: None,
        }
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://sqs.{}.amazonaws.com", self.region),
        }
    }

    /// Whether both halves of a static key pair are present
    pub fn has_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

impl std::fmt::Debug for AwsSqsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSqsConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// In-memory provider configuration
#[derive(Debug, Clone)]
pub struct InMemoryConfig {
    pub max_message_size: usize,
    pub max_batch_size: u32,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            max_message_size: ProviderType::InMemory.max_message_size(),
            max_batch_size: ProviderType::InMemory.max_batch_size(),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
