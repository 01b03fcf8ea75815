//! Store client configuration.

use aws_sdk_dynamodb::Client;

/// Connection configuration for the store client.
///
/// Read from the environment: `AWS_ENDPOINT_URL` points at a local store
/// (e.g. `http://localhost:8000`), `AWS_REGION` selects the region
/// (defaults to `us-east-1`). Credentials come from the SDK default chain.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

impl StoreConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }

    /// Builds a store client for this configuration.
    pub async fn connect(&self) -> Client {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        Client::new(&config)
    }
}
