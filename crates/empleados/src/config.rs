use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// DynamoDB table holding employees and logs (default: "empleados")
    pub table_name: String,
    /// Global secondary index on `cedula` (default: "cedula-index").
    /// Must use the `ALL` projection.
    pub cedula_index: String,
    /// Custom endpoint URL, for local DynamoDB (default: none)
    pub endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Resubmissions of unprocessed batch-delete keys (default: 3)
    pub batch_delete_max_retries: u32,
    /// Initial backoff between resubmissions in milliseconds (default: 50)
    pub batch_delete_backoff_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DYNAMODB_TABLE_NAME` - Table name (default: "empleados")
    /// - `DYNAMODB_CEDULA_INDEX` - Index on `cedula` (default: "cedula-index")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `BATCH_DELETE_MAX_RETRIES` - Batch delete retries (default: 3)
    /// - `BATCH_DELETE_BACKOFF_MS` - Batch delete initial backoff (default: 50)
    pub fn from_env() -> Self {
        Self {
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "empleados".to_string()),
            cedula_index: env::var("DYNAMODB_CEDULA_INDEX")
                .unwrap_or_else(|_| "cedula-index".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            batch_delete_max_retries: env::var("BATCH_DELETE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            batch_delete_backoff_ms: env::var("BATCH_DELETE_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
        }
    }

    /// Get the initial batch-delete backoff as a Duration.
    pub fn batch_delete_backoff(&self) -> Duration {
        Duration::from_millis(self.batch_delete_backoff_ms)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({}), table {}", url, self.table_name),
            None => format!(
                "AWS DynamoDB (region: {}), table {}",
                self.region, self.table_name
            ),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            table_name: "empleados".to_string(),
            cedula_index: "cedula-index".to_string(),
            endpoint_url: None,
            region: "us-east-1".to_string(),
            batch_delete_max_retries: 3,
            batch_delete_backoff_ms: 250,
        }
    }

    #[test]
    fn test_batch_delete_backoff_conversion() {
        assert_eq!(
            sample_config().batch_delete_backoff(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_target_display() {
        let mut config = sample_config();
        assert_eq!(
            config.target_display(),
            "AWS DynamoDB (region: us-east-1), table empleados"
        );

        config.endpoint_url = Some("http://localhost:8000".to_string());
        assert_eq!(
            config.target_display(),
            "Local DynamoDB (http://localhost:8000), table empleados"
        );
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("DYNAMODB_TABLE_NAME");
        env::remove_var("DYNAMODB_CEDULA_INDEX");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("AWS_REGION");
        env::remove_var("BATCH_DELETE_MAX_RETRIES");
        env::remove_var("BATCH_DELETE_BACKOFF_MS");

        let config = Config::from_env();

        assert_eq!(config.table_name, "empleados");
        assert_eq!(config.cedula_index, "cedula-index");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.batch_delete_max_retries, 3);
        assert_eq!(config.batch_delete_backoff_ms, 50);
    }
}
