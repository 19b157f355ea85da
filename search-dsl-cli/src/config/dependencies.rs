//! Dependency initialization for the CLI.

use tracing::info;

use crate::config::Settings;
use crate::CliError;
use search_dsl_repository::{OpenSearchClient, SearchClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The OpenSearch client operations run against.
    pub client: OpenSearchClient,
}

impl Dependencies {
    /// Build the OpenSearch client described by `settings`.
    ///
    /// With `check_health`, the cluster must also answer a health check with
    /// a green or yellow status.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(CliError)` - If the client cannot be built or the cluster is unhealthy
    pub async fn new(settings: &Settings, check_health: bool) -> Result<Self, CliError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            timeout = ?settings.request_timeout,
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(settings.client_settings()).map_err(|e| {
            CliError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        if check_health {
            let healthy = client
                .admin()
                .health_check()
                .await
                .map_err(|e| CliError::config(format!("OpenSearch health check failed: {}", e)))?;

            if !healthy {
                return Err(CliError::config("OpenSearch cluster is unhealthy"));
            }

            info!("OpenSearch connection verified");
        }

        Ok(Self { client })
    }
}
