//! Cloud Dedicated administration operations.
//!
//! [`DedicatedClient`] talks to the management (control-plane) API, which is a
//! different endpoint and credential from the data-plane host in
//! [`ClientConfig`].

use crate::app::ports::{ApiRequest, ApiResponse, HttpClientPort, HttpMethod};
use crate::config::{ClientConfig, DedicatedClientConfig};
use crate::constants::databases_path;
use crate::error::{DedicatedError, Result};
use crate::infra::http_client::ReqwestHttp;
use crate::types::Database;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct DedicatedClient {
    client_config: ClientConfig,
    http: Arc<dyn HttpClientPort>,
    timeout: Option<Duration>,
}

impl DedicatedClient {
    /// Client backed by a fresh `reqwest` transport.
    pub fn new(client_config: ClientConfig) -> Self {
        Self::with_http(client_config, Arc::new(ReqwestHttp::new()))
    }

    pub fn with_http(client_config: ClientConfig, http: Arc<dyn HttpClientPort>) -> Self {
        Self {
            client_config,
            http,
            timeout: None,
        }
    }

    /// Deadline applied to every request this client issues.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Creates the configured database in the cluster named by `config`.
    ///
    /// The descriptor's name is replaced by the client's configured database,
    /// and zero-valued limits are filled with their defaults. All validation
    /// happens before any request is built. Returns the descriptor as sent.
    #[instrument(skip_all, fields(account = %config.account_id, cluster = %config.cluster_id))]
    pub async fn create_database(
        &self,
        config: &DedicatedClientConfig,
        db: Option<Database>,
    ) -> Result<Database> {
        let mut db = db.ok_or(DedicatedError::NilDatabase)?;

        if self.client_config.database.is_empty() {
            return Err(DedicatedError::EmptyDatabaseName);
        }
        db.name = self.client_config.database.clone();

        db.validate()?;
        let db = db.with_defaults();

        // Url::join drops tabs and newlines instead of failing
        check_identifier("account_id", &config.account_id)?;
        check_identifier("cluster_id", &config.cluster_id)?;

        let path = databases_path(&config.account_id, &config.cluster_id);
        match self.post_json(&path, &db, config).await {
            Ok(resp) => {
                info!(database = %db.name, status = resp.status, "Database created");
                Ok(db)
            }
            Err(e) => {
                warn!(database = %db.name, "Database creation failed: {}", e);
                Err(e)
            }
        }
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        config: &DedicatedClientConfig,
    ) -> Result<ApiResponse> {
        let url = config
            .management_api_url
            .join(path)
            .map_err(|source| DedicatedError::UrlParse {
                path: path.to_string(),
                source,
            })?;

        let body = serde_json::to_vec(body)?;

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", config.management_token),
            ),
        ];

        debug!(url = %url, body_bytes = body.len(), "Sending management API request");
        self.http
            .call(ApiRequest {
                method: HttpMethod::Post,
                url,
                headers,
                body: Some(body),
                timeout: self.timeout,
            })
            .await
    }
}

fn check_identifier(field: &'static str, value: &str) -> Result<()> {
    if value.chars().any(|c| c.is_ascii_control()) {
        return Err(DedicatedError::InvalidIdentifier {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
