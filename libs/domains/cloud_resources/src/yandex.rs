//! Yandex Cloud REST inventory client

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_duration_secs, env_or_default};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::credentials::{Credentials, IamTokenProvider};
use crate::error::{CloudResourceError, CloudResourceResult};
use crate::inventory::InventoryClient;
use crate::models::{ResourceKind, ResourceSummary};

pub const DEFAULT_IAM_URL: &str = "https://iam.api.cloud.yandex.net";
pub const DEFAULT_YDB_URL: &str = "https://ydb.api.cloud.yandex.net";
pub const DEFAULT_COMPUTE_URL: &str = "https://compute.api.cloud.yandex.net";

/// Endpoints and limits for [`YandexCloudInventory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YandexCloudConfig {
    pub iam_url: String,
    pub ydb_url: String,
    pub compute_url: String,
    pub sa_key_file: PathBuf,
    pub timeout: Duration,
}

impl Default for YandexCloudConfig {
    fn default() -> Self {
        Self {
            iam_url: DEFAULT_IAM_URL.to_string(),
            ydb_url: DEFAULT_YDB_URL.to_string(),
            compute_url: DEFAULT_COMPUTE_URL.to_string(),
            sa_key_file: PathBuf::from("authorized_key.json"),
            timeout: Duration::from_secs(30),
        }
    }
}

impl YandexCloudConfig {
    /// Point every endpoint at one base URL (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.iam_url = base_url.clone();
        self.ydb_url = base_url.clone();
        self.compute_url = base_url;
        self
    }
}

impl FromEnv for YandexCloudConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            iam_url: env_or_default("YANDEX_IAM_URL", DEFAULT_IAM_URL),
            ydb_url: env_or_default("YANDEX_YDB_URL", DEFAULT_YDB_URL),
            compute_url: env_or_default("YANDEX_COMPUTE_URL", DEFAULT_COMPUTE_URL),
            sa_key_file: env_or_default("YANDEX_SA_KEY_FILE", "authorized_key.json").into(),
            timeout: env_duration_secs("COLLABORATOR_TIMEOUT_SECS", 30)?,
        })
    }
}

/// One page of a list response
trait Page: DeserializeOwned {
    fn into_parts(self) -> (Vec<ResourceSummary>, Option<String>);
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatabasePage {
    #[serde(default)]
    databases: Vec<Database>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Database {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    serverless_database: Option<serde_json::Value>,
    dedicated_database: Option<serde_json::Value>,
}

impl Database {
    fn database_type(&self) -> &'static str {
        if self.serverless_database.is_some() {
            "serverless"
        } else if self.dedicated_database.is_some() {
            "dedicated"
        } else {
            "unknown"
        }
    }
}

impl Page for DatabasePage {
    fn into_parts(self) -> (Vec<ResourceSummary>, Option<String>) {
        let items = self
            .databases
            .into_iter()
            .map(|db| {
                let kind = db.database_type();
                ResourceSummary::new(db.id, db.name, db.status, kind)
            })
            .collect();
        (items, self.next_page_token)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstancePage {
    #[serde(default)]
    instances: Vec<Instance>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instance {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    platform_id: String,
}

impl Page for InstancePage {
    fn into_parts(self) -> (Vec<ResourceSummary>, Option<String>) {
        let items = self
            .instances
            .into_iter()
            .map(|vm| ResourceSummary::new(vm.id, vm.name, vm.status, vm.platform_id))
            .collect();
        (items, self.next_page_token)
    }
}

/// Inventory backed by the Yandex Cloud YDB and Compute REST APIs
#[derive(Debug)]
pub struct YandexCloudInventory {
    client: Client,
    config: YandexCloudConfig,
    tokens: IamTokenProvider,
}

impl YandexCloudInventory {
    /// Build a client authenticating with the configured key file
    pub fn new(config: YandexCloudConfig) -> CloudResourceResult<Self> {
        let credentials = Credentials::KeyFile(config.sa_key_file.clone());
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: YandexCloudConfig,
        credentials: Credentials,
    ) -> CloudResourceResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let tokens = IamTokenProvider::new(credentials, config.iam_url.clone(), client.clone());

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    async fn list_all<P: Page>(
        &self,
        url: String,
        folder_id: &str,
    ) -> CloudResourceResult<Vec<ResourceSummary>> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        loop {
            let token = self.tokens.token().await?;
            let mut request = self
                .client
                .get(&url)
                .bearer_auth(token)
                .query(&[("folderId", folder_id)]);
            if let Some(page_token) = &page_token {
                request = request.query(&[("pageToken", page_token.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(CloudResourceError::api(status, body));
            }

            let body = response.text().await?;
            let page: P =
                serde_json::from_str(&body).map_err(|e| CloudResourceError::Parse(e.to_string()))?;
            let (page_items, next) = page.into_parts();
            items.extend(page_items);

            // A token seen before means the backend is cycling
            match next.filter(|token| !token.is_empty()) {
                Some(next) if seen_tokens.insert(next.clone()) => page_token = Some(next),
                _ => break,
            }
        }

        debug!(url = %url, count = items.len(), "Listed resources");
        Ok(items)
    }
}

#[async_trait]
impl InventoryClient for YandexCloudInventory {
    async fn list(
        &self,
        kind: ResourceKind,
        folder_id: &str,
    ) -> CloudResourceResult<Vec<ResourceSummary>> {
        match kind {
            ResourceKind::Database => {
                let url = format!("{}/ydb/v1/databases", trim(&self.config.ydb_url));
                self.list_all::<DatabasePage>(url, folder_id).await
            }
            ResourceKind::Compute => {
                let url = format!("{}/compute/v1/instances", trim(&self.config.compute_url));
                self.list_all::<InstancePage>(url, folder_id).await
            }
        }
    }
}

fn trim(url: &str) -> &str {
    url.trim_end_matches('/')
}
