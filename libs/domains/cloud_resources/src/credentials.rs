//! Service-account authentication for the Yandex Cloud APIs
//!
//! An authorized key (`authorized_key.json`) signs a short-lived PS256 JWT,
//! which is exchanged at the IAM endpoint for a bearer token. The token is
//! cached until shortly before it expires.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{CloudResourceError, CloudResourceResult};

/// Audience every IAM JWT must carry, regardless of the endpoint used
pub const IAM_TOKEN_AUDIENCE: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

const JWT_LIFETIME_SECS: i64 = 3600;

/// Tokens closer than this to expiry are refreshed
const REFRESH_MARGIN_SECS: i64 = 60;

const PEM_MARKER: &str = "-----BEGIN";

/// Authorized key as downloaded from the Yandex Cloud console
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Key id, sent as the JWT `kid`
    pub id: String,
    pub service_account_id: String,
    /// PEM private key, possibly preceded by a warning line
    pub private_key: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("id", &self.id)
            .field("service_account_id", &self.service_account_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct JwtClaims {
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> CloudResourceResult<Self> {
        let key: Self =
            serde_json::from_str(json).map_err(|e| CloudResourceError::InvalidKey(e.to_string()))?;

        if !key.private_key.contains(PEM_MARKER) {
            return Err(CloudResourceError::InvalidKey(
                "private_key does not contain a PEM block".to_string(),
            ));
        }
        Ok(key)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CloudResourceResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CloudResourceError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The PEM block with any leading text removed
    pub fn private_key_pem(&self) -> &str {
        match self.private_key.find(PEM_MARKER) {
            Some(start) => &self.private_key[start..],
            None => &self.private_key,
        }
    }

    pub(crate) fn claims(&self, now: DateTime<Utc>) -> JwtClaims {
        let iat = now.timestamp();
        JwtClaims {
            iss: self.service_account_id.clone(),
            aud: IAM_TOKEN_AUDIENCE.to_string(),
            iat,
            exp: iat + JWT_LIFETIME_SECS,
        }
    }

    /// Sign the JWT exchanged for an IAM token
    pub fn signed_jwt(&self, now: DateTime<Utc>) -> CloudResourceResult<String> {
        let header = Header {
            kid: Some(self.id.clone()),
            ..Header::new(Algorithm::PS256)
        };
        let key = EncodingKey::from_rsa_pem(self.private_key_pem().as_bytes())?;

        Ok(jsonwebtoken::encode(&header, &self.claims(now), &key)?)
    }
}

/// Where bearer tokens come from
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Pre-issued IAM token, used as is
    Static(String),
    /// Authorized key read on first use
    KeyFile(PathBuf),
    ServiceAccount(ServiceAccountKey),
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

#[derive(Debug, Serialize)]
struct IamTokenRequest<'a> {
    jwt: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IamTokenResponse {
    iam_token: String,
    expires_at: DateTime<Utc>,
}

/// Issues and caches IAM bearer tokens
#[derive(Debug)]
pub struct IamTokenProvider {
    credentials: Credentials,
    iam_url: String,
    client: Client,
    cache: RwLock<Option<CachedToken>>,
}

impl IamTokenProvider {
    pub fn new(credentials: Credentials, iam_url: impl Into<String>, client: Client) -> Self {
        Self {
            credentials,
            iam_url: iam_url.into().trim_end_matches('/').to_string(),
            client,
            cache: RwLock::new(None),
        }
    }

    /// Current bearer token, exchanging a new JWT when the cache is stale
    pub async fn token(&self) -> CloudResourceResult<String> {
        if let Credentials::Static(token) = &self.credentials {
            return Ok(token.clone());
        }

        if let Some(cached) = self.cache.read().await.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let key = match &self.credentials {
            Credentials::KeyFile(path) => ServiceAccountKey::from_file(path)?,
            Credentials::ServiceAccount(key) => key.clone(),
            Credentials::Static(token) => return Ok(token.clone()),
        };
        let fresh = self.exchange(&key).await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn exchange(&self, key: &ServiceAccountKey) -> CloudResourceResult<CachedToken> {
        debug!(key_id = %key.id, "Exchanging service account JWT for IAM token");
        let jwt = key.signed_jwt(Utc::now())?;

        let response = self
            .client
            .post(format!("{}/iam/v1/tokens", self.iam_url))
            .json(&IamTokenRequest { jwt: &jwt })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CloudResourceError::api(status, body));
        }

        let body = response.text().await?;
        let parsed: IamTokenResponse =
            serde_json::from_str(&body).map_err(|e| CloudResourceError::Parse(e.to_string()))?;

        info!(expires_at = %parsed.expires_at, "Obtained IAM token");
        Ok(CachedToken {
            token: parsed.iam_token,
            expires_at: parsed.expires_at,
        })
    }
}
