use crate::config::REQUIRED_SCOPES;
use crate::domain::model::Credential;
use crate::domain::ports::CredentialStore;
use crate::utils::error::{Result, VerifyError};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `token.json`, refreshing it in place when the access token has expired.
///
/// The interactive consent flow that produces the file is not handled here.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    error_description: Option<String>,
}

impl FileCredentialStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_client(path, Client::new())
    }

    pub fn with_client<P: AsRef<Path>>(path: P, client: Client) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            client,
        }
    }

    fn read(&self) -> Result<Credential> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                VerifyError::missing_file("Token file", self.path.display().to_string())
            }
            _ => VerifyError::IoError(e),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            VerifyError::credential(format!("{} is not a valid credential: {}", self.path.display(), e))
        })
    }

    fn persist(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_string(credential)?;
        fs::write(&self.path, json)?;
        tracing::debug!("Refreshed credential written to {}", self.path.display());
        Ok(())
    }

    async fn refresh(&self, credential: &mut Credential) -> Result<()> {
        let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
            credential.client_id.as_deref(),
            credential.client_secret.as_deref(),
            credential.refresh_token.as_deref(),
        ) else {
            return Err(VerifyError::credential(
                "token file lacks client_id, client_secret or refresh_token",
            ));
        };

        let response = self
            .client
            .post(&credential.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<OAuthError>(&body) {
                Ok(OAuthError {
                    error,
                    error_description: Some(description),
                }) => format!("{}: {}", error, description),
                Ok(OAuthError { error, .. }) => error,
                Err(_) => body,
            };
            return Err(VerifyError::credential(format!(
                "refresh rejected (HTTP {}): {}",
                status.as_u16(),
                detail
            )));
        }

        let refreshed: RefreshResponse = response.json().await?;
        credential.token = Some(refreshed.access_token);
        credential.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        if let Some(rotated) = refreshed.refresh_token {
            credential.refresh_token = Some(rotated);
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Credential> {
        let mut credential = self.read()?;

        let missing = credential.missing_scopes(&REQUIRED_SCOPES);
        if !missing.is_empty() {
            tracing::warn!("Stored credential lacks scopes: {}", missing.join(", "));
        }

        if credential.is_expired() || credential.access_token().is_none() {
            if !credential.can_refresh() {
                return Err(VerifyError::credential(
                    "access token expired and no refresh token is stored",
                ));
            }
            tracing::info!("Access token expired, refreshing");
            println!("[i] Token expired, refreshing...");
            self.refresh(&mut credential).await?;
            self.persist(&credential)?;
        }

        Ok(credential)
    }
}
