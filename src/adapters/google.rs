use crate::utils::error::{Result, VerifyError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

/// Authenticated access to `www.googleapis.com`, shared by the Search Console
/// and Site Verification clients.
#[derive(Debug, Clone)]
pub struct GoogleApiClient {
    client: Client,
    base_url: Url,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

impl GoogleApiClient {
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Result<Self> {
        Self::with_client(Client::new(), base_url, access_token)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(VerifyError::ConfigError {
                message: format!("API base URL cannot carry a path: {}", base_url),
            });
        }
        Ok(Self {
            client,
            base_url,
            access_token: access_token.into(),
        })
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Appends `segments` to the base URL, percent-encoding each one, so a
    /// whole site URL can sit in a single path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VerifyError::ConfigError {
                message: format!("API base URL cannot carry a path: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        tracing::debug!("Google API responded with {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(VerifyError::ApiError {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        })
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                message: Some(message),
                ..
            },
        }) => message,
        Ok(ErrorEnvelope {
            error: ErrorBody {
                status: Some(status),
                ..
            },
        }) => status,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => reason.unwrap_or("unknown error").to_string(),
    }
}
