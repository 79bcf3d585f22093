use crate::adapters::google::GoogleApiClient;
use crate::domain::model::SiteUrl;
use crate::domain::ports::PropertyRegistrar;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;

#[derive(Debug, Clone)]
pub struct SearchConsoleClient {
    api: GoogleApiClient,
}

impl SearchConsoleClient {
    pub fn new(api: GoogleApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PropertyRegistrar for SearchConsoleClient {
    /// `sites.add`; adding a property that already exists succeeds as well.
    async fn add_site(&self, site: &SiteUrl) -> Result<()> {
        let url = self
            .api
            .endpoint(&["webmasters", "v3", "sites", site.as_str()])?;
        tracing::debug!("PUT {}", url);

        let request = self.api.http().put(url).header(CONTENT_LENGTH, "0");
        self.api.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::VerifyError;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> SearchConsoleClient {
        SearchConsoleClient::new(GoogleApiClient::new(&server.base_url(), "ya29.test").unwrap())
    }

    #[tokio::test]
    async fn test_add_site_puts_encoded_site_url() {
        let server = MockServer::start();
        let add_mock = server.mock(|when, then| {
            when.method(PUT)
                .path_contains("/webmasters/v3/sites/")
                .path_contains("foo.com")
                .header("authorization", "Bearer ya29.test");
            then.status(200);
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        client(&server).add_site(&site).await.unwrap();

        add_mock.assert();
    }

    #[tokio::test]
    async fn test_add_site_failure_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path_contains("/webmasters/v3/sites/");
            then.status(403)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "error": {"code": 403, "message": "Request had insufficient authentication scopes."}
                }));
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        let err = client(&server).add_site(&site).await.unwrap_err();

        assert!(matches!(err, VerifyError::ApiError { status: 403, .. }));
    }
}
