use crate::adapters::google::GoogleApiClient;
use crate::domain::model::SiteUrl;
use crate::domain::ports::VerificationService;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const SITE_TYPE: &str = "SITE";
const FILE_METHOD: &str = "FILE";

#[derive(Debug, Serialize)]
struct SiteRef<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    identifier: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationRequest<'a> {
    site: SiteRef<'a>,
    verification_method: &'a str,
}

impl<'a> VerificationRequest<'a> {
    fn file(site: &'a SiteUrl) -> Self {
        Self {
            site: SiteRef {
                kind: SITE_TYPE,
                identifier: site.as_str(),
            },
            verification_method: FILE_METHOD,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct WebResource {
    #[serde(default)]
    owners: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SiteVerificationClient {
    api: GoogleApiClient,
}

impl SiteVerificationClient {
    pub fn new(api: GoogleApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl VerificationService for SiteVerificationClient {
    async fn get_token(&self, site: &SiteUrl) -> Result<String> {
        let url = self.api.endpoint(&["siteVerification", "v1", "token"])?;
        let request = self
            .api
            .http()
            .post(url)
            .json(&VerificationRequest::file(site));

        let response: TokenResponse = self.api.send_json(request).await?;
        Ok(response.token)
    }

    async fn verify(&self, site: &SiteUrl) -> Result<Vec<String>> {
        let mut url = self
            .api
            .endpoint(&["siteVerification", "v1", "webResource"])?;
        url.query_pairs_mut()
            .append_pair("verificationMethod", FILE_METHOD);

        let request = self
            .api
            .http()
            .post(url)
            .json(&VerificationRequest::file(site));

        let resource: WebResource = self.api.send_json(request).await?;
        Ok(resource.owners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::VerifyError;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> SiteVerificationClient {
        SiteVerificationClient::new(GoogleApiClient::new(&server.base_url(), "ya29.test").unwrap())
    }

    #[test]
    fn test_request_body_shape() {
        let site = SiteUrl::parse("foo.com").unwrap();
        let body = serde_json::to_value(VerificationRequest::file(&site)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "site": {"type": "SITE", "identifier": "https://foo.com/"},
                "verificationMethod": "FILE"
            })
        );
    }

    #[tokio::test]
    async fn test_get_token() {
        let server = MockServer::start();
        let token_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/siteVerification/v1/token")
                .header("authorization", "Bearer ya29.test")
                .json_body(serde_json::json!({
                    "site": {"type": "SITE", "identifier": "https://foo.com/"},
                    "verificationMethod": "FILE"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"method": "FILE", "token": "google0123abcd.html"}));
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        let token = client(&server).get_token(&site).await.unwrap();

        token_mock.assert();
        assert_eq!(token, "google0123abcd.html");
    }

    #[tokio::test]
    async fn test_verify_returns_owners() {
        let server = MockServer::start();
        let insert_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/siteVerification/v1/webResource")
                .query_param("verificationMethod", "FILE");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": "https%3A%2F%2Ffoo.com%2F",
                    "site": {"type": "SITE", "identifier": "https://foo.com/"},
                    "owners": ["owner@example.com", "other@example.com"]
                }));
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        let owners = client(&server).verify(&site).await.unwrap();

        insert_mock.assert();
        assert_eq!(owners, vec!["owner@example.com", "other@example.com"]);
    }

    #[tokio::test]
    async fn test_verify_without_owners_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/siteVerification/v1/webResource");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "x"}));
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        let owners = client(&server).verify(&site).await.unwrap();

        assert!(owners.is_empty());
    }

    #[tokio::test]
    async fn test_verify_failure_carries_google_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/siteVerification/v1/webResource");
            then.status(400)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "error": {"code": 400, "message": "The necessary verification token could not be found on your site."}
                }));
        });

        let site = SiteUrl::parse("foo.com").unwrap();
        let err = client(&server).verify(&site).await.unwrap_err();

        match err {
            VerifyError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("verification token could not be found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
