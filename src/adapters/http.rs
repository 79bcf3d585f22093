use crate::domain::model::ProbeOutcome;
use crate::domain::ports::HttpProbe;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Plain unauthenticated GET used to check whether a token file is being served.
#[derive(Debug, Clone, Default)]
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn fetch(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        tracing::debug!("Probing {} (timeout {:?})", url, timeout);

        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                return ProbeOutcome::Unreachable {
                    reason: e.to_string(),
                }
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => ProbeOutcome::Reachable {
                status,
                size: body.chars().count(),
            },
            Err(e) => ProbeOutcome::Unreachable {
                reason: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_reachable_reports_status_and_size() {
        let server = MockServer::start();
        let file_mock = server.mock(|when, then| {
            when.method(GET).path("/abc123");
            then.status(200).body("google-site-verification: abc123\n");
        });

        let outcome = ReqwestProbe::new()
            .fetch(&server.url("/abc123"), Duration::from_secs(5))
            .await;

        file_mock.assert();
        assert_eq!(outcome, ProbeOutcome::Reachable { status: 200, size: 33 });
    }

    #[tokio::test]
    async fn test_not_found_is_still_reachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("nope");
        });

        let outcome = ReqwestProbe::new()
            .fetch(&server.url("/missing"), Duration::from_secs(5))
            .await;

        assert_eq!(outcome, ProbeOutcome::Reachable { status: 404, size: 4 });
    }

    #[tokio::test]
    async fn test_timeout_is_unreachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3));
        });

        let outcome = ReqwestProbe::new()
            .fetch(&server.url("/slow"), Duration::from_millis(200))
            .await;

        assert!(matches!(outcome, ProbeOutcome::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let outcome = ReqwestProbe::new()
            .fetch("http://127.0.0.1:1/abc123", Duration::from_secs(2))
            .await;

        assert!(matches!(outcome, ProbeOutcome::Unreachable { .. }));
    }
}
