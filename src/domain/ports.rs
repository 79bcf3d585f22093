use crate::domain::model::{Credential, ProbeOutcome, SiteUrl};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Where token artifacts are written, keyed by file name.
pub trait ArtifactStorage: Send + Sync {
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns a usable credential, refreshing and persisting it first when expired.
    async fn load(&self) -> Result<Credential>;
}

#[async_trait]
pub trait PropertyRegistrar: Send + Sync {
    async fn add_site(&self, site: &SiteUrl) -> Result<()>;
}

#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Requests a FILE-method token for `site`.
    async fn get_token(&self, site: &SiteUrl) -> Result<String>;

    /// Asks the service to verify `site` by FILE and returns the owners.
    async fn verify(&self, site: &SiteUrl) -> Result<Vec<String>>;
}

#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> ProbeOutcome;
}
