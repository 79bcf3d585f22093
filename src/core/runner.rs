use crate::adapters::{
    FileCredentialStore, GoogleApiClient, LocalArtifactStorage, ReqwestProbe, SearchConsoleClient,
    SiteVerificationClient,
};
use crate::config::RunConfig;
use crate::core::preflight::run_preflight;
use crate::core::verifier::BatchVerifier;
use crate::domain::model::RunSummary;
use crate::domain::ports::CredentialStore;
use crate::utils::error::{Result, VerifyError};

/// Runs pre-flight, loads credentials and processes every site.
///
/// Returns an error only for the fatal cases; per-site failures end up in
/// the summary.
pub async fn execute(config: &RunConfig) -> Result<RunSummary> {
    let sites = run_preflight(config)?;

    if config.dry_run {
        println!("[i] Dry run, {} sites:", sites.len());
        for site in &sites {
            println!("    {}", site);
        }
        return Ok(RunSummary::default());
    }

    let credential = FileCredentialStore::new(&config.token_store).load().await?;
    let access_token = credential
        .access_token()
        .ok_or_else(|| VerifyError::credential("token file holds no access token"))?;

    let api = GoogleApiClient::new(&config.api_base_url, access_token)?;
    let verifier = BatchVerifier::new(
        SearchConsoleClient::new(api.clone()),
        SiteVerificationClient::new(api),
        ReqwestProbe::new(),
        LocalArtifactStorage::new(&config.tokens_dir),
        config.probe_timeout,
    );

    Ok(verifier.run(&sites).await)
}
