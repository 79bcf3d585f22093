use crate::domain::model::{
    DomainReport, IssuedToken, ProbeOutcome, RunSummary, SiteUrl, VerificationOutcome,
};
use crate::domain::ports::{ArtifactStorage, HttpProbe, PropertyRegistrar, VerificationService};
use crate::utils::error::Result;
use crate::utils::validation::validate_token_file_name;
use std::time::Duration;
use url::Url;

/// Walks the domain list one site at a time: add property, fetch token,
/// write the token file, verify, and probe the token URL when verification fails.
///
/// Errors never leave a step; they are printed and the run moves on.
pub struct BatchVerifier<R, V, P, S> {
    registrar: R,
    verification: V,
    probe: P,
    storage: S,
    probe_timeout: Duration,
}

impl<R, V, P, S> BatchVerifier<R, V, P, S>
where
    R: PropertyRegistrar,
    V: VerificationService,
    P: HttpProbe,
    S: ArtifactStorage,
{
    pub fn new(registrar: R, verification: V, probe: P, storage: S, probe_timeout: Duration) -> Self {
        Self {
            registrar,
            verification,
            probe,
            storage,
            probe_timeout,
        }
    }

    pub async fn run(&self, sites: &[SiteUrl]) -> RunSummary {
        println!("[i] Total sites: {}", sites.len());
        tracing::info!("Processing {} sites", sites.len());

        let mut summary = RunSummary::default();
        for site in sites {
            summary.reports.push(self.process_site(site).await);
        }

        tracing::info!(
            "Finished: {} verified, {} not verified",
            summary.verified(),
            summary.failed()
        );
        summary
    }

    pub async fn process_site(&self, site: &SiteUrl) -> DomainReport {
        println!("\n=== {} ===", site);

        let property_added = self.register_property(site).await;

        let token = match self.issue_token(site).await {
            Ok(token) => token,
            Err(e) => {
                println!("[!] getToken failed: {}", e);
                tracing::warn!(site = %site, "Token request failed: {}", e);
                return DomainReport {
                    site: site.clone(),
                    property_added,
                    token: None,
                    verification: None,
                };
            }
        };

        let verification = self.attempt_verification(site, Some(&token.file_url)).await;

        DomainReport {
            site: site.clone(),
            property_added,
            token: Some(token),
            verification: Some(verification),
        }
    }

    async fn register_property(&self, site: &SiteUrl) -> bool {
        match self.registrar.add_site(site).await {
            Ok(()) => {
                println!("[+] Property added: {}", site);
                true
            }
            Err(e) => {
                println!("[!] Add failed: {}", e);
                tracing::warn!(site = %site, "Adding property failed: {}", e);
                false
            }
        }
    }

    async fn issue_token(&self, site: &SiteUrl) -> Result<IssuedToken> {
        let token = self.verification.get_token(site).await?;
        validate_token_file_name(&token)?;
        let file_url = site.join(&token)?;

        let issued = IssuedToken { token, file_url };
        let path = self
            .storage
            .write_file(&issued.token, issued.artifact_contents().as_bytes())
            .await?;
        tracing::debug!("Token file written to {}", path);

        println!("[i] File verification: {}", issued.token);
        println!("    Upload file to: {}", issued.file_url);
        Ok(issued)
    }

    async fn attempt_verification(
        &self,
        site: &SiteUrl,
        file_url: Option<&Url>,
    ) -> VerificationOutcome {
        match self.verification.verify(site).await {
            Ok(owners) => {
                println!("[✓] VERIFIED: {} | Owners: {}", site, format_owners(&owners));
                VerificationOutcome::Verified { owners }
            }
            Err(e) => {
                println!("[x] Verify failed: {}", e);
                tracing::warn!(site = %site, "Verification failed: {}", e);

                let probe = match file_url {
                    Some(url) => {
                        let outcome = self.probe.fetch(url.as_str(), self.probe_timeout).await;
                        if let ProbeOutcome::Unreachable { reason } = &outcome {
                            tracing::debug!("Probe of {} failed: {}", url, reason);
                        }
                        println!("    [hint] {}", describe_probe(&outcome));
                        Some(outcome)
                    }
                    None => {
                        println!("    [hint] no token URL known, probe skipped");
                        None
                    }
                };

                VerificationOutcome::Failed {
                    error: e.to_string(),
                    probe,
                }
            }
        }
    }
}

pub fn format_owners(owners: &[String]) -> String {
    if owners.is_empty() {
        "-".to_string()
    } else {
        owners.join(", ")
    }
}

pub fn describe_probe(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Reachable { status, size } => format!("HTTP={}, size={}", status, size),
        ProbeOutcome::Unreachable { .. } => "token file is not reachable".to_string(),
    }
}
