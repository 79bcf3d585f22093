use crate::config::RunConfig;
use crate::core::domains::DomainList;
use crate::domain::model::SiteUrl;
use crate::utils::error::{Result, VerifyError};
use std::path::Path;

fn require_file(what: &str, path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(VerifyError::missing_file(what, path.display().to_string()))
    }
}

/// Local checks that must pass before any remote call: required files,
/// the token directory, and a non-empty domain list.
pub fn run_preflight(config: &RunConfig) -> Result<Vec<SiteUrl>> {
    require_file("Domain list", &config.domains_file)?;
    require_file("Client secret", &config.client_secret)?;
    require_file("Token file", &config.token_store)?;

    std::fs::create_dir_all(&config.tokens_dir)?;

    let sites = DomainList::new(&config.domains_file).read_all()?;
    tracing::debug!(
        "Read {} sites from {}",
        sites.len(),
        config.domains_file.display()
    );
    Ok(sites)
}
