use super::toml_config::FileConfig;
use super::RunConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "bulk-site-verify")]
#[command(about = "Add domains to Search Console and verify them with the FILE method")]
pub struct CliArgs {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Newline-delimited domain list [default: domain.txt]
    #[arg(long)]
    pub domains: Option<PathBuf>,

    /// OAuth client descriptor, checked for presence [default: client_secret.json]
    #[arg(long)]
    pub client_secret: Option<PathBuf>,

    /// Authorized-user credential file [default: token.json]
    #[arg(long)]
    pub token_store: Option<PathBuf>,

    /// Directory receiving verification files [default: tokens]
    #[arg(long)]
    pub tokens_dir: Option<PathBuf>,

    /// Timeout in seconds for the token file probe [default: 10]
    #[arg(long)]
    pub probe_timeout: Option<u64>,

    /// Google API root [default: https://www.googleapis.com]
    #[arg(long, hide = true)]
    pub api_base_url: Option<String>,

    /// List the normalized domains and exit without calling any API
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Builds the run configuration: flags win over the TOML file, which wins over defaults.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Ok(self.apply(RunConfig::from_file_config(&file)))
    }

    fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(p) = &self.domains {
            config.domains_file = p.clone();
        }
        if let Some(p) = &self.client_secret {
            config.client_secret = p.clone();
        }
        if let Some(p) = &self.token_store {
            config.token_store = p.clone();
        }
        if let Some(p) = &self.tokens_dir {
            config.tokens_dir = p.clone();
        }
        if let Some(secs) = self.probe_timeout {
            config.probe_timeout = Duration::from_secs(secs);
        }
        if let Some(base) = &self.api_base_url {
            config.api_base_url = base.clone();
        }
        config.dry_run = self.dry_run;
        config
    }
}
