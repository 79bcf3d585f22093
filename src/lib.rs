pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::RunConfig;
pub use self::core::{domains::normalize_site, runner::execute, verifier::BatchVerifier};
pub use utils::error::{Result, VerifyError};
