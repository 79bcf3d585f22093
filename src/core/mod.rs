pub mod domains;
pub mod preflight;
pub mod runner;
pub mod verifier;

pub use crate::domain::model::{DomainReport, RunSummary, SiteUrl};
pub use crate::domain::ports::{
    ArtifactStorage, CredentialStore, HttpProbe, PropertyRegistrar, VerificationService,
};
pub use crate::utils::error::Result;
