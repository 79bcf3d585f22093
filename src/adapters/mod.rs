// Adapters layer: concrete implementations of the domain ports.

pub mod credentials;
pub mod google;
pub mod http;
pub mod search_console;
pub mod site_verification;
pub mod storage;

pub use credentials::FileCredentialStore;
pub use google::GoogleApiClient;
pub use http::ReqwestProbe;
pub use search_console::SearchConsoleClient;
pub use site_verification::SiteVerificationClient;
pub use storage::LocalArtifactStorage;
