use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// A site URL in `scheme://host[/path]/` form. Build one with
/// [`crate::core::domains::normalize_site`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteUrl(String);

impl SiteUrl {
    pub(crate) fn from_normalized(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves `file_name` against the site, the location where the
    /// verification service looks for the token file.
    pub fn join(&self, file_name: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.0)?.join(file_name)
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Google's authorized-user credential as stored in `token.json`.
///
/// Fields this crate does not use are kept in `extra` so a rewrite after a
/// refresh does not drop them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credential {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, with = "expiry_format")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Refresh this long before the recorded expiry.
pub const REFRESH_THRESHOLD_SECS: i64 = 225;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl Credential {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry - Duration::seconds(REFRESH_THRESHOLD_SECS),
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn missing_scopes<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        if self.scopes.is_empty() {
            return Vec::new();
        }
        required
            .iter()
            .copied()
            .filter(|scope| !self.scopes.iter().any(|s| s == scope))
            .collect()
    }
}

// Older token files carry a naive timestamp without the trailing `Z`.
mod expiry_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(expiry) => serializer.serialize_str(
                &expiry.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            ),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(parsed.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Some(naive.and_utc()))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub file_url: Url,
}

impl IssuedToken {
    pub fn artifact_contents(&self) -> String {
        format!("google-site-verification: {}\n", self.token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable { status: u16, size: usize },
    Unreachable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified { owners: Vec<String> },
    Failed {
        error: String,
        probe: Option<ProbeOutcome>,
    },
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}

#[derive(Debug, Clone)]
pub struct DomainReport {
    pub site: SiteUrl,
    pub property_added: bool,
    pub token: Option<IssuedToken>,
    /// `None` when the domain never reached the verify step.
    pub verification: Option<VerificationOutcome>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<DomainReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn properties_added(&self) -> usize {
        self.reports.iter().filter(|r| r.property_added).count()
    }

    pub fn tokens_issued(&self) -> usize {
        self.reports.iter().filter(|r| r.token.is_some()).count()
    }

    pub fn verified(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.verification.as_ref().is_some_and(|v| v.is_verified()))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.verified()
    }
}
