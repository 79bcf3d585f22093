use crate::domain::model::SiteUrl;
use crate::utils::error::{Result, VerifyError};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^https?://").expect("static regex"))
}

/// Turns one raw line of the domain list into a site URL.
///
/// Returns `None` for blank input. A missing scheme becomes `https://` and
/// trailing slashes collapse into exactly one.
pub fn normalize_site(raw: &str) -> Option<SiteUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut url = if scheme_pattern().is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let kept = url.trim_end_matches('/').len();
    url.truncate(kept);
    url.push('/');

    Some(SiteUrl::from_normalized(url))
}

impl SiteUrl {
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_site(raw)
    }
}

/// Newline-delimited list of domains on disk.
#[derive(Debug, Clone)]
pub struct DomainList {
    path: PathBuf,
}

impl DomainList {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file afresh, so every call starts from the first line.
    pub fn sites(&self) -> Result<Sites> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                VerifyError::missing_file("Domain list", self.path.display().to_string())
            }
            _ => VerifyError::IoError(e),
        })?;
        Ok(Sites {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Reads every entry, failing when the list yields nothing.
    pub fn read_all(&self) -> Result<Vec<SiteUrl>> {
        let sites = self.sites()?.collect::<Result<Vec<_>>>()?;
        if sites.is_empty() {
            return Err(VerifyError::EmptyDomainListError {
                path: self.path.display().to_string(),
            });
        }
        Ok(sites)
    }
}

pub struct Sites {
    lines: Lines<BufReader<File>>,
}

impl Iterator for Sites {
    type Item = Result<SiteUrl>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(site) = normalize_site(&line) {
                        return Some(Ok(site));
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
