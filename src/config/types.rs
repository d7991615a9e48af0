use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Basic-auth credentials for the reporting endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Parse a `username:password` string as accepted on the command line.
    pub fn parse(raw: &str) -> Option<Self> {
        let (username, password) = raw.split_once(':')?;
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// SFTP destination for completed artifacts. Constructed only when every
/// required field is present; a partial target is never represented.
#[derive(Debug, Clone)]
pub struct TransferTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub remote_path: String,
}

/// Which relative date window a report covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RangeKind {
    Today,
    ThisWeek,
    LastWeek,
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::ThisWeek => write!(f, "this-week"),
            Self::LastWeek => write!(f, "last-week"),
        }
    }
}

/// One report to request from the remote service. Immutable once built.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub name: String,
    pub folder: String,
    pub range_start: String,
    pub range_end: String,
}

/// Everything the orchestrator needs for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub reports: Vec<ReportRequest>,
    pub output_dir: PathBuf,
    pub transfer: Option<TransferTarget>,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::parse("alice:s3cret").unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn test_parse_credentials_password_with_colon() {
        let creds = Credentials::parse("alice:pa:ss").unwrap();
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_parse_credentials_rejects_missing_parts() {
        assert!(Credentials::parse("alice").is_none());
        assert!(Credentials::parse(":nopass").is_none());
        assert!(Credentials::parse("nouser:").is_none());
    }
}
