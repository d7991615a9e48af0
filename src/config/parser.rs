use super::types::RangeKind;
use crate::errors::CallhaulError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Report list file: which reports to run and over which window.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsFile {
    pub reports: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub folder: String,
    #[serde(default = "default_range")]
    pub range: RangeKind,
}

fn default_range() -> RangeKind {
    RangeKind::LastWeek
}

impl ReportsFile {
    /// The built-in report set used when no file is given: the call log out
    /// of the shared folder, over the trailing week.
    pub fn builtin() -> Self {
        Self {
            reports: vec![ReportEntry {
                name: "Call Log".to_string(),
                folder: "Shared Reports".to_string(),
                range: RangeKind::LastWeek,
            }],
        }
    }
}

pub async fn parse_reports_file(path: &Path) -> Result<ReportsFile, CallhaulError> {
    if !path.exists() {
        return Err(CallhaulError::Config(format!(
            "Reports file not found: {}",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let file: ReportsFile = serde_yaml::from_str(&content)?;
    validate_reports(&file)?;

    debug!(path = %path.display(), reports = file.reports.len(), "Parsed reports file");
    Ok(file)
}

fn validate_reports(file: &ReportsFile) -> Result<(), CallhaulError> {
    if file.reports.is_empty() {
        return Err(CallhaulError::Config(
            "Reports file contains no reports".into(),
        ));
    }
    for (i, entry) in file.reports.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(CallhaulError::Config(format!(
                "Report #{} has an empty name",
                i + 1
            )));
        }
        if entry.folder.trim().is_empty() {
            return Err(CallhaulError::Config(format!(
                "Report '{}' has an empty folder",
                entry.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reports_yaml() {
        let yaml = "reports:\n  - name: Call Log\n    folder: Shared Reports\n    range: last-week\n  - name: Agent Summary\n    folder: Shared Reports\n    range: today\n";
        let file: ReportsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.reports.len(), 2);
        assert_eq!(file.reports[0].name, "Call Log");
        assert_eq!(file.reports[0].range, RangeKind::LastWeek);
        assert_eq!(file.reports[1].range, RangeKind::Today);
    }

    #[test]
    fn test_range_defaults_to_last_week() {
        let yaml = "reports:\n  - name: Call Log\n    folder: Shared Reports\n";
        let file: ReportsFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.reports[0].range, RangeKind::LastWeek);
    }

    #[test]
    fn test_validate_rejects_empty_list() {
        let file = ReportsFile { reports: vec![] };
        assert!(validate_reports(&file).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let file = ReportsFile {
            reports: vec![ReportEntry {
                name: "  ".to_string(),
                folder: "Shared Reports".to_string(),
                range: RangeKind::Today,
            }],
        };
        assert!(validate_reports(&file).is_err());
    }

    #[test]
    fn test_builtin_report_set() {
        let file = ReportsFile::builtin();
        assert!(validate_reports(&file).is_ok());
        assert_eq!(file.reports[0].name, "Call Log");
    }
}
