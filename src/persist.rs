use crate::errors::CallhaulError;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Derive a filesystem-safe filename stem from a report name: lowercased,
/// special characters mapped to safe equivalents, everything else outside
/// alphanumerics, underscore and hyphen stripped.
pub fn clean_filename(report_name: &str) -> String {
    let mut clean = String::with_capacity(report_name.len());
    for c in report_name.to_lowercase().chars() {
        match c {
            '#' => clean.push_str("num"),
            '/' => clean.push('-'),
            ' ' => clean.push('_'),
            '\u{2013}' | '\u{2014}' => clean.push('-'),
            '&' => clean.push_str("and"),
            '%' => clean.push_str("pct"),
            '(' | ')' => {}
            c if c.is_alphanumeric() || c == '_' || c == '-' => clean.push(c),
            _ => {}
        }
    }
    clean
}

/// Artifact filename for one report: clean stem plus a timestamp suffix so
/// same-named reports never collide, within a run or across runs.
pub fn artifact_filename(report_name: &str) -> String {
    format!(
        "{}_{}.csv",
        clean_filename(report_name),
        Local::now().format(TIMESTAMP_FORMAT),
    )
}

/// Create the per-run output directory under `root`.
pub async fn create_output_dir(root: &Path) -> Result<PathBuf, CallhaulError> {
    let dir = root.join(format!(
        "call_reports_{}",
        Local::now().format(TIMESTAMP_FORMAT),
    ));
    tokio::fs::create_dir_all(&dir).await?;
    Ok(dir)
}

/// Write the fetched payload verbatim to a uniquely named file in
/// `output_dir` and return its path.
pub async fn save_artifact(
    payload: &str,
    output_dir: &Path,
    report_name: &str,
) -> Result<PathBuf, CallhaulError> {
    let path = output_dir.join(artifact_filename(report_name));
    tokio::fs::write(&path, payload).await?;
    info!(path = %path.display(), bytes = payload.len(), "Saved report artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_filename_maps_special_characters() {
        assert_eq!(clean_filename("Call Log"), "call_log");
        assert_eq!(clean_filename("Calls #1 (Daily)"), "calls_num1_daily");
        assert_eq!(clean_filename("In/Out & 50%"), "in-out_and_50pct");
        assert_eq!(clean_filename("Q1 \u{2013} Summary"), "q1_-_summary");
    }

    #[test]
    fn test_clean_filename_strips_everything_else() {
        assert_eq!(clean_filename("a!b@c$d"), "abcd");
    }

    #[test]
    fn test_artifact_filename_shape() {
        let name = artifact_filename("Call Log");
        assert!(name.starts_with("call_log_"));
        assert!(name.ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_save_artifact_roundtrip() {
        let dir = TempDir::new().unwrap();
        let payload = "col1,col2\nval1,val2\n";
        let path = save_artifact(payload, dir.path(), "Call Log").await.unwrap();

        let read_back = std::fs::read(&path).unwrap();
        assert_eq!(read_back, payload.as_bytes());
    }

    #[tokio::test]
    async fn test_save_artifact_empty_payload() {
        let dir = TempDir::new().unwrap();
        let path = save_artifact("", dir.path(), "Empty").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_create_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = create_output_dir(dir.path()).await.unwrap();
        assert!(out.is_dir());
        assert!(out
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("call_reports_"));
    }
}
