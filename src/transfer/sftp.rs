use super::Uploader;
use crate::config::TransferTarget;
use crate::errors::CallhaulError;
use async_trait::async_trait;
use ssh2::Session;
use std::io::Write;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Uploads artifacts over SFTP with password authentication. Each upload
/// opens its own session and releases it before returning, on every exit
/// path.
pub struct SftpUploader;

#[async_trait]
impl Uploader for SftpUploader {
    async fn upload(&self, local_path: &Path, target: &TransferTarget) -> bool {
        let local = local_path.to_path_buf();
        let target = target.clone();
        let host = target.host.clone();

        // libssh2 is synchronous; keep it off the async runtime threads.
        let result = tokio::task::spawn_blocking(move || put_file(&local, &target)).await;

        match result {
            Ok(Ok(remote_path)) => {
                info!(
                    host = %host,
                    remote = %remote_path.display(),
                    "Uploaded artifact"
                );
                true
            }
            Ok(Err(e)) => {
                warn!(host = %host, error = %e, "SFTP upload failed");
                false
            }
            Err(e) => {
                warn!(host = %host, error = %e, "SFTP upload task failed");
                false
            }
        }
    }
}

fn put_file(local_path: &Path, target: &TransferTarget) -> Result<PathBuf, CallhaulError> {
    let tcp = TcpStream::connect((target.host.as_str(), target.port)).map_err(|e| {
        CallhaulError::Upload(format!(
            "Connect to {}:{} failed: {}",
            target.host, target.port, e
        ))
    })?;

    let mut session = Session::new()
        .map_err(|e| CallhaulError::Upload(format!("Session setup failed: {}", e)))?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|e| CallhaulError::Upload(format!("SSH handshake failed: {}", e)))?;
    session
        .userauth_password(&target.username, &target.password)
        .map_err(|e| CallhaulError::Upload(format!("Authentication failed: {}", e)))?;

    let sftp = session
        .sftp()
        .map_err(|e| CallhaulError::Upload(format!("SFTP subsystem failed: {}", e)))?;

    // A failed stat means "missing" as far as we care; some servers return
    // errors for stat-on-missing-path, so try to create rather than abort.
    let remote_dir = Path::new(&target.remote_path);
    if sftp.stat(remote_dir).is_err() {
        info!(path = %target.remote_path, "Remote directory missing, creating it");
        sftp.mkdir(remote_dir, 0o755).map_err(|e| {
            CallhaulError::Upload(format!(
                "Creating remote directory {} failed: {}",
                target.remote_path, e
            ))
        })?;
    }

    let file_name = local_path
        .file_name()
        .ok_or_else(|| CallhaulError::Upload(format!("No file name in {}", local_path.display())))?;
    let remote_path = remote_dir.join(file_name);

    let data = std::fs::read(local_path)?;
    let mut remote_file = sftp.create(&remote_path).map_err(|e| {
        CallhaulError::Upload(format!(
            "Creating remote file {} failed: {}",
            remote_path.display(),
            e
        ))
    })?;
    remote_file
        .write_all(&data)
        .map_err(|e| CallhaulError::Upload(format!("Writing remote file failed: {}", e)))?;

    Ok(remote_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_returns_false() {
        let target = TransferTarget {
            host: "127.0.0.1".into(),
            // Reserved port, nothing listens here.
            port: 1,
            username: "user".into(),
            password: "pass".into(),
            remote_path: "/upload".into(),
        };
        let uploaded = SftpUploader
            .upload(Path::new("/nonexistent/file.csv"), &target)
            .await;
        assert!(!uploaded);
    }
}
