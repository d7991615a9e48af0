mod sftp;

use crate::config::TransferTarget;
use async_trait::async_trait;
use std::path::Path;

pub use sftp::SftpUploader;

/// Transfers a completed artifact to a remote destination. Upload failures
/// are reported as `false` and logged inside the implementation; they must
/// never abort the run.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, local_path: &Path, target: &TransferTarget) -> bool;
}
