use super::types::{Credentials, TransferTarget};
use crate::errors::CallhaulError;
use tracing::debug;

/// Resolve reporting credentials from the environment.
pub fn credentials_from_env() -> Result<Credentials, CallhaulError> {
    let username = std::env::var("FIVE9_USERNAME").ok().filter(|s| !s.is_empty());
    let password = std::env::var("FIVE9_PASSWORD").ok().filter(|s| !s.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => {
            debug!(user = %username, "Resolved reporting credentials from environment");
            Ok(Credentials { username, password })
        }
        _ => Err(CallhaulError::Config(
            "Reporting credentials not found. Pass USER:PASSWORD on the command line \
             or set FIVE9_USERNAME and FIVE9_PASSWORD"
                .into(),
        )),
    }
}

/// Resolve the SFTP transfer target from the environment. Host, username and
/// password must all be set for a target to exist; anything less means the
/// upload step is skipped for the whole run.
pub fn transfer_target_from_env() -> Result<Option<TransferTarget>, CallhaulError> {
    let host = std::env::var("SFTP_HOST").ok().filter(|s| !s.is_empty());
    let username = std::env::var("SFTP_USERNAME").ok().filter(|s| !s.is_empty());
    let password = std::env::var("SFTP_PASSWORD").ok().filter(|s| !s.is_empty());

    let (host, username, password) = match (host, username, password) {
        (Some(h), Some(u), Some(p)) => (h, u, p),
        _ => return Ok(None),
    };

    let port = match std::env::var("SFTP_PORT") {
        Ok(raw) => raw.parse::<u16>().map_err(|_| {
            CallhaulError::Config(format!("Invalid SFTP_PORT value: {}", raw))
        })?,
        Err(_) => 22,
    };
    let remote_path = std::env::var("SFTP_PATH").unwrap_or_else(|_| "/".to_string());

    debug!(host = %host, port, path = %remote_path, "Resolved SFTP target from environment");
    Ok(Some(TransferTarget {
        host,
        port,
        username,
        password,
        remote_path,
    }))
}
