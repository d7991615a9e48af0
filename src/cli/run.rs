use crate::cli::commands::RunArgs;
use crate::client::Five9Client;
use crate::config::{
    self, Credentials, ReportRequest, ReportsFile, RunConfig, TransferTarget,
};
use crate::dates;
use crate::errors::CallhaulError;
use crate::persist;
use crate::run::{OutcomeStatus, RunOrchestrator, RunSummary};
use crate::transfer::SftpUploader;
use crate::utils::formatting::format_duration;
use console::style;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn handle_run(args: RunArgs) -> Result<(), CallhaulError> {
    let credentials = resolve_credentials(&args)?;
    let transfer = resolve_transfer_target(&args)?;
    let reports_file = load_reports(&args).await?;

    let reports: Vec<ReportRequest> = reports_file
        .reports
        .iter()
        .map(|entry| {
            let range = dates::current_range(entry.range);
            ReportRequest {
                name: entry.name.clone(),
                folder: entry.folder.clone(),
                range_start: range.start,
                range_end: range.end,
            }
        })
        .collect();

    let output_dir = persist::create_output_dir(Path::new(&args.output)).await?;

    info!(
        output_dir = %output_dir.display(),
        reports = reports.len(),
        "Starting report run"
    );
    match &transfer {
        Some(target) => info!(host = %target.host, port = target.port, "SFTP upload enabled"),
        None => info!("SFTP upload disabled (no transfer target configured)"),
    }

    let run_config = RunConfig {
        credentials,
        reports,
        output_dir: output_dir.clone(),
        transfer,
        poll_interval: Duration::from_secs(args.poll_interval),
        poll_timeout: Duration::from_secs(args.timeout),
    };

    let orchestrator = RunOrchestrator::new(
        run_config,
        Arc::new(Five9Client::new()),
        Arc::new(SftpUploader),
    );
    let summary = orchestrator.run().await;

    print_summary(&summary, &output_dir);
    Ok(())
}

fn resolve_credentials(args: &RunArgs) -> Result<Credentials, CallhaulError> {
    match &args.credentials {
        Some(raw) => Credentials::parse(raw).ok_or_else(|| {
            CallhaulError::Config("Credentials must be in USER:PASSWORD format".into())
        }),
        None => config::credentials_from_env(),
    }
}

fn resolve_transfer_target(args: &RunArgs) -> Result<Option<TransferTarget>, CallhaulError> {
    let any_flag = args.sftp_host.is_some()
        || args.sftp_username.is_some()
        || args.sftp_password.is_some();
    if !any_flag {
        return config::transfer_target_from_env();
    }

    match (&args.sftp_host, &args.sftp_username, &args.sftp_password) {
        (Some(host), Some(username), Some(password)) => Ok(Some(TransferTarget {
            host: host.clone(),
            port: args.sftp_port,
            username: username.clone(),
            password: password.clone(),
            remote_path: args.sftp_path.clone(),
        })),
        _ => Err(CallhaulError::Config(
            "--sftp-host, --sftp-username and --sftp-password must be given together".into(),
        )),
    }
}

async fn load_reports(args: &RunArgs) -> Result<ReportsFile, CallhaulError> {
    match &args.reports {
        Some(path) => config::parse_reports_file(&PathBuf::from(path)).await,
        None => Ok(ReportsFile::builtin()),
    }
}

fn print_summary(summary: &RunSummary, output_dir: &Path) {
    println!();
    println!("{}", style("=== Final Summary ===").bold());
    println!("Total duration: {}", format_duration(summary.total_duration_secs));
    println!("Total reports: {}", summary.total());
    println!("Successful: {}", style(summary.succeeded).green());
    if summary.failed > 0 {
        println!("Failed: {}", style(summary.failed).red());
    } else {
        println!("Failed: 0");
    }
    println!("Output directory: {}", output_dir.display());
    println!();

    for outcome in &summary.outcomes {
        match &outcome.status {
            OutcomeStatus::Success {
                artifact_path,
                duration_secs,
            } => println!(
                "  {} {} ({}) -> {}",
                style("✓").green(),
                outcome.name,
                format_duration(*duration_secs),
                artifact_path.display(),
            ),
            OutcomeStatus::Failed { error } => println!(
                "  {} {}: {}",
                style("✗").red(),
                outcome.name,
                error,
            ),
        }
    }
}
