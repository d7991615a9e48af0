use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "callhaul", version, about = "Call-log report runner with optional SFTP relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured reports and relay the results
    Run(RunArgs),
    /// Validate a reports file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Reporting credentials as USER:PASSWORD (or set FIVE9_USERNAME and
    /// FIVE9_PASSWORD)
    pub credentials: Option<String>,

    /// YAML file listing the reports to run
    #[arg(short, long)]
    pub reports: Option<String>,

    /// Root directory for run output
    #[arg(short, long, default_value = "./reports")]
    pub output: String,

    /// SFTP server hostname
    #[arg(long)]
    pub sftp_host: Option<String>,

    /// SFTP server port
    #[arg(long, default_value = "22")]
    pub sftp_port: u16,

    /// SFTP username
    #[arg(long)]
    pub sftp_username: Option<String>,

    /// SFTP password
    #[arg(long)]
    pub sftp_password: Option<String>,

    /// SFTP remote path
    #[arg(long, default_value = "/")]
    pub sftp_path: String,

    /// Seconds between report status checks
    #[arg(long, default_value = "5")]
    pub poll_interval: u64,

    /// Seconds before an in-flight report is abandoned
    #[arg(long, default_value = "300")]
    pub timeout: u64,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Reports file to validate
    pub reports: String,
}
