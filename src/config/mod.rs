mod env;
mod parser;
mod types;

pub use env::{credentials_from_env, transfer_target_from_env};
pub use parser::{parse_reports_file, ReportEntry, ReportsFile};
pub use types::{Credentials, RangeKind, ReportRequest, RunConfig, TransferTarget};
