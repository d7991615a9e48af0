pub mod envelope;
mod five9;
mod service;

pub use five9::Five9Client;
pub use service::{ReportHandle, ReportService};
