pub mod cli;
pub mod client;
pub mod config;
pub mod dates;
pub mod errors;
pub mod persist;
pub mod poller;
pub mod run;
pub mod transfer;
pub mod utils;
