mod types;

pub use types::CallhaulError;
