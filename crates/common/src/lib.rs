pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use config::{Config, ReportLimits};
pub use error::{Error, Result};
pub use source::ResultSource;
pub use types::*;
