pub mod constants;
pub mod config;
pub mod dedicated;
pub mod error;
pub mod logging;
pub mod types;

// Port for the HTTP transport and its reqwest adapter
pub mod app;
pub mod infra;

pub use config::{ClientConfig, Config, DedicatedClientConfig};
pub use dedicated::DedicatedClient;
pub use error::{DedicatedError, Result};
pub use types::{Database, PartitionTemplate, TagBucketValue};
