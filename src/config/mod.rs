pub mod loader;
pub mod runner;
pub mod schema;

pub use loader::{load_from_path, load_from_str, ConfigError};
pub use runner::{run_config, JobReport, RunError, RunMode};
pub use schema::{JobDefinition, Metadata, SpliceConfig, ValidationError, ValidationIssue};
