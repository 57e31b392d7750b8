//! CLI library for testing purposes

pub mod cli;
pub mod exit_status;
pub mod mapping;
pub mod run;
pub mod settings;
pub mod summary;

pub use cli::Args;
pub use exit_status::ExitStatus;
pub use mapping::parse_mapping;
pub use run::{Failure, run};
pub use settings::{FileSettings, build_config, load_settings};
