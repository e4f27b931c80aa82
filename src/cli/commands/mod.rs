//! CLI command implementations.

mod config;
mod process;
mod setup;

pub use config::run_config;
pub use process::run_process;
pub use setup::{run_setup, write_env_example};
