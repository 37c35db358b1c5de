//! Configuration file loading for querydash
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUERYDASH_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./querydash.toml` or `./.querydash.toml`
//! 4. Global: `$XDG_CONFIG_HOME/querydash/config.toml`
//! 5. Default values
//!
//! CLI flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
