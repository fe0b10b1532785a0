//! Configuration module for Torrent-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional: `Config::default()` carries the built-in
//! endpoints and search settings.
//!
//! # Example
//!
//! ```no_run
//! use torrent_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Per-source timeout: {:?}", config.search.timeout());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, SearchConfig, SourcesConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
