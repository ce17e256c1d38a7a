pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::HttpFeed;
pub use config::{venues::AppConfig, CliConfig};
pub use core::engine::SearchEngine;
pub use utils::error::{Result, ScoutError};
