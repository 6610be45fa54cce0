//! Configuration module for api-envelope
//!
//! - XDG-compliant path resolution
//! - Key source and per-endpoint body mode persistence

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{KeySettings, KeySource, Settings};
