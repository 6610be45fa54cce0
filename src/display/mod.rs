//! Terminal output formatting

pub mod endpoint;

pub use endpoint::format_endpoint_policy;
