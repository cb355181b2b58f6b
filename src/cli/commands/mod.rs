//! CLI command implementations.

mod config;
mod fetch;
mod rewrite;
mod serve;
mod styles;

pub use config::run_config;
pub use fetch::run_fetch;
pub use rewrite::{run_rewrite, RewriteOptions};
pub use serve::run_serve;
pub use styles::run_styles;
