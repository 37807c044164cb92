pub mod project_config;

pub use project_config::*;
