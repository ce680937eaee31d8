//! ncode
//!
//! Command-line lookup of ncore result codes and the declared type
//! hierarchy. The binary is a thin clap front end over these modules.

pub mod codes;
pub mod config;
pub mod render;
pub mod types;

pub use config::{Config, OutputFormat};
