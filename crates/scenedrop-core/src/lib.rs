//! Scenedrop core library
//!
//! Domain types, configuration, and the error taxonomy shared by the
//! storage and API crates.

pub mod code;
pub mod config;
pub mod error;
pub mod models;

pub use config::{AuthMode, Config};
pub use error::{AppError, LogLevel};
