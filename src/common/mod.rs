//! Common utilities shared by the client, registry and driver

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
