//! Zulip documentation example generator
//!
//! This library runs the code samples shown in the Zulip API documentation
//! against a live server and captures the responses, so the documentation
//! can show real example output.

pub mod catalog;
pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod driver;
pub mod registry;

// Re-export commonly used types for tests
pub use client::ZulipApi;
pub use common::{Error, Result};
pub use driver::{ResultRecord, DEFAULT_ORDER};
pub use registry::{ExampleDescriptor, Operation, Outcome, Registry};
