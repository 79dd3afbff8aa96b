// Core types and upstream client for the Voidly censorship monitor

pub mod client;
pub mod config;
pub mod countries;
pub mod error;
pub mod report;
pub mod types;

pub use client::VoidlyClient;
pub use config::VoidlyConfig;
pub use error::{Error, Result};
pub use types::*;
