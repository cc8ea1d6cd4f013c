// src/lib.rs
#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod election;
pub mod error;
pub mod file;
pub mod location;
pub mod logging;
pub mod party;
pub mod progress;
pub mod record;
pub mod scrape;
pub mod source;
pub mod specs;

pub use error::{Error, Result};
