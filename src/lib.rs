//! Toolsmith - a personal toolbench served as callable tools
//!
//! This library provides stateless request handlers for package-manager
//! commands, timestamps, hosted chat APIs, host log inspection and SQLite
//! queries, plus the bounded command-invocation core they share.

pub mod config;
pub mod error;
pub mod invoke;
pub mod tools;

pub use error::{Error, Result};
