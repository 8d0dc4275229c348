//! Grocery store: personal configuration files ("groceries") kept in one
//! curated tree and placed into their destination folders on demand.
//!
//! A registry of collections maps glob patterns inside the store to
//! destination folders, installed as symlinks or copies. Single groceries can
//! also be pasted into any project by name.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load the collection registry and resolve folders
//! - **[`resources`]**: filesystem primitives (symlinks, copies, globbing)
//! - **[`engine`]**: matcher fan-out, collection processing, lookup, paste
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod prompt;
pub mod resources;
