//! Command-line builder and runner for the IntelliJ HTTP Client CLI (`ijhttp`).
//!
//! ```text
//! Parameters (TOML / CLI) → CommandConfig → CommandLine → HttpClientRunner
//! ```
//!
//! The builder never spawns anything: [`args::build_command_line`] either returns a
//! complete argument list or fails before any process exists.

pub mod args;
pub mod cli;
pub mod config;
pub mod logging;
pub mod runner;
