//! Argument pipeline for the HTTP Client CLI.
//!
//! ```text
//! CommandConfig → Validate → Resolve requests → Assemble → CommandLine
//! ```
//!
//! Each stage is a plain function over an owned config, so the pieces can be
//! unit-tested on their own.

mod assembler;
mod error;
mod pipeline;
pub mod registry;
mod scan;

pub use assembler::ArgAssembler;
pub use error::CommandError;
pub use pipeline::{build_command_line, validate, CommandLine};
pub use scan::{find_request_files, is_request_file};
