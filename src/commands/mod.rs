//! CLI command implementations.
//!
//! Each command lives in its own submodule with an `execute_*` entry point
//! and an options struct filled in by the argument parser.

pub mod convert;
pub mod generate;

pub use convert::{execute_convert, ConvertOptions};
pub use generate::{execute_generate, GenerateOptions, RerollPolicy};
