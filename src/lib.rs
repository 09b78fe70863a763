//! runlog - run CLI command objects with validated input and journaled outcomes
//!
//! This crate wraps the execution of a command in a small, uniform state
//! machine:
//! - an input-validation pre-step over the command's merged arguments and
//!   options, driven by declared rules, that aborts before the command's
//!   work starts
//! - execution of the command's `process` step, with its error propagated
//!   to the caller unchanged
//! - exactly one structured outcome record per invocation, written to a
//!   configurable dated log file (or any injected [`LogSink`])
//!
//! Configuration is a typed snapshot resolved once per run from documented
//! defaults, an optional `runlog.toml`, and `RUNLOG_*` environment
//! variables.
pub mod command;
pub mod config;
pub mod error;
pub mod logger;
pub mod record;
pub mod runner;
pub mod validate;

// Re-export commonly used types and traits
pub use command::{Command, Context, Inputs};
pub use config::{Config, FileConfig, LoggingConfig};
pub use error::{Error, Result};
pub use logger::{FileLogger, LogSink, MemoryLogger};
pub use record::{LogRecord, Output, RunMeta};
pub use runner::Runner;
pub use validate::{Attributes, Messages, Rules, ValidatedData, Validator};
