//! Command Line Interface (CLI) layer for widen.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and directory
//! flows. It wires user-provided options to the library functionality
//! exposed via `widen::api`.
//!
//! If you are embedding widen into another application, prefer using
//! the high-level `widen::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
