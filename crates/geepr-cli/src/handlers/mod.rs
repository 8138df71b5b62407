//! Command handlers.
//!
//! Each handler takes parsed arguments, wires what it needs through the
//! adapter crates and reports failures as [`CliError`](crate::CliError).

pub mod serve;
