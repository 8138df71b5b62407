//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the Geepr game catalog.
#[derive(Parser)]
#[command(name = "geepr")]
#[command(about = "Serve the Geepr game catalog API")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub const fn default_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::parse_from(["geepr", "serve", "--verbose"]);
        assert!(cli.verbose);
        assert_eq!(cli.default_log_level(), "debug");
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["geepr"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.default_log_level(), "info");
    }
}
