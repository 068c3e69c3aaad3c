//! Command line configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pomotick")]
#[command(about = "A terminal Pomodoro timer with a persistent task list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Use this data directory instead of a local .pomotick or ~/.pomotick
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a local .pomotick directory in the current directory
    Init,
    /// Print the stored task list
    Tasks,
}

impl Cli {
    /// Default log filter based on the verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["pomotick"]);
        assert!(cli.command.is_none());
        assert!(cli.data_dir.is_none());
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let cli = Cli::parse_from(["pomotick", "tasks", "--data-dir", "/tmp/p", "-v"]);
        assert_eq!(cli.command, Some(Commands::Tasks));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/p")));
        assert_eq!(cli.log_level(), "debug");
    }
}
