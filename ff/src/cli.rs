//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FlowForge - conversational workflow generator client
#[derive(Parser)]
#[command(
    name = "ff",
    about = "Turn a natural-language automation request into an importable workflow",
    version,
    after_help = "Logs are written to: ~/.local/share/flowforge/logs/flowforge.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Subcommand to execute (defaults to the chat TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive chat TUI
    Tui,

    /// Plan and generate a workflow from the terminal
    Plan {
        /// The automation request; omit for an interactive session
        request: Option<String>,

        /// Skip the blueprint review and generate immediately
        #[arg(long)]
        yes: bool,

        /// Write the generated workflow JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the planning service is reachable
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["ff"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_tui() {
        let cli = Cli::parse_from(["ff", "tui"]);
        assert!(matches!(cli.command, Some(Command::Tui)));
    }

    #[test]
    fn test_cli_parse_plan_with_request() {
        let cli = Cli::parse_from(["ff", "plan", "Every hour check RSS"]);
        if let Some(Command::Plan { request, yes, output }) = cli.command {
            assert_eq!(request.as_deref(), Some("Every hour check RSS"));
            assert!(!yes);
            assert!(output.is_none());
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_plan_interactive() {
        let cli = Cli::parse_from(["ff", "plan"]);
        assert!(matches!(cli.command, Some(Command::Plan { request: None, .. })));
    }

    #[test]
    fn test_cli_parse_plan_flags() {
        let cli = Cli::parse_from(["ff", "plan", "task", "--yes", "-o", "out.json"]);
        if let Some(Command::Plan { request, yes, output }) = cli.command {
            assert_eq!(request.as_deref(), Some("task"));
            assert!(yes);
            assert_eq!(output, Some(PathBuf::from("out.json")));
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_health() {
        let cli = Cli::parse_from(["ff", "health"]);
        assert!(matches!(cli.command, Some(Command::Health)));
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["ff", "-c", "/path/to/config.yml", "health"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["ff", "-v", "tui"]);
        assert!(cli.verbose);
    }
}
