//! Command-line interface

use std::path::PathBuf;

use app_ui::navigation::NavigatorNode;
use clap::{Parser, ValueEnum};

use crate::navigation::{auth_navigation, task_planner_navigation};

/// Task Planner - declarative navigation demo over a task store
#[derive(Debug, Parser)]
#[command(name = "task-planner", version, about = "Render the Task Planner's focused screen")]
pub struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Mount a built-in navigator tree instead of the configured one
    #[arg(short, long, value_enum)]
    pub navigator: Option<BuiltinNavigator>,

    /// Enable debug logging when RUST_LOG is not set
    #[arg(short, long)]
    pub verbose: bool,
}

/// Navigator trees shipped with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinNavigator {
    /// Task list stack
    Tasks,
    /// Login, registration and password recovery
    Auth,
}

impl BuiltinNavigator {
    /// Configuration tree for this navigator
    pub fn tree(self) -> NavigatorNode {
        match self {
            BuiltinNavigator::Tasks => task_planner_navigation(),
            BuiltinNavigator::Auth => auth_navigation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_config_and_navigator() {
        let cli = Cli::try_parse_from(["task-planner", "--config", "planner.json", "-n", "auth"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("planner.json")));
        assert_eq!(cli.navigator, Some(BuiltinNavigator::Auth));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["task-planner"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.navigator.is_none());
    }

    #[test]
    fn test_help_and_version_are_not_config_paths() {
        let err = Cli::try_parse_from(["task-planner", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["task-planner", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_rejects_unknown_navigator() {
        assert!(Cli::try_parse_from(["task-planner", "--navigator", "settings"]).is_err());
    }

    #[test]
    fn test_builtin_trees() {
        assert_eq!(BuiltinNavigator::Tasks.tree().name, "Root");
        assert_eq!(BuiltinNavigator::Auth.tree().name, "Auth");
    }
}
