//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Registrant name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Registrant email address
    #[arg(short, long, default_value = "")]
    pub email: String,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the record to delete
    pub id: i64,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One record per line
    Plain,
    /// Aligned columns
    #[default]
    Table,
    /// JSON array
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Alice"));
        assert!(debug_str.contains("email"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        assert!(format!("{cmd:?}").contains("Show"));
    }

    #[test]
    fn test_output_format_value_names() {
        let names: Vec<String> = OutputFormat::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, ["plain", "table", "json"]);
    }
}
