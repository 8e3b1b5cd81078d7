//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Safeval CLI - Evaluate values through safe transformation chains
///
/// Wraps a value, runs it through a chain of steps such as `add:5`,
/// `max-chars:20` or `or:N/A`, and prints the encoded result.
#[derive(Parser, Debug)]
#[command(
    name = "safeval",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SAFEVAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wrap a value and run it through a chain of steps
    Eval(EvalArgs),

    /// Show how a value is classified (null, missing, blank, zero, empty)
    Classify(ClassifyArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Value to wrap; JSON literals such as `42`, `true` or `null` are typed
    #[arg(value_name = "VALUE", required_unless_present = "null")]
    pub value: Option<String>,

    /// Steps to apply in order, e.g. `add:5` `percent:1:N/A`
    #[arg(value_name = "STEPS")]
    pub steps: Vec<String>,

    /// Wrap null; every positional argument is then a step
    #[arg(long)]
    pub null: bool,

    /// Keep VALUE as a string instead of parsing it as a JSON literal
    #[arg(long, conflicts_with = "null")]
    pub string: bool,

    /// Run a named chain from the configuration before STEPS
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// How to encode the result (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub encode: Option<EncodeMode>,
}

/// Arguments for the classify command
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Value to classify
    #[arg(value_name = "VALUE", required_unless_present = "null")]
    pub value: Option<String>,

    /// Classify null
    #[arg(long)]
    pub null: bool,

    /// Keep VALUE as a string instead of parsing it as a JSON literal
    #[arg(long, conflicts_with = "null")]
    pub string: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// List the locations searched for configuration files
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (.safeval.yaml if not specified)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Write to the user config directory instead of the current directory
    #[arg(long, conflicts_with = "path")]
    pub user: bool,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Output encoders for an evaluated value
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeMode {
    /// HTML entity encoding
    #[default]
    Html,
    /// URL query encoding
    Url,
    /// JSON literal
    Json,
    /// No encoding
    Raw,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl EvalArgs {
    /// Split the positionals into the raw input and the steps to run
    pub fn input(&self) -> (safeval_core::Scalar, Vec<String>) {
        let steps = self.steps.clone();
        if self.null {
            // clap assigns the first positional to VALUE even with --null
            let steps = self.value.iter().cloned().chain(steps).collect();
            return (safeval_core::Scalar::Null, steps);
        }
        (parse_value(self.value.as_deref(), self.string), steps)
    }
}

impl ClassifyArgs {
    pub fn input(&self) -> safeval_core::Scalar {
        if self.null {
            safeval_core::Scalar::Null
        } else {
            parse_value(self.value.as_deref(), self.string)
        }
    }
}

fn parse_value(value: Option<&str>, as_string: bool) -> safeval_core::Scalar {
    match value {
        None => safeval_core::Scalar::Null,
        Some(text) if as_string => safeval_core::Scalar::from(text),
        Some(text) => safeval_core::Scalar::from_literal(text),
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
