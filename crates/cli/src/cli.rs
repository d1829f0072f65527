use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{inspect_command, validate_command, value_command};

#[derive(Parser, Debug)]
#[command(name = "metamodel")]
#[command(version, about, long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the metamodel for a domain model file and print its specifications
    #[command(visible_alias = "i")]
    Inspect {
        /// Path to the domain model JSON file
        model: PathBuf,

        /// Only print the specification for this class
        #[arg(short = 'k', long = "class")]
        class: Option<String>,

        /// Print JSON instead of the formatted view
        #[arg(short, long)]
        json: bool,

        /// Configuration file (defaults to the nearest .metamodel.json)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Build the metamodel and report validation failures
    #[command(visible_alias = "v")]
    Validate {
        /// Path to the domain model JSON file
        model: PathBuf,

        /// Configuration file (defaults to the nearest .metamodel.json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with an error when any failure is reported
        #[arg(short, long)]
        strict: bool,
    },
    /// Parse a text entry with the semantics of a value type
    Value {
        /// One of: boolean, integer, long, string
        value_type: String,

        /// The text to parse
        text: String,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Inspect {
                model,
                class,
                json,
                config,
            } => inspect_command(&model, class.as_deref(), json, config.as_deref()),
            Commands::Validate {
                model,
                config,
                strict,
            } => validate_command(&model, config.as_deref(), strict),
            Commands::Value { value_type, text } => value_command(&value_type, &text),
        }
    }
}
