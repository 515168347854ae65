//! Command-line argument definitions for the umlsheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Each pipeline step is a subcommand; configuration file
//! selection and logging verbosity are global.

use clap::{Parser, Subcommand};

/// Command-line arguments for the umlsheet tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Pipeline steps
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Flatten a JSON type model into a table workbook
    Tabulate {
        /// Path to the JSON model document
        input: String,

        /// Output workbook (`.xlsx`) or directory for the default workbook name
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Union the tables into an existing workbook instead of replacing it
        #[arg(long)]
        merge: bool,
    },

    /// Append extension attribute records from an XML list to a workbook
    Extend {
        /// Path to the XML configuration list
        input: String,

        /// Workbook to extend (created if missing)
        #[arg(short, long)]
        workbook: String,
    },

    /// Generate one PlantUML class diagram per class of a workbook
    Diagrams {
        /// Path to the table workbook
        workbook: String,

        /// Output directory
        #[arg(short, long, default_value = "diagrams")]
        output: String,

        /// Only write diagram sources, skip image rendering
        #[arg(long)]
        no_render: bool,
    },

    /// Report interfaces that no class realizes
    Report {
        /// Path to the table workbook
        workbook: String,

        /// Output CSV file
        #[arg(short, long, default_value = "unused_interfaces.csv")]
        output: String,
    },
}
