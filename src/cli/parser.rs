use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for Shyft
/// CLI application to log work shifts and estimate pay
#[derive(Parser)]
#[command(
    name = "shyft",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log work shifts, time sessions with a stopwatch and estimate pay",
    long_about = None
)]
pub struct Cli {
    /// Override the data file (notes are kept in a `logs` directory next to it)
    #[arg(global = true, long = "data")]
    pub data: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration, data file and notes directory
    Init,

    /// Manage the configuration file (view, check, migrate or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Rewrite the configuration file with every field")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log a shift manually
    Add {
        /// Date of the shift (defaults to today, YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long = "model", help = "Model ID (stored upper-case)")]
        model: Option<String>,

        #[arg(long = "project", help = "Project ID (stored upper-case)")]
        project: Option<String>,

        #[arg(long = "in", help = "Clock-in time (HH:MM)")]
        time_in: Option<String>,

        #[arg(long = "out", help = "Clock-out time (HH:MM), may be past midnight")]
        time_out: Option<String>,

        #[arg(long = "rate", help = "Hourly rate")]
        rate: Option<String>,
    },

    /// Edit a shift; fields not given keep their current value
    Edit {
        /// Shift id (e.g. 0007 or 7)
        id: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "model")]
        model: Option<String>,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "in")]
        time_in: Option<String>,

        #[arg(long = "out")]
        time_out: Option<String>,

        #[arg(long = "rate")]
        rate: Option<String>,
    },

    /// Delete a shift and its note
    Del {
        /// Shift id (e.g. 0007 or 7)
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List every shift
    List,

    /// Show shift count, hours, gross pay and tax estimate
    Totals,

    /// Run a standalone stopwatch
    Timer,

    /// Time a session live and log it with its tasks when finished
    Auto {
        #[arg(long = "model")]
        model: Option<String>,

        #[arg(long = "project")]
        project: Option<String>,

        #[arg(long = "rate")]
        rate: Option<String>,
    },

    /// List autologger notes or show one of them
    Logs {
        #[arg(long, value_name = "NAME", help = "Print the note with this file name (e.g. 0003.md)")]
        show: Option<String>,
    },

    /// Create a backup copy of the data file
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Write a zip with the data file and all notes")]
        compress: bool,
    },

    /// Export all shifts
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
