use clap::{Parser, Subcommand};

/// Command-line interface definition for rclocktray
/// Attendance tracker for a remote HR attendance service
#[derive(Parser, Debug)]
#[command(
    name = "rclocktray",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clock in and out against your HR attendance service and watch today's worked time tick",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// More logging on stderr (same as RUST_LOG=debug)
    #[arg(global = true, short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for missing settings")]
        check: bool,

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

    /// Show whether you are clocked in and today's worked time
    Status,

    /// List shifts recorded for a day
    Shifts {
        #[arg(
            long,
            short,
            value_name = "DATE",
            help = "Day to list: today, yesterday or YYYY-MM-DD (default: today)"
        )]
        date: Option<String>,
    },

    /// Clock in now
    In,

    /// Clock out now
    Out,

    /// Keep a live status line, clocking in/out from the keyboard
    Watch,
}
