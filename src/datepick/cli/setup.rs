use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "datepick", bin_name = "datepick", version)]
#[command(about = "Calendar picker engine with linked date ranges", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub config_dir: Option<PathBuf>,

    /// Log more (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one month
    #[command(display_order = 1)]
    Show(ShowArgs),

    /// Replay a script of picker operations and print the resulting calendars
    #[command(display_order = 2)]
    Run {
        /// Script file, one operation per line (`-` reads stdin)
        script: PathBuf,

        /// Create a linked range pair (`a` and `b`) instead of a single picker
        #[arg(long)]
        range: bool,

        /// Initial month of picker `a` (YYYY-MM or YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        start: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 3)]
    Config {
        /// Configuration key (start-day, date-format, sibling-offset, default-view)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Month to display (YYYY-MM or YYYY-MM-DD, defaults to today)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Date to mark as selected
    #[arg(long, value_name = "DATE")]
    pub select: Option<String>,

    /// Earliest selectable date
    #[arg(long, value_name = "DATE")]
    pub min: Option<String>,

    /// Latest selectable date
    #[arg(long, value_name = "DATE")]
    pub max: Option<String>,

    /// Disable a date (repeatable)
    #[arg(long = "disable", value_name = "DATE")]
    pub disabled: Vec<String>,

    /// First day of the week, 0 (Sunday) to 6 (Saturday)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub start_day: Option<i32>,

    /// Make Saturdays and Sundays unselectable
    #[arg(long)]
    pub no_weekends: bool,

    /// Open the year/month overlay
    #[arg(long)]
    pub overlay: bool,
}
