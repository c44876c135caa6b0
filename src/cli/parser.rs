use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for emstrack
/// CLI application to track attendance, overtime and office alerts with SQLite
#[derive(Parser)]
#[command(
    name = "emstrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee attendance and overtime tracking with breaks, monthly stats and office alerts (SQLite)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this user id instead of `user_id` from the config
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Use this moment as "now" (YYYY-MM-DD HH:MM[:SS])
    #[arg(global = true, long = "at", hide = true)]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
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

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage employees
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Start a session for the current user
    Checkin {
        #[arg(long, requires = "lon", allow_hyphen_values = true, help = "Current latitude")]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true, help = "Current longitude")]
        lon: Option<f64>,

        #[arg(
            long = "deny-location",
            conflicts_with_all = ["lat", "lon"],
            help = "Simulate a refused location permission"
        )]
        deny_location: bool,

        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// Close the current session (open breaks are closed first)
    Checkout {
        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// Start or end a break in the current session
    Break {
        #[arg(value_enum, default_value_t = BreakAction::Toggle)]
        action: BreakAction,

        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// Show the current session state
    Status {
        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// List sessions of a day, week or month with breaks and stats
    Report {
        #[arg(long, default_value = "daily", help = "daily, weekly or monthly")]
        view: String,

        #[arg(long, help = "Anchor date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, conflicts_with = "next", help = "Move one period back")]
        prev: bool,

        #[arg(long, help = "Move one period forward")]
        next: bool,

        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Monthly statistics for the current user
    Stats {
        #[arg(long, help = "Any date inside the month (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// Admin view: employees, today's session and month stats
    Dashboard {
        #[arg(long, help = "Employee id to inspect; lists employees when omitted")]
        employee: Option<i64>,

        #[arg(long, help = "Use the overtime flow instead of attendance")]
        overtime: bool,
    },

    /// Office alerts board
    Alert {
        #[command(subcommand)]
        action: AlertAction,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register an employee
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "Register as administrator")]
        admin: bool,
    },

    /// List employees
    List,
}

#[derive(Subcommand)]
pub enum AlertAction {
    /// Post a new alert and email every employee
    Add { text: String },

    /// Change the text of an alert
    Edit { id: i64, text: String },

    /// Delete an alert
    Del { id: i64 },

    /// List alerts, featured one first
    List,

    /// Feature an alert (only one at a time)
    Select { id: i64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BreakAction {
    Toggle,
    Start,
    End,
}
