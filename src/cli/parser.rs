use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for punchledger
/// CLI application to run a single store's attendance ledger with SQLite
#[derive(Parser)]
#[command(
    name = "punchledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Store time-and-attendance ledger: punches, correction requests, and reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Shared store passphrase (required when the store gate is enabled)
    #[arg(global = true, long = "store-key")]
    pub store_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage employee records
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Record a punch for an employee
    Punch {
        /// Employee code
        employee: String,

        /// Punch kind: in, out, break-in, break-out
        kind: String,

        #[arg(long = "at", help = "Punch time (YYYY-MM-DD HH:MM), defaults to now")]
        at: Option<String>,

        #[arg(long, help = "Employee password (required when one is set)")]
        password: Option<String>,
    },

    /// Show the current presence status of an employee
    Status {
        /// Employee code
        employee: String,
    },

    /// Show the punch history tree (year/month/week/day)
    History {
        #[arg(
            long = "employee",
            help = "Limit to one employee code and annotate pair durations"
        )]
        employee: Option<String>,
    },

    /// Submit and resolve punch correction requests
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },

    /// Submit and resolve password reset requests
    Passwd {
        #[command(subcommand)]
        action: PasswdAction,
    },

    /// Per-employee worked/break/total hours over a range
    Report {
        #[arg(long, help = "Start date (YYYY-MM-DD), requires --to")]
        from: Option<String>,

        #[arg(long, help = "End date (YYYY-MM-DD), requires --from")]
        to: Option<String>,

        #[arg(long, conflicts_with_all = ["from", "to"], help = "Today only (default)")]
        daily: bool,

        #[arg(
            long,
            conflicts_with_all = ["from", "to", "daily"],
            help = "Last 14 days including today"
        )]
        biweekly: bool,

        #[arg(long = "employee", help = "Limit to the given employee codes")]
        employees: Vec<String>,
    },

    /// Export a report or the raw punch list
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long, help = "End date (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long, help = "Export raw punches instead of the report")]
        punches: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print rows from the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee
    Add {
        /// Employee code (unique)
        code: String,

        /// Display name
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, default_value = "", help = "Initial password (empty = none)")]
        password: String,

        #[arg(long, help = "Grant admin role")]
        admin: bool,
    },

    /// List employees
    List,

    /// Remove an employee together with their punches and requests
    Remove {
        code: String,
    },

    /// Set an employee password (admin action)
    SetPassword {
        code: String,
        password: String,
    },

    /// Change own password (requires the current one)
    ChangePassword {
        code: String,

        #[arg(long = "old")]
        old: String,

        #[arg(long = "new")]
        new: String,
    },
}

#[derive(Subcommand)]
pub enum RequestAction {
    /// Submit a missing-punch claim for admin approval
    Submit {
        /// Employee code
        employee: String,

        #[arg(long, help = "Claimed punch kind: in, out, break-in, break-out")]
        kind: String,

        #[arg(long = "at", help = "Claimed punch time (YYYY-MM-DD HH:MM)")]
        at: String,

        #[arg(long, help = "Reason for the claim (required)")]
        comment: String,

        #[arg(long, help = "Employee password (required when one is set)")]
        password: Option<String>,
    },

    /// List pending requests
    List {
        #[arg(long = "employee", help = "Limit to one employee code")]
        employee: Option<String>,
    },

    /// Approve a request: materializes the claimed punch
    Approve {
        id: i64,
    },

    /// Deny a request: the claim is discarded
    Deny {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum PasswdAction {
    /// Submit a password reset request
    Request {
        /// Employee code
        employee: String,

        #[arg(long, help = "Contact email (defaults to the employee record)")]
        email: Option<String>,

        #[arg(long, default_value = "")]
        reason: String,
    },

    /// List password reset requests, newest first
    List,

    /// Approve: issue a temporary password to the employee
    Approve {
        id: i64,

        #[arg(long = "temp", help = "Temporary password to issue")]
        temp: String,

        #[arg(long = "by", default_value = "admin")]
        by: String,
    },

    /// Reject a request
    Reject {
        id: i64,

        #[arg(long = "by", default_value = "admin")]
        by: String,
    },
}
