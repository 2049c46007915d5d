use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Employee review records from the command line.
#[derive(Parser, Debug)]
#[command(name = "staffdesk", version)]
#[command(about = "Manage employees and their yearly reviews")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite database file (overrides STAFFDESK_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level (overrides STAFFDESK_LOG_LEVEL)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files (overrides STAFFDESK_LOG_DIR)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create missing tables
    Init,
    /// Drop and recreate all tables
    Reset,
    /// Employee records
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Review records
    #[command(subcommand)]
    Review(ReviewCommand),
}

#[derive(Subcommand, Debug)]
pub enum EmployeeCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        job_title: String,
        #[arg(long)]
        department_id: Option<i64>,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    Add {
        #[arg(long)]
        year: i64,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        employee_id: i64,
    },
    Show {
        id: i64,
    },
    List,
    /// Change any subset of fields on a stored review
    Update {
        id: i64,
        #[arg(long)]
        year: Option<i64>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        employee_id: Option<i64>,
    },
    Delete {
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, Command, ReviewCommand};
    use clap::Parser;

    #[test]
    fn parses_review_update_with_partial_fields() {
        let args = Args::parse_from([
            "staffdesk",
            "--db",
            "/tmp/x.sqlite3",
            "review",
            "update",
            "3",
            "--summary",
            "Better",
        ]);

        assert_eq!(args.db.unwrap().to_str(), Some("/tmp/x.sqlite3"));
        match args.command {
            Command::Review(ReviewCommand::Update {
                id,
                year,
                summary,
                employee_id,
            }) => {
                assert_eq!(id, 3);
                assert_eq!(year, None);
                assert_eq!(summary.as_deref(), Some("Better"));
                assert_eq!(employee_id, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
