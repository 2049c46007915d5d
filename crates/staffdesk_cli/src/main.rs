//! `staffdesk` command line entry point.
//!
//! # Responsibility
//! - Resolve configuration from the environment and flags.
//! - Map subcommands onto core store operations and print results.

mod args;

use anyhow::{anyhow, bail, Context, Result};
use args::{Args, Command, EmployeeCommand, ReviewCommand};
use clap::Parser;
use log::info;
use rusqlite::Connection;
use staffdesk_core::db::open_db;
use staffdesk_core::db::schema::{drop_schema, ensure_schema};
use staffdesk_core::{init_logging, ReviewStore, SqliteEmployeeRepository, StaffdeskConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.db_path.display()
    );

    match args.command {
        Command::Init => {
            ensure_schema(&conn)?;
            println!("initialized {}", config.db_path.display());
        }
        Command::Reset => {
            drop_schema(&conn)?;
            ensure_schema(&conn)?;
            println!("reset {}", config.db_path.display());
        }
        Command::Employee(command) => run_employee(&conn, command)?,
        Command::Review(command) => run_review(&conn, command)?,
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<StaffdeskConfig> {
    let mut config = StaffdeskConfig::from_env().map_err(|err| anyhow!(err))?;
    if let Some(db) = &args.db {
        config = config.with_db_path(db);
    }
    if let Some(level) = &args.log_level {
        config = config.with_log_level(level).map_err(|err| anyhow!(err))?;
    }
    if let Some(dir) = &args.log_dir {
        config = config.with_log_dir(dir).map_err(|err| anyhow!(err))?;
    }
    Ok(config)
}

fn run_employee(conn: &Connection, command: EmployeeCommand) -> Result<()> {
    let employees = SqliteEmployeeRepository::new(conn);
    match command {
        EmployeeCommand::Add {
            name,
            job_title,
            department_id,
        } => {
            let employee = employees.create(&name, &job_title, department_id)?;
            println!("created employee {}: {}", employee.id, employee.name);
        }
        EmployeeCommand::List => {
            for employee in employees.list()? {
                println!(
                    "{}\t{}\t{}",
                    employee.id, employee.name, employee.job_title
                );
            }
        }
    }
    Ok(())
}

fn run_review(conn: &Connection, command: ReviewCommand) -> Result<()> {
    let mut store = ReviewStore::new(conn, SqliteEmployeeRepository::new(conn));
    match command {
        ReviewCommand::Add {
            year,
            summary,
            employee_id,
        } => {
            let review = store.create(year, summary, employee_id)?;
            println!("{}", review.borrow());
        }
        ReviewCommand::Show { id } => match store.find_by_id(id)? {
            Some(review) => println!("{}", review.borrow()),
            None => bail!("review {id} not found"),
        },
        ReviewCommand::List => {
            for review in store.get_all()? {
                println!("{}", review.borrow());
            }
        }
        ReviewCommand::Update {
            id,
            year,
            summary,
            employee_id,
        } => {
            let review = store
                .find_by_id(id)?
                .ok_or_else(|| anyhow!("review {id} not found"))?;
            if let Some(year) = year {
                review.borrow_mut().set_year(year)?;
            }
            if let Some(summary) = summary {
                review.borrow_mut().set_summary(summary)?;
            }
            if let Some(employee_id) = employee_id {
                store.assign_employee(&review, employee_id)?;
            }
            store.update(&review)?;
            println!("{}", review.borrow());
        }
        ReviewCommand::Delete { id } => {
            let review = store
                .find_by_id(id)?
                .ok_or_else(|| anyhow!("review {id} not found"))?;
            store.delete(&review)?;
            println!("deleted review {id}");
        }
    }
    Ok(())
}
