//! Table definitions owned by core.
//!
//! Every statement here is idempotent so callers may run setup and teardown
//! as often as they like.

use super::DbResult;
use log::debug;
use rusqlite::Connection;

pub const EMPLOYEES_TABLE: &str = "employees";
pub const REVIEWS_TABLE: &str = "reviews";

const CREATE_EMPLOYEES_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    job_title TEXT NOT NULL,
    department_id INTEGER
);";

const CREATE_REVIEWS_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY(employee_id) REFERENCES employees(id)
);";

/// Creates the `employees` table when missing.
pub fn create_employees_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_EMPLOYEES_SQL)?;
    debug!("event=schema_create module=db status=ok table={EMPLOYEES_TABLE}");
    Ok(())
}

/// Drops the `employees` table when present.
///
/// Fails while `reviews` rows still reference employees.
pub fn drop_employees_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
    debug!("event=schema_drop module=db status=ok table={EMPLOYEES_TABLE}");
    Ok(())
}

/// Creates the `reviews` table when missing.
pub fn create_reviews_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_REVIEWS_SQL)?;
    debug!("event=schema_create module=db status=ok table={REVIEWS_TABLE}");
    Ok(())
}

/// Drops the `reviews` table when present.
pub fn drop_reviews_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
    debug!("event=schema_drop module=db status=ok table={REVIEWS_TABLE}");
    Ok(())
}

/// Creates every table core depends on, parents first.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    create_employees_table(conn)?;
    create_reviews_table(conn)?;
    Ok(())
}

/// Drops every table core owns, children first.
pub fn drop_schema(conn: &Connection) -> DbResult<()> {
    drop_reviews_table(conn)?;
    drop_employees_table(conn)?;
    Ok(())
}

/// Returns whether `table_name` exists in the main schema.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
