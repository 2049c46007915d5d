//! Employee lookup contract and SQLite implementation.
//!
//! # Responsibility
//! - Answer "does this employee exist" for review validation.
//! - Provide the small CRUD surface needed to seed and list employees.
//!
//! # Invariants
//! - Existence checks hit storage on every call; nothing is cached here.

use super::{RepoError, RepoResult};
use crate::db::schema::{create_employees_table, drop_employees_table, EMPLOYEES_TABLE};
use crate::model::employee::Employee;
use crate::model::EmployeeId;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    job_title,
    department_id
FROM employees";

/// Existence check the review store depends on.
pub trait EmployeeLookup {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool>;
}

impl<T: EmployeeLookup + ?Sized> EmployeeLookup for &T {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool> {
        (**self).employee_exists(id)
    }
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn create_table(&self) -> RepoResult<()> {
        create_employees_table(self.conn)?;
        Ok(())
    }

    pub fn drop_table(&self) -> RepoResult<()> {
        drop_employees_table(self.conn)?;
        Ok(())
    }

    /// Inserts a new employee and returns the stored row.
    pub fn create(
        &self,
        name: &str,
        job_title: &str,
        department_id: Option<i64>,
    ) -> RepoResult<Employee> {
        Employee::validate_fields(name, job_title)?;

        self.conn.execute(
            "INSERT INTO employees (name, job_title, department_id) VALUES (?1, ?2, ?3);",
            params![name, job_title, department_id],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=employee_create module=repo status=ok id={id}");

        Ok(Employee {
            id,
            name: name.to_string(),
            job_title: job_title.to_string(),
            department_id,
        })
    }

    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    /// Lists all employees ordered by id.
    pub fn list(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let employees = stmt
            .query_map([], parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Removes one employee row.
    ///
    /// Fails with a foreign key error while reviews still reference it.
    pub fn delete(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: EMPLOYEES_TABLE,
                id,
            });
        }
        Ok(())
    }
}

impl EmployeeLookup for SqliteEmployeeRepository<'_> {
    fn employee_exists(&self, id: EmployeeId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        job_title: row.get("job_title")?,
        department_id: row.get("department_id")?,
    })
}
