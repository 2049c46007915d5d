//! Review store with an identity map over the `reviews` table.
//!
//! # Responsibility
//! - Persist, load, list and delete reviews.
//! - Hand out one shared instance per stored id for the store's lifetime.
//! - Check employee references through an injected `EmployeeLookup`.
//!
//! # Invariants
//! - A cached handle always carries `Some(id)` equal to its map key.
//! - A review with `Some(id)` maps to exactly one stored row.
//! - Storage decides existence; the map only decides identity.
//! - Handles are `Rc<RefCell<_>>`, so a store never crosses threads.

use super::employee_repo::EmployeeLookup;
use super::{RepoError, RepoResult};
use crate::db::schema::{create_reviews_table, drop_reviews_table, REVIEWS_TABLE};
use crate::model::review::{Review, ReviewId};
use crate::model::{EmployeeId, ValidationError};
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

/// Shared in-memory instance of a stored review.
pub type ReviewHandle = Rc<RefCell<Review>>;

/// Raw column values, before any validation.
struct ReviewRow {
    id: ReviewId,
    year: Option<i64>,
    summary: Option<String>,
    employee_id: Option<EmployeeId>,
}

/// SQLite-backed review store.
///
/// Callers must not hold a `borrow_mut` on a handle while passing it to the
/// store; `RefCell` would panic.
pub struct ReviewStore<'conn, L: EmployeeLookup> {
    conn: &'conn Connection,
    employees: L,
    identity: HashMap<ReviewId, ReviewHandle>,
}

impl<'conn, L: EmployeeLookup> ReviewStore<'conn, L> {
    pub fn new(conn: &'conn Connection, employees: L) -> Self {
        Self {
            conn,
            employees,
            identity: HashMap::new(),
        }
    }

    pub fn create_table(&self) -> RepoResult<()> {
        create_reviews_table(self.conn)?;
        Ok(())
    }

    /// Drops the table and detaches every cached instance.
    ///
    /// Fails with `RepoError::HandleBorrowed` before touching storage when a
    /// caller still holds a borrow of any cached review.
    pub fn drop_table(&mut self) -> RepoResult<()> {
        if let Some((id, _)) = self
            .identity
            .iter()
            .find(|(_, handle)| handle.try_borrow_mut().is_err())
        {
            return Err(RepoError::HandleBorrowed(*id));
        }

        drop_reviews_table(self.conn)?;
        for (_, handle) in self.identity.drain() {
            handle.borrow_mut().set_id(None);
        }
        Ok(())
    }

    /// Validates, inserts and caches a new review.
    ///
    /// Nothing is written when any field is invalid.
    pub fn create(
        &mut self,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        let review = Review::new(year, summary, employee_id)?;
        let handle = Rc::new(RefCell::new(review));
        self.save(&handle)?;
        Ok(handle)
    }

    /// Inserts an unsaved review or updates the stored row.
    ///
    /// Saving unchanged fields twice leaves storage as it was.
    pub fn save(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let (id, year, summary, employee_id) = {
            let review = review.borrow();
            (
                review.id(),
                review.year(),
                review.summary().to_string(),
                review.employee_id(),
            )
        };
        self.ensure_employee(employee_id)?;

        let id = match id {
            Some(id) => {
                self.ensure_identity(id, review)?;
                self.update_row(id, year, &summary, employee_id)?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                    params![year, summary, employee_id],
                )?;
                let id = self.conn.last_insert_rowid();
                review.borrow_mut().set_id(Some(id));
                debug!("event=review_insert module=repo status=ok id={id}");
                id
            }
        };

        self.identity.insert(id, Rc::clone(review));
        Ok(())
    }

    /// Writes current field values to the existing row.
    ///
    /// # Errors
    /// - `RepoError::Unsaved` when the review has no id; storage is untouched.
    /// - `RepoError::IdentityConflict` when another instance owns the id.
    /// - `RepoError::NotFound` when the row is gone.
    pub fn update(&self, handle: &ReviewHandle) -> RepoResult<()> {
        let review = handle.borrow();
        let id = review.id().ok_or(RepoError::Unsaved)?;
        self.ensure_identity(id, handle)?;
        self.ensure_employee(review.employee_id())?;
        self.update_row(id, review.year(), review.summary(), review.employee_id())
    }

    /// Points the review at another employee after checking it exists.
    ///
    /// Only the in-memory value changes; call `save` or `update` to persist.
    pub fn assign_employee(
        &self,
        review: &ReviewHandle,
        employee_id: EmployeeId,
    ) -> RepoResult<()> {
        self.ensure_employee(employee_id)?;
        review.borrow_mut().set_employee_id_unchecked(employee_id);
        Ok(())
    }

    /// Returns the shared instance for `id`, loading it on first access.
    pub fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let row = self
            .conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_review_row,
            )
            .optional()?;

        match row {
            Some(row) => self.materialize(row).map(Some),
            None => {
                if self.identity.remove(&id).is_some() {
                    warn!("event=review_cache_evict module=repo status=stale id={id}");
                }
                Ok(None)
            }
        }
    }

    /// Loads every stored review ordered by id, reusing cached instances.
    pub fn get_all(&mut self) -> RepoResult<Vec<ReviewHandle>> {
        let rows: Vec<ReviewRow> = {
            let mut stmt = self
                .conn
                .prepare(&format!("{REVIEW_SELECT_SQL} ORDER BY id ASC;"))?;
            let mapped = stmt.query_map([], read_review_row)?;
            mapped.collect::<Result<_, _>>()?
        };

        rows.into_iter().map(|row| self.materialize(row)).collect()
    }

    /// Deletes the stored row, evicts the instance and clears its id.
    ///
    /// A row that is already gone is treated as deleted.
    pub fn delete(&mut self, review: &ReviewHandle) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::Unsaved)?;
        self.ensure_identity(id, review)?;

        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        if changed == 0 {
            warn!("event=review_delete module=repo status=missing id={id}");
        } else {
            debug!("event=review_delete module=repo status=ok id={id}");
        }

        self.identity.remove(&id);
        review.borrow_mut().set_id(None);
        Ok(())
    }

    /// Number of instances currently held by the identity map.
    pub fn cached_len(&self) -> usize {
        self.identity.len()
    }

    fn ensure_employee(&self, employee_id: EmployeeId) -> RepoResult<()> {
        if !self.employees.employee_exists(employee_id)? {
            return Err(ValidationError::UnknownEmployee { employee_id }.into());
        }
        Ok(())
    }

    // A copy of a cached review must not act on the cached one's row.
    fn ensure_identity(&self, id: ReviewId, review: &ReviewHandle) -> RepoResult<()> {
        match self.identity.get(&id) {
            Some(cached) if !Rc::ptr_eq(cached, review) => {
                warn!("event=review_identity module=repo status=conflict id={id}");
                Err(RepoError::IdentityConflict(id))
            }
            _ => Ok(()),
        }
    }

    fn update_row(
        &self,
        id: ReviewId,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET
                year = ?1,
                summary = ?2,
                employee_id = ?3
             WHERE id = ?4;",
            params![year, summary, employee_id, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: REVIEWS_TABLE,
                id,
            });
        }

        debug!("event=review_update module=repo status=ok id={id}");
        Ok(())
    }

    fn materialize(&mut self, row: ReviewRow) -> RepoResult<ReviewHandle> {
        if let Some(cached) = self.identity.get(&row.id) {
            return Ok(Rc::clone(cached));
        }

        let id = row.id;
        let review = self.hydrate(row)?;
        let handle = Rc::new(RefCell::new(review));
        self.identity.insert(id, Rc::clone(&handle));
        Ok(handle)
    }

    fn hydrate(&self, row: ReviewRow) -> RepoResult<Review> {
        let id = row.id;
        let year = row.year.ok_or_else(|| missing_column(id, "year"))?;
        let summary = row.summary.ok_or_else(|| missing_column(id, "summary"))?;
        let employee_id = row
            .employee_id
            .ok_or_else(|| missing_column(id, "employee_id"))?;

        let mut review = Review::new(year, summary, employee_id)?;
        self.ensure_employee(employee_id)?;
        review.set_id(Some(id));
        Ok(review)
    }
}

fn read_review_row(row: &Row<'_>) -> rusqlite::Result<ReviewRow> {
    Ok(ReviewRow {
        id: row.get("id")?,
        year: row.get("year")?,
        summary: row.get("summary")?,
        employee_id: row.get("employee_id")?,
    })
}

fn missing_column(id: ReviewId, column: &str) -> RepoError {
    RepoError::InvalidData(format!("null {column} for id {id} in reviews.{column}"))
}
