//! Review domain model.
//!
//! # Responsibility
//! - Define the yearly performance review record.
//! - Enforce the year and summary rules at construction and assignment.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR` and `summary` is non-empty for every value.
//! - `id` is `None` until a store inserts the row, and is cleared again when
//!   the store deletes it.
//! - `employee_id` existence is checked by the store, which owns the lookup.

use super::{EmployeeId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned surrogate key of a review row.
pub type ReviewId = i64;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// One yearly review of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReviewFields")]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Builds an unpersisted review after checking year and summary.
    ///
    /// The employee reference is only stored here; `ReviewStore::create`
    /// and `ReviewStore::save` verify it exists.
    pub fn new(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Result<Self, ValidationError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        Ok(Self {
            id: None,
            year,
            summary,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this instance is backed by a stored row.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces the year, leaving the review untouched on failure.
    pub fn set_year(&mut self, year: i64) -> Result<(), ValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Replaces the summary, leaving the review untouched on failure.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    // Callers must have checked employee existence already.
    pub(crate) fn set_employee_id_unchecked(&mut self, employee_id: EmployeeId) {
        self.employee_id = employee_id;
    }

    pub(crate) fn set_id(&mut self, id: Option<ReviewId>) {
        self.id = id;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: {} - {}>", self.year, self.summary),
            None => write!(f, "<Review None: {} - {}>", self.year, self.summary),
        }
    }
}

/// Unchecked wire shape; converting it re-runs field validation.
#[derive(Deserialize)]
struct ReviewFields {
    #[serde(default)]
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl TryFrom<ReviewFields> for Review {
    type Error = ValidationError;

    fn try_from(value: ReviewFields) -> Result<Self, Self::Error> {
        let mut review = Review::new(value.year, value.summary, value.employee_id)?;
        review.id = value.id;
        Ok(review)
    }
}

fn validate_year(year: i64) -> Result<(), ValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ValidationError::YearBeforeMinimum { year });
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ValidationError> {
    if summary.is_empty() {
        return Err(ValidationError::EmptySummary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Review, MIN_REVIEW_YEAR};
    use crate::model::ValidationError;

    #[test]
    fn new_accepts_boundary_year() {
        let review = Review::new(MIN_REVIEW_YEAR, "steady", 1).unwrap();
        assert_eq!(review.year(), 2000);
        assert_eq!(review.id(), None);
    }

    #[test]
    fn failed_setter_keeps_previous_value() {
        let mut review = Review::new(2021, "solid", 3).unwrap();

        assert_eq!(
            review.set_year(1999).unwrap_err(),
            ValidationError::YearBeforeMinimum { year: 1999 }
        );
        assert_eq!(review.set_summary("").unwrap_err(), ValidationError::EmptySummary);

        assert_eq!(review.year(), 2021);
        assert_eq!(review.summary(), "solid");
    }

    #[test]
    fn display_matches_record_form() {
        let mut review = Review::new(2023, "Good performance", 1).unwrap();
        assert_eq!(review.to_string(), "<Review None: 2023 - Good performance>");

        review.set_id(Some(7));
        assert_eq!(review.to_string(), "<Review 7: 2023 - Good performance>");
    }
}
