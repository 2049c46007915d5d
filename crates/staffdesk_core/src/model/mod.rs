//! Domain model for the staff review records.
//!
//! # Responsibility
//! - Define the record shapes used by core stores.
//! - Own field-level validation rules that need no storage access.
//!
//! # Invariants
//! - A constructed `Review` always satisfies the year and summary rules.
//! - Only stores assign or clear surrogate ids.

pub mod employee;
pub mod review;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned surrogate key of an employee row.
pub type EmployeeId = i64;

/// Field validation failure, raised where the invalid value is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Review year earlier than `review::MIN_REVIEW_YEAR`.
    YearBeforeMinimum { year: i64 },
    /// Review summary is empty.
    EmptySummary,
    /// Review points at an employee id with no `employees` row.
    UnknownEmployee { employee_id: EmployeeId },
    /// Employee name is blank.
    EmptyName,
    /// Employee job title is blank.
    EmptyJobTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearBeforeMinimum { .. } => write!(
                f,
                "Year must be an integer greater than or equal to {}",
                review::MIN_REVIEW_YEAR
            ),
            Self::EmptySummary => write!(f, "Summary must be a non-empty string"),
            Self::UnknownEmployee { .. } => write!(
                f,
                "Employee ID must be a valid id from the employees table"
            ),
            Self::EmptyName => write!(f, "Name must be a non-empty string"),
            Self::EmptyJobTitle => write!(f, "Job title must be a non-empty string"),
        }
    }
}

impl Error for ValidationError {}
