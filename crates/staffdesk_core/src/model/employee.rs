//! Employee record, the parent side of every review.

use super::{EmployeeId, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    /// Departments live outside core; kept as an opaque reference.
    pub department_id: Option<i64>,
}

impl Employee {
    /// Checks the rules a new or edited employee must satisfy.
    pub fn validate_fields(name: &str, job_title: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if job_title.trim().is_empty() {
            return Err(ValidationError::EmptyJobTitle);
        }
        Ok(())
    }
}
