//! Core data access for staffdesk.
//! Owns storage bootstrap, review validation and the review identity map.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StaffdeskConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::Employee;
pub use model::review::{Review, ReviewId, MIN_REVIEW_YEAR};
pub use model::{EmployeeId, ValidationError};
pub use repo::employee_repo::{EmployeeLookup, SqliteEmployeeRepository};
pub use repo::review_repo::{ReviewHandle, ReviewStore};
pub use repo::{RepoError, RepoResult};
