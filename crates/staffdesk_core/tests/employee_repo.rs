use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{EmployeeLookup, RepoError, SqliteEmployeeRepository, ValidationError};

#[test]
fn create_assigns_ids_and_find_returns_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let first = repo.create("Ada", "Manager", Some(1)).unwrap();
    let second = repo.create("Bo", "Engineer", None).unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    let loaded = repo.find_by_id(second.id).unwrap().unwrap();
    assert_eq!(loaded, second);
    assert!(repo.find_by_id(99).unwrap().is_none());
}

#[test]
fn employee_exists_reflects_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert!(!repo.employee_exists(1).unwrap());
    let employee = repo.create("Ada", "Manager", None).unwrap();
    assert!(repo.employee_exists(employee.id).unwrap());

    repo.delete(employee.id).unwrap();
    assert!(!repo.employee_exists(employee.id).unwrap());
}

#[test]
fn blank_fields_are_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let err = repo.create("  ", "Manager", None).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyName)));
    let err = repo.create("Ada", "", None).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyJobTitle)));

    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn delete_missing_employee_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let err = repo.delete(5).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "employees", id: 5 }));
}
