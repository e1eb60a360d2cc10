//! Repository layer for database operations.

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use uuid::Uuid;

use crate::domain::{Credential, EmployeeDetail, EmployeeUpdate};
use crate::error::PortalResult;
use crate::storage::models::{CredentialRow, EmployeeRow};

/// Repository for all portal database operations.
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Clone)]
pub struct PortalRepository {
    pool: SqlitePool,
}

impl PortalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the database schema.
    pub async fn init_schema(&self) -> PortalResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS credentials (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // No UNIQUE on emp_id: uniqueness is checked on create only.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employee_details (
                id TEXT PRIMARY KEY,
                emp_id TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                department TEXT,
                email TEXT,
                mobile_no TEXT,
                dob TEXT,
                date_of_joining TEXT,
                address TEXT,
                salary REAL,
                designation TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_employee_details_emp_id ON employee_details(emp_id);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== Credentials ====================

    /// Insert a credential. Fails if the email is already taken.
    pub async fn create_credential(&self, credential: &Credential) -> PortalResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(credential.id.to_string())
        .bind(&credential.email)
        .bind(&credential.password)
        .bind(credential.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a credential by email.
    pub async fn find_credential_by_email(&self, email: &str) -> PortalResult<Option<Credential>> {
        let row: Option<CredentialRow> =
            sqlx::query_as("SELECT * FROM credentials WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Count credentials registered under an email.
    #[cfg(test)]
    pub async fn count_credentials_by_email(&self, email: &str) -> PortalResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credentials WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ==================== Employee Details ====================

    /// Insert an employee record.
    pub async fn create_employee(&self, employee: &EmployeeDetail) -> PortalResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employee_details (
                id, emp_id, first_name, last_name, department, email, mobile_no,
                dob, date_of_joining, address, salary, designation, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.emp_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.department)
        .bind(&employee.email)
        .bind(&employee.mobile_no)
        .bind(&employee.dob)
        .bind(&employee.date_of_joining)
        .bind(&employee.address)
        .bind(employee.salary)
        .bind(&employee.designation)
        .bind(employee.created_at.to_rfc3339())
        .bind(employee.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the first employee carrying a business identifier.
    pub async fn find_employee_by_emp_id(
        &self,
        emp_id: &str,
    ) -> PortalResult<Option<EmployeeDetail>> {
        let row: Option<EmployeeRow> =
            sqlx::query_as("SELECT * FROM employee_details WHERE emp_id = ? ORDER BY rowid LIMIT 1")
                .bind(emp_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Count employees carrying a business identifier.
    #[cfg(test)]
    pub async fn count_employees_by_emp_id(&self, emp_id: &str) -> PortalResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employee_details WHERE emp_id = ?")
                .bind(emp_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// All employees in insertion order.
    pub async fn list_employees(&self) -> PortalResult<Vec<EmployeeDetail>> {
        let rows: Vec<EmployeeRow> =
            sqlx::query_as("SELECT * FROM employee_details ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Apply the present fields of `update` to a record.
    ///
    /// Optional columns take a presence flag and a value, so a cleared field
    /// is written as NULL. Returns `None` when no record has this identifier; nothing is created.
    pub async fn update_employee(
        &self,
        id: Uuid,
        update: &EmployeeUpdate,
    ) -> PortalResult<Option<EmployeeDetail>> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            UPDATE employee_details SET
                emp_id = COALESCE(?, emp_id),
                first_name = COALESCE(?, first_name),
                last_name = COALESCE(?, last_name),
                department = CASE WHEN ? THEN ? ELSE department END,
                email = CASE WHEN ? THEN ? ELSE email END,
                mobile_no = CASE WHEN ? THEN ? ELSE mobile_no END,
                dob = CASE WHEN ? THEN ? ELSE dob END,
                date_of_joining = CASE WHEN ? THEN ? ELSE date_of_joining END,
                address = CASE WHEN ? THEN ? ELSE address END,
                salary = CASE WHEN ? THEN ? ELSE salary END,
                designation = CASE WHEN ? THEN ? ELSE designation END,
                updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&update.emp_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.department.is_some())
        .bind(update.department.as_ref().and_then(Option::as_deref))
        .bind(update.email.is_some())
        .bind(update.email.as_ref().and_then(Option::as_deref))
        .bind(update.mobile_no.is_some())
        .bind(update.mobile_no.as_ref().and_then(Option::as_deref))
        .bind(update.dob.is_some())
        .bind(update.dob.as_ref().and_then(Option::as_deref))
        .bind(update.date_of_joining.is_some())
        .bind(update.date_of_joining.as_ref().and_then(Option::as_deref))
        .bind(update.address.is_some())
        .bind(update.address.as_ref().and_then(Option::as_deref))
        .bind(update.salary.is_some())
        .bind(update.salary.flatten())
        .bind(update.designation.is_some())
        .bind(update.designation.as_ref().and_then(Option::as_deref))
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    /// Delete a record by identifier. Returns whether a record was removed.
    pub async fn delete_employee(&self, id: Uuid) -> PortalResult<bool> {
        let result = sqlx::query("DELETE FROM employee_details WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewEmployee;
    use crate::storage::connect_in_memory;

    async fn setup_test_db() -> PortalRepository {
        let pool = connect_in_memory()
            .await
            .expect("Failed to create test database");
        let repo = PortalRepository::new(pool);
        repo.init_schema().await.expect("Failed to init schema");
        repo
    }

    fn employee(emp_id: &str, first_name: &str) -> EmployeeDetail {
        EmployeeDetail::new(NewEmployee {
            emp_id: emp_id.to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            department: Some("Engineering".to_string()),
            mobile_no: None,
            dob: None,
            date_of_joining: Some("2024-02-01".to_string()),
            address: None,
            salary: Some(64000.0),
            designation: None,
        })
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let repo = setup_test_db().await;
        tokio_test::assert_ok!(repo.init_schema().await);
    }

    #[tokio::test]
    async fn test_credential_roundtrip_and_unique_email() {
        let repo = setup_test_db().await;

        let credential = Credential::new("ana@example.com".to_string(), "secret1".to_string());
        repo.create_credential(&credential).await.unwrap();

        let found = repo
            .find_credential_by_email("ana@example.com")
            .await
            .unwrap()
            .expect("credential should exist");
        assert_eq!(found.id, credential.id);
        assert_eq!(found.password, "secret1");

        let duplicate = Credential::new("ana@example.com".to_string(), "other12".to_string());
        assert!(repo.create_credential(&duplicate).await.is_err());
        assert_eq!(
            repo.count_credentials_by_email("ana@example.com").await.unwrap(),
            1
        );

        assert!(repo
            .find_credential_by_email("bob@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_employee_create_and_list_in_order() {
        let repo = setup_test_db().await;

        let first = employee("E-1", "Ana");
        let second = employee("E-2", "Bob");
        repo.create_employee(&first).await.unwrap();
        repo.create_employee(&second).await.unwrap();

        let all = repo.list_employees().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
        assert_eq!(all[0].salary, Some(64000.0));

        let found = repo.find_employee_by_emp_id("E-2").await.unwrap().unwrap();
        assert_eq!(found.first_name, "Bob");
        assert!(repo.find_employee_by_emp_id("E-3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let repo = setup_test_db().await;
        let original = employee("E-1", "Ana");
        repo.create_employee(&original).await.unwrap();

        let update = EmployeeUpdate {
            designation: Some(Some("Staff Engineer".to_string())),
            salary: Some(Some(81000.0)),
            ..Default::default()
        };
        let updated = repo
            .update_employee(original.id, &update)
            .await
            .unwrap()
            .expect("record should exist");

        assert_eq!(updated.designation.as_deref(), Some("Staff Engineer"));
        assert_eq!(updated.salary, Some(81000.0));
        assert_eq!(updated.first_name, "Ana");
        assert_eq!(updated.department.as_deref(), Some("Engineering"));
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let repo = setup_test_db().await;
        let original = employee("E-1", "Ana");
        repo.create_employee(&original).await.unwrap();

        let update = EmployeeUpdate {
            first_name: None,
            department: Some(None),
            salary: Some(None),
            ..Default::default()
        };
        let updated = repo
            .update_employee(original.id, &update)
            .await
            .unwrap()
            .expect("record should exist");

        assert!(updated.department.is_none());
        assert!(updated.salary.is_none());
        assert_eq!(updated.first_name, "Ana");
        assert_eq!(updated.date_of_joining.as_deref(), Some("2024-02-01"));
    }

    #[tokio::test]
    async fn test_update_missing_record_creates_nothing() {
        let repo = setup_test_db().await;

        let update = EmployeeUpdate {
            first_name: Some("Ghost".to_string()),
            ..Default::default()
        };
        let result = repo.update_employee(Uuid::new_v4(), &update).await.unwrap();

        assert!(result.is_none());
        assert!(repo.list_employees().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_does_not_recheck_emp_id() {
        let repo = setup_test_db().await;
        repo.create_employee(&employee("E-1", "Ana")).await.unwrap();
        let second = employee("E-2", "Bob");
        repo.create_employee(&second).await.unwrap();

        let update = EmployeeUpdate {
            emp_id: Some("E-1".to_string()),
            ..Default::default()
        };
        repo.update_employee(second.id, &update).await.unwrap();

        assert_eq!(repo.count_employees_by_emp_id("E-1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let repo = setup_test_db().await;
        let record = employee("E-1", "Ana");
        repo.create_employee(&record).await.unwrap();

        assert!(repo.delete_employee(record.id).await.unwrap());
        assert!(!repo.delete_employee(record.id).await.unwrap());
        assert!(repo.list_employees().await.unwrap().is_empty());
    }
}
