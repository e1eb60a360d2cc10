//! Database models for the employee portal.
//!
//! These are the row types returned by SQLx queries.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{Credential, EmployeeDetail};
use crate::error::PortalError;

fn parse_id(raw: &str) -> Result<Uuid, PortalError> {
    Uuid::parse_str(raw).map_err(|e| PortalError::Internal(e.to_string()))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, PortalError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PortalError::Internal(e.to_string()))
}

/// Database row for credentials table.
#[derive(Debug, Clone, FromRow)]
pub struct CredentialRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = PortalError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: parse_id(&row.id)?,
            email: row.email,
            password: row.password,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Database row for employee_details table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: String,
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub email: Option<String>,
    pub mobile_no: Option<String>,
    pub dob: Option<String>,
    pub date_of_joining: Option<String>,
    pub address: Option<String>,
    pub salary: Option<f64>,
    pub designation: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<EmployeeRow> for EmployeeDetail {
    type Error = PortalError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(EmployeeDetail {
            id: parse_id(&row.id)?,
            emp_id: row.emp_id,
            first_name: row.first_name,
            last_name: row.last_name,
            department: row.department,
            email: row.email,
            mobile_no: row.mobile_no,
            dob: row.dob,
            date_of_joining: row.date_of_joining,
            address: row.address,
            salary: row.salary,
            designation: row.designation,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}
