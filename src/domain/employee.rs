//! Employee detail domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::coerce;

/// A personnel record.
///
/// `id` is the storage-generated record identifier; `emp_id` is the
/// business identifier assigned by the client and only checked for
/// uniqueness when the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    /// Generated record identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Employee-assigned identifier.
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_no: Option<String>,
    /// Date of birth, as supplied by the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_joining: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl EmployeeDetail {
    /// Build a fresh record from validated input.
    pub fn new(input: NewEmployee) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            emp_id: input.emp_id,
            first_name: input.first_name,
            last_name: input.last_name,
            department: input.department,
            email: Some(input.email),
            mobile_no: input.mobile_no,
            dob: input.dob,
            date_of_joining: input.date_of_joining,
            address: input.address,
            salary: input.salary,
            designation: input.designation,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Add-employee input, read after the employee rule set has passed.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub emp_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub mobile_no: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub date_of_joining: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub designation: Option<String>,
}

/// Partial update; unknown fields are ignored.
///
/// The identifying fields are required on the record, so a `null` there is
/// ignored. Every other field is tri-state: absent keeps the stored value,
/// `null` clears it, and a value replaces it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub emp_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::optional_text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub mobile_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub dob: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub date_of_joining: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "coerce::patch_number")]
    #[schema(value_type = Option<f64>)]
    pub salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "coerce::patch_text")]
    #[schema(value_type = Option<String>)]
    pub designation: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_employee() -> NewEmployee {
        serde_json::from_value(json!({
            "empId": "E-100",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "mobileNo": 5551234,
            "salary": "72000",
            "badge": "ignored"
        }))
        .unwrap()
    }

    #[test]
    fn test_new_employee_casts_loose_fields() {
        let input = new_employee();
        assert_eq!(input.mobile_no.as_deref(), Some("5551234"));
        assert_eq!(input.salary, Some(72000.0));
        assert!(input.department.is_none());
    }

    #[test]
    fn test_detail_serializes_camel_case_and_skips_absent() {
        let detail = EmployeeDetail::new(new_employee());
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["_id"], detail.id.to_string());
        assert_eq!(json["empId"], "E-100");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
        assert!(json.get("department").is_none());
        assert!(json.get("badge").is_none());
        assert_eq!(detail.created_at, detail.updated_at);
    }

    #[test]
    fn test_update_reads_only_present_fields() {
        let update: EmployeeUpdate = serde_json::from_value(json!({
            "department": "R&D",
            "lastName": null,
            "address": null,
            "salary": "",
            "_id": "x"
        }))
        .unwrap();
        assert_eq!(update.department, Some(Some("R&D".to_string())));
        assert!(update.last_name.is_none());
        assert!(update.first_name.is_none());
        assert_eq!(update.address, Some(None));
        assert_eq!(update.salary, Some(None));
        assert!(update.designation.is_none());
    }
}
