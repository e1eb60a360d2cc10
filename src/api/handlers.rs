//! HTTP request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::extract::JsonBody;
use crate::api::types::*;
use crate::domain::{
    Credential, EmployeeDetail, EmployeeUpdate, LoginRequest, NewEmployee, SignupRequest,
};
use crate::error::{OperationContext, PortalError, PortalResult};
use crate::validation;
use crate::AppState;

/// Shared by every login failure so callers cannot tell which field was wrong.
const INVALID_LOGIN: &str = "Invalid email or password";

// ==================== Authentication Endpoints ====================

/// Register a new credential.
///
/// POST /api/signup
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Credential created", body = Credential),
        (status = 400, description = "Validation failed, email taken, or storage error")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> PortalResult<(StatusCode, Json<Credential>)> {
    const FAILED: &str = "Error signing up";

    validation::signup_rules().validate(&body).inspect_err(|errors| {
        tracing::info!(fields = ?errors.fields(), "Signup rejected by validation");
    })?;

    let request: SignupRequest = JsonBody(body)
        .parse()
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    let existing = state
        .repository
        .find_credential_by_email(&request.email)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;
    if existing.is_some() {
        return Err(PortalError::Conflict("Email already exists".to_string()));
    }

    let credential = Credential::new(request.email, request.password);
    state
        .repository
        .create_credential(&credential)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    tracing::info!(
        credential_id = %credential.id,
        email = %credential.email,
        "Credential created"
    );

    Ok((StatusCode::CREATED, Json(credential)))
}

/// Check an email/password pair.
///
/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "Unknown email"),
        (status = 500, description = "Internal error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> PortalResult<Json<LoginResponse>> {
    const FAILED: &str = "Error logging in";

    let request: LoginRequest = JsonBody(body)
        .parse()
        .during(StatusCode::INTERNAL_SERVER_ERROR, FAILED)?;

    let credential = state
        .repository
        .find_credential_by_email(request.email())
        .await
        .during(StatusCode::INTERNAL_SERVER_ERROR, FAILED)?
        .ok_or_else(|| {
            tracing::warn!(email = %request.email(), "Login for unknown email");
            PortalError::NotFound(INVALID_LOGIN.to_string())
        })?;

    if !credential.password_matches(request.password()) {
        tracing::warn!(email = %credential.email, "Failed login attempt");
        return Err(PortalError::Unauthorized(INVALID_LOGIN.to_string()));
    }

    tracing::info!(
        credential_id = %credential.id,
        email = %credential.email,
        "User logged in"
    );

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        employee: credential,
    }))
}

// ==================== Employee Endpoints ====================

/// Add an employee record.
///
/// POST /api/employees
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = EmployeeDetail),
        (status = 400, description = "Validation failed, duplicate empId, or storage error")
    ),
    tag = "employees"
)]
pub async fn add_employee(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> PortalResult<(StatusCode, Json<EmployeeDetail>)> {
    validation::employee_rules().validate(&body).inspect_err(|errors| {
        tracing::info!(fields = ?errors.fields(), "Employee rejected by validation");
    })?;

    let result = create_employee(&state, JsonBody(body)).await;
    if let Err(PortalError::Operation { detail, .. }) = &result {
        tracing::error!(error = %detail, "Error adding employee");
    }
    result.map(|employee| (StatusCode::CREATED, Json(employee)))
}

async fn create_employee(state: &AppState, body: JsonBody) -> PortalResult<EmployeeDetail> {
    const FAILED: &str = "Error adding employee";

    let input: NewEmployee = body.parse().during(StatusCode::BAD_REQUEST, FAILED)?;

    let existing = state
        .repository
        .find_employee_by_emp_id(&input.emp_id)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;
    if existing.is_some() {
        return Err(PortalError::Conflict(
            "Employee ID already exists.".to_string(),
        ));
    }

    let employee = EmployeeDetail::new(input);
    state
        .repository
        .create_employee(&employee)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    tracing::info!(
        employee_id = %employee.id,
        emp_id = %employee.emp_id,
        "Employee created"
    );

    Ok(employee)
}

/// List every employee record.
///
/// GET /api/employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees in insertion order", body = [EmployeeDetail]),
        (status = 500, description = "Internal error")
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> PortalResult<Json<Vec<EmployeeDetail>>> {
    let employees = state
        .repository
        .list_employees()
        .await
        .during(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching employees")?;

    Ok(Json(employees))
}

/// Apply a partial update to an employee record.
///
/// An identifier that matches nothing yields `null` with 200.
///
/// PUT /api/employees/{id}
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = EmployeeUpdate,
    responses(
        (status = 200, description = "Updated record, or null when no record matched", body = EmployeeDetail),
        (status = 400, description = "Malformed identifier or body")
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> PortalResult<Json<Option<EmployeeDetail>>> {
    const FAILED: &str = "Error updating employee";

    let id = Uuid::parse_str(&id).during(StatusCode::BAD_REQUEST, FAILED)?;
    let update: EmployeeUpdate = JsonBody(body)
        .parse()
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    let updated = state
        .repository
        .update_employee(id, &update)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    match &updated {
        Some(employee) => tracing::info!(employee_id = %employee.id, "Employee updated"),
        None => tracing::debug!(employee_id = %id, "Update matched no employee"),
    }

    Ok(Json(updated))
}

/// Delete an employee record. Succeeds whether or not the record existed.
///
/// DELETE /api/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier or storage error")
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PortalResult<Json<MessageResponse>> {
    const FAILED: &str = "Error deleting employee";

    let id = Uuid::parse_str(&id).during(StatusCode::BAD_REQUEST, FAILED)?;
    let removed = state
        .repository
        .delete_employee(id)
        .await
        .during(StatusCode::BAD_REQUEST, FAILED)?;

    tracing::info!(employee_id = %id, removed, "Employee delete requested");

    Ok(Json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}

// ==================== Service Endpoints ====================

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Check database connectivity
    let db_status = match sqlx::query("SELECT 1")
        .fetch_one(state.repository.pool())
        .await
    {
        Ok(_) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "Server is running successfully!".to_string(),
        database: db_status,
    })
}

/// Fallback for unmatched paths and methods.
pub async fn route_not_found() -> PortalError {
    PortalError::RouteNotFound
}
