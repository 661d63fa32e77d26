//! HTTP request handlers for the payroll engine API.
//!
//! Every handler follows the same shape: resolve the actor from the
//! `x-actor-id` header, parse the body, run the operation through the
//! appropriate service, and map engine errors to status codes. Mutating
//! operations are wrapped in the transient-failure retry policy.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::Actor;
use crate::models::PayPeriod;
use crate::services::EmployeeUpdate;
use crate::store::retry::with_backoff;

use super::request::{
    AttendanceQuery, CreateDeductionRequest, CreateDepartmentRequest, DecisionRequest,
    GeneratePayslipRequest, LeaveQuery, OnboardRequest, PayslipQuery, SetStatusRequest,
    SubmitAttendanceRequest, SubmitLeaveRequest, UpdateEmployeeRequest,
};
use super::response::{ApiError, ApiErrorResponse, PayslipView};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(onboard_employee).get(list_employees))
        .route("/employees/:id", get(get_employee).put(update_employee))
        .route("/employees/:id/status", put(set_employee_status))
        .route("/departments", post(create_department).get(list_departments))
        .route("/deductions", post(create_deduction).get(list_deductions))
        .route("/deductions/:id", delete(delete_deduction))
        .route("/payslips", post(generate_payslip).get(list_payslips))
        .route("/payslips/:id", get(view_payslip))
        .route("/payslips/:id/pay", post(pay_payslip))
        .route("/attendance", post(submit_attendance).get(list_attendance))
        .route("/attendance/:id/decision", post(decide_attendance))
        .route("/leave", post(submit_leave).get(list_leave))
        .route("/leave/:id/decision", post(decide_leave))
        .with_state(state)
}

/// Resolves the acting employee from the `x-actor-id` header.
async fn resolve_actor(
    state: &AppState,
    headers: &HeaderMap,
    correlation_id: Uuid,
) -> Result<Actor, ApiErrorResponse> {
    let raw = headers
        .get("x-actor-id")
        .and_then(|value| value.to_str().ok());
    let Some(id) = raw.and_then(|value| Uuid::parse_str(value).ok()) else {
        warn!(correlation_id = %correlation_id, "Missing or malformed x-actor-id header");
        return Err(ApiErrorResponse::bad_request(ApiError::missing_actor()));
    };

    Ok(state.directory.actor_for(id).await?)
}

/// Unwraps the JSON body, mapping axum rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

async fn onboard_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<OnboardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let (profile, password) = parse_body(payload, correlation_id)?.into_parts();

    let employee = with_backoff(&state.retry, || {
        state.directory.onboard(profile.clone(), &password, &actor)
    })
    .await?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee onboarded");
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let employees = state.directory.list(&actor).await?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let employee = state.directory.get(id, &actor).await?;
    Ok(Json(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let changes: EmployeeUpdate = parse_body(payload, correlation_id)?.into();

    let employee = with_backoff(&state.retry, || {
        state.directory.update(id, changes.clone(), &actor)
    })
    .await?;

    info!(correlation_id = %correlation_id, employee_id = %employee.id, "Employee updated");
    Ok(Json(employee))
}

async fn set_employee_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<SetStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let employee = with_backoff(&state.retry, || {
        state.directory.set_status(id, body.status, &actor)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        status = ?employee.status,
        "Employee status set"
    );
    Ok(Json(employee))
}

async fn create_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDepartmentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let department = with_backoff(&state.retry, || {
        state.directory.add_department(&body.name, &actor)
    })
    .await?;

    info!(correlation_id = %correlation_id, department_id = %department.id, "Department created");
    Ok((StatusCode::CREATED, Json(department)))
}

async fn list_departments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(state.directory.list_departments().await))
}

async fn create_deduction(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDeductionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let rule = with_backoff(&state.retry, || {
        state
            .catalog
            .add_rule(&body.name, body.kind, body.amount, &actor)
    })
    .await?;

    info!(correlation_id = %correlation_id, rule_id = %rule.id, "Deduction rule created");
    Ok((StatusCode::CREATED, Json(rule)))
}

async fn list_deductions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    Ok(Json(state.catalog.list_rules().await))
}

async fn delete_deduction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let rule = with_backoff(&state.retry, || state.catalog.delete_rule(id, &actor)).await?;

    info!(correlation_id = %correlation_id, rule_id = %rule.id, "Deduction rule deleted");
    Ok(Json(rule))
}

async fn generate_payslip(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GeneratePayslipRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;
    let period = PayPeriod {
        month: body.month,
        year: body.year,
    };

    let payslip = with_backoff(&state.retry, || {
        state.payslips.generate(body.employee_id, period, &actor)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        payslip_id = %payslip.id,
        net_salary = %payslip.net_salary,
        "Payslip generated"
    );
    Ok((StatusCode::CREATED, Json(payslip)))
}

async fn view_payslip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let payslip = state.payslips.view(id, &actor).await?;
    let employee_name = state.directory.resolve_name(payslip.employee_id).await;

    Ok(Json(PayslipView {
        payslip,
        employee_name,
    }))
}

async fn list_payslips(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PayslipQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let payslips = match query.employee_id {
        Some(employee_id) => state.payslips.list_for_employee(employee_id, &actor).await?,
        None => state.payslips.list_all(&actor).await?,
    };
    Ok(Json(payslips))
}

async fn pay_payslip(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let payslip = with_backoff(&state.retry, || state.payslips.mark_paid(id, &actor)).await?;

    info!(correlation_id = %correlation_id, payslip_id = %payslip.id, "Payslip paid");
    Ok(Json(payslip))
}

async fn submit_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitAttendanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let request = with_backoff(&state.retry, || {
        state.attendance.submit(body.employee_id, body.date, &actor)
    })
    .await?;

    info!(correlation_id = %correlation_id, request_id = %request.id, "Attendance submitted");
    Ok((StatusCode::CREATED, Json(request)))
}

async fn decide_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let request = with_backoff(&state.retry, || {
        state.attendance.decide(id, body.outcome, &actor)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        request_id = %request.id,
        outcome = ?request.status,
        "Attendance decided"
    );
    Ok(Json(request))
}

async fn list_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AttendanceQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let requests = match (query.employee_id, query.from, query.to) {
        (Some(employee_id), _, _) => {
            state
                .attendance
                .list_for_employee(employee_id, &actor)
                .await?
        }
        (None, Some(from), Some(to)) => state.attendance.list_in_range(from, to, &actor).await?,
        _ => {
            return Err(ApiErrorResponse::bad_request(ApiError::new(
                "VALIDATION_ERROR",
                "employee_id or a from/to range is required",
            )))
        }
    };
    Ok(Json(requests))
}

async fn submit_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitLeaveRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let request = with_backoff(&state.retry, || {
        state.leave.submit(
            body.user_id,
            body.start_date,
            body.end_date,
            body.leave_type,
            &body.reason,
            &actor,
        )
    })
    .await?;

    info!(correlation_id = %correlation_id, request_id = %request.id, "Leave submitted");
    Ok((StatusCode::CREATED, Json(request)))
}

async fn decide_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    payload: Result<Json<DecisionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;
    let body = parse_body(payload, correlation_id)?;

    let request = with_backoff(&state.retry, || state.leave.decide(id, body.outcome, &actor)).await?;

    info!(
        correlation_id = %correlation_id,
        request_id = %request.id,
        outcome = ?request.status,
        "Leave decided"
    );
    Ok(Json(request))
}

async fn list_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LeaveQuery>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let actor = resolve_actor(&state, &headers, correlation_id).await?;

    let requests = match query.user_id {
        Some(user_id) => state.leave.list_for_user(user_id, &actor).await?,
        None => state.leave.list_pending(&actor).await?,
    };
    Ok(Json(requests))
}
