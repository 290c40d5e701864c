//! Slot endpoints: CRUD on recurring rules plus the per-date occurrence
//! edits and resolved views.

use std::sync::Arc;

use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use tatami_core::constants::SLOTS_ROUTE_COMPONENT;
use tatami_core::error::CoreError;
use tatami_core::types::{TimeWindow, format_wall_time, parse_wall_time};
use tatami_db::model::slot::Slot;
use tatami_db::model::slot::exception::SlotException;
use tatami_service::schedule::{CreateSlot, DaySchedule, ResolvedOccurrence, ScheduleService, WindowPatch};

use crate::error::{AppError, AppResult};
use crate::schedule_handler::get_schedule_from_depot;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Create slot request payload
#[derive(Debug, Deserialize)]
pub struct CreateSlotRequest {
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub created_for_date: NaiveDate,
}

/// ## Summary
/// Recurring-rule edit payload; omitted fields keep the stored value
#[derive(Debug, Deserialize)]
pub struct UpdateSlotRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// ## Summary
/// Single-occurrence edit payload
#[derive(Debug, Deserialize)]
pub struct OccurrenceEditRequest {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// ## Summary
/// Single-occurrence delete payload
#[derive(Debug, Deserialize)]
pub struct OccurrenceDeleteRequest {
    pub date: NaiveDate,
}

/// ## Summary
/// Slot response payload
#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub day_of_week: i16,
    pub start_time: String,
    pub end_time: String,
    pub created_for_date: NaiveDate,
    pub is_recurring: bool,
}

impl From<&Slot> for SlotResponse {
    fn from(slot: &Slot) -> Self {
        Self {
            id: slot.id.to_string(),
            day_of_week: slot.day_of_week,
            start_time: format_wall_time(slot.start_time),
            end_time: format_wall_time(slot.end_time),
            created_for_date: slot.created_for_date,
            is_recurring: slot.is_recurring,
        }
    }
}

/// ## Summary
/// Exception response payload; null times mark a suppressed occurrence
#[derive(Debug, Serialize)]
pub struct ExceptionResponse {
    pub id: String,
    pub slot_id: String,
    pub exception_date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<&SlotException> for ExceptionResponse {
    fn from(exception: &SlotException) -> Self {
        Self {
            id: exception.id.to_string(),
            slot_id: exception.slot_id.to_string(),
            exception_date: exception.exception_date,
            start_time: exception.start_time.map(format_wall_time),
            end_time: exception.end_time.map(format_wall_time),
        }
    }
}

/// ## Summary
/// One resolved occurrence as served to the calendar view
#[derive(Debug, Serialize)]
pub struct OccurrenceResponse {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    pub is_exception: bool,
}

impl From<&ResolvedOccurrence> for OccurrenceResponse {
    fn from(occurrence: &ResolvedOccurrence) -> Self {
        Self {
            id: occurrence.slot_id.to_string(),
            start_time: format_wall_time(occurrence.window.start),
            end_time: format_wall_time(occurrence.window.end),
            is_exception: occurrence.is_exception,
        }
    }
}

/// ## Summary
/// One day of the week view
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub day_of_week: i16,
    pub slots: Vec<OccurrenceResponse>,
}

impl From<&DaySchedule> for DayResponse {
    fn from(day: &DaySchedule) -> Self {
        Self {
            date: day.date,
            day_of_week: day.day_of_week,
            slots: day.occurrences.iter().map(OccurrenceResponse::from).collect(),
        }
    }
}

fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(error = ?err, "Request failed");
    }
    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.to_string(),
    }));
}

fn obtain_service(depot: &Depot, res: &mut Response) -> Option<Arc<ScheduleService>> {
    match get_schedule_from_depot(depot) {
        Ok(service) => Some(service),
        Err(err) => {
            render_error(res, &err);
            None
        }
    }
}

fn parse_window(start: &str, end: &str) -> AppResult<TimeWindow> {
    let start = parse_wall_time(start)?;
    let end = parse_wall_time(end)?;
    Ok(TimeWindow::new(start, end)?)
}

fn parse_slot_id(req: &Request) -> AppResult<uuid::Uuid> {
    let Some(raw) = req.param::<String>("id") else {
        return Err(CoreError::ValidationError("slot id is required".to_string()).into());
    };
    uuid::Uuid::parse_str(&raw)
        .map_err(|_err| CoreError::ValidationError(format!("invalid slot id {raw:?}")).into())
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_err| CoreError::ParseError(format!("invalid date {raw:?}, use YYYY-MM-DD")).into())
}

/// ## Summary
/// POST /api/slots - Create a recurring rule
///
/// ## Errors
/// Returns HTTP 400 for an invalid payload, unordered window, or an
/// exhausted `created_for_date` capacity
/// Returns HTTP 500 if storage fails
#[handler]
async fn create_slot_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let body: CreateSlotRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse create slot request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let window = match parse_window(&body.start_time, &body.end_time) {
        Ok(window) => window,
        Err(err) => return render_error(res, &err),
    };

    match service
        .create_slot(CreateSlot {
            day_of_week: body.day_of_week,
            window,
            created_for_date: body.created_for_date,
        })
        .await
    {
        Ok(slot) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(SlotResponse::from(&slot)));
        }
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// GET /api/slots/week?start_date=YYYY-MM-DD - Resolved week view
///
/// The anchor is normalized to its week's Monday; the response always
/// carries exactly seven day entries.
#[handler]
async fn get_week_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let Some(raw) = req.query::<String>("start_date") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: "start_date query parameter is required".to_string(),
        }));
        return;
    };

    let anchor = match parse_date(&raw) {
        Ok(date) => date,
        Err(err) => return render_error(res, &err),
    };

    match service.slots_for_week(anchor).await {
        Ok(week) => {
            let days: Vec<DayResponse> = week.iter().map(DayResponse::from).collect();
            res.render(Json(days));
        }
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// GET /api/slots/date/<date> - Resolved occurrences for one date
#[handler]
async fn get_date_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let Some(raw) = req.param::<String>("date") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse {
            error: "date parameter is required".to_string(),
        }));
        return;
    };

    let date = match parse_date(&raw) {
        Ok(date) => date,
        Err(err) => return render_error(res, &err),
    };

    match service.slots_for_date(date).await {
        Ok(occurrences) => {
            let payload: Vec<OccurrenceResponse> =
                occurrences.iter().map(OccurrenceResponse::from).collect();
            res.render(Json(payload));
        }
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// PUT /api/slots/<id> - Edit the recurring rule
///
/// Every occurrence without an exception follows the new window.
///
/// ## Errors
/// Returns HTTP 404 for a missing slot, 400 when the merged window is not
/// ordered
#[handler]
async fn update_slot_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let id = match parse_slot_id(req) {
        Ok(id) => id,
        Err(err) => return render_error(res, &err),
    };

    let body: UpdateSlotRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse update slot request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let patch = WindowPatch {
        start: match body.start_time.as_deref().map(parse_wall_time).transpose() {
            Ok(start) => start,
            Err(err) => return render_error(res, &err.into()),
        },
        end: match body.end_time.as_deref().map(parse_wall_time).transpose() {
            Ok(end) => end,
            Err(err) => return render_error(res, &err.into()),
        },
    };

    match service.update_slot(id, patch).await {
        Ok(slot) => res.render(Json(SlotResponse::from(&slot))),
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// DELETE /api/slots/<id> - Delete the recurring rule
///
/// Removes the rule and every exception hanging off it; all occurrences
/// vanish.
///
/// ## Errors
/// Returns HTTP 404 when no rule had the id
#[handler]
async fn delete_slot_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let id = match parse_slot_id(req) {
        Ok(id) => id,
        Err(err) => return render_error(res, &err),
    };

    match service.delete_slot(id).await {
        Ok(true) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Ok(false) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Slot not found".to_string(),
            }));
        }
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// PUT /api/slots/<id>/date - Edit one occurrence only
///
/// Writes the `(slot, date)` exception; the recurring rule and every other
/// date stay untouched.
///
/// ## Errors
/// Returns HTTP 404 when the slot does not exist, 400 for an unordered
/// window
#[handler]
async fn update_slot_for_date_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let id = match parse_slot_id(req) {
        Ok(id) => id,
        Err(err) => return render_error(res, &err),
    };

    let body: OccurrenceEditRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse occurrence edit request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let window = match parse_window(&body.start_time, &body.end_time) {
        Ok(window) => window,
        Err(err) => return render_error(res, &err),
    };

    match service.update_slot_for_date(id, body.date, window).await {
        Ok(exception) => res.render(Json(ExceptionResponse::from(&exception))),
        Err(err) => render_error(res, &err.into()),
    }
}

/// ## Summary
/// DELETE /api/slots/<id>/date - Suppress one occurrence
///
/// Writes a null-window tombstone and returns it; the row persists so the
/// recurrence stays hidden on that date.
///
/// ## Errors
/// Returns HTTP 404 when the slot does not exist
#[handler]
async fn delete_slot_for_date_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(service) = obtain_service(depot, res) else {
        return;
    };

    let id = match parse_slot_id(req) {
        Ok(id) => id,
        Err(err) => return render_error(res, &err),
    };

    let body: OccurrenceDeleteRequest = match req.parse_json().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(error = ?err, "Failed to parse occurrence delete request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    match service.delete_slot_for_date(id, body.date).await {
        Ok(exception) => res.render(Json(ExceptionResponse::from(&exception))),
        Err(err) => render_error(res, &err.into()),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(SLOTS_ROUTE_COMPONENT)
        .post(create_slot_handler)
        .push(Router::with_path("week").get(get_week_handler))
        .push(Router::with_path("date/{date}").get(get_date_handler))
        .push(
            Router::with_path("{id}")
                .put(update_slot_handler)
                .delete(delete_slot_handler)
                .push(
                    Router::with_path("date")
                        .put(update_slot_for_date_handler)
                        .delete(delete_slot_for_date_handler),
                ),
        )
}
