use axum::{
    Json,
    extract::{Path, State},
};
use schoolmeal_calendar::{CalendarError, date_key, parse_date_key};
use serde::Serialize;
use time::Date;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct FixedHoliday {
    pub date: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    pub fixed: Vec<FixedHoliday>,
    pub school: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChangedResponse {
    pub changed: bool,
}

fn parse(date: &str) -> Result<Date, AppError> {
    parse_date_key(date).ok_or_else(|| CalendarError::InvalidDate(date.to_owned()).into())
}

/// GET /api/holidays
#[tracing::instrument(skip_all)]
pub async fn list(State(app): State<AppState>) -> Json<HolidaysResponse> {
    let holidays = app.holidays.read().await;

    Json(HolidaysResponse {
        fixed: holidays
            .fixed_holidays()
            .map(|(date, name)| FixedHoliday {
                date: date_key(date),
                name: name.to_owned(),
            })
            .collect(),
        school: holidays.school_holidays().map(date_key).collect(),
    })
}

/// PUT /api/holidays/{date}
#[tracing::instrument(skip(app))]
pub async fn add(
    State(app): State<AppState>,
    Path((date,)): Path<(String,)>,
) -> Result<Json<ChangedResponse>, AppError> {
    let date = parse(&date)?;
    let changed = app.holidays.write().await.add_school_holiday(date);

    if changed {
        tracing::info!(date = %date_key(date), "School holiday added");
    }

    Ok(Json(ChangedResponse { changed }))
}

/// DELETE /api/holidays/{date}
#[tracing::instrument(skip(app))]
pub async fn remove(
    State(app): State<AppState>,
    Path((date,)): Path<(String,)>,
) -> Result<Json<ChangedResponse>, AppError> {
    let date = parse(&date)?;
    let changed = app.holidays.write().await.remove_school_holiday(date);

    if changed {
        tracing::info!(date = %date_key(date), "School holiday removed");
    }

    Ok(Json(ChangedResponse { changed }))
}
