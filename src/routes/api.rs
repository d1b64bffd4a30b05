use axum::{
    Json,
    extract::{Path, State},
};
use schoolmeal_calendar::{
    CalendarDay, CalendarError, DailyWasteSample, DishWaste, MenuMap, YearMonth, build_month,
    build_monthly_series, date_key, dish_breakdown, monthly_average, parse_date_key, week_rows,
};
use serde::Serialize;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u8,
    pub weeks: usize,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteSeriesResponse {
    pub period: String,
    pub data: Vec<DailyWasteSample>,
    pub monthly_average: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct DishWasteResponse {
    pub date: String,
    pub dishes: Vec<DishWaste>,
}

/// GET /api/calendar/{year}/{month}
#[tracing::instrument(skip(app))]
pub async fn calendar(
    State(app): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<CalendarResponse>, AppError> {
    let month = YearMonth::from_number(year, month)?;
    let menus = app.source.fetch_month(month).await?;
    let days = build_month(month, &menus, &*app.holidays.read().await);

    Ok(Json(CalendarResponse {
        year: month.year(),
        month: month.number(),
        weeks: week_rows(days.len()),
        days,
    }))
}

/// GET /api/waste/{year}/{month}
#[tracing::instrument(skip(app))]
pub async fn waste_series(
    State(app): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<WasteSeriesResponse>, AppError> {
    let month = YearMonth::from_number(year, month)?;
    let menus = app.source.fetch_month(month).await?;
    let data = build_monthly_series(month, &menus, &*app.holidays.read().await);

    Ok(Json(WasteSeriesResponse {
        period: month.period(),
        monthly_average: monthly_average(&data),
        data,
    }))
}

/// GET /api/waste/date/{date}
#[tracing::instrument(skip(app))]
pub async fn dish_waste(
    State(app): State<AppState>,
    Path((date,)): Path<(String,)>,
) -> Result<Json<DishWasteResponse>, AppError> {
    let parsed =
        parse_date_key(&date).ok_or_else(|| CalendarError::InvalidDate(date.to_owned()))?;
    let date = date_key(parsed);
    let menus = app.source.fetch_month(YearMonth::containing(parsed)).await?;

    Ok(Json(DishWasteResponse {
        dishes: dish_breakdown(&menus, &date),
        date,
    }))
}

/// GET /api/menus/{year}/{month}
#[tracing::instrument(skip(app))]
pub async fn menus(
    State(app): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<MenuMap>, AppError> {
    let month = YearMonth::from_number(year, month)?;

    Ok(Json(app.source.fetch_month(month).await?))
}
