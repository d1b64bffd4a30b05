use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use schoolmeal_calendar::{
    CalendarDay, DailyWasteSample, DishWaste, HolidayRegistry, MenuMap, NO_WASTE_DATA, ViewMode,
    YearMonth, build_month, build_monthly_series, date_key, display_date, menu_preview,
    monthly_average, parse_date_key, weekday_label,
};
use serde::Deserialize;

use crate::{
    page::{CalendarPage, load},
    routes::AppState,
    template::Template,
};

pub const CALENDAR_PATH: &str = "/calendar";

pub struct DayCell {
    pub day_number: u8,
    pub is_current: bool,
    pub has_menu: bool,
    pub is_holiday: bool,
    pub holiday_name: String,
    pub preview: String,
    pub is_selected: bool,
    pub is_sunday: bool,
    pub is_saturday: bool,
}

pub struct SelectedDay {
    pub title: String,
    pub items: Vec<String>,
}

pub struct ChartRow {
    pub date: String,
    pub day_number: u8,
    pub rate_label: String,
    pub bar_width: u8,
    pub is_selected: bool,
}

pub struct DishRow {
    pub name: String,
    pub rate_label: String,
}

#[derive(askama::Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate {
    pub title: String,
    pub is_chart: bool,
    pub is_loading: bool,
    pub weeks: Vec<Vec<DayCell>>,
    pub selected_day: Option<SelectedDay>,
    pub chart: Vec<ChartRow>,
    pub average_label: String,
    pub breakdown_title: String,
    pub breakdown: Vec<DishRow>,
    pub school_holidays: Vec<String>,
}

impl CalendarTemplate {
    pub fn build(page: &CalendarPage, holidays: &HolidayRegistry) -> Self {
        let view = page.view();
        let month = view.month();
        let menus = page.menus();
        let selected = view.selected();

        let days = build_month(month, menus, holidays);
        let weeks = days
            .chunks(7)
            .map(|week| {
                week.iter()
                    .enumerate()
                    .map(|(column, day)| day_cell(day, column, menus, selected, month))
                    .collect()
            })
            .collect();

        let selected_day = selected
            .filter(|_| view.mode() == ViewMode::Calendar)
            .and_then(|key| {
                let date = parse_date_key(key)?;
                let day = menus.get(key)?;

                Some(SelectedDay {
                    title: format!("{} ({})", display_date(date), weekday_label(date)),
                    items: day.menu_items.to_owned(),
                })
            });

        let series = build_monthly_series(month, menus, holidays);
        let average_label = match monthly_average(&series) {
            Some(average) => format!("월 평균 잔반률 {average:.1}%"),
            None => NO_WASTE_DATA.to_owned(),
        };

        let breakdown_title = selected
            .and_then(parse_date_key)
            .map(|date| format!("{} 메뉴별 잔반률", display_date(date)))
            .unwrap_or_default();

        Self {
            title: month.to_string(),
            is_chart: view.mode() == ViewMode::WasteChart,
            is_loading: page.is_loading(),
            weeks,
            selected_day,
            chart: series.iter().map(|sample| chart_row(sample, selected)).collect(),
            average_label,
            breakdown_title,
            breakdown: view
                .breakdown()
                .unwrap_or_default()
                .iter()
                .map(dish_row)
                .collect(),
            school_holidays: holidays.school_holidays().map(date_key).collect(),
        }
    }
}

fn day_cell(
    day: &CalendarDay,
    column: usize,
    menus: &MenuMap,
    selected: Option<&str>,
    month: YearMonth,
) -> DayCell {
    let key = day.date(month).map(date_key);
    let preview = key
        .as_deref()
        .filter(|_| day.has_menu)
        .and_then(|key| menus.get(key))
        .and_then(|menu| menu_preview(&menu.menu_items))
        .unwrap_or_default();

    DayCell {
        day_number: day.day_number,
        is_current: day.is_current(),
        has_menu: day.has_menu,
        is_holiday: day.is_holiday,
        holiday_name: day.holiday_name.to_owned().unwrap_or_default(),
        preview,
        is_selected: key.is_some() && key.as_deref() == selected,
        is_sunday: column == 0,
        is_saturday: column == 6,
    }
}

fn chart_row(sample: &DailyWasteSample, selected: Option<&str>) -> ChartRow {
    ChartRow {
        date: sample.date.to_owned(),
        day_number: sample.day_number,
        rate_label: sample
            .waste_rate
            .map(|rate| format!("{rate}%"))
            .unwrap_or_else(|| "-".to_owned()),
        bar_width: sample.waste_rate.unwrap_or(0),
        is_selected: selected == Some(sample.date.as_str()),
    }
}

fn dish_row(dish: &DishWaste) -> DishRow {
    DishRow {
        name: dish.name.to_owned(),
        rate_label: if dish.name == NO_WASTE_DATA {
            String::new()
        } else {
            format!("{:.0}%", dish.waste_rate)
        },
    }
}

#[tracing::instrument(skip_all)]
pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let holidays = app.holidays.read().await;
    let page = app.page.lock().await;

    template.render(CalendarTemplate::build(&page, &holidays))
}

pub async fn index() -> impl IntoResponse {
    Redirect::to(CALENDAR_PATH)
}

#[tracing::instrument(skip_all)]
pub async fn previous(State(app): State<AppState>) -> impl IntoResponse {
    navigate(&app, -1).await;

    Redirect::to(CALENDAR_PATH)
}

#[tracing::instrument(skip_all)]
pub async fn next(State(app): State<AppState>) -> impl IntoResponse {
    navigate(&app, 1).await;

    Redirect::to(CALENDAR_PATH)
}

async fn navigate(app: &AppState, delta: i32) {
    let ticket = app.page.lock().await.begin_navigation(delta);
    load(&app.page, app.source.as_ref(), ticket).await;
}

#[tracing::instrument(skip_all)]
pub async fn toggle(State(app): State<AppState>) -> impl IntoResponse {
    let mode = app.page.lock().await.toggle_view();
    tracing::debug!(mode = %mode, "View toggled");

    Redirect::to(CALENDAR_PATH)
}

#[tracing::instrument(skip(app))]
pub async fn select_day(
    State(app): State<AppState>,
    Path((day,)): Path<(u8,)>,
) -> impl IntoResponse {
    app.page.lock().await.select_date(day);

    Redirect::to(CALENDAR_PATH)
}

#[tracing::instrument(skip(app))]
pub async fn select_chart_point(
    State(app): State<AppState>,
    Path((date,)): Path<(String,)>,
) -> impl IntoResponse {
    app.page.lock().await.select_chart_point(&date);

    Redirect::to(CALENDAR_PATH)
}

/// Generates menus for the month after the one on screen and shows them
#[tracing::instrument(skip_all)]
pub async fn generate(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let target = app.page.lock().await.view().month().next();
    let menus = crate::try_page_response!(app.source.generate_month(target), template);

    let mut page = app.page.lock().await;
    let ticket = page.begin_jump(target);
    page.finish(ticket, Ok(menus));

    Redirect::to(CALENDAR_PATH).into_response()
}

#[derive(Debug, Deserialize)]
pub struct HolidayForm {
    pub date: String,
}

#[tracing::instrument(skip(app))]
pub async fn add_holiday(
    State(app): State<AppState>,
    Form(input): Form<HolidayForm>,
) -> impl IntoResponse {
    match parse_date_key(input.date.trim()) {
        Some(date) => {
            app.holidays.write().await.add_school_holiday(date);
        }
        None => tracing::warn!(date = %input.date, "Ignoring malformed school holiday"),
    }

    Redirect::to(CALENDAR_PATH)
}

#[tracing::instrument(skip(app))]
pub async fn remove_holiday(
    State(app): State<AppState>,
    Path((date,)): Path<(String,)>,
) -> impl IntoResponse {
    if let Some(date) = parse_date_key(&date) {
        app.holidays.write().await.remove_school_holiday(date);
    }

    Redirect::to(CALENDAR_PATH)
}
