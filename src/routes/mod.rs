use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use schoolmeal_calendar::{HolidayRegistry, YearMonth};
use tokio::sync::{Mutex, RwLock};

use crate::{
    page::{CalendarPage, load},
    source::MenuSource,
    template::{NotFoundTemplate, Template},
};

mod api;
mod calendar;
mod health;
mod holidays;

pub use api::{CalendarResponse, DishWasteResponse, WasteSeriesResponse};
pub use calendar::CalendarTemplate;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub source: Arc<dyn MenuSource>,
    pub holidays: Arc<RwLock<HolidayRegistry>>,
    pub page: Arc<Mutex<CalendarPage>>,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        source: Arc<dyn MenuSource>,
        month: YearMonth,
    ) -> Self {
        let holidays = config.calendar.registry();

        Self {
            config,
            source,
            holidays: Arc::new(RwLock::new(holidays)),
            page: Arc::new(Mutex::new(CalendarPage::new(month))),
        }
    }

    /// Loads the menus of the month the page opens on
    pub async fn load_initial_month(&self) -> bool {
        let ticket = self.page.lock().await.begin_reload();

        load(&self.page, self.source.as_ref(), ticket).await
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(calendar::index))
        .route("/calendar", get(calendar::page))
        .route("/calendar/prev", post(calendar::previous))
        .route("/calendar/next", post(calendar::next))
        .route("/calendar/toggle", post(calendar::toggle))
        .route("/calendar/days/{day}", post(calendar::select_day))
        .route("/calendar/chart/{date}", post(calendar::select_chart_point))
        .route("/calendar/generate", post(calendar::generate))
        .route("/calendar/holidays", post(calendar::add_holiday))
        .route(
            "/calendar/holidays/{date}/delete",
            post(calendar::remove_holiday),
        )
        .route("/api/calendar/{year}/{month}", get(api::calendar))
        .route("/api/waste/{year}/{month}", get(api::waste_series))
        .route("/api/waste/date/{date}", get(api::dish_waste))
        .route("/api/menus/{year}/{month}", get(api::menus))
        .route("/api/holidays", get(holidays::list))
        .route(
            "/api/holidays/{date}",
            put(holidays::add).delete(holidays::remove),
        )
        .fallback(fallback)
        .with_state(app_state)
}
