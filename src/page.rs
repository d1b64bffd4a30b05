//! The calendar page session: what month is shown, what is selected and the
//! menu data behind it.

use schoolmeal_calendar::{
    CalendarView, DishWaste, FetchTicket, MenuMap, MenuState, ViewMode, YearMonth,
};
use tokio::sync::Mutex;

use crate::{error::AppError, source::MenuSource};

pub struct CalendarPage {
    view: CalendarView,
    menus: MenuState,
}

impl CalendarPage {
    pub fn new(month: YearMonth) -> Self {
        Self {
            view: CalendarView::new(month),
            menus: MenuState::new(month),
        }
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn menus(&self) -> &MenuMap {
        self.menus.menus()
    }

    pub fn is_loading(&self) -> bool {
        self.menus.is_loading()
    }

    /// Reloads the displayed month
    pub fn begin_reload(&mut self) -> FetchTicket {
        self.menus.navigate(self.view.month())
    }

    /// Moves by `delta` months; the returned ticket belongs to the new month
    pub fn begin_navigation(&mut self, delta: i32) -> FetchTicket {
        let month = self.view.change_month(delta);
        self.menus.navigate(month)
    }

    pub fn begin_jump(&mut self, target: YearMonth) -> FetchTicket {
        let current = self.view.month();
        let delta = (target.year() - current.year()) * 12
            + (i32::from(target.month0()) - i32::from(current.month0()));

        self.begin_navigation(delta)
    }

    /// Lands a fetch result. Returns `true` when the data is now on screen.
    pub fn finish(&mut self, ticket: FetchTicket, result: Result<MenuMap, AppError>) -> bool {
        match result {
            Ok(menus) => self.menus.apply(ticket, menus),
            Err(err) => {
                tracing::error!(
                    month = %ticket.month().period(),
                    err = %err,
                    "Failed to load menus"
                );
                self.menus.fail(ticket);
                false
            }
        }
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view.toggle_view(self.menus.menus())
    }

    pub fn select_date(&mut self, day: u8) -> Option<&str> {
        self.view.select_date(day, self.menus.menus())
    }

    pub fn select_chart_point(&mut self, key: &str) -> Option<&[DishWaste]> {
        self.view.select_chart_point(key, self.menus.menus())
    }
}

/// Fetches the month of `ticket` and lands it on the page.
///
/// The page lock is only taken once the source has answered, so a slow fetch
/// never blocks other actions; a newer navigation simply outdates the ticket.
pub async fn load(
    page: &Mutex<CalendarPage>,
    source: &dyn MenuSource,
    ticket: FetchTicket,
) -> bool {
    let result = source.fetch_month(ticket.month()).await;

    page.lock().await.finish(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;

    fn may() -> YearMonth {
        YearMonth::new(2025, 4).unwrap()
    }

    #[tokio::test]
    async fn test_load_applies_current_ticket() {
        let source = FixtureSource::new();
        source.generate_month(may()).await.unwrap();

        let page = Mutex::new(CalendarPage::new(may()));
        let ticket = page.lock().await.begin_reload();

        assert!(load(&page, &source, ticket).await);

        let page = page.lock().await;
        assert!(!page.is_loading());
        assert_eq!(page.menus().len(), 22);
    }

    #[tokio::test]
    async fn test_load_discards_outdated_ticket() {
        let source = FixtureSource::new();
        source.generate_month(may()).await.unwrap();

        let page = Mutex::new(CalendarPage::new(may()));
        let stale = page.lock().await.begin_reload();
        let fresh = page.lock().await.begin_navigation(1);

        assert!(!load(&page, &source, stale).await);
        assert!(page.lock().await.is_loading());
        assert!(page.lock().await.menus().is_empty());

        assert!(load(&page, &source, fresh).await);
        assert_eq!(page.lock().await.view().month(), may().next());
    }

    #[test]
    fn test_begin_jump_lands_on_target() {
        let mut page = CalendarPage::new(may());

        let ticket = page.begin_jump(YearMonth::new(2026, 1).unwrap());
        assert_eq!(ticket.month(), YearMonth::new(2026, 1).unwrap());
        assert_eq!(page.view().month(), YearMonth::new(2026, 1).unwrap());

        page.begin_jump(YearMonth::new(2024, 11).unwrap());
        assert_eq!(page.view().month(), YearMonth::new(2024, 11).unwrap());
    }

    #[test]
    fn test_failed_fetch_stops_loading() {
        let mut page = CalendarPage::new(may());
        let ticket = page.begin_reload();

        assert!(!page.finish(ticket, Err(AppError::Unsupported("test"))));
        assert!(!page.is_loading());
    }
}
