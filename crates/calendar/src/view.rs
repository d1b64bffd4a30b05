use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{DishWaste, MenuMap, YearMonth, date_key, dish_breakdown, parse_date_key};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "calendar")]
    #[strum(serialize = "calendar")]
    Calendar,
    #[serde(rename = "chart")]
    #[strum(serialize = "chart")]
    WasteChart,
}

/// Selection state of the calendar page.
///
/// Every transition takes the current [`MenuMap`] so derived data (the
/// per-dish breakdown) is always computed against what is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    month: YearMonth,
    mode: ViewMode,
    selected: Option<String>,
    breakdown: Option<Vec<DishWaste>>,
}

impl CalendarView {
    pub fn new(month: YearMonth) -> Self {
        Self {
            month,
            mode: ViewMode::Calendar,
            selected: None,
            breakdown: None,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn breakdown(&self) -> Option<&[DishWaste]> {
        self.breakdown.as_deref()
    }

    /// Flips between calendar and chart. Entering the chart with a date
    /// already selected loads that date's breakdown right away.
    pub fn toggle_view(&mut self, menus: &MenuMap) -> ViewMode {
        self.breakdown = None;
        self.mode = match self.mode {
            ViewMode::Calendar => ViewMode::WasteChart,
            ViewMode::WasteChart => ViewMode::Calendar,
        };

        if self.mode == ViewMode::WasteChart
            && let Some(key) = &self.selected
        {
            self.breakdown = Some(dish_breakdown(menus, key));
        }

        self.mode
    }

    /// Selects a day of the displayed month in calendar mode. Anything else
    /// (chart mode, a day outside the month, a date without menu data) clears
    /// the selection.
    pub fn select_date(&mut self, day: u8, menus: &MenuMap) -> Option<&str> {
        self.breakdown = None;
        self.selected = match self.mode {
            ViewMode::Calendar => self
                .month
                .day(day)
                .map(date_key)
                .filter(|key| menus.contains_key(key)),
            ViewMode::WasteChart => None,
        };

        self.selected.as_deref()
    }

    /// Selects a chart point in chart mode, even one without data, and loads
    /// its breakdown. Ignored in calendar mode and for malformed dates.
    pub fn select_chart_point(&mut self, key: &str, menus: &MenuMap) -> Option<&[DishWaste]> {
        if self.mode != ViewMode::WasteChart {
            return None;
        }

        let date = parse_date_key(key)?;
        let key = date_key(date);

        self.breakdown = Some(dish_breakdown(menus, &key));
        self.selected = Some(key);

        self.breakdown.as_deref()
    }

    /// Moves by `delta` months and drops the selection
    pub fn change_month(&mut self, delta: i32) -> YearMonth {
        self.month = self.month.offset(delta);
        self.selected = None;
        self.breakdown = None;

        self.month
    }
}
