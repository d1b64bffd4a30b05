use serde::Serialize;
use strum::{AsRefStr, Display};
use time::Date;

use crate::{GENERIC_HOLIDAY_LABEL, HolidayRegistry, MenuMap, YearMonth, is_weekend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayKind {
    Previous,
    Current,
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day_number: u8,
    pub kind: DayKind,
    pub has_menu: bool,
    pub is_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl CalendarDay {
    fn filler(day_number: u8) -> Self {
        Self {
            day_number,
            kind: DayKind::Previous,
            has_menu: false,
            is_holiday: false,
            holiday_name: None,
        }
    }

    pub fn is_current(&self) -> bool {
        self.kind == DayKind::Current
    }

    /// The date of a current-month cell
    pub fn date(&self, month: YearMonth) -> Option<Date> {
        match self.kind {
            DayKind::Current => month.day(self.day_number),
            DayKind::Previous => None,
        }
    }
}

/// Number of previous-month cells before the 1st, with weeks starting on Sunday
pub fn leading_filler_count(month: YearMonth) -> u8 {
    month.first_day().weekday().number_days_from_sunday()
}

/// Builds the cells of a month: previous-month filler followed by every day of
/// the month. No trailing filler is produced, so the last week row may be
/// short.
pub fn build_month(
    month: YearMonth,
    menus: &MenuMap,
    holidays: &HolidayRegistry,
) -> Vec<CalendarDay> {
    let filler = leading_filler_count(month);
    let previous_last_day = month
        .first_day()
        .previous_day()
        .map(|date| date.day())
        .unwrap_or(31);

    let mut days = Vec::with_capacity(usize::from(filler) + usize::from(month.days_in_month()));

    days.extend((0..filler).map(|i| CalendarDay::filler(previous_last_day - filler + i + 1)));

    days.extend(month.days().map(|date| {
        let entry = menus.get_date(date);

        // Weekend menus are never shown, even when the data has one.
        let has_menu = !is_weekend(date) && entry.is_some_and(|day| day.has_items());

        let holiday_name = match entry.and_then(|day| day.server_holiday()) {
            Some(name) => Some(name),
            None if holidays.is_holiday_date(date) => Some(
                holidays
                    .label(date)
                    .unwrap_or(GENERIC_HOLIDAY_LABEL)
                    .to_owned(),
            ),
            None => None,
        };

        CalendarDay {
            day_number: date.day(),
            kind: DayKind::Current,
            has_menu,
            is_holiday: holiday_name.is_some(),
            holiday_name,
        }
    }));

    days
}

/// Week rows needed to lay out `cell_count` cells seven to a row
pub fn week_rows(cell_count: usize) -> usize {
    cell_count.div_ceil(7)
}

/// Short cell text: the first dish, plus `+N개` when there are more
pub fn menu_preview(items: &[String]) -> Option<String> {
    let first = items.first()?;

    match items.len() {
        1 => Some(first.to_owned()),
        n => Some(format!("{first} +{}개", n - 1)),
    }
}
