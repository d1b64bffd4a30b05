use std::{fmt, str::FromStr};

use time::{Date, Month, Weekday, macros::format_description};

use crate::CalendarError;

const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Formats a date as the `YYYY-MM-DD` key used by [`crate::MenuMap`]
pub fn date_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` key, returning `None` for anything malformed
pub fn parse_date_key(key: &str) -> Option<Date> {
    Date::parse(key.trim(), format_description!("[year]-[month]-[day]")).ok()
}

pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// `3월 3일`
pub fn display_date(date: Date) -> String {
    format!("{}월 {}일", date.month() as u8, date.day())
}

/// Single-character Korean weekday label, Sunday first
pub fn weekday_label(date: Date) -> &'static str {
    WEEKDAY_LABELS[date.weekday().number_days_from_sunday() as usize]
}

/// A validated calendar month.
///
/// The month index is zero-based at the API boundary (`0` is January) to match
/// how the calendar page addresses months; internally the first day of the
/// month is stored so every derived value is a valid [`Date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: Date,
}

impl YearMonth {
    pub fn new(year: i32, month0: u8) -> Result<Self, CalendarError> {
        if month0 > 11 {
            return Err(CalendarError::InvalidMonth(month0));
        }

        let month = Month::try_from(month0 + 1).map_err(|_| CalendarError::InvalidMonth(month0))?;
        let first = Date::from_calendar_date(year, month, 1)
            .map_err(|_| CalendarError::InvalidYear(year))?;

        Ok(Self { first })
    }

    /// Builds from a one-based month number, as used in URLs and upstream payloads
    pub fn from_number(year: i32, month: u8) -> Result<Self, CalendarError> {
        match month.checked_sub(1) {
            Some(month0) => Self::new(year, month0),
            None => Err(CalendarError::InvalidMonth(month)),
        }
    }

    pub fn containing(date: Date) -> Self {
        Self {
            first: date.replace_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    pub fn month0(&self) -> u8 {
        self.first.month() as u8 - 1
    }

    /// One-based month number
    pub fn number(&self) -> u8 {
        self.first.month() as u8
    }

    pub fn first_day(&self) -> Date {
        self.first
    }

    pub fn days_in_month(&self) -> u8 {
        match self.month() {
            Month::February if time::util::is_leap_year(self.year()) => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    pub fn day(&self, day: u8) -> Option<Date> {
        self.first.replace_day(day).ok()
    }

    pub fn days(&self) -> impl Iterator<Item = Date> + '_ {
        (1..=self.days_in_month()).filter_map(|day| self.day(day))
    }

    /// Shifts by `delta` months, wrapping the year in both directions.
    ///
    /// Stays put when the result would leave the range `time` can represent.
    pub fn offset(&self, delta: i32) -> Self {
        let total = i64::from(self.year()) * 12 + i64::from(self.month0()) + i64::from(delta);
        let year = total.div_euclid(12);
        let month0 = total.rem_euclid(12) as u8;

        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month0).ok())
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    /// `YYYY-MM`, the period label of monthly reports
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year(), self.number())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}년 {}월", self.year(), self.number())
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Parses `YYYY-MM` with a one-based month
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDate(s.to_owned());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;

        Self::from_number(year, month)
    }
}
