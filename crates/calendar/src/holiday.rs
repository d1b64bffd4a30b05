use std::collections::{BTreeMap, BTreeSet};

use time::{Date, macros::date};

use crate::{is_weekend, parse_date_key};

/// Label shown for a holiday that has no name of its own
pub const GENERIC_HOLIDAY_LABEL: &str = "휴일";

/// Non-workday registry: a fixed list of named public holidays plus the
/// school's own discretionary holidays.
///
/// The registry is a plain value owned by whoever needs it; nothing in this
/// crate keeps a process-wide copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRegistry {
    fixed: BTreeMap<Date, String>,
    school: BTreeSet<Date>,
}

impl HolidayRegistry {
    pub fn new<I, S>(fixed: I) -> Self
    where
        I: IntoIterator<Item = (Date, S)>,
        S: Into<String>,
    {
        Self {
            fixed: fixed
                .into_iter()
                .map(|(date, name)| (date, name.into()))
                .collect(),
            school: BTreeSet::new(),
        }
    }

    /// Korean public holidays observed by schools in 2025
    pub fn korea_2025() -> Self {
        Self::new([
            (date!(2025 - 01 - 01), "신정"),
            (date!(2025 - 03 - 01), "삼일절"),
            (date!(2025 - 05 - 01), "근로자의날"),
            (date!(2025 - 05 - 05), "어린이날"),
            (date!(2025 - 05 - 06), "어린이날 대체공휴일"),
            (date!(2025 - 08 - 15), "광복절"),
            (date!(2025 - 10 - 03), "개천절"),
            (date!(2025 - 10 - 09), "한글날"),
            (date!(2025 - 12 - 25), "크리스마스"),
        ])
    }

    /// `true` for fixed and school holidays; weekends are not holidays.
    /// Malformed keys are never holidays.
    pub fn is_holiday(&self, key: &str) -> bool {
        parse_date_key(key).is_some_and(|date| self.is_holiday_date(date))
    }

    pub fn is_holiday_date(&self, date: Date) -> bool {
        self.fixed.contains_key(&date) || self.school.contains(&date)
    }

    /// `false` for weekends, holidays and malformed keys
    pub fn is_workday(&self, key: &str) -> bool {
        parse_date_key(key).is_some_and(|date| self.is_workday_date(date))
    }

    pub fn is_workday_date(&self, date: Date) -> bool {
        !is_weekend(date) && !self.is_holiday_date(date)
    }

    /// Name of a fixed holiday
    pub fn holiday_name(&self, date: Date) -> Option<&str> {
        self.fixed.get(&date).map(String::as_str)
    }

    /// Display label for any registered holiday, falling back to the generic label
    pub fn label(&self, date: Date) -> Option<&str> {
        match self.holiday_name(date) {
            Some(name) => Some(name),
            None if self.school.contains(&date) => Some(GENERIC_HOLIDAY_LABEL),
            None => None,
        }
    }

    /// Registers a school holiday. Returns `false` when the date was already a
    /// school holiday or is a fixed holiday.
    pub fn add_school_holiday(&mut self, date: Date) -> bool {
        if self.fixed.contains_key(&date) {
            return false;
        }

        self.school.insert(date)
    }

    pub fn remove_school_holiday(&mut self, date: Date) -> bool {
        self.school.remove(&date)
    }

    /// Replaces every school holiday; fixed holidays in `dates` are skipped
    pub fn set_school_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        self.school = dates
            .into_iter()
            .filter(|date| !self.fixed.contains_key(date))
            .collect();
    }

    pub fn school_holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.school.iter().copied()
    }

    pub fn fixed_holidays(&self) -> impl Iterator<Item = (Date, &str)> + '_ {
        self.fixed.iter().map(|(date, name)| (*date, name.as_str()))
    }
}

impl Default for HolidayRegistry {
    fn default() -> Self {
        Self::korea_2025()
    }
}
