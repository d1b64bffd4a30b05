//! Payload shapes of the school-meal REST API and their conversion into a
//! [`MenuMap`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{CalendarError, MenuDay, MenuMap, WasteSample, date_key, parse_date_key};

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuResponse {
    #[serde(default)]
    pub days: Vec<DayMenu>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMenu {
    pub date: String,
    #[serde(default)]
    pub day_of_week_name: String,
    #[serde(default)]
    pub menu: Vec<MenuEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    #[serde(default)]
    pub menu_id: i64,
    #[serde(default)]
    pub menu_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLeftoverResponse {
    pub date: String,
    #[serde(default)]
    pub leftovers: Vec<LeftoverEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_leftover_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftoverEntry {
    pub menu_name: String,
    pub leftover_rate: f64,
}

/// Splits a menu name the API joins with `<br>` variants into dishes
pub fn split_dishes(menu_name: &str) -> Vec<String> {
    LINE_BREAK
        .split(menu_name)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

impl TryFrom<MenuResponse> for MenuMap {
    type Error = CalendarError;

    fn try_from(response: MenuResponse) -> Result<Self, Self::Error> {
        let mut menus = MenuMap::new();

        for day in response.days {
            let date =
                parse_date_key(&day.date).ok_or_else(|| CalendarError::InvalidDate(day.date))?;

            let items = day
                .menu
                .iter()
                .flat_map(|entry| split_dishes(&entry.menu_name))
                .collect();

            let mut menu_day = MenuDay::new(date, items);
            menu_day.holiday_names = day.holiday;
            menus.insert(date, menu_day);
        }

        Ok(menus)
    }
}

impl MenuMap {
    /// Attaches a day's per-dish leftover report to its menu entry.
    ///
    /// Dates without a menu entry get one with an empty menu so the samples
    /// are not lost.
    pub fn attach_leftovers(&mut self, report: DailyLeftoverResponse) -> Result<(), CalendarError> {
        let date = parse_date_key(&report.date)
            .ok_or_else(|| CalendarError::InvalidDate(report.date.to_owned()))?;

        let mut samples = Vec::with_capacity(report.leftovers.len());
        for entry in report.leftovers {
            if !(0.0..=100.0).contains(&entry.leftover_rate) {
                return Err(CalendarError::WasteRateOutOfRange {
                    date: report.date,
                    dish: entry.menu_name,
                    rate: entry.leftover_rate,
                });
            }

            samples.push(WasteSample::new(entry.menu_name, entry.leftover_rate));
        }

        match self.get_mut(&date_key(date)) {
            Some(day) => day.waste_samples = Some(samples),
            None => {
                self.insert(date, MenuDay::new(date, vec![]).with_waste_samples(samples));
            }
        }

        Ok(())
    }
}
