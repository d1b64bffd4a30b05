use serde::Serialize;

use crate::{HolidayRegistry, MenuMap, YearMonth, date_key};

/// Dish name of the placeholder row returned when a date has no measurements
pub const NO_WASTE_DATA: &str = "잔반률 데이터 없음";

/// Average leftover rate of one workday; `None` means nothing was measured
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWasteSample {
    pub date: String,
    pub day_number: u8,
    pub waste_rate: Option<u8>,
}

/// One row of a per-dish leftover breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishWaste {
    pub name: String,
    pub waste_rate: f64,
}

impl DishWaste {
    pub fn no_data() -> Self {
        Self {
            name: NO_WASTE_DATA.to_owned(),
            waste_rate: 0.0,
        }
    }
}

/// One sample per workday of the month in ascending order. Weekends and
/// holidays are left out entirely rather than reported as gaps.
pub fn build_monthly_series(
    month: YearMonth,
    menus: &MenuMap,
    holidays: &HolidayRegistry,
) -> Vec<DailyWasteSample> {
    month
        .days()
        .filter(|date| holidays.is_workday_date(*date))
        .map(|date| DailyWasteSample {
            date: date_key(date),
            day_number: date.day(),
            waste_rate: menus.get_date(date).and_then(|day| day.average_waste_rate()),
        })
        .collect()
}

/// Mean of the measured samples, to one decimal place
pub fn monthly_average(series: &[DailyWasteSample]) -> Option<f64> {
    let measured: Vec<f64> = series
        .iter()
        .filter_map(|sample| sample.waste_rate.map(f64::from))
        .collect();

    if measured.is_empty() {
        return None;
    }

    let mean = measured.iter().sum::<f64>() / measured.len() as f64;

    Some((mean * 10.0).round() / 10.0)
}

/// Per-dish rates for a date, or a single [`NO_WASTE_DATA`] row
pub fn dish_breakdown(menus: &MenuMap, key: &str) -> Vec<DishWaste> {
    let rows: Vec<DishWaste> = menus
        .get(key)
        .and_then(|day| day.waste_samples.as_ref())
        .map(|samples| {
            samples
                .iter()
                .map(|sample| DishWaste {
                    name: sample.dish_name.to_owned(),
                    waste_rate: sample.waste_rate,
                })
                .collect()
        })
        .unwrap_or_default();

    if rows.is_empty() {
        return vec![DishWaste::no_data()];
    }

    rows
}
