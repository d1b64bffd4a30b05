use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{CalendarError, date_key, display_date, parse_date_key};

/// Leftover rate of a single dish, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteSample {
    pub dish_name: String,
    pub waste_rate: f64,
}

impl WasteSample {
    pub fn new(dish_name: impl Into<String>, waste_rate: f64) -> Self {
        Self {
            dish_name: dish_name.into(),
            waste_rate,
        }
    }
}

/// Everything the calendar knows about a single date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDay {
    pub display_date: String,
    pub menu_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_samples: Option<Vec<WasteSample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_names: Option<Vec<String>>,
}

impl MenuDay {
    pub fn new(date: Date, menu_items: Vec<String>) -> Self {
        Self {
            display_date: display_date(date),
            menu_items,
            waste_samples: None,
            holiday_names: None,
        }
    }

    pub fn with_waste_samples(mut self, samples: Vec<WasteSample>) -> Self {
        self.waste_samples = Some(samples);
        self
    }

    pub fn with_holiday_names(mut self, names: Vec<String>) -> Self {
        self.holiday_names = Some(names);
        self
    }

    pub fn has_items(&self) -> bool {
        !self.menu_items.is_empty()
    }

    /// Holiday label supplied by the server, if any
    pub fn server_holiday(&self) -> Option<String> {
        self.holiday_names
            .as_ref()
            .filter(|names| !names.is_empty())
            .map(|names| names.join(", "))
    }

    /// Unweighted mean of the dish rates, rounded half-up to a whole percent.
    ///
    /// `None` when no dish was measured, which is distinct from a measured 0.
    pub fn average_waste_rate(&self) -> Option<u8> {
        let samples = self.waste_samples.as_ref().filter(|s| !s.is_empty())?;
        let mean = samples.iter().map(|s| s.waste_rate).sum::<f64>() / samples.len() as f64;

        // f64::round rounds half away from zero, which is half-up for non-negative rates.
        Some(mean.round().clamp(0.0, 100.0) as u8)
    }
}

/// Date-keyed menu dataset for the displayed month(s)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuMap(BTreeMap<String, MenuDay>);

impl MenuMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: Date, day: MenuDay) -> Option<MenuDay> {
        self.0.insert(date_key(date), day)
    }

    pub fn get(&self, key: &str) -> Option<&MenuDay> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut MenuDay> {
        self.0.get_mut(key)
    }

    pub fn get_date(&self, date: Date) -> Option<&MenuDay> {
        self.0.get(&date_key(date))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MenuDay)> {
        self.0.iter().map(|(key, day)| (key.as_str(), day))
    }

    /// Checks the invariants the rest of the crate relies on: every key is a
    /// real date and every dish rate lies in `0..=100`.
    pub fn validate(&self) -> Result<(), CalendarError> {
        for (key, day) in &self.0 {
            if parse_date_key(key).is_none() {
                return Err(CalendarError::InvalidDate(key.to_owned()));
            }

            for sample in day.waste_samples.iter().flatten() {
                if !(0.0..=100.0).contains(&sample.waste_rate) {
                    return Err(CalendarError::WasteRateOutOfRange {
                        date: key.to_owned(),
                        dish: sample.dish_name.to_owned(),
                        rate: sample.waste_rate,
                    });
                }
            }
        }

        Ok(())
    }
}

impl FromIterator<(Date, MenuDay)> for MenuMap {
    fn from_iter<T: IntoIterator<Item = (Date, MenuDay)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(date, day)| (date_key(date), day))
                .collect(),
        )
    }
}
