#![allow(dead_code)]

use schoolmeal_calendar::{MenuDay, MenuMap, WasteSample, parse_date_key};

pub fn menu(entries: &[(&str, &[&str])]) -> MenuMap {
    entries
        .iter()
        .map(|(key, items)| {
            let date = parse_date_key(key).expect("test date key");
            let items = items.iter().map(|item| item.to_string()).collect();
            (date, MenuDay::new(date, items))
        })
        .collect()
}

pub fn with_rates(mut menus: MenuMap, key: &str, rates: &[(&str, f64)]) -> MenuMap {
    let date = parse_date_key(key).expect("test date key");
    let day = menus
        .get(key)
        .cloned()
        .unwrap_or_else(|| MenuDay::new(date, rates.iter().map(|(n, _)| n.to_string()).collect()))
        .with_waste_samples(
            rates
                .iter()
                .map(|(name, rate)| WasteSample::new(*name, *rate))
                .collect(),
        );

    menus.insert(date, day);
    menus
}
