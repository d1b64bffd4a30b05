use std::collections::BTreeMap;

use async_trait::async_trait;
use schoolmeal_calendar::{MenuDay, MenuMap, WasteSample, YearMonth, date_key, is_weekend};
use time::Date;
use tokio::sync::RwLock;

use super::MenuSource;
use crate::error::AppError;

const RICE: [&str; 5] = ["쌀밥", "현미밥", "보리밥", "흑미밥", "잡곡밥"];
const SOUP: [&str; 7] = [
    "미역국",
    "된장국",
    "김치찌개",
    "콩나물국",
    "어묵국",
    "순두부찌개",
    "소고기무국",
];
const MAIN: [&str; 8] = [
    "제육볶음",
    "닭갈비",
    "고등어구이",
    "불고기",
    "돈까스",
    "갈치조림",
    "닭강정",
    "함박스테이크",
];
const SIDE: [&str; 6] = [
    "시금치나물",
    "계란말이",
    "감자조림",
    "멸치볶음",
    "숙주나물",
    "어묵볶음",
];
const KIMCHI: [&str; 3] = ["배추김치", "깍두기", "총각김치"];

/// Every this-many weekdays a menu is served without leftover measurements
const UNMEASURED_EVERY: u16 = 7;

/// Generated menus kept in memory. Months must be generated before
/// [`MenuSource::fetch_month`] returns anything for them.
#[derive(Default)]
pub struct FixtureSource {
    months: RwLock<BTreeMap<YearMonth, MenuMap>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuSource for FixtureSource {
    #[tracing::instrument(skip(self), fields(month = %month.period()))]
    async fn fetch_month(&self, month: YearMonth) -> Result<MenuMap, AppError> {
        Ok(self
            .months
            .read()
            .await
            .get(&month)
            .cloned()
            .unwrap_or_default())
    }

    #[tracing::instrument(skip(self), fields(month = %month.period()))]
    async fn generate_month(&self, month: YearMonth) -> Result<MenuMap, AppError> {
        let menus = generate(month);
        tracing::info!(days = menus.len(), "Generated fixture menus");

        self.months.write().await.insert(month, menus.clone());

        Ok(menus)
    }
}

/// Deterministic menus for every weekday of `month`
pub fn generate(month: YearMonth) -> MenuMap {
    month
        .days()
        .filter(|date| !is_weekend(*date))
        .map(|date| (date, menu_day(date)))
        .collect()
}

fn menu_day(date: Date) -> MenuDay {
    let n = usize::from(date.ordinal());
    let items: Vec<String> = [
        RICE[n % RICE.len()],
        SOUP[n % SOUP.len()],
        MAIN[(n / 2) % MAIN.len()],
        SIDE[(n * 3) % SIDE.len()],
        KIMCHI[n % KIMCHI.len()],
    ]
    .into_iter()
    .map(str::to_owned)
    .collect();

    let day = MenuDay::new(date, items);

    if date.ordinal() % UNMEASURED_EVERY == 0 {
        return day;
    }

    let key = date_key(date);
    let samples = day
        .menu_items
        .iter()
        .map(|dish| WasteSample::new(dish.to_owned(), waste_rate(&key, dish)))
        .collect();

    day.with_waste_samples(samples)
}

/// Stable pseudo-random rate in `0..=60` derived from FNV-1a of date and dish
fn waste_rate(key: &str, dish: &str) -> f64 {
    let hash = key
        .bytes()
        .chain(dish.bytes())
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        });

    (hash % 61) as f64
}
