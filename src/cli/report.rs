//! Plain-text renderings of the calendar and the leftover series for the
//! terminal.

use std::fmt::Write;

use anyhow::Result;
use schoolmeal_calendar::{
    CalendarDay, DailyWasteSample, YearMonth, build_month, build_monthly_series, monthly_average,
};

use crate::config::Config;

const HEADER: &str = " 일  월  화  수  목  금  토";

#[tracing::instrument(skip(config))]
pub async fn calendar(config: Config, year: i32, month: u8) -> Result<()> {
    let month = YearMonth::from_number(year, month)?;
    let source = crate::source::from_config(&config.source, month).await?;
    let menus = source.fetch_month(month).await?;
    let days = build_month(month, &menus, &config.calendar.registry());

    print!("{}", render_calendar(month, &days));

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn waste(config: Config, year: i32, month: u8) -> Result<()> {
    let month = YearMonth::from_number(year, month)?;
    let source = crate::source::from_config(&config.source, month).await?;
    let menus = source.fetch_month(month).await?;
    let series = build_monthly_series(month, &menus, &config.calendar.registry());

    print!("{}", render_waste(month, &series));

    Ok(())
}

/// Month grid with `*` marking days that have menus and `H` holidays.
/// Filler days from the previous month are shown in parentheses.
pub fn render_calendar(month: YearMonth, days: &[CalendarDay]) -> String {
    let mut out = format!("{month}\n{HEADER}\n");

    for week in days.chunks(7) {
        for day in week {
            let marker = match (day.is_holiday, day.has_menu) {
                (true, _) => 'H',
                (false, true) => '*',
                (false, false) => ' ',
            };

            if day.is_current() {
                let _ = write!(out, "{:>3}{marker}", day.day_number);
            } else {
                let _ = write!(out, "({:>2})", day.day_number);
            }
        }
        out.push('\n');
    }

    let holidays: Vec<String> = days
        .iter()
        .filter_map(|day| {
            day.holiday_name
                .as_ref()
                .map(|name| format!("{}일 {name}", day.day_number))
        })
        .collect();

    if !holidays.is_empty() {
        let _ = writeln!(out, "\n{}", holidays.join(", "));
    }

    out
}

pub fn render_waste(month: YearMonth, series: &[DailyWasteSample]) -> String {
    let mut out = format!("{month} 잔반률\n");

    for sample in series {
        match sample.waste_rate {
            Some(rate) => {
                let bar = "#".repeat(usize::from(rate / 2));
                let _ = writeln!(out, "{} {rate:>3}% {bar}", sample.date);
            }
            None => {
                let _ = writeln!(out, "{}    -", sample.date);
            }
        }
    }

    match monthly_average(series) {
        Some(average) => {
            let _ = writeln!(out, "평균 {average:.1}%");
        }
        None => {
            let _ = writeln!(out, "측정된 잔반률이 없습니다");
        }
    }

    out
}
