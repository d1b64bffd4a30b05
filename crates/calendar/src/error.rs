use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u8),

    #[error("Year out of supported range: {0}")]
    InvalidYear(i32),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Waste rate {rate} for '{dish}' on {date} is outside 0..=100")]
    WasteRateOutOfRange { date: String, dish: String, rate: f64 },
}
