use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookingDatesResponse {
    pub available_booking_dates: Vec<BookingDay>,
    #[serde(default)]
    pub valid: Option<bool>,
    #[serde(default)]
    pub status_code: Option<i64>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BookingDay {
    pub day: u32,
    pub description: Description,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Description {
    Full,
    Open,
    Unavailable,
    #[serde(other)]
    Unknown,
}

/// Dates kept for one location and month, printed as a single line
#[derive(Debug, Clone, PartialEq)]
pub struct MonthAvailability {
    pub city: String,
    pub month: NaiveDate, // first day of the queried month
    pub dates: Vec<NaiveDate>,
}

impl fmt::Display for MonthAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): ", self.city, self.month.format("%B %Y"))?;
        if self.dates.is_empty() {
            return f.write_str("none");
        }
        let dates: Vec<String> = self.dates.iter().map(|d| d.to_string()).collect();
        f.write_str(&dates.join(", "))
    }
}
