use crate::models::booking::{Description, MonthAvailability};
use crate::models::location::Location;
use crate::scraping::session::DriveTestSession;
use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use std::io::Write;
use tracing::{debug, warn};

/// Dates to search between. Scanning stops once the cursor is no longer
/// earlier than `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Which booking day records are reported as available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailabilityFilter {
    /// Keeps every record regardless of status
    #[default]
    PassThrough,
    /// Drops FULL and UNAVAILABLE days
    OpenOnly,
}

impl AvailabilityFilter {
    pub fn keeps(&self, description: Description) -> bool {
        match self {
            AvailabilityFilter::PassThrough => true,
            AvailabilityFilter::OpenOnly => {
                !matches!(description, Description::Full | Description::Unavailable)
            }
        }
    }
}

/// Steps a date forward one calendar month at a time.
///
/// Months are counted from year zero so rollover into January needs no
/// special case. The start day is remembered and clamped to the length of
/// each month, so the 31st becomes the 30th in April and the 31st again in May.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    anchor_day: u32,
    months: i32,
}

impl MonthCursor {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            anchor_day: start.day(),
            months: start.year() * 12 + start.month0() as i32,
        }
    }

    pub fn year(&self) -> i32 {
        self.months.div_euclid(12)
    }

    pub fn month(&self) -> u32 {
        self.months.rem_euclid(12) as u32 + 1
    }

    pub fn date(&self) -> Result<NaiveDate> {
        let (year, month) = (self.year(), self.month());
        (1..=self.anchor_day)
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(|| anyhow!("{year}-{month:02} is outside the supported date range"))
    }

    pub fn advance(&mut self) {
        self.months += 1;
    }
}

/// Queries one location month by month and writes a line per month to `out`.
/// Returns how many months were queried.
pub async fn scan_location<W: Write>(
    session: &DriveTestSession,
    location: &Location,
    window: SearchWindow,
    filter: AvailabilityFilter,
    out: &mut W,
) -> Result<usize> {
    let mut cursor = MonthCursor::new(window.start);
    let mut queries = 0;

    loop {
        let current = cursor.date()?;
        if current >= window.end {
            break;
        }
        let (year, month) = (current.year(), current.month());

        debug!("checking {} for {}-{:02}", location.city, year, month);
        let response = session
            .fetch_booking_dates(location.service_id, year, month)
            .await?;
        queries += 1;

        if response.valid == Some(false) {
            warn!(
                "booking service flagged {}-{:02} for {} as invalid (status code {:?})",
                year, month, location.city, response.status_code
            );
        }

        let dates = response
            .available_booking_dates
            .iter()
            .filter(|record| filter.keeps(record.description))
            .map(|record| {
                NaiveDate::from_ymd_opt(year, month, record.day).ok_or_else(|| {
                    anyhow!(
                        "booking service returned day {} for {}-{:02}",
                        record.day,
                        year,
                        month
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let availability = MonthAvailability {
            city: location.city.clone(),
            month: current.with_day(1).unwrap_or(current),
            dates,
        };
        writeln!(out, "{availability}").context("Failed to write availability")?;

        cursor.advance();
    }

    Ok(queries)
}
