use crate::models::licence_class::LicenceClass;
use crate::models::location::Coordinates;
use crate::scraping::resolver::{DEFAULT_RADIUS_KM, Proximity};
use crate::scraping::scanner::{AvailabilityFilter, SearchWindow};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use clap::Parser;

/// Look for open DriveTest road test dates at every centre offering a licence class
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The licence class you are looking for
    pub licence_class: String,

    /// The day of the ending date
    pub end_date: u32,

    /// The month of the ending date
    pub end_month: u32,

    /// The year of the ending date
    pub end_year: i32,

    /// The day of the starting date (default: current day)
    #[arg(long = "start_date")]
    pub start_date: Option<u32>,

    /// The month of the starting date (default: current month)
    #[arg(long = "start_month")]
    pub start_month: Option<u32>,

    /// The year of the starting date (default: current year)
    #[arg(long = "start_year")]
    pub start_year: Option<i32>,

    /// Only report days not marked FULL or UNAVAILABLE
    #[arg(long = "open-only")]
    pub open_only: bool,

    /// Your current location as "latitude,longitude" (eg. 43.6426445,-79.3871645);
    /// limits the search to nearby centres, nearest first
    #[arg(short, long, allow_hyphen_values = true)]
    pub location: Option<Coordinates>,

    /// Search radius in kilometers from --location
    #[arg(short, long, default_value_t = DEFAULT_RADIUS_KM, requires = "location")]
    pub radius: f64,
}

/// What to search for, after the command line has been checked
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub licence_class: LicenceClass,
    pub window: SearchWindow,
    pub filter: AvailabilityFilter,
    pub proximity: Option<Proximity>,
}

impl Args {
    pub fn into_request(self, today: NaiveDate) -> Result<SearchRequest> {
        let end = build_date(self.end_year, self.end_month, self.end_date, "end")?;
        let start = build_date(
            self.start_year.unwrap_or(today.year()),
            self.start_month.unwrap_or(today.month()),
            self.start_date.unwrap_or(today.day()),
            "start",
        )?;

        let Ok(licence_class) = self.licence_class.parse::<LicenceClass>();
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(anyhow!("radius must be a non-negative number of kilometers"));
        }
        let proximity = self.location.map(|origin| Proximity {
            origin,
            radius_km: self.radius,
        });

        Ok(SearchRequest {
            licence_class,
            window: SearchWindow { start, end },
            filter: if self.open_only {
                AvailabilityFilter::OpenOnly
            } else {
                AvailabilityFilter::PassThrough
            },
            proximity,
        })
    }
}

fn build_date(year: i32, month: u32, day: u32, which: &str) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow!("invalid {which} date: day {day}, month {month}, year {year}"))
}
