use crate::models::licence_class::LicenceClass;
use crate::scraping::resolver::{Proximity, resolve_locations};
use crate::scraping::scanner::{AvailabilityFilter, SearchWindow, scan_location};
use crate::scraping::session::DriveTestSession;
use anyhow::Result;
use std::io::Write;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    pub locations: usize,
    pub queries: usize,
}

/// Resolves the centres offering `class` and scans each one over `window`,
/// one location after another.
pub async fn find_availability<W: Write>(
    session: &DriveTestSession,
    class: &LicenceClass,
    window: SearchWindow,
    filter: AvailabilityFilter,
    proximity: Option<&Proximity>,
    out: &mut W,
) -> Result<ScanSummary> {
    let centres = session.fetch_locations().await?;
    info!("fetched {} test centres", centres.drive_test_centres.len());

    let locations = resolve_locations(&centres, class, proximity);
    if locations.is_empty() {
        error!("No DriveTest centres that match your preferences offer licence class {}", class);
        return Ok(ScanSummary::default());
    }
    info!(
        "searching {} services for a {} ({}) exam between {} and {}",
        locations.len(),
        class,
        class.description(),
        window.start,
        window.end
    );

    let mut summary = ScanSummary {
        locations: locations.len(),
        queries: 0,
    };
    for location in &locations {
        let name = location.centre_name.as_deref().unwrap_or(&location.city);
        match location.distance_km {
            Some(distance) => info!(
                "checking {} ({:.2} km, service {})",
                name, distance, location.service_id
            ),
            None => info!("checking {} (service {})", name, location.service_id),
        }
        summary.queries += scan_location(session, location, window, filter, out).await?;
    }

    Ok(summary)
}
