use anyhow::{Context, anyhow};
use serde::Deserialize;
use std::str::FromStr;

const EARTH_RADIUS_KM: f64 = 6371.0088;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LocationsResponse {
    pub drive_test_centres: Vec<DriveTestCentre>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DriveTestCentre {
    #[serde(default)]
    pub name: Option<String>,
    pub city: String,
    pub licence_test_types: Vec<String>,
    pub services: Vec<Service>,
    // sent as decimal strings
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

impl DriveTestCentre {
    /// `None` when the centre has no usable position
    pub fn coordinates(&self) -> Option<Coordinates> {
        let latitude = self.latitude.as_deref()?.trim().parse().ok()?;
        let longitude = self.longitude.as_deref()?.trim().parse().ok()?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_id: u64,
    pub licence_class: String,
}

/// A centre offering the requested licence class
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub service_id: u64,
    pub city: String,
    pub centre_name: Option<String>,
    /// Only known when searching around a position
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Great-circle distance using the haversine formula
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
    }
}

/// Parses `latitude,longitude`, e.g. `43.6426445,-79.3871645`
impl FromStr for Coordinates {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        let [latitude, longitude] = parts.as_slice() else {
            return Err(anyhow!(
                "location coordinates must follow format <latitude>,<longitude>"
            ));
        };

        let latitude: f64 = latitude
            .parse()
            .with_context(|| format!("latitude {latitude} is not a number"))?;
        let longitude: f64 = longitude
            .parse()
            .with_context(|| format!("longitude {longitude} is not a number"))?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(anyhow!("coordinates {latitude},{longitude} are out of range"));
        }

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}
