use crate::models::licence_class::LicenceClass;
use crate::models::location::{Coordinates, Location, LocationsResponse};
use tracing::debug;

pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// Limits the search to centres within `radius_km` of `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub origin: Coordinates,
    pub radius_km: f64,
}

/// Picks every service, in server order, that books the given class at a
/// centre listing that class among its test types.
///
/// With a `proximity`, centres without coordinates or outside the radius are
/// dropped and the rest are ordered nearest first. Services at the same
/// centre keep their server order.
pub fn resolve_locations(
    response: &LocationsResponse,
    class: &LicenceClass,
    proximity: Option<&Proximity>,
) -> Vec<Location> {
    let code = class.code();
    let mut locations = Vec::new();

    for centre in &response.drive_test_centres {
        if !centre.licence_test_types.iter().any(|t| t == code) {
            debug!("{} does not test licence class {}", centre.city, code);
            continue;
        }

        let distance_km = match proximity {
            None => None,
            Some(proximity) => {
                let Some(position) = centre.coordinates() else {
                    debug!("{} has no coordinates, skipping", centre.city);
                    continue;
                };
                let distance = proximity.origin.distance_km(&position);
                if distance > proximity.radius_km {
                    debug!(
                        "{} too far away; search radius: {} km, distance: {:.2} km",
                        centre.city, proximity.radius_km, distance
                    );
                    continue;
                }
                Some(distance)
            }
        };

        for service in centre.services.iter().filter(|s| s.licence_class == code) {
            locations.push(Location {
                service_id: service.service_id,
                city: centre.city.clone(),
                centre_name: centre.name.clone(),
                distance_km,
            });
        }
    }

    if proximity.is_some() {
        locations.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
        });
    }

    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn centres() -> LocationsResponse {
        serde_json::from_value(json!({
            "driveTestCentres": [
                {
                    "city": "Toronto",
                    "name": "Toronto Downsview",
                    "licenceTestTypes": ["G", "G2"],
                    "services": [
                        { "serviceId": 1, "licenceClass": "G2" },
                        { "serviceId": 2, "licenceClass": "G" },
                        { "serviceId": 3, "licenceClass": "G" }
                    ]
                },
                {
                    "city": "Ottawa",
                    "licenceTestTypes": ["G2"],
                    "services": [
                        { "serviceId": 4, "licenceClass": "G2" },
                        { "serviceId": 5, "licenceClass": "G" }
                    ]
                },
                {
                    "city": "Kingston",
                    "licenceTestTypes": ["G", "M"],
                    "services": [{ "serviceId": 6, "licenceClass": "G" }]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn keeps_every_matching_service_in_order() {
        let locations = resolve_locations(&centres(), &LicenceClass::G, None);

        let ids: Vec<(u64, &str)> = locations
            .iter()
            .map(|l| (l.service_id, l.city.as_str()))
            .collect();
        assert_eq!(ids, vec![(2, "Toronto"), (3, "Toronto"), (6, "Kingston")]);
        assert_eq!(locations[0].centre_name.as_deref(), Some("Toronto Downsview"));
    }

    #[test]
    fn centre_must_list_the_class_as_a_test_type() {
        // Ottawa has a G service but doesn't list G as a test type
        let locations = resolve_locations(&centres(), &LicenceClass::G, None);
        assert!(locations.iter().all(|l| l.city != "Ottawa"));
    }

    #[test]
    fn unlisted_class_resolves_to_nothing() {
        assert!(resolve_locations(&centres(), &LicenceClass::Z, None).is_empty());
        let unknown = "XYZ".parse::<LicenceClass>().unwrap();
        assert!(resolve_locations(&centres(), &unknown, None).is_empty());
    }

    #[test]
    fn listed_class_without_service_resolves_to_nothing() {
        assert!(resolve_locations(&centres(), &LicenceClass::M, None).is_empty());
    }

    fn centres_around_toronto() -> LocationsResponse {
        serde_json::from_value(json!({
            "driveTestCentres": [
                {
                    "city": "Toronto",
                    "licenceTestTypes": ["G"],
                    "services": [
                        { "serviceId": 1, "licenceClass": "G" },
                        { "serviceId": 2, "licenceClass": "G" }
                    ],
                    "latitude": "43.6532",
                    "longitude": "-79.3832"
                },
                {
                    "city": "Mississauga",
                    "licenceTestTypes": ["G"],
                    "services": [{ "serviceId": 3, "licenceClass": "G" }],
                    "latitude": "43.5890",
                    "longitude": "-79.6441"
                },
                {
                    "city": "Oshawa",
                    "licenceTestTypes": ["G"],
                    "services": [{ "serviceId": 4, "licenceClass": "G" }],
                    "latitude": "43.8971",
                    "longitude": "-78.8658"
                },
                {
                    "city": "Barrie",
                    "licenceTestTypes": ["G"],
                    "services": [{ "serviceId": 5, "licenceClass": "G" }]
                }
            ]
        }))
        .unwrap()
    }

    fn around_pickering(radius_km: f64) -> Proximity {
        Proximity {
            origin: Coordinates {
                latitude: 43.8384,
                longitude: -79.0868,
            },
            radius_km,
        }
    }

    #[test]
    fn radius_drops_far_centres_and_sorts_nearest_first() {
        let proximity = around_pickering(40.0);
        let locations =
            resolve_locations(&centres_around_toronto(), &LicenceClass::G, Some(&proximity));

        let ids: Vec<(u64, &str)> = locations
            .iter()
            .map(|l| (l.service_id, l.city.as_str()))
            .collect();
        assert_eq!(ids, vec![(4, "Oshawa"), (1, "Toronto"), (2, "Toronto")]);
        assert!(locations.iter().all(|l| l.distance_km.unwrap() <= 40.0));
        assert!(locations[0].distance_km < locations[1].distance_km);
    }

    #[test]
    fn centres_without_coordinates_are_skipped_only_when_searching_nearby() {
        let everything = resolve_locations(&centres_around_toronto(), &LicenceClass::G, None);
        assert_eq!(everything.len(), 5);
        assert!(everything.iter().all(|l| l.distance_km.is_none()));

        let proximity = around_pickering(10_000.0);
        let nearby =
            resolve_locations(&centres_around_toronto(), &LicenceClass::G, Some(&proximity));
        assert_eq!(nearby.len(), 4);
        assert!(nearby.iter().all(|l| l.city != "Barrie"));
    }
}
