//! Geofencing: haversine distance against configured work sites.

use crate::models::work_mode::WorkMode;
use thiserror::Error;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission to read the location was denied")]
    Denied,
}

/// Source of the caller's current position.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinates, GeoError>;
}

/// Provider with a position decided up front (CLI flags, tests).
#[derive(Debug, Clone)]
pub struct FixedLocation(pub Result<Coordinates, GeoError>);

impl FixedLocation {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self(Ok(Coordinates {
            latitude,
            longitude,
        }))
    }

    pub fn failing(err: GeoError) -> Self {
        Self(Err(err))
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<Coordinates, GeoError> {
        self.0.clone()
    }
}

/// A named circular geofence.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl Site {
    pub fn distance_km(&self, pos: Coordinates) -> f64 {
        haversine_km(
            pos.latitude,
            pos.longitude,
            self.latitude,
            self.longitude,
        )
    }

    pub fn contains(&self, pos: Coordinates) -> bool {
        self.distance_km(pos) <= self.radius_km
    }
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// On-site when inside any site (the closest one wins), remote otherwise.
pub fn classify(sites: &[Site], pos: Coordinates) -> (WorkMode, Option<&Site>) {
    let nearest = sites
        .iter()
        .filter(|s| s.contains(pos))
        .min_by(|a, b| a.distance_km(pos).total_cmp(&b.distance_km(pos)));

    match nearest {
        Some(site) => (WorkMode::OnSite, Some(site)),
        None => (WorkMode::Remote, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> Site {
        Site {
            name: "office".into(),
            latitude: 34.1299,
            longitude: 72.4656,
            radius_km: 0.5,
        }
    }

    #[test]
    fn zero_distance_at_the_same_point() {
        assert!(haversine_km(34.1299, 72.4656, 34.1299, 72.4656).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }

    #[test]
    fn inside_radius_is_on_site() {
        // ~0.33 km north of the office
        let pos = Coordinates {
            latitude: 34.1329,
            longitude: 72.4656,
        };
        let sites = [office()];
        let (mode, site) = classify(&sites, pos);
        assert_eq!(mode, WorkMode::OnSite);
        assert_eq!(site.map(|s| s.name.as_str()), Some("office"));
    }

    #[test]
    fn outside_radius_is_remote() {
        // ~1.1 km north of the office
        let pos = Coordinates {
            latitude: 34.1399,
            longitude: 72.4656,
        };
        assert_eq!(classify(&[office()], pos).0, WorkMode::Remote);
        assert_eq!(classify(&[], pos).0, WorkMode::Remote);
    }

    #[test]
    fn closest_matching_site_wins() {
        let mut annex = office();
        annex.name = "annex".into();
        annex.latitude = 34.1310;
        annex.radius_km = 2.0;

        let pos = Coordinates {
            latitude: 34.1311,
            longitude: 72.4656,
        };
        let sites = [office(), annex];
        let (_, site) = classify(&sites, pos);
        assert_eq!(site.map(|s| s.name.as_str()), Some("annex"));
    }
}
