//! Flat-earth proximity filter used in place of a spatial index
//!
//! Approximates a local equirectangular projection around the query latitude.
//! Only valid for short distances: there is no correction across the ±180°
//! longitude seam, and the longitude scale collapses towards zero at the poles.

use std::f64::consts::PI;

use super::entity::LocationPoint;

/// Kilometres per statute mile
pub const KM_PER_MILE: f64 = 1.609344;

/// Whole kilometres per degree of latitude (40 000 km circumference, truncated)
pub const KM_PER_DEGREE_LAT: f64 = 111.0;

/// A circular search area around a query point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    lat: f64,
    lng: f64,
    radius_km: f64,
    kx: f64,
}

impl SearchArea {
    pub fn new(lat: f64, lng: f64, radius_miles: u32) -> Self {
        let kx = (PI * lat / 180.0).cos() * KM_PER_DEGREE_LAT;

        Self {
            lat,
            lng,
            radius_km: f64::from(radius_miles) * KM_PER_MILE,
            kx,
        }
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Projected distance in km from the centre
    pub fn distance_km(&self, lat: f64, lng: f64) -> f64 {
        let dx = (self.lng - lng).abs() * self.kx;
        let dy = (self.lat - lat).abs() * KM_PER_DEGREE_LAT;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        self.distance_km(lat, lng) <= self.radius_km
    }

    /// Keeps the first `limit` points inside the area, in input order
    pub fn select<'a, I>(&self, points: I, limit: usize) -> Vec<LocationPoint>
    where
        I: IntoIterator<Item = &'a LocationPoint>,
    {
        points
            .into_iter()
            .filter(|p| self.contains(p.lat, p.lng))
            .take(limit)
            .copied()
            .collect()
    }
}
