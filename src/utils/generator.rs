//! Randomized facility fixtures for tests and demos.

use rand::Rng;

use crate::coordinate::Coordinate;
use crate::facility::Facility;

/// Kilometers per degree of latitude; close enough for fixture
/// scattering.
const KM_PER_DEGREE: f64 = 111.0;

/// Generates `count` facilities scattered uniformly in a square of
/// `radius_km` half-width around `center`.
///
/// Identity starts at 1 and is unique within the returned list.
pub fn generate_facilities_near(center: &Coordinate, radius_km: f64, count: usize) -> Vec<Facility> {
    let mut rng = rand::thread_rng();
    let spread = radius_km / KM_PER_DEGREE;

    (0..count)
        .map(|i| {
            let latitude = center.lat() + rng.gen_range(-spread..=spread);
            let longitude = center.lon() + rng.gen_range(-spread..=spread);
            Facility::new(i as u64 + 1, format!("Facility {}", i + 1), latitude, longitude)
        })
        .collect()
}

#[cfg(test)]
mod generator_tests {
    use super::*;
    use crate::haversine;

    #[test]
    fn test_generates_requested_count_with_unique_ids() {
        let center = Coordinate::new(23.7937, 90.4066);
        let facilities = generate_facilities_near(&center, 10.0, 50);
        assert_eq!(facilities.len(), 50);
        let mut ids: Vec<u64> = facilities.iter().map(|f| f.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_generated_facilities_stay_near_center() {
        let center = Coordinate::new(23.7937, 90.4066);
        for facility in generate_facilities_near(&center, 5.0, 100) {
            let position = facility.coordinate().unwrap();
            // Corner of the square is sqrt(2) * radius away at most.
            assert!(haversine::distance(&center, &position) <= 5.0 * 1.5);
        }
    }
}
