//! One-shot acquisition of the user's position.
//!
//! The device geolocation capability is an external collaborator; this
//! module wraps it behind [`PositionSource`] and guarantees that the
//! view always gets a coordinate to render around — a designated
//! city-centre fallback when the device cannot or will not answer.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use thiserror::Error;
use tokio::time;

use crate::coordinate::Coordinate;

/// City-centre point used when the device position is unavailable
/// (Dhaka, Bangladesh).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    latitude: OrderedFloat(23.7937),
    longitude: OrderedFloat(90.4066),
};

/// Why the device could not provide a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("permission to read the device position was denied")]
    PermissionDenied,
    #[error("the device position request timed out")]
    Timeout,
    #[error("geolocation is not supported on this device")]
    Unsupported,
}

/// Tuning knobs for a position request.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    /// Ask the device for its best fix rather than a cheap one.
    pub high_accuracy: bool,
    /// Ceiling on how long a single device query may take.
    pub timeout: Duration,
    /// A fix younger than this is reused instead of querying again.
    pub max_age: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

/// A raw position as reported by the device.
#[derive(Debug, Clone)]
pub struct DevicePosition {
    pub coordinate: Coordinate,
    pub accuracy_meters: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Where a [`LocationFix`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOrigin {
    Device,
    Fallback,
}

/// The position the view renders around, plus an advisory message when
/// the device position could not be used.
#[derive(Debug, Clone)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    pub origin: FixOrigin,
    pub accuracy_meters: Option<f64>,
    /// User-visible notice recorded on fallback; never blocks
    /// rendering.
    pub advisory: Option<String>,
}

/// The device geolocation seam.
#[async_trait]
pub trait PositionSource {
    /// Requests the device's current position once.
    async fn current_position(
        &self,
        config: &LocationConfig,
    ) -> Result<DevicePosition, GeolocationError>;
}

/// Acquires the user position once per mount, with caching and
/// fallback.
pub struct LocationProvider<S: PositionSource> {
    source: S,
    config: LocationConfig,
    cached: Option<(LocationFix, Instant)>,
}

impl<S: PositionSource> LocationProvider<S> {
    pub fn new(source: S) -> LocationProvider<S> {
        LocationProvider::with_config(source, LocationConfig::default())
    }

    pub fn with_config(source: S, config: LocationConfig) -> LocationProvider<S> {
        LocationProvider {
            source,
            config,
            cached: None,
        }
    }

    /// Acquires the user's position.
    ///
    /// A single best-effort attempt: permission denial, timeout or a
    /// missing capability all resolve to [`FALLBACK_COORDINATE`] with
    /// an advisory message, never an error. A fix younger than
    /// `max_age` is reused without touching the device again. The
    /// `&mut self` receiver keeps at most one device query in flight.
    pub async fn acquire(&mut self) -> LocationFix {
        if let Some((fix, acquired_at)) = &self.cached {
            if acquired_at.elapsed() <= self.config.max_age {
                debug!("reusing cached position fix");
                return fix.clone();
            }
        }

        let attempt =
            time::timeout(self.config.timeout, self.source.current_position(&self.config)).await;

        let fix = match attempt {
            Ok(Ok(position)) => {
                info!(
                    "device position acquired at ({}, {})",
                    position.coordinate.lat(),
                    position.coordinate.lon()
                );
                LocationFix {
                    coordinate: position.coordinate,
                    origin: FixOrigin::Device,
                    accuracy_meters: position.accuracy_meters,
                    advisory: None,
                }
            }
            Ok(Err(err)) => {
                warn!("device position unavailable: {err}");
                fallback_fix(err)
            }
            Err(_) => {
                warn!(
                    "device position request exceeded {:?}",
                    self.config.timeout
                );
                fallback_fix(GeolocationError::Timeout)
            }
        };

        self.cached = Some((fix.clone(), Instant::now()));
        fix
    }
}

fn fallback_fix(err: GeolocationError) -> LocationFix {
    let advisory = match err {
        GeolocationError::Unsupported => "Geolocation is not supported on this device",
        GeolocationError::PermissionDenied | GeolocationError::Timeout => {
            "Unable to get your location"
        }
    };
    LocationFix {
        coordinate: FALLBACK_COORDINATE,
        origin: FixOrigin::Fallback,
        accuracy_meters: None,
        advisory: Some(advisory.to_string()),
    }
}
