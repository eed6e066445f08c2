use std::fmt::Debug;
use std::future::Future;

use tracing::{info, warn};

use super::domain::{Coordinates, LocationSource, LocationState};

/// Default location (Ayodhya) used whenever the device position is unavailable.
pub const FALLBACK_LOCATION: Coordinates = Coordinates {
    lat: 26.8,
    lon: 82.2,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location unavailable")]
    Unavailable,
    #[error("location lookup failed: {0}")]
    Failed(String),
}

/// Source of the device position. Queried once per session.
pub trait LocationProvider: Debug + Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Position supplied up front by the operator.
#[derive(Debug, Clone, Copy)]
pub struct ReportedPosition {
    lat: f64,
    lon: f64,
}

impl ReportedPosition {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl LocationProvider for ReportedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lon) {
            return Err(LocationError::Failed(format!(
                "coordinates out of range: {}, {}",
                self.lat, self.lon
            )));
        }
        Ok(Coordinates {
            lat: self.lat,
            lon: self.lon,
        })
    }
}

/// Provider for hosts with no position source at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPositionSource;

impl LocationProvider for NoPositionSource {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable)
    }
}

pub fn fallback_state() -> LocationState {
    LocationState::Resolved {
        coordinates: FALLBACK_LOCATION,
        source: LocationSource::Fallback,
    }
}

/// Asks the provider once; any failure resolves to [`FALLBACK_LOCATION`].
pub async fn acquire_location<P>(provider: &P) -> LocationState
where
    P: LocationProvider,
{
    match provider.current_position().await {
        Ok(raw) => {
            let coordinates = Coordinates::rounded(raw.lat, raw.lon);
            info!(%coordinates, "device location resolved");
            LocationState::Resolved {
                coordinates,
                source: LocationSource::Device,
            }
        }
        Err(err) => {
            warn!(error = %err, fallback = %FALLBACK_LOCATION, "location blocked, using fallback");
            fallback_state()
        }
    }
}
