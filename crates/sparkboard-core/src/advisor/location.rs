//! Where the forecast is fetched for.

use serde::{Deserialize, Serialize};

use crate::error::LocationError;
use crate::storage::Config;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

pub trait LocationProvider {
    fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from configuration or the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinates>);

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self(coordinates)
    }

    pub fn from_config(config: &Config) -> Self {
        Self(
            config
                .coordinates()
                .map(|(lat, lon)| Coordinates::new(lat, lon)),
        )
    }
}

impl LocationProvider for FixedLocation {
    fn locate(&self) -> Result<Coordinates, LocationError> {
        match self.0 {
            None => Err(LocationError::Unsupported),
            Some(c) if c.is_valid() => Ok(c),
            Some(_) => Err(LocationError::Unavailable),
        }
    }
}
