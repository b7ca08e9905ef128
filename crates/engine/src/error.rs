use std::fmt;

use formats::TopologyError;

#[derive(Debug)]
pub enum MapError {
    /// The container has no id to mount under.
    MissingMountPoint,
    InvalidViewport {
        width: f64,
        height: f64,
    },
    Topology(TopologyError),
    /// A point outside lon ∈ [-180, 180], lat ∈ [-90, 90] (or non-finite).
    InvalidPoint {
        index: usize,
        lon: f64,
        lat: f64,
    },
    /// `kMin`/`kMax` not a positive ordered range, or a non-positive
    /// region scale or duration.
    InvalidZoom {
        k_min: f64,
        k_max: f64,
        max_region_scale: f64,
        duration_ms: f64,
    },
    /// A numeric option that must be finite and positive.
    InvalidOption {
        name: &'static str,
        value: f64,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::MissingMountPoint => write!(f, "map container has no mount point id"),
            MapError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {width}x{height}")
            }
            MapError::Topology(err) => write!(f, "{err}"),
            MapError::InvalidPoint { index, lon, lat } => {
                write!(f, "point {index} has invalid coordinates ({lon}, {lat})")
            }
            MapError::InvalidZoom {
                k_min,
                k_max,
                max_region_scale,
                duration_ms,
            } => write!(
                f,
                "invalid zoom options: k in [{k_min}, {k_max}], region scale {max_region_scale}, duration {duration_ms}ms"
            ),
            MapError::InvalidOption { name, value } => {
                write!(f, "option {name} must be finite and positive, got {value}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Topology(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TopologyError> for MapError {
    fn from(err: TopologyError) -> Self {
        MapError::Topology(err)
    }
}
