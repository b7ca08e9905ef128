//! TopoJSON topology model.
//!
//! Only the parts a choropleth needs are modeled: named geometry objects, the
//! shared arc pool and the optional quantization transform.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use foundation::math::GeoPoint;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TOPOLOGY_TYPE: &str = "Topology";

#[derive(Debug)]
pub enum TopologyError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    UnexpectedType {
        found: String,
    },
    NoObjects,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::Io { path, source } => {
                write!(f, "failed to read topology {}: {source}", path.display())
            }
            TopologyError::Parse(err) => write!(f, "topology parse error: {err}"),
            TopologyError::UnexpectedType { found } => {
                write!(f, "expected type \"{TOPOLOGY_TYPE}\", found \"{found}\"")
            }
            TopologyError::NoObjects => write!(f, "no objects found in topology"),
        }
    }
}

impl std::error::Error for TopologyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TopologyError::Io { source, .. } => Some(source),
            TopologyError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizeTransform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// Geometry shape keyed by the TopoJSON `type` member.
///
/// Arc references follow TopoJSON: a negative index `i` refers to arc `!i`
/// traversed in reverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TopoShape {
    GeometryCollection { geometries: Vec<TopoGeometry> },
    Point { coordinates: Vec<f64> },
    MultiPoint { coordinates: Vec<Vec<f64>> },
    LineString { arcs: Vec<i64> },
    MultiLineString { arcs: Vec<Vec<i64>> },
    Polygon { arcs: Vec<Vec<i64>> },
    MultiPolygon { arcs: Vec<Vec<Vec<i64>>> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopoGeometry {
    #[serde(flatten)]
    pub shape: TopoShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl TopoGeometry {
    pub fn new(shape: TopoShape) -> Self {
        Self {
            shape,
            id: None,
            properties: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Number of leaf geometries (collections count their members).
    pub fn leaf_count(&self) -> usize {
        match &self.shape {
            TopoShape::GeometryCollection { geometries } => {
                geometries.iter().map(TopoGeometry::leaf_count).sum()
            }
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(rename = "type", default = "default_topology_type")]
    pub kind: String,
    #[serde(default)]
    pub objects: IndexMap<String, TopoGeometry>,
    #[serde(default)]
    pub arcs: Vec<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<QuantizeTransform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
}

fn default_topology_type() -> String {
    TOPOLOGY_TYPE.to_string()
}

impl Topology {
    pub fn new(arcs: Vec<Vec<Vec<f64>>>) -> Self {
        Self {
            kind: default_topology_type(),
            objects: IndexMap::new(),
            arcs,
            transform: None,
            bbox: None,
        }
    }

    pub fn with_object(mut self, name: impl Into<String>, geometry: TopoGeometry) -> Self {
        self.objects.insert(name.into(), geometry);
        self
    }

    pub fn from_json_str(payload: &str) -> Result<Self, TopologyError> {
        let topology: Topology = serde_json::from_str(payload).map_err(TopologyError::Parse)?;
        if topology.kind != TOPOLOGY_TYPE {
            return Err(TopologyError::UnexpectedType {
                found: topology.kind,
            });
        }
        Ok(topology)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }

    /// Fails when the object map is empty, which marks a malformed dataset
    /// (as opposed to an object that legitimately has no geometries).
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.objects.is_empty() {
            return Err(TopologyError::NoObjects);
        }
        Ok(())
    }

    pub fn object(&self, name: &str) -> Option<&TopoGeometry> {
        self.objects.get(name)
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.keys().map(String::as_str)
    }

    /// Name of the first object in document order.
    pub fn first_object_name(&self) -> Result<&str, TopologyError> {
        self.object_names().next().ok_or(TopologyError::NoObjects)
    }

    /// Arc pool in absolute coordinates.
    ///
    /// Quantized topologies store delta-encoded integer positions; those are
    /// accumulated and mapped through `transform`. Positions with fewer than
    /// two components are dropped.
    pub fn decoded_arcs(&self) -> Vec<Vec<GeoPoint>> {
        self.arcs
            .iter()
            .map(|arc| match &self.transform {
                Some(t) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    arc.iter()
                        .filter(|p| p.len() >= 2)
                        .map(|p| {
                            x += p[0];
                            y += p[1];
                            GeoPoint::new(
                                x * t.scale[0] + t.translate[0],
                                y * t.scale[1] + t.translate[1],
                            )
                        })
                        .collect()
                }
                None => arc
                    .iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| GeoPoint::new(p[0], p[1]))
                    .collect(),
            })
            .collect()
    }
}
