use foundation::math::GeoPoint;
use serde_json::{Map, Value};

/// Closed ring of geographic positions (first == last for well-formed input).
pub type Ring = Vec<GeoPoint>;

#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    /// Exterior ring followed by holes.
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl RegionGeometry {
    /// Polygons as ring slices; a `Polygon` yields exactly one.
    pub fn polygons(&self) -> Vec<&[Ring]> {
        match self {
            RegionGeometry::Polygon(rings) => vec![rings.as_slice()],
            RegionGeometry::MultiPolygon(polys) => polys.iter().map(Vec::as_slice).collect(),
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.polygons().into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rings().all(|r| r.is_empty())
    }
}

/// One decoded administrative region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub name: String,
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: RegionGeometry,
}

/// Boundary segments shared by two distinct regions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BorderMesh {
    pub lines: Vec<Vec<GeoPoint>>,
}

impl BorderMesh {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Emits the features as a GeoJSON FeatureCollection. The region name is
/// written to `name_property` so the output reads back with the same key.
pub fn features_to_geojson(features: &[RegionFeature], name_property: &str) -> Value {
    let mut root = Map::new();
    root.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );

    let mut out: Vec<Value> = Vec::with_capacity(features.len());
    for feat in features {
        let mut fobj = Map::new();
        fobj.insert("type".to_string(), Value::String("Feature".to_string()));
        if let Some(id) = &feat.id {
            fobj.insert("id".to_string(), Value::String(id.clone()));
        }

        let mut props = feat.properties.clone();
        props.insert(name_property.to_string(), Value::String(feat.name.clone()));
        fobj.insert("properties".to_string(), Value::Object(props));
        fobj.insert("geometry".to_string(), geometry_to_geojson(&feat.geometry));
        out.push(Value::Object(fobj));
    }

    root.insert("features".to_string(), Value::Array(out));
    Value::Object(root)
}

fn geometry_to_geojson(geom: &RegionGeometry) -> Value {
    let mut obj = Map::new();
    match geom {
        RegionGeometry::Polygon(rings) => {
            obj.insert("type".to_string(), Value::String("Polygon".to_string()));
            obj.insert("coordinates".to_string(), rings_coords(rings));
        }
        RegionGeometry::MultiPolygon(polys) => {
            obj.insert(
                "type".to_string(),
                Value::String("MultiPolygon".to_string()),
            );
            let coords = polys.iter().map(|poly| rings_coords(poly)).collect();
            obj.insert("coordinates".to_string(), Value::Array(coords));
        }
    }
    Value::Object(obj)
}

fn rings_coords(rings: &[Ring]) -> Value {
    Value::Array(
        rings
            .iter()
            .map(|ring| Value::Array(ring.iter().map(point_coords).collect()))
            .collect(),
    )
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

#[cfg(test)]
mod tests {
    use super::{RegionFeature, RegionGeometry, features_to_geojson};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ]
    }

    #[test]
    fn multipolygon_rings_are_flattened() {
        let geom = RegionGeometry::MultiPolygon(vec![vec![square()], vec![square(), square()]]);
        assert_eq!(geom.polygons().len(), 2);
        assert_eq!(geom.rings().count(), 3);
        assert!(!geom.is_empty());
        assert!(RegionGeometry::Polygon(vec![]).is_empty());
    }

    #[test]
    fn exports_feature_collection() {
        let feature = RegionFeature {
            name: "Jongno-gu".to_string(),
            id: Some("11110".to_string()),
            properties: Map::new(),
            geometry: RegionGeometry::Polygon(vec![square()]),
        };
        let value = features_to_geojson(&[feature], "name");
        assert_eq!(
            value,
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "id": "11110",
                    "properties": { "name": "Jongno-gu" },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    }
                }]
            })
        );
    }
}
