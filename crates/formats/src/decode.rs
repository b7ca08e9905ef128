//! Topology → region features and border mesh.

use foundation::math::GeoPoint;
use serde_json::Value;

use crate::feature::{BorderMesh, RegionFeature, RegionGeometry, Ring};
use crate::topology::{TopoGeometry, TopoShape, Topology};

/// Result of decoding one named object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DecodedObject {
    pub features: Vec<RegionFeature>,
    /// Leaf geometries that are not polygonal (points, lines) and were dropped.
    pub skipped: usize,
}

/// Decodes the polygonal geometries of `object_name`.
///
/// An unknown object or an empty collection yields no features; that is a
/// legitimate empty region set, not an error.
pub fn decode_object(
    topology: &Topology,
    object_name: &str,
    name_property: &str,
) -> DecodedObject {
    let mut out = DecodedObject::default();
    let Some(object) = topology.object(object_name) else {
        return out;
    };

    let arcs = topology.decoded_arcs();
    collect_features(object, &arcs, name_property, &mut out);
    out
}

pub fn decode_features(
    topology: &Topology,
    object_name: &str,
    name_property: &str,
) -> Vec<RegionFeature> {
    decode_object(topology, object_name, name_property).features
}

fn collect_features(
    geometry: &TopoGeometry,
    arcs: &[Vec<GeoPoint>],
    name_property: &str,
    out: &mut DecodedObject,
) {
    let region = match &geometry.shape {
        TopoShape::GeometryCollection { geometries } => {
            for child in geometries {
                collect_features(child, arcs, name_property, out);
            }
            return;
        }
        TopoShape::Polygon { arcs: rings } => RegionGeometry::Polygon(polygon(arcs, rings)),
        TopoShape::MultiPolygon { arcs: polys } => {
            RegionGeometry::MultiPolygon(polys.iter().map(|rings| polygon(arcs, rings)).collect())
        }
        _ => {
            out.skipped += 1;
            return;
        }
    };

    let id = geometry.id.as_ref().and_then(value_to_string);
    let properties = geometry.properties.clone().unwrap_or_default();
    let name = properties
        .get(name_property)
        .and_then(value_to_string)
        .or_else(|| id.clone())
        .unwrap_or_default();

    out.features.push(RegionFeature {
        name,
        id,
        properties,
        geometry: region,
    });
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn polygon(arcs: &[Vec<GeoPoint>], rings: &[Vec<i64>]) -> Vec<Ring> {
    rings
        .iter()
        .map(|indices| ring(arcs, indices))
        .filter(|r| !r.is_empty())
        .collect()
}

fn ring(arcs: &[Vec<GeoPoint>], indices: &[i64]) -> Ring {
    let mut points = stitch(arcs, indices);
    // Short open rings are closed explicitly so they still form a polygon.
    if let (Some(&first), Some(&last)) = (points.first(), points.last())
        && points.len() < 4
        && first != last
    {
        points.push(first);
    }
    points
}

/// Concatenates arcs, dropping the shared endpoint between consecutive arcs.
fn stitch(arcs: &[Vec<GeoPoint>], indices: &[i64]) -> Vec<GeoPoint> {
    let mut points: Vec<GeoPoint> = Vec::new();
    for &i in indices {
        let (index, reversed) = arc_ref(i);
        let Some(arc) = arcs.get(index) else {
            continue;
        };
        points.pop();
        if reversed {
            points.extend(arc.iter().rev().copied());
        } else {
            points.extend(arc.iter().copied());
        }
    }
    points
}

fn arc_ref(i: i64) -> (usize, bool) {
    if i < 0 {
        ((!i) as usize, true)
    } else {
        (i as usize, false)
    }
}

/// Arcs shared by two distinct leaf geometries of `object_name`.
///
/// Each arc is emitted once, oriented as its first referencing geometry
/// traverses it. Outer coastline arcs (referenced by a single geometry) are
/// excluded.
pub fn decode_border_mesh(topology: &Topology, object_name: &str) -> BorderMesh {
    let Some(object) = topology.object(object_name) else {
        return BorderMesh::default();
    };

    // Per arc: (first signed reference, first geometry, last geometry).
    let mut refs: Vec<Option<(i64, usize, usize)>> = vec![None; topology.arcs.len()];
    let mut next_geometry = 0usize;
    record_arc_refs(object, &mut next_geometry, &mut refs);

    let arcs = topology.decoded_arcs();
    let mut lines = Vec::new();
    for (first_ref, first, last) in refs.into_iter().flatten() {
        if first == last {
            continue;
        }
        let line = stitch(&arcs, &[first_ref]);
        if line.len() >= 2 {
            lines.push(line);
        }
    }
    BorderMesh { lines }
}

fn record_arc_refs(
    geometry: &TopoGeometry,
    next_geometry: &mut usize,
    refs: &mut [Option<(i64, usize, usize)>],
) {
    let geometry_index = match &geometry.shape {
        TopoShape::GeometryCollection { geometries } => {
            for child in geometries {
                record_arc_refs(child, next_geometry, refs);
            }
            return;
        }
        _ => {
            let g = *next_geometry;
            *next_geometry += 1;
            g
        }
    };

    let mut record = |i: i64| {
        let (index, _) = arc_ref(i);
        if let Some(slot) = refs.get_mut(index) {
            match slot {
                Some((_, _, last)) => *last = geometry_index,
                None => *slot = Some((i, geometry_index, geometry_index)),
            }
        }
    };

    match &geometry.shape {
        TopoShape::LineString { arcs } => arcs.iter().copied().for_each(&mut record),
        TopoShape::MultiLineString { arcs } | TopoShape::Polygon { arcs } => {
            arcs.iter().flatten().copied().for_each(&mut record)
        }
        TopoShape::MultiPolygon { arcs } => {
            arcs.iter().flatten().flatten().copied().for_each(&mut record)
        }
        _ => {}
    }
}
