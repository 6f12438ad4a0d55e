//! Street segment data structures and upstream record ingestion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PlanError;

/// Substituted when an upstream record carries no name tag.
pub const UNNAMED_STREET: &str = "Unnamed street";

/// A single polyline vertex in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lat: f64,
    pub lon: f64,
}

impl Vertex {
    pub fn new(lat: f64, lon: f64) -> Self {
        Vertex { lat, lon }
    }
}

/// A named street polyline, the unit of assignment.
///
/// Immutable once built: the pipeline owns its segments for the duration of
/// one planning run and never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Segment {
    /// Create a new segment with the given name and vertices.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>) -> Self {
        Segment {
            name: name.into(),
            vertices,
            tags: BTreeMap::new(),
        }
    }

    /// Whether the segment carries any vertex geometry at all.
    pub fn has_geometry(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// The segment's representative point: the arithmetic mean of vertex
    /// latitudes and longitudes taken independently.
    ///
    /// This is a flat-plane mean, not a geodesic centroid. The distortion is
    /// negligible at city scale and the behavior is kept intentionally.
    /// Returns `None` for a segment without geometry.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        centroid_of(&self.vertices)
    }

    /// Parse segments out of an Overpass-style JSON document.
    ///
    /// Accepts either an object with an `elements` array or a bare array of
    /// records. Records without a name tag get [`UNNAMED_STREET`]; records
    /// without geometry become segments with empty `vertices` and fall out
    /// of the pipeline at clustering.
    pub fn from_json_records(input: &str) -> Result<Vec<Segment>, PlanError> {
        #[derive(Deserialize)]
        struct Document {
            elements: Vec<SegmentRecord>,
        }

        let records = match serde_json::from_str::<Document>(input) {
            Ok(doc) => doc.elements,
            Err(_) => serde_json::from_str::<Vec<SegmentRecord>>(input)?,
        };

        Ok(records.into_iter().map(Segment::from).collect())
    }
}

/// Raw record shape as delivered by the upstream geodata collaborator.
///
/// Both fields are optional on the wire; see [`Segment::from_json_records`]
/// for how the gaps are filled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentRecord {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub geometry: Vec<Vertex>,
}

impl From<SegmentRecord> for Segment {
    fn from(record: SegmentRecord) -> Self {
        let name = record
            .tags
            .get("name")
            .cloned()
            .unwrap_or_else(|| UNNAMED_STREET.to_string());

        Segment {
            name,
            vertices: record.geometry,
            tags: record.tags,
        }
    }
}

/// Arithmetic mean of the given vertices, `None` when the slice is empty.
pub fn centroid_of(vertices: &[Vertex]) -> Option<(f64, f64)> {
    if vertices.is_empty() {
        return None;
    }

    let n = vertices.len() as f64;
    let lat_sum: f64 = vertices.iter().map(|v| v.lat).sum();
    let lon_sum: f64 = vertices.iter().map(|v| v.lon).sum();

    Some((lat_sum / n, lon_sum / n))
}
