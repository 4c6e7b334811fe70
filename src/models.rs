//! Built-in wireframe data and the RON model format
//!
//! The cube is the reference object: a +/-0.5 cube (sides of 1.0 in WIRE
//! units) shipped both as a point+edge list and as a connected polyline
//! stream. User models are stored as RON files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::wire::{WireEdge, WireRecord};

/// Half a WIRE unit (0.5 at WIRE_ONE = 16384)
const HALF: i16 = 8192;

// =============================================================================
// Cube data
// =============================================================================

/// Cube corner points, top face then bottom face. The ninth point repeats a
/// bottom corner, matching the source data layout.
pub const CUBE_POINTS: [WireRecord; 9] = [
    // top face
    WireRecord::new(HALF, HALF, HALF),
    WireRecord::new(-HALF, HALF, HALF),
    WireRecord::new(-HALF, -HALF, HALF),
    WireRecord::new(HALF, -HALF, HALF),
    // bottom face
    WireRecord::new(HALF, HALF, -HALF),
    WireRecord::new(-HALF, HALF, -HALF),
    WireRecord::new(-HALF, -HALF, -HALF),
    WireRecord::new(HALF, -HALF, -HALF),
    WireRecord::new(HALF, HALF, -HALF),
];

/// The cube's twelve edges, terminated
pub const CUBE_EDGES: [WireEdge; 13] = [
    // top face
    WireEdge::new(0, 1),
    WireEdge::new(1, 2),
    WireEdge::new(2, 3),
    WireEdge::new(3, 0),
    // bottom face
    WireEdge::new(4, 5),
    WireEdge::new(5, 6),
    WireEdge::new(6, 7),
    WireEdge::new(7, 4),
    // remaining edges
    WireEdge::new(0, 4),
    WireEdge::new(1, 5),
    WireEdge::new(2, 6),
    WireEdge::new(3, 7),
    WireEdge::TERM,
];

/// The same cube as a sentinel-delimited connected-point stream: two face
/// loops and four verticals, separated by pen-up records. 12 segments.
pub const CUBE_PATH: [WireRecord; 24] = [
    // top face loop
    CUBE_POINTS[0],
    CUBE_POINTS[1],
    CUBE_POINTS[2],
    CUBE_POINTS[3],
    CUBE_POINTS[0],
    WireRecord::SEP,
    // bottom face loop
    CUBE_POINTS[4],
    CUBE_POINTS[5],
    CUBE_POINTS[6],
    CUBE_POINTS[7],
    CUBE_POINTS[4],
    WireRecord::SEP,
    // verticals
    CUBE_POINTS[0],
    CUBE_POINTS[4],
    WireRecord::SEP,
    CUBE_POINTS[1],
    CUBE_POINTS[5],
    WireRecord::SEP,
    CUBE_POINTS[2],
    CUBE_POINTS[6],
    WireRecord::SEP,
    CUBE_POINTS[3],
    CUBE_POINTS[7],
    WireRecord::TERM,
];

// =============================================================================
// RON model files
// =============================================================================

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to parse model: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize model: {0}")]
    Serialize(#[from] ron::Error),

    #[error("model io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A named wireframe stored as a connected-point stream.
///
/// `points` holds data records and pen-up separators only; the END
/// terminator is appended by [`WireModel::records`], so files on disk can
/// never be missing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireModel {
    pub name: String,
    pub points: Vec<WireRecord>,
}

impl WireModel {
    pub fn new(name: impl Into<String>, points: Vec<WireRecord>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// The model's record stream, END-terminated
    pub fn records(&self) -> impl Iterator<Item = WireRecord> + '_ {
        self.points
            .iter()
            .copied()
            .chain(std::iter::once(WireRecord::TERM))
    }

    pub fn from_ron(s: &str) -> Result<Self, ModelError> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron(&self) -> Result<String, ModelError> {
        let config = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        Self::from_ron(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Point3;
    use crate::wire::{LineSink, StreamFormat, WireRenderer};

    struct CountingSink(usize);

    impl LineSink for CountingSink {
        fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _color: u16) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_cube_path_draws_twelve_segments() {
        let mut sink = CountingSink(0);
        WireRenderer::new(StreamFormat::WIRE, 160, 120)
            .draw(
                CUBE_PATH.iter().copied(),
                &mut sink,
                Point3::new(30.0, 45.0, 0.0),
                1.0,
                0xffff,
            )
            .unwrap();
        assert_eq!(sink.0, 12);
    }

    #[test]
    fn test_cube_edges_draw_twelve_segments() {
        let mut sink = CountingSink(0);
        WireRenderer::new(StreamFormat::WIRE, 160, 120)
            .draw_edges(
                &CUBE_POINTS,
                &CUBE_EDGES,
                &mut sink,
                Point3::ZERO,
                1.0,
                0xffff,
            )
            .unwrap();
        assert_eq!(sink.0, 12);
    }

    #[test]
    fn test_model_ron_round_trip() {
        let model = WireModel::new(
            "triangle",
            vec![
                WireRecord::new(0, 8192, 0),
                WireRecord::new(8192, -8192, 0),
                WireRecord::new(-8192, -8192, 0),
                WireRecord::new(0, 8192, 0),
            ],
        );
        let text = model.to_ron().unwrap();
        let back = WireModel::from_ron(&text).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_model_records_are_terminated() {
        let model = WireModel::new("dot", vec![WireRecord::new(1, 2, 3)]);
        let records: Vec<_> = model.records().collect();
        assert_eq!(records.len(), 2);
        assert!(records.last().unwrap().is_end());
    }
}
