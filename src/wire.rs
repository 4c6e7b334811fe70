//! Wireframe record streams and the streaming line renderer
//!
//! A wireframe is a flat sequence of fixed-point records. Ordinary records
//! are 3D points; two reserved x values act as control sentinels: PEN_UP
//! breaks the polyline (the next point starts a new subpath) and END
//! terminates the stream. An alternative representation pairs a point list
//! with an explicit edge list.
//!
//! The original firmware walked the record array until it met END, which
//! reads off the end of flash when the terminator is missing. Here the
//! backing store is a bounded [`RecordSource`]; exhaustion without END is a
//! [`StreamError::MissingTerminator`], never an out-of-bounds read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::Point3;

// =============================================================================
// Records and sentinels
// =============================================================================

/// Pen-up sentinel: break the polyline, keep reading
pub const PEN_UP: i16 = 32766;

/// End-of-stream sentinel
pub const END: i16 = 32767;

/// Edge-list terminator (first point index of the final edge)
pub const EDGE_END: i16 = -1;

/// One fixed-point wireframe record.
///
/// Sentinels are carried in the x component, as in the source data format.
/// Producers must keep ordinary coordinates clear of the two reserved
/// values; there is no escaping mechanism.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl WireRecord {
    /// Pen-up marker record
    pub const SEP: WireRecord = WireRecord {
        x: PEN_UP,
        y: 0,
        z: 0,
    };

    /// End-of-stream marker record
    pub const TERM: WireRecord = WireRecord {
        x: END,
        y: 0,
        z: 0,
    };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_pen_up(self) -> bool {
        self.x == PEN_UP
    }

    #[inline]
    pub fn is_end(self) -> bool {
        self.x == END
    }

    /// Reserved value leaked into y or z of an ordinary record. This is the
    /// detectable subset of sentinel collisions; x collisions are read as
    /// sentinels and cannot be told apart from control flow.
    #[inline]
    fn has_stray_sentinel(self) -> bool {
        matches!(self.y, PEN_UP | END) || matches!(self.z, PEN_UP | END)
    }

    /// Convert to a real-valued point using the stream's fixed-point unit
    #[inline]
    pub fn to_point(self, unit: f64) -> Point3 {
        Point3::new(
            self.x as f64 / unit,
            self.y as f64 / unit,
            self.z as f64 / unit,
        )
    }
}

/// One edge of a point+edge wireframe: indices into the point list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEdge {
    pub p1: i16,
    pub p2: i16,
}

impl WireEdge {
    pub const fn new(p1: i16, p2: i16) -> Self {
        Self { p1, p2 }
    }

    /// Edge-list terminator
    pub const TERM: WireEdge = WireEdge {
        p1: EDGE_END,
        p2: EDGE_END,
    };

    #[inline]
    pub fn is_end(self) -> bool {
        self.p1 == EDGE_END
    }
}

// =============================================================================
// Stream formats
// =============================================================================

/// Per-stream fixed-point scale and display spacing.
///
/// The two source data sets share the record layout and differ only here:
/// the cube/wireframe objects use a 2.14-style unit with coarse display
/// spacing, the coastline map packs a unit sphere into small integers with
/// finer spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamFormat {
    /// Fixed-point full scale: record value `unit` means 1.0
    pub unit: f64,
    /// Display pixels per projected unit
    pub display_gain: f64,
}

impl StreamFormat {
    /// Cube-scale wireframe objects (WIRE_ONE = 16384)
    pub const WIRE: StreamFormat = StreamFormat {
        unit: 16384.0,
        display_gain: 25.0,
    };

    /// Map/coastline data on the unit sphere
    pub const MAP: StreamFormat = StreamFormat {
        unit: 256.0,
        display_gain: 100.0,
    };
}

// =============================================================================
// Collaborator traits
// =============================================================================

/// External line-draw primitive. Assumed to never fail observably; the
/// renderer consumes no return value.
pub trait LineSink {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16);
}

/// Bounded record reader. `None` means the backing store is exhausted,
/// which is distinct from (and checked independently of) the END sentinel.
pub trait RecordSource {
    fn read_record(&mut self) -> Option<WireRecord>;
}

impl<I: Iterator<Item = WireRecord>> RecordSource for I {
    #[inline]
    fn read_record(&mut self) -> Option<WireRecord> {
        self.next()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced by the wireframe renderer. All pure math in the pipeline
/// is total; only malformed record streams can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// Backing store exhausted before an END sentinel was seen
    #[error("record stream exhausted after {records_read} records without an END sentinel")]
    MissingTerminator { records_read: usize },

    /// A reserved sentinel value appeared in the y or z component of an
    /// ordinary record
    #[error("record {index} carries a reserved sentinel value outside the x component")]
    InvalidRecord { index: usize },

    /// An edge references a point index outside the point list
    #[error("edge {index} references point {point} outside the point list")]
    EdgeOutOfRange { index: usize, point: i16 },
}

// =============================================================================
// Streaming renderer
// =============================================================================

/// Draws wireframe record streams through a [`LineSink`].
///
/// Holds the per-stream format, the display center, and an optional
/// keep-alive hook fired once per drawn segment (the original firmware
/// petted the watchdog between flash reads during long draws).
pub struct WireRenderer<'a> {
    pub format: StreamFormat,
    pub center_x: i32,
    pub center_y: i32,
    keep_alive: Option<&'a mut dyn FnMut()>,
}

impl<'a> WireRenderer<'a> {
    pub fn new(format: StreamFormat, center_x: i32, center_y: i32) -> Self {
        Self {
            format,
            center_x,
            center_y,
            keep_alive: None,
        }
    }

    /// Install a keep-alive callback, invoked after every drawn segment
    pub fn with_keep_alive(mut self, hook: &'a mut dyn FnMut()) -> Self {
        self.keep_alive = Some(hook);
        self
    }

    /// Run one record through the transform pipeline down to integer
    /// display coordinates
    fn project_record(&self, rec: WireRecord, view: Point3, scale: f64) -> (i32, i32) {
        let p = rec
            .to_point(self.format.unit)
            .rotate(view)
            .scale(scale)
            .project(1.0, 0, 0);
        (
            (p.x * self.format.display_gain) as i32 + self.center_x,
            (p.y * self.format.display_gain) as i32 + self.center_y,
        )
    }

    /// Draw a sentinel-delimited connected-point stream.
    ///
    /// State machine per record: END terminates, PEN_UP discards the anchor,
    /// an ordinary record is projected and either stored as the new anchor
    /// or drawn as a segment from the previous one.
    pub fn draw<R, S>(
        &mut self,
        mut records: R,
        sink: &mut S,
        view: Point3,
        scale: f64,
        color: u16,
    ) -> Result<(), StreamError>
    where
        R: RecordSource,
        S: LineSink + ?Sized,
    {
        let mut anchor: Option<(i32, i32)> = None;
        let mut index = 0usize;
        let mut segments = 0usize;

        loop {
            let Some(rec) = records.read_record() else {
                return Err(StreamError::MissingTerminator {
                    records_read: index,
                });
            };

            if rec.is_end() {
                break;
            }
            if rec.is_pen_up() {
                anchor = None;
                index += 1;
                continue;
            }
            if rec.has_stray_sentinel() {
                return Err(StreamError::InvalidRecord { index });
            }

            let (x1, y1) = self.project_record(rec, view, scale);
            if let Some((x0, y0)) = anchor {
                sink.draw_line(x0, y0, x1, y1, color);
                segments += 1;
                if let Some(hook) = self.keep_alive.as_mut() {
                    hook();
                }
            }
            anchor = Some((x1, y1));
            index += 1;
        }

        log::debug!("wire draw: {index} records, {segments} segments");
        Ok(())
    }

    /// Draw a point+edge wireframe.
    ///
    /// The edge list is terminated by an edge with p1 == -1; running off the
    /// slice without meeting it is a missing terminator, same as for point
    /// streams. Point indices are bounds-checked.
    pub fn draw_edges<S>(
        &mut self,
        points: &[WireRecord],
        edges: &[WireEdge],
        sink: &mut S,
        view: Point3,
        scale: f64,
        color: u16,
    ) -> Result<(), StreamError>
    where
        S: LineSink + ?Sized,
    {
        let mut segments = 0usize;

        for (index, edge) in edges.iter().enumerate() {
            if edge.is_end() {
                log::debug!("wire draw_edges: {segments} segments");
                return Ok(());
            }

            let fetch = |p: i16| -> Result<WireRecord, StreamError> {
                usize::try_from(p)
                    .ok()
                    .and_then(|i| points.get(i).copied())
                    .ok_or(StreamError::EdgeOutOfRange { index, point: p })
            };

            let (x0, y0) = self.project_record(fetch(edge.p1)?, view, scale);
            let (x1, y1) = self.project_record(fetch(edge.p2)?, view, scale);
            sink.draw_line(x0, y0, x1, y1, color);
            segments += 1;
            if let Some(hook) = self.keep_alive.as_mut() {
                hook();
            }
        }

        Err(StreamError::MissingTerminator {
            records_read: edges.len(),
        })
    }
}
