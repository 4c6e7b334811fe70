//! CORDIC fixed-point wireframe engine
//!
//! Deterministic sine/cosine from a shift-and-add CORDIC, a 3D transform
//! pipeline (rotate, scale, oblique projection), and a streaming renderer
//! for sentinel-delimited wireframe data.
//!
//! # Module Organization
//!
//! - `cordic` - fixed-point type, arctangent table, rotation engine, sin/cos
//! - `transform` - Point3 rotate/scale/shift/project
//! - `wire` - record streams, sentinels, errors, the streaming renderer
//! - `framebuffer` - RGB565 buffer with Bresenham lines and PNG export
//! - `models` - built-in cube data and RON model files

pub mod cordic;
pub mod framebuffer;
pub mod models;
pub mod transform;
pub mod wire;

// =============================================================================
// Convenience re-exports for commonly used items
// =============================================================================

pub use cordic::{
    reduce_quads, rotate, sin_cos_degrees, sin_cos_quads, sin_cos_radians, Fixed28, Rotation,
    CORDIC_K, CORDIC_ONE,
};

pub use transform::Point3;

pub use wire::{
    LineSink, RecordSource, StreamError, StreamFormat, WireEdge, WireRecord, WireRenderer, END,
    PEN_UP,
};

pub use framebuffer::{rgb565, Framebuffer, HEIGHT, WIDTH};

pub use models::{WireModel, CUBE_EDGES, CUBE_PATH, CUBE_POINTS};
