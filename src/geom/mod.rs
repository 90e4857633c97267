//! Geometry kernel: the value types and operations every other module is
//! built on (spec §4.A). Everything here is a pure function over `geo`
//! types — no mutation, no shared state. A region is always represented as
//! a [`Region`] (a `MultiPolygon<f64>`), even when it happens to be a
//! single simple polygon; this lets every operation return the same type
//! regardless of how many components a boolean op produces ("when a
//! difference or intersection would yield multiple components, the result
//! is a MultiPolygon").

mod bbox;
mod kernel;
mod repair;

pub use bbox::IndexedBox;
pub use kernel::{
    area, boundary_length, bounds, buffer, centroid, contains_point, contains_region,
    contact_length, difference, distance, distance_to_point, from_polygon, intersection, rect,
    single, touches, union, union_all, Region,
};
pub use repair::make_valid;

/// Distance below which two regions are considered touching (spec §4.A / §4.C).
pub const TOUCH_TOLERANCE_M: f64 = 0.05;
