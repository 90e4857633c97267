//! Core Placer (spec §4.B): choose the position and shape of 1, 2, or 4
//! service cores inside the usable area.

use geo::{Coord, Rect};

use crate::constraints::{CoreCount, PreferredLocation};
use crate::geom::{self, Region};

/// Fraction of the requested core area a clipped candidate must retain to
/// be accepted (spec §4.B: "falls below 50% of the requested area").
const MIN_AREA_RETENTION: f64 = 0.5;

/// Place `count` cores inside `usable_area`, each targeting
/// `area_per_core` m², honoring `location_hint`. Returns an empty `Vec` if
/// any candidate core fails the area-retention check after clipping — the
/// caller must treat `cores = []` as "abandon this variant" (spec §4.B,
/// §7).
pub fn place_cores(
    usable_area: &Region,
    count: CoreCount,
    area_per_core: f64,
    location_hint: PreferredLocation,
) -> Vec<Region> {
    let Some(bounds) = geom::bounds(usable_area) else {
        return Vec::new();
    };
    let Some(centroid) = geom::centroid(usable_area) else {
        return Vec::new();
    };

    let centers = match count {
        CoreCount::One => vec![single_core_center(&bounds, centroid.into(), location_hint)],
        CoreCount::Two => dual_core_centers(&bounds, centroid.into()),
        CoreCount::Four => quad_core_centers(&bounds, centroid.into()),
    };

    let (width, depth) = core_dimensions(area_per_core);

    let mut cores = Vec::with_capacity(centers.len());
    for center in centers {
        let candidate = geom::rect(
            Coord { x: center.x - width / 2.0, y: center.y - depth / 2.0 },
            Coord { x: center.x + width / 2.0, y: center.y + depth / 2.0 },
        );
        let clipped = geom::intersection(&candidate, usable_area);
        if geom::area(&clipped) < area_per_core * MIN_AREA_RETENTION {
            return Vec::new();
        }
        cores.push(clipped);
    }

    cores
}

/// Near-square, slightly-wider-than-deep footprint (spec §4.B).
fn core_dimensions(area: f64) -> (f64, f64) {
    let width = (area * 0.9).sqrt();
    let depth = area / width;
    (width, depth)
}

fn single_core_center(bounds: &Rect<f64>, centroid: Coord<f64>, hint: PreferredLocation) -> Coord<f64> {
    let w = bounds.width();
    let h = bounds.height();
    match hint {
        PreferredLocation::Center | PreferredLocation::Auto => centroid,
        PreferredLocation::North => Coord { x: centroid.x, y: centroid.y + h * 0.2 },
        PreferredLocation::South => Coord { x: centroid.x, y: centroid.y - h * 0.2 },
        PreferredLocation::East => Coord { x: centroid.x + w * 0.2, y: centroid.y },
        PreferredLocation::West => Coord { x: centroid.x - w * 0.2, y: centroid.y },
    }
}

/// Opposite ends of the long axis, 20% bounds-offset from center
/// (spec §4.B: "east/west if width > 1.5·height, else north/south").
fn dual_core_centers(bounds: &Rect<f64>, centroid: Coord<f64>) -> Vec<Coord<f64>> {
    let w = bounds.width();
    let h = bounds.height();
    if w > 1.5 * h {
        vec![
            Coord { x: centroid.x - w * 0.2, y: centroid.y },
            Coord { x: centroid.x + w * 0.2, y: centroid.y },
        ]
    } else {
        vec![
            Coord { x: centroid.x, y: centroid.y - h * 0.2 },
            Coord { x: centroid.x, y: centroid.y + h * 0.2 },
        ]
    }
}

/// One center near each corner, 25% bounds-offset on both axes
/// (spec §4.B).
fn quad_core_centers(bounds: &Rect<f64>, centroid: Coord<f64>) -> Vec<Coord<f64>> {
    let w = bounds.width();
    let h = bounds.height();
    vec![
        Coord { x: centroid.x - w * 0.25, y: centroid.y - h * 0.25 },
        Coord { x: centroid.x + w * 0.25, y: centroid.y - h * 0.25 },
        Coord { x: centroid.x - w * 0.25, y: centroid.y + h * 0.25 },
        Coord { x: centroid.x + w * 0.25, y: centroid.y + h * 0.25 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_usable(side: f64) -> Region {
        geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: side, y: side })
    }

    #[test]
    fn single_core_centers_on_centroid_when_hint_is_center() {
        let usable = square_usable(30.0);
        let cores = place_cores(&usable, CoreCount::One, 40.0, PreferredLocation::Center);
        assert_eq!(cores.len(), 1);
        let c = geom::centroid(&cores[0]).unwrap();
        assert!((c.x() - 15.0).abs() < 0.5);
        assert!((c.y() - 15.0).abs() < 0.5);
    }

    #[test]
    fn dual_core_splits_along_long_axis() {
        let wide = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 20.0 });
        let cores = place_cores(&wide, CoreCount::Two, 40.0, PreferredLocation::Auto);
        assert_eq!(cores.len(), 2);
        let c0 = geom::centroid(&cores[0]).unwrap();
        let c1 = geom::centroid(&cores[1]).unwrap();
        assert!((c0.y() - c1.y()).abs() < 1e-6);
        assert!(c0.x() < c1.x());
    }

    #[test]
    fn quad_core_places_one_near_each_corner() {
        let usable = square_usable(100.0);
        let cores = place_cores(&usable, CoreCount::Four, 30.0, PreferredLocation::Auto);
        assert_eq!(cores.len(), 4);
    }

    #[test]
    fn oversized_core_request_on_tiny_usable_area_fails() {
        let tiny = square_usable(3.0);
        let cores = place_cores(&tiny, CoreCount::One, 200.0, PreferredLocation::Center);
        assert!(cores.is_empty());
    }
}
