use geo::{
    Area, BooleanOps, BoundingRect, Centroid, Contains, Coord, CoordsIter, Distance, Euclidean,
    MultiPolygon, Point, Polygon, Rect,
};

use crate::error::GeomError;
use crate::geom::repair::make_valid;

/// A region: zero or more disjoint simple polygons (each possibly with
/// holes). Every kernel operation takes and returns `Region` so callers
/// never have to special-case "is this a `Polygon` or a `MultiPolygon`" —
/// spec §4.A treats both as having "the same operations".
pub type Region = MultiPolygon<f64>;

/// Construct an axis-aligned rectangular region from two corners.
pub fn rect(min: Coord<f64>, max: Coord<f64>) -> Region {
    Region::new(vec![Rect::new(min, max).to_polygon()])
}

/// Total area of a region, in m².
pub fn area(region: &Region) -> f64 {
    region.unsigned_area()
}

/// Axis-aligned bounds, or `None` for an empty region.
pub fn bounds(region: &Region) -> Option<Rect<f64>> {
    region.bounding_rect()
}

/// Centroid of a region, or `None` for an empty region.
pub fn centroid(region: &Region) -> Option<Point<f64>> {
    region.centroid()
}

/// Total length of every exterior and interior ring in the region, in m.
/// Used for corridor/facade contact length and escape-distance checks.
pub fn boundary_length(region: &Region) -> f64 {
    region
        .iter()
        .map(|polygon| ring_length(polygon.exterior().coords_iter().collect::<Vec<_>>().as_slice())
            + polygon
                .interiors()
                .iter()
                .map(|ring| ring_length(ring.coords_iter().collect::<Vec<_>>().as_slice()))
                .sum::<f64>())
        .sum()
}

fn ring_length(coords: &[Coord<f64>]) -> f64 {
    coords
        .windows(2)
        .map(|pair| Euclidean.distance(Point::from(pair[0]), Point::from(pair[1])))
        .sum()
}

/// Euclidean distance between the boundaries of two regions; `0.0` when
/// they touch or overlap.
pub fn distance(a: &Region, b: &Region) -> f64 {
    a.iter()
        .flat_map(|pa| b.iter().map(move |pb| (pa, pb)))
        .map(|(pa, pb)| Euclidean.distance(pa, pb))
        .fold(f64::INFINITY, f64::min)
}

/// Euclidean distance from `point` to the nearest boundary of `region`;
/// `0.0` when the point lies inside or on `region`. Used by §4.E checks that
/// are defined against a unit's centroid rather than its full boundary
/// (e.g. SAFE_001).
pub fn distance_to_point(region: &Region, point: Point<f64>) -> f64 {
    if region.0.is_empty() || region.contains(&point) {
        return 0.0;
    }
    region
        .iter()
        .map(|polygon| Euclidean.distance(point, polygon))
        .fold(f64::INFINITY, f64::min)
}

/// `true` when `a` and `b` are within [`super::TOUCH_TOLERANCE_M`] of each
/// other, or overlap. Used throughout §4.C/§4.E for "connected" checks.
pub fn touches(a: &Region, b: &Region, tolerance: f64) -> bool {
    !a.0.is_empty() && !b.0.is_empty() && distance(a, b) <= tolerance
}

/// `true` when `region` contains `point`.
pub fn contains_point(region: &Region, point: Point<f64>) -> bool {
    region.contains(&point)
}

/// `true` when `outer` fully contains `inner` (up to `geo`'s exact boolean
/// semantics — no tolerance).
pub fn contains_region(outer: &Region, inner: &Region) -> bool {
    inner.0.is_empty() || outer.contains(inner)
}

/// Union of two regions, repaired (spec §4.A: "the kernel is total").
pub fn union(a: &Region, b: &Region) -> Region {
    make_valid(a.union(b))
}

/// Union of any number of regions. Returns the empty region for an empty
/// iterator.
pub fn union_all<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Region {
    regions
        .into_iter()
        .cloned()
        .reduce(|a, b| union(&a, &b))
        .map(make_valid)
        .unwrap_or_else(|| Region::new(vec![]))
}

/// Intersection of two regions, repaired.
pub fn intersection(a: &Region, b: &Region) -> Region {
    make_valid(a.intersection(b))
}

/// `a \ b`, repaired.
pub fn difference(a: &Region, b: &Region) -> Region {
    make_valid(a.difference(b))
}

/// Buffer every component of `region` outward (positive `distance`) or
/// inward (negative `distance`) by `distance` metres, then re-union and
/// repair. A sufficiently negative distance may erode a component to
/// nothing; callers must treat the resulting empty region as "this piece
/// vanished" (spec §4.A), not as an error.
pub fn buffer(region: &Region, distance: f64) -> Region {
    if region.0.is_empty() {
        return Region::new(vec![]);
    }
    make_valid(geo_buffer::buffer_multi_polygon(region, distance))
}

/// Approximate the length of shared boundary between `a` and `b`: the area
/// of `a` buffered outward by `tolerance` and intersected with `b`, divided
/// by `tolerance`. Exact for a straight shared edge when `tolerance` is
/// small relative to the edge length; used throughout §4.D/§4.E wherever a
/// "facade length" or "corridor-facing width" is needed.
pub fn contact_length(a: &Region, b: &Region, tolerance: f64) -> f64 {
    if tolerance <= 0.0 {
        return 0.0;
    }
    area(&intersection(&buffer(a, tolerance), b)) / tolerance
}

/// Convenience: turn a single `Polygon` into a one-element `Region`.
pub fn from_polygon(polygon: Polygon<f64>) -> Region {
    Region::new(vec![polygon])
}

/// Assert that `region` is exactly one simple polygon, for call sites that
/// need a single piece and must reject (rather than arbitrarily pick from)
/// a multi-component result — e.g. a candidate unit clipped against a
/// region that turns out to straddle more than one piece (spec §4.D.3:
/// "reject if not a single polygon").
pub fn single(region: &Region) -> Result<&Polygon<f64>, GeomError> {
    match region.0.as_slice() {
        [] => Err(GeomError::Empty),
        [polygon] => Ok(polygon),
        many => Err(GeomError::MultiComponent { component_count: many.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_region(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Region {
        rect(Coord { x: minx, y: miny }, Coord { x: maxx, y: maxy })
    }

    #[test]
    fn area_of_rectangle_matches_product_of_sides() {
        let r = box_region(0.0, 0.0, 10.0, 4.0);
        assert!((area(&r) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn union_of_adjacent_rectangles_sums_area() {
        let a = box_region(0.0, 0.0, 5.0, 5.0);
        let b = box_region(5.0, 0.0, 10.0, 5.0);
        let u = union(&a, &b);
        assert!((area(&u) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn difference_of_overlapping_rectangles_subtracts_overlap() {
        let a = box_region(0.0, 0.0, 10.0, 10.0);
        let b = box_region(5.0, 0.0, 15.0, 10.0);
        let d = difference(&a, &b);
        assert!((area(&d) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn touching_rectangles_are_within_tolerance() {
        let a = box_region(0.0, 0.0, 5.0, 5.0);
        let b = box_region(5.0, 0.0, 10.0, 5.0);
        assert!(touches(&a, &b, 0.05));
    }

    #[test]
    fn distant_rectangles_are_not_touching() {
        let a = box_region(0.0, 0.0, 5.0, 5.0);
        let b = box_region(10.0, 0.0, 15.0, 5.0);
        assert!(!touches(&a, &b, 0.05));
        assert!((distance(&a, &b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn negative_buffer_can_erode_region_to_empty() {
        let a = box_region(0.0, 0.0, 1.0, 1.0);
        let eroded = buffer(&a, -2.0);
        assert!(area(&eroded) < 1e-9);
    }

    #[test]
    fn centroid_of_rectangle_is_its_center() {
        let a = box_region(0.0, 0.0, 10.0, 4.0);
        let c = centroid(&a).unwrap();
        assert!((c.x() - 5.0).abs() < 1e-9);
        assert!((c.y() - 2.0).abs() < 1e-9);
    }
}
