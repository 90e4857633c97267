use geo::{Area, Orient};

use super::kernel::Region;

/// Minimum area (m²) below which a ring is treated as a numerical sliver
/// rather than real geometry. `geo`'s boolean ops occasionally leave these
/// behind at shared edges; the spec (§4.A) calls for the kernel to repair
/// these silently rather than surface them to callers.
const DEGENERATE_RING_AREA_M2: f64 = 1e-9;

/// Best-effort repair of a region coming out of a boolean operation:
/// drop degenerate (near-zero-area) components and normalize ring
/// orientation. This is not a general self-intersection solver — `geo`'s
/// boolean ops are already guaranteed-valid by construction, so the only
/// degeneracy we see in practice is slivers at touching edges.
pub fn make_valid(region: Region) -> Region {
    let cleaned = region
        .0
        .into_iter()
        .filter(|polygon| polygon.unsigned_area() > DEGENERATE_RING_AREA_M2)
        .map(|polygon| polygon.orient(geo::orient::Direction::Default))
        .collect();

    Region::new(cleaned)
}

#[cfg(test)]
mod tests {
    use geo::Coord;

    use super::*;
    use crate::geom::kernel::{area, rect};

    #[test]
    fn repair_drops_degenerate_slivers() {
        let mut region = rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 });
        region
            .0
            .push(rect(Coord { x: 5.0, y: 5.0 }, Coord { x: 5.0 + 1e-7, y: 5.0 + 1e-7 }).0[0].clone());

        let repaired = make_valid(region);
        assert_eq!(repaired.0.len(), 1);
        assert!((area(&repaired) - 100.0).abs() < 1e-6);
    }
}
