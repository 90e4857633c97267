//! Corridor Network Generator (spec §4.C): pick a topology, emit its
//! geometry, clip it to the usable area, then repair connectivity so every
//! core and every corridor segment belongs to one network.

mod connect;
mod pattern;

use geo::Coord;

use crate::constraints::CorridorPattern;
use crate::geom::{self, Region};

pub use pattern::select_pattern;

/// Minimum area (spec §4.C: "area < w·2 is discarded") a clipped candidate
/// segment must retain to survive.
fn min_segment_area(width: f64) -> f64 {
    width * 2.0
}

/// Generate the corridor network inside `usable_area`. `boundary` (not
/// `usable_area`) drives pattern selection, matching the reference layout
/// engine's use of the building footprint rather than the net-of-core area
/// for its shape heuristics. Returns an empty `Vec` when the usable area is
/// too small to host even one corridor segment (spec §4.C) — the caller
/// must treat that as "abandon this variant", not as an error.
pub fn generate_corridors(
    boundary: &Region,
    usable_area: &Region,
    cores: &[Region],
    pattern: CorridorPattern,
    width: f64,
) -> Vec<Region> {
    let Some(bounds) = geom::bounds(boundary) else {
        return Vec::new();
    };
    let area = geom::area(boundary);
    let resolved = select_pattern(pattern, &bounds, area);

    let core_centroid = average_centroid(cores).unwrap_or_else(|| {
        let c = bounds.center();
        Coord { x: c.x, y: c.y }
    });

    let raw = pattern::emit(resolved, &bounds, core_centroid, width);

    let min_area = min_segment_area(width);
    let clipped: Vec<Region> = raw
        .into_iter()
        .map(|segment| geom::intersection(&segment, usable_area))
        .filter(|segment| geom::area(segment) >= min_area)
        .collect();

    if clipped.is_empty() {
        return Vec::new();
    }

    connect::repair(cores, clipped, width)
}

fn average_centroid(cores: &[Region]) -> Option<Coord<f64>> {
    if cores.is_empty() {
        return None;
    }
    let (mut sx, mut sy, mut n) = (0.0, 0.0, 0.0);
    for core in cores {
        if let Some(c) = geom::centroid(core) {
            sx += c.x();
            sy += c.y();
            n += 1.0;
        }
    }
    if n == 0.0 {
        return None;
    }
    Some(Coord { x: sx / n, y: sy / n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_a_connected_network_for_a_single_core_t_pattern() {
        let boundary = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 40.0, y: 20.0 });
        let core = geom::rect(Coord { x: 17.0, y: 8.0 }, Coord { x: 23.0, y: 12.0 });
        let usable = geom::difference(&boundary, &core);
        let corridors = generate_corridors(&boundary, &usable, &[core], CorridorPattern::T, 2.3);
        assert!(!corridors.is_empty());
    }

    #[test]
    fn tiny_usable_area_yields_no_corridors() {
        let boundary = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let usable = boundary.clone();
        let corridors = generate_corridors(&boundary, &usable, &[], CorridorPattern::Line, 2.3);
        assert!(corridors.is_empty());
    }

    #[test]
    fn explicit_pattern_is_honored_over_auto_selection() {
        let boundary = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 50.0, y: 48.0 });
        let usable = boundary.clone();
        let corridors = generate_corridors(&boundary, &usable, &[], CorridorPattern::Grid, 2.3);
        assert!(corridors.len() >= 4);
    }
}
