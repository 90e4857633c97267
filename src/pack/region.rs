//! Algorithm 1 — region-based multi-pass placement (spec §4.D.2/§4.D.3, the
//! legacy path). Free area is a list of disjoint polygons; each commit
//! subtracts the placed unit (buffered for wall thickness) from every
//! region, which is the dominant source of coverage loss the row-based
//! algorithm (§4.D.4) was built to avoid.

use geo::Coord;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::geom::{self, Region};
use crate::pack::pass::{Pass, PASSES, SCORE_SATURATION};
use crate::pack::spec::UnitSpec;

/// Wall-thickness buffer subtracted from every region after a commit (spec
/// §4.A open question: "0.15 m for region-based").
pub const WALL_BUFFER_M: f64 = 0.15;

/// A unit committed by the region-based packer.
#[derive(Debug, Clone)]
pub struct PlacedUnit {
    pub unit_type: String,
    pub polygon: Region,
    pub target_area: f64,
}

/// Place as many `specs` as possible into `free_area`, scoring candidates
/// against `boundary` (for facade) and `corridor_union` (for access).
/// Returns the placed units and the specs that remained unplaced after the
/// last pass (spec §4.D.5: "never throws on partial success").
pub fn place(
    free_area: &Region,
    boundary: &Region,
    corridor_union: &Region,
    specs: Vec<UnitSpec>,
    rng: &mut impl Rng,
) -> (Vec<PlacedUnit>, Vec<UnitSpec>) {
    let mut regions: Vec<Region> = free_area
        .0
        .iter()
        .map(|polygon| geom::from_polygon(polygon.clone()))
        .collect();

    let mut placed = Vec::new();
    let mut pending = specs;

    for pass in &PASSES {
        let mut deferred = Vec::new();
        for spec in pending {
            match place_one(&mut regions, boundary, corridor_union, &spec, pass, rng) {
                Some(unit) => placed.push(unit),
                None => deferred.push(spec),
            }
        }
        pending = deferred;
    }

    (placed, pending)
}

fn place_one(
    regions: &mut Vec<Region>,
    boundary: &Region,
    corridor_union: &Region,
    spec: &UnitSpec,
    pass: &Pass,
    rng: &mut impl Rng,
) -> Option<PlacedUnit> {
    let unit_width = (spec.target_area * 1.3).sqrt();
    let unit_depth = spec.target_area / unit_width;

    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.shuffle(rng);

    let mut best: Option<(f64, Region)> = None;
    'regions: for idx in order {
        let region_area = geom::area(&regions[idx]);
        if region_area < spec.target_area * 0.3 {
            continue;
        }
        let Some(bounds) = geom::bounds(&regions[idx]) else {
            continue;
        };

        let s = if region_area < 100.0 {
            0.15
        } else if region_area < 500.0 {
            0.20
        } else {
            0.25
        };
        let step_x = (unit_width * s).max(0.2);
        let step_y = (unit_depth * s).max(0.2);

        let mut attempts = 0u32;
        let mut y = bounds.min().y;
        while y < bounds.max().y {
            let mut x = bounds.min().x;
            while x < bounds.max().x {
                attempts += 1;
                if attempts > pass.max_attempts {
                    break 'regions;
                }

                let candidate = geom::rect(
                    Coord { x, y },
                    Coord { x: x + unit_width, y: y + unit_depth },
                );
                let clipped = geom::intersection(&candidate, &regions[idx]);
                if geom::single(&clipped).is_err() {
                    x += step_x;
                    continue;
                }
                let actual = geom::area(&clipped);
                if actual < spec.target_area * pass.min_area_match {
                    x += step_x;
                    continue;
                }

                let facade_length = geom::contact_length(&clipped, boundary, geom::TOUCH_TOLERANCE_M);
                if facade_length < pass.min_perimeter {
                    x += step_x;
                    continue;
                }
                let corridor_distance = geom::distance(&clipped, corridor_union);
                if corridor_distance > pass.max_corridor_distance {
                    x += step_x;
                    continue;
                }
                let facing_width = geom::contact_length(&clipped, corridor_union, geom::TOUCH_TOLERANCE_M);
                if facing_width < pass.min_corridor_facing_width {
                    x += step_x;
                    continue;
                }

                let area_match = (actual / spec.target_area).min(spec.target_area / actual);
                let perimeter_score = (facade_length / 3.0).min(1.0);
                let corridor_score = if pass.max_corridor_distance.is_finite() {
                    (1.0 - corridor_distance / pass.max_corridor_distance).max(0.0)
                } else {
                    1.0
                };
                let contact_area = contact_area(&clipped, corridor_union);
                let contact_bonus = if contact_area > 0.0 && contact_area <= 0.1 { 1.0 } else { 0.0 };

                let score = 8.0 * area_match + 3.0 * perimeter_score + 4.0 * corridor_score + 2.0 * contact_bonus;

                if best.as_ref().map(|(b, _)| score > *b).unwrap_or(true) {
                    best = Some((score, clipped));
                }
                if score >= SCORE_SATURATION {
                    break 'regions;
                }

                x += step_x;
            }
            y += step_y;
        }
    }

    let (_, committed) = best?;
    for region in regions.iter_mut() {
        let remainder = geom::difference(region, &geom::buffer(&committed, WALL_BUFFER_M));
        *region = remainder;
    }
    regions.retain(|r| geom::area(r) > 1e-6);
    // Re-flatten any MultiPolygon remainders into separate single-polygon regions.
    let mut flattened = Vec::with_capacity(regions.len());
    for region in regions.drain(..) {
        for polygon in region.0 {
            flattened.push(geom::from_polygon(polygon));
        }
    }
    *regions = flattened;

    Some(PlacedUnit {
        unit_type: spec.unit_type.clone(),
        polygon: committed,
        target_area: spec.target_area,
    })
}

fn contact_area(a: &Region, b: &Region) -> f64 {
    geom::area(&geom::intersection(&geom::buffer(a, 0.01), b))
}
