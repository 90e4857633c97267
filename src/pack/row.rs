//! Algorithm 2 — row-based placement (spec §4.D.4, the default algorithm).
//! The free area is sliced into strips parallel to the dominant corridor
//! direction; each strip is filled contiguously so units share walls and
//! there is no residual fragmentation, unlike the region-based algorithm.

use geo::{BoundingRect, Coord};

use crate::constraints::LayoutType;
use crate::geom::{self, Region};
use crate::pack::region::PlacedUnit;
use crate::pack::spec::UnitSpec;

/// Minimum area a clipped row strip must retain to be usable (spec §4.D.4).
const MIN_ROW_AREA_M2: f64 = 10.0;

/// Fraction of `target_area` a clipped unit rectangle must reach to be
/// committed (spec §4.D.4: "absorbs the irregularity of the free region at
/// row ends").
const ROW_FILL_MIN_MATCH: f64 = 0.6;

/// Tolerance added to a row's end when checking whether the next unit
/// still fits (spec §4.D.4).
const ROW_END_SLACK_M: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
    Mixed,
}

struct Row {
    polygon: Region,
    /// `true` when the row spans the full x-extent and is filled left to
    /// right; `false` when it spans the full y-extent and is filled
    /// bottom to top.
    along_x: bool,
}

/// Place `specs` (already sorted by priority) into `free`, given the
/// corridor network `corridors`. `layout` selects whether a corridor gets
/// units on both long sides (`DoubleLoaded`, the glossary's definition of
/// the term) or only the side nearer the building exterior
/// (`SingleLoaded`). Returns the placed units and the specs left over once
/// every row has been filled.
pub fn place(
    free: &Region,
    corridors: &[Region],
    layout: LayoutType,
    mut specs: Vec<UnitSpec>,
) -> (Vec<PlacedUnit>, Vec<UnitSpec>) {
    specs.sort_by(|a, b| b.target_area.partial_cmp(&a.target_area).unwrap_or(std::cmp::Ordering::Equal));

    let avg_target_area = if specs.is_empty() {
        30.0
    } else {
        specs.iter().map(|s| s.target_area).sum::<f64>() / specs.len() as f64
    };

    let orientation = dominant_orientation(corridors);
    let rows = split_into_rows(free, corridors, orientation, avg_target_area, layout);

    let mut pending = specs;
    let mut placed = Vec::new();
    for row in &rows {
        placed.extend(fill_row(row, &mut pending));
    }
    (placed, pending)
}

/// Classify each corridor as horizontal or vertical by its own bounding
/// box, sum lengths per class, then compare (spec §4.D.4 step 2).
fn dominant_orientation(corridors: &[Region]) -> Orientation {
    let mut horizontal_len = 0.0;
    let mut vertical_len = 0.0;
    for corridor in corridors {
        let Some(bounds) = geom::bounds(corridor) else {
            continue;
        };
        let (w, h) = (bounds.width(), bounds.height());
        if w >= h {
            horizontal_len += w;
        } else {
            vertical_len += h;
        }
    }
    if horizontal_len >= 1.3 * vertical_len {
        Orientation::Horizontal
    } else if vertical_len >= 1.3 * horizontal_len {
        Orientation::Vertical
    } else {
        Orientation::Mixed
    }
}

fn split_into_rows(
    free: &Region,
    corridors: &[Region],
    orientation: Orientation,
    avg_target_area: f64,
    layout: LayoutType,
) -> Vec<Row> {
    let Some(bounds) = geom::bounds(free) else {
        return Vec::new();
    };

    match orientation {
        Orientation::Horizontal => split_perpendicular(free, corridors, &bounds, true, layout),
        Orientation::Vertical => split_perpendicular(free, corridors, &bounds, false, layout),
        Orientation::Mixed => split_grid(free, &bounds, avg_target_area),
    }
}

/// For each corridor classified as running along the split axis, emit the
/// strip above and the strip below (or left/right for the vertical case),
/// clipped to `free` and discarded if too small. `DoubleLoaded` keeps both
/// strips (units on both long sides); `SingleLoaded` keeps only the one
/// closer to the free area's exterior edge.
fn split_perpendicular(
    free: &Region,
    corridors: &[Region],
    bounds: &geo::Rect<f64>,
    horizontal: bool,
    layout: LayoutType,
) -> Vec<Row> {
    let mut rows = Vec::new();
    for corridor in corridors {
        let Some(cb) = corridor.bounding_rect() else {
            continue;
        };
        if horizontal && cb.width() < cb.height() {
            continue;
        }
        if !horizontal && cb.height() < cb.width() {
            continue;
        }

        let (near, far) = if horizontal {
            (
                geom::rect(Coord { x: bounds.min().x, y: cb.max().y }, Coord { x: bounds.max().x, y: bounds.max().y }),
                geom::rect(Coord { x: bounds.min().x, y: bounds.min().y }, Coord { x: bounds.max().x, y: cb.min().y }),
            )
        } else {
            (
                geom::rect(Coord { x: cb.max().x, y: bounds.min().y }, Coord { x: bounds.max().x, y: bounds.max().y }),
                geom::rect(Coord { x: bounds.min().x, y: bounds.min().y }, Coord { x: cb.min().x, y: bounds.max().y }),
            )
        };

        let candidates: Vec<Region> = match layout {
            LayoutType::DoubleLoaded => vec![near, far],
            LayoutType::SingleLoaded => vec![near],
        };

        for candidate in &candidates {
            let clipped = geom::intersection(candidate, free);
            if geom::area(&clipped) >= MIN_ROW_AREA_M2 {
                rows.push(Row { polygon: clipped, along_x: horizontal });
            }
        }
    }
    rows
}

/// Fallback for `Mixed` orientation: axis-aligned strips of depth
/// `sqrt(avg_target_area) * 1.3`, stacked bottom to top across the full
/// free-area width.
fn split_grid(free: &Region, bounds: &geo::Rect<f64>, avg_target_area: f64) -> Vec<Row> {
    let depth = avg_target_area.max(1.0).sqrt() * 1.3;
    let mut rows = Vec::new();
    let mut y = bounds.min().y;
    while y < bounds.max().y {
        let y_top = (y + depth).min(bounds.max().y);
        let strip = geom::rect(Coord { x: bounds.min().x, y }, Coord { x: bounds.max().x, y: y_top });
        let clipped = geom::intersection(&strip, free);
        if geom::area(&clipped) >= MIN_ROW_AREA_M2 {
            rows.push(Row { polygon: clipped, along_x: true });
        }
        y += depth;
    }
    rows
}

fn fill_row(row: &Row, pending: &mut Vec<UnitSpec>) -> Vec<PlacedUnit> {
    let Some(bounds) = geom::bounds(&row.polygon) else {
        return Vec::new();
    };
    let (depth, row_start, row_end) = if row.along_x {
        (bounds.height(), bounds.min().x, bounds.max().x)
    } else {
        (bounds.width(), bounds.min().y, bounds.max().y)
    };
    if depth <= 0.0 {
        return Vec::new();
    }

    let mut placed = Vec::new();
    let mut current = row_start;
    let mut idx = 0;
    while idx < pending.len() && current < row_end + ROW_END_SLACK_M {
        let unit_width = pending[idx].target_area / depth;
        if current + unit_width > row_end + ROW_END_SLACK_M {
            idx += 1;
            continue;
        }

        let candidate = if row.along_x {
            geom::rect(
                Coord { x: current, y: bounds.min().y },
                Coord { x: current + unit_width, y: bounds.max().y },
            )
        } else {
            geom::rect(
                Coord { x: bounds.min().x, y: current },
                Coord { x: bounds.max().x, y: current + unit_width },
            )
        };
        let clipped = geom::intersection(&candidate, &row.polygon);
        let actual = geom::area(&clipped);

        if actual >= ROW_FILL_MIN_MATCH * pending[idx].target_area {
            let spec = pending.remove(idx);
            current += unit_width;
            placed.push(PlacedUnit { unit_type: spec.unit_type, polygon: clipped, target_area: spec.target_area });
        } else {
            idx += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_a_single_row_contiguously_with_no_fragmentation() {
        let free = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 40.0, y: 6.0 });
        let corridor = geom::rect(Coord { x: 0.0, y: -2.3 }, Coord { x: 40.0, y: 0.0 });
        let specs = vec![
            UnitSpec { unit_type: "Studio".into(), target_area: 30.0, priority: 0 },
            UnitSpec { unit_type: "Studio".into(), target_area: 30.0, priority: 0 },
        ];
        let (placed, leftover) = place(&free, &[corridor], LayoutType::DoubleLoaded, specs);
        assert_eq!(placed.len(), 2);
        assert!(leftover.is_empty());
    }

    #[test]
    fn leftover_specs_that_do_not_fit_any_row_are_returned_not_dropped() {
        let free = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 5.0 });
        let corridor = geom::rect(Coord { x: 0.0, y: -2.3 }, Coord { x: 5.0, y: 0.0 });
        let specs = vec![UnitSpec { unit_type: "3BR".into(), target_area: 200.0, priority: 0 }];
        let (placed, leftover) = place(&free, &[corridor], LayoutType::DoubleLoaded, specs);
        assert!(placed.is_empty());
        assert_eq!(leftover.len(), 1);
    }

    #[test]
    fn dominant_orientation_prefers_horizontal_for_wide_corridors() {
        let corridor = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 40.0, y: 2.3 });
        assert_eq!(dominant_orientation(&[corridor]), Orientation::Horizontal);
    }
}
