use geo::{Coord, Rect};
use smallvec::{smallvec, SmallVec};

use crate::constraints::CorridorPattern;
use crate::geom::{self, Region};

/// Every pattern emits at most four raw segments (`H`/`Plus`/`Grid` at the
/// non-square-large branch), so the emitters return a stack-allocated
/// collection rather than heap-allocating a `Vec` for the common 1-3 case.
pub type Segments = SmallVec<[Region; 4]>;

/// Resolve `Auto` to a concrete pattern via the shape-based decision tree
/// (spec §4.C). Any other pattern passes through unchanged — forcing a
/// pattern is a caller choice, not something the tree overrides.
pub fn select_pattern(pattern: CorridorPattern, bounds: &Rect<f64>, area: f64) -> CorridorPattern {
    if pattern != CorridorPattern::Auto {
        return pattern;
    }

    let aspect = bounds.width() / bounds.height();
    let is_square = (0.85..=1.15).contains(&aspect);

    if area > 2500.0 {
        CorridorPattern::H
    } else if !(0.4..=2.5).contains(&aspect) {
        CorridorPattern::L
    } else if is_square && area > 2000.0 {
        CorridorPattern::Plus
    } else if is_square {
        CorridorPattern::T
    } else if area > 1500.0 {
        CorridorPattern::U
    } else {
        CorridorPattern::T
    }
}

/// Emit the raw (unclipped) corridor rectangles for `pattern`, centered on
/// `core_centroid` within `bounds`, at `width` (already clamped to
/// `[2.2, 2.5]` by the caller).
pub fn emit(pattern: CorridorPattern, bounds: &Rect<f64>, core_centroid: Coord<f64>, width: f64) -> Segments {
    match pattern {
        CorridorPattern::Auto => unreachable!("select_pattern must resolve Auto before emit"),
        CorridorPattern::T => emit_t(bounds, core_centroid, width),
        CorridorPattern::L => emit_l(bounds, core_centroid, width),
        CorridorPattern::U => emit_u(bounds, width),
        CorridorPattern::H => emit_h(bounds, core_centroid, width),
        CorridorPattern::Plus => emit_plus(bounds, core_centroid, width),
        CorridorPattern::Line => emit_line(bounds, core_centroid, width),
        CorridorPattern::Grid => emit_grid(bounds, width),
    }
}

fn strip(min: Coord<f64>, max: Coord<f64>) -> Region {
    geom::rect(min, max)
}

/// Full-length spine through the core centroid on the long axis, plus a
/// perpendicular branch 80% of the short axis centered on the core.
fn emit_t(bounds: &Rect<f64>, core: Coord<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, maxy) = corners(bounds);
    if bounds.width() >= bounds.height() {
        let main = strip(Coord { x: minx, y: core.y - w / 2.0 }, Coord { x: maxx, y: core.y + w / 2.0 });
        let half_branch = bounds.height() * 0.8 / 2.0;
        let branch = strip(
            Coord { x: core.x - w / 2.0, y: core.y - half_branch },
            Coord { x: core.x + w / 2.0, y: core.y + half_branch },
        );
        smallvec![main, branch]
    } else {
        let main = strip(Coord { x: core.x - w / 2.0, y: miny }, Coord { x: core.x + w / 2.0, y: maxy });
        let half_branch = bounds.width() * 0.8 / 2.0;
        let branch = strip(
            Coord { x: core.x - half_branch, y: core.y - w / 2.0 },
            Coord { x: core.x + half_branch, y: core.y + w / 2.0 },
        );
        smallvec![main, branch]
    }
}

/// Two perpendicular segments meeting at the core.
fn emit_l(bounds: &Rect<f64>, core: Coord<f64>, w: f64) -> Segments {
    let (minx, miny, ..) = corners(bounds);
    let horiz = strip(Coord { x: minx, y: core.y - w / 2.0 }, Coord { x: core.x + w, y: core.y + w / 2.0 });
    let vert = strip(Coord { x: core.x - w / 2.0, y: miny }, Coord { x: core.x + w / 2.0, y: core.y + w });
    smallvec![horiz, vert]
}

/// Three sides of a "U": left vertical, bottom horizontal, right vertical,
/// each 80% of the corresponding bounds extent; the core opens onto the top.
fn emit_u(bounds: &Rect<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, _maxy) = corners(bounds);
    let h = bounds.height();
    let width = bounds.width();
    let side_height = h * 0.8;
    let side_start_y = miny + h * 0.1;
    let bottom_width = width * 0.8;
    let bottom_start_x = minx + width * 0.1;

    let left = strip(Coord { x: minx + w, y: side_start_y }, Coord { x: minx + 2.0 * w, y: side_start_y + side_height });
    let bottom = strip(Coord { x: bottom_start_x, y: miny + w }, Coord { x: bottom_start_x + bottom_width, y: miny + 2.0 * w });
    let right = strip(Coord { x: maxx - 2.0 * w, y: side_start_y }, Coord { x: maxx - w, y: side_start_y + side_height });
    smallvec![left, bottom, right]
}

/// Two vertical spines at `x = 25%W` and `x = 75%W`, joined by a
/// horizontal connector through the core centroid.
fn emit_h(bounds: &Rect<f64>, core: Coord<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, maxy) = corners(bounds);
    let width = bounds.width();
    let left_x = minx + width * 0.25;
    let right_x = maxx - width * 0.25;

    let left = strip(Coord { x: left_x - w / 2.0, y: miny + w }, Coord { x: left_x + w / 2.0, y: maxy - w });
    let right = strip(Coord { x: right_x - w / 2.0, y: miny + w }, Coord { x: right_x + w / 2.0, y: maxy - w });
    let connector = strip(
        Coord { x: left_x + w / 2.0, y: core.y - w / 2.0 },
        Coord { x: right_x - w / 2.0, y: core.y + w / 2.0 },
    );
    smallvec![left, right, connector]
}

/// Four arms radiating from the core centroid to 20% inset from each of
/// the four bounds.
fn emit_plus(bounds: &Rect<f64>, core: Coord<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, maxy) = corners(bounds);
    let width = bounds.width();
    let height = bounds.height();

    let north = strip(Coord { x: core.x - w / 2.0, y: core.y + w / 2.0 }, Coord { x: core.x + w / 2.0, y: maxy - height * 0.2 });
    let south = strip(Coord { x: core.x - w / 2.0, y: miny + height * 0.2 }, Coord { x: core.x + w / 2.0, y: core.y - w / 2.0 });
    let east = strip(Coord { x: core.x + w / 2.0, y: core.y - w / 2.0 }, Coord { x: maxx - width * 0.2, y: core.y + w / 2.0 });
    let west = strip(Coord { x: minx + width * 0.2, y: core.y - w / 2.0 }, Coord { x: core.x - w / 2.0, y: core.y + w / 2.0 });
    smallvec![north, south, east, west]
}

/// One full-length spine through the core centroid, on the long axis.
fn emit_line(bounds: &Rect<f64>, core: Coord<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, maxy) = corners(bounds);
    if bounds.width() >= bounds.height() {
        smallvec![strip(Coord { x: minx, y: core.y - w / 2.0 }, Coord { x: maxx, y: core.y + w / 2.0 })]
    } else {
        smallvec![strip(Coord { x: core.x - w / 2.0, y: miny }, Coord { x: core.x + w / 2.0, y: maxy })]
    }
}

/// 2-3 horizontal corridors equally spaced across `H`, crossed by 2-3
/// vertical corridors equally spaced across `W`; spacing clamped to
/// `[15, 30]` m (spec §4.C, resolving the disputed divisor to `/2.5`).
fn emit_grid(bounds: &Rect<f64>, w: f64) -> Segments {
    let (minx, miny, maxx, maxy) = corners(bounds);
    let width = bounds.width();
    let height = bounds.height();
    let spacing = (width.min(height) / 2.5).clamp(15.0, 30.0);

    let count_h = grid_line_count(height, spacing);
    let count_v = grid_line_count(width, spacing);

    let mut corridors = Segments::with_capacity((count_h + count_v) as usize);
    for i in 1..=count_h {
        let y = miny + height * (i as f64) / (count_h as f64 + 1.0);
        corridors.push(strip(Coord { x: minx, y: y - w / 2.0 }, Coord { x: maxx, y: y + w / 2.0 }));
    }
    for j in 1..=count_v {
        let x = minx + width * (j as f64) / (count_v as f64 + 1.0);
        corridors.push(strip(Coord { x: x - w / 2.0, y: miny }, Coord { x: x + w / 2.0, y: maxy }));
    }
    corridors
}

fn grid_line_count(extent: f64, spacing: f64) -> u32 {
    if extent / spacing > 2.5 {
        3
    } else {
        2
    }
}

fn corners(bounds: &Rect<f64>) -> (f64, f64, f64, f64) {
    (bounds.min().x, bounds.min().y, bounds.max().x, bounds.max().y)
}
