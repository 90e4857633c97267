//! Core-connectivity repair (spec §4.C steps 1-3): every core must touch at
//! least one corridor, and every corridor must belong to the single network
//! reachable from the cores.

use geo::Coord;
use rstar::RTree;

use crate::geom::{self, IndexedBox, Region};

/// Buffer distance used only for the "does this touch that" test below —
/// matches the kernel's touch tolerance plus a little slack so an emitted
/// corridor that just grazes a core still counts as connected.
const CONNECT_BUFFER_M: f64 = 0.1;

/// Repair `corridors` in place against `cores` so that (1) every core
/// touches at least one corridor and (2) every corridor is reachable from
/// the network of core-touching corridors. Returns the repaired list; never
/// fails — a building with one orphan corridor and one orphan core gets two
/// bridges, not an error.
pub fn repair(cores: &[Region], corridors: Vec<Region>, width: f64) -> Vec<Region> {
    let mut corridors = corridors;

    for core in cores {
        let core_buffered = geom::buffer(core, CONNECT_BUFFER_M);
        let already_connected = corridors
            .iter()
            .any(|c| geom::touches(&core_buffered, c, geom::TOUCH_TOLERANCE_M));
        if already_connected {
            continue;
        }
        let Some(nearest) = nearest_region(&core_buffered, &corridors) else {
            continue;
        };
        let Some(core_center) = geom::centroid(core) else {
            continue;
        };
        let Some(target_center) = geom::centroid(nearest) else {
            continue;
        };
        corridors.push(bridge_rect(core_center.into(), target_center.into(), width));
    }

    let network_indices: Vec<usize> = corridors
        .iter()
        .enumerate()
        .filter(|(_, corridor)| {
            cores
                .iter()
                .any(|core| geom::touches(&geom::buffer(core, CONNECT_BUFFER_M), corridor, geom::TOUCH_TOLERANCE_M))
        })
        .map(|(i, _)| i)
        .collect();

    if network_indices.is_empty() {
        return corridors;
    }

    let network = geom::union_all(network_indices.iter().map(|&i| &corridors[i]));

    let mut bridges = Vec::new();
    for (i, corridor) in corridors.iter().enumerate() {
        if network_indices.contains(&i) {
            continue;
        }
        if geom::touches(&network, corridor, geom::TOUCH_TOLERANCE_M) {
            continue;
        }
        let Some(network_center) = geom::centroid(&network) else {
            continue;
        };
        let Some(corridor_center) = geom::centroid(corridor) else {
            continue;
        };
        bridges.push(bridge_rect(network_center.into(), corridor_center.into(), width));
    }
    corridors.extend(bridges);
    corridors
}

/// Find the candidate nearest `from` by bounding-box center, using an R-tree
/// over `candidates`' bounds rather than a linear scan (spec §4.A: indexed
/// nearest-neighbor queries back every "closest of N polygons" lookup).
fn nearest_region<'a>(from: &Region, candidates: &'a [Region]) -> Option<&'a Region> {
    let Some(from_bounds) = geom::bounds(from) else {
        return None;
    };
    let from_center: [f64; 2] = from_bounds.center().into();

    let boxes: Vec<IndexedBox> = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, region)| geom::bounds(region).map(|bbox| IndexedBox::new(idx, bbox)))
        .collect();
    if boxes.is_empty() {
        return None;
    }

    let tree = RTree::bulk_load(boxes);
    let nearest = tree.nearest_neighbor(&from_center)?;
    candidates.get(nearest.idx())
}

/// An axis-aligned rectangle connecting the two centers, `width` wide,
/// running along whichever axis has the larger separation.
fn bridge_rect(a: Coord<f64>, b: Coord<f64>, width: f64) -> Region {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let half = width / 2.0;
    if dx >= dy {
        let (minx, maxx) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        geom::rect(
            Coord { x: minx, y: a.y - half },
            Coord { x: maxx, y: a.y + half },
        )
    } else {
        let (miny, maxy) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        geom::rect(
            Coord { x: a.x - half, y: miny },
            Coord { x: a.x + half, y: maxy },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orphan_core_gets_bridged_to_the_nearest_corridor() {
        let core = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 5.0 });
        let corridor = geom::rect(Coord { x: 20.0, y: 0.0 }, Coord { x: 22.3, y: 50.0 });
        let repaired = repair(&[core.clone()], vec![corridor], 2.3);
        assert_eq!(repaired.len(), 2);
        let core_buffered = geom::buffer(&core, CONNECT_BUFFER_M);
        assert!(repaired
            .iter()
            .any(|c| geom::touches(&core_buffered, c, geom::TOUCH_TOLERANCE_M)));
    }

    #[test]
    fn already_connected_core_needs_no_bridge() {
        let core = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 5.0 });
        let corridor = geom::rect(Coord { x: 5.0, y: 0.0 }, Coord { x: 7.3, y: 5.0 });
        let repaired = repair(&[core], vec![corridor], 2.3);
        assert_eq!(repaired.len(), 1);
    }

    #[test]
    fn isolated_corridor_gets_bridged_into_the_core_network() {
        let core = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 5.0, y: 5.0 });
        let connected = geom::rect(Coord { x: 5.0, y: 0.0 }, Coord { x: 7.3, y: 5.0 });
        let isolated = geom::rect(Coord { x: 50.0, y: 50.0 }, Coord { x: 52.3, y: 55.0 });
        let repaired = repair(&[core], vec![connected, isolated], 2.3);
        assert_eq!(repaired.len(), 3);
    }
}
