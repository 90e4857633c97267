//! Unit Packer (spec §4.D): the largest subsystem. Takes the free area
//! (`usable_area \ (cores ∪ corridors)`) and an ordered unit program and
//! returns placed units, choosing between the row-based (default) and
//! region-based algorithms.

mod pass;
mod region;
mod row;
pub mod spec;

use rand::Rng;

use crate::constraints::{LayoutType, PackerAlgorithm, UnitProgram};
use crate::geom::{self, Region};
use crate::pack::spec::{materialize, EfficiencyTarget};

pub use region::PlacedUnit;

/// Run the configured packer algorithm end to end: materialize the unit
/// program against the free area, then place as many specs as possible.
/// Never fails — an infeasible program simply returns an empty `placed`
/// list with every spec in `deferred` (spec §4.D.5, §7 "partial placement
/// is not an error").
pub fn pack(
    algorithm: PackerAlgorithm,
    usable_area: &Region,
    boundary: &Region,
    cores: &[Region],
    corridors: &[Region],
    program: &UnitProgram,
    layout: LayoutType,
    rng: &mut impl Rng,
) -> (Vec<PlacedUnit>, Vec<spec::UnitSpec>) {
    let occupied = geom::union_all(cores.iter().chain(corridors.iter()));
    let free = geom::difference(usable_area, &occupied);
    let free_area = geom::area(&free);

    let efficiency = match algorithm {
        PackerAlgorithm::RegionBased => EfficiencyTarget::RegionBased,
        PackerAlgorithm::RowBased => EfficiencyTarget::RowBased,
    };
    let specs = materialize(program, free_area, efficiency, rng);

    match algorithm {
        PackerAlgorithm::RowBased => row::place(&free, corridors, layout, specs),
        PackerAlgorithm::RegionBased => {
            let corridor_union = geom::union_all(corridors.iter());
            region::place(&free, boundary, &corridor_union, specs, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{LayoutType, UnitCountEntry, UnitProgram};
    use geo::Coord;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn row_based_packer_places_units_in_a_simple_rectangle() {
        let boundary = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 40.0, y: 14.0 });
        let core = geom::rect(Coord { x: 18.0, y: 5.0 }, Coord { x: 22.0, y: 9.0 });
        let corridor = geom::rect(Coord { x: 0.0, y: 5.8 }, Coord { x: 40.0, y: 8.1 });
        let usable = boundary.clone();
        let program = UnitProgram::Count {
            entries: vec![UnitCountEntry { unit_type: "Studio".into(), count: 6, min_area: 25.0, max_area: 32.0, priority: 0 }],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let (placed, _) = pack(PackerAlgorithm::RowBased, &usable, &boundary, &[core], &[corridor], &program, LayoutType::DoubleLoaded, &mut rng);
        assert!(!placed.is_empty());
    }

    #[test]
    fn region_based_packer_places_units_in_a_simple_rectangle() {
        let boundary = geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: 40.0, y: 14.0 });
        let core = geom::rect(Coord { x: 18.0, y: 5.0 }, Coord { x: 22.0, y: 9.0 });
        let corridor = geom::rect(Coord { x: 0.0, y: 5.8 }, Coord { x: 40.0, y: 8.1 });
        let usable = boundary.clone();
        let program = UnitProgram::Count {
            entries: vec![UnitCountEntry { unit_type: "Studio".into(), count: 4, min_area: 25.0, max_area: 32.0, priority: 0 }],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let (placed, _) = pack(PackerAlgorithm::RegionBased, &usable, &boundary, &[core], &[corridor], &program, LayoutType::DoubleLoaded, &mut rng);
        assert!(!placed.is_empty());
    }
}
