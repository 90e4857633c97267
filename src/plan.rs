//! The output data model (spec §3, §6): a generated floor plan, its
//! derived metrics, and the stable identifier attached to each variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geom::{self, Region};
use crate::pack::PlacedUnit;

/// One placed unit, with its derived area and centroid baked in so
/// downstream consumers (the validator, an exporter) never need to
/// recompute them from the polygon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub unit_type: String,
    pub polygon: Region,
    pub area: f64,
    pub centroid: (f64, f64),
}

impl Unit {
    pub fn from_placed(id: u32, placed: PlacedUnit) -> Self {
        let area = geom::area(&placed.polygon);
        let centroid = geom::centroid(&placed.polygon)
            .map(|c| (c.x(), c.y()))
            .unwrap_or((0.0, 0.0));
        Self { id, unit_type: placed.unit_type, polygon: placed.polygon, area, centroid }
    }
}

/// Identifies one randomized generation of a floor plan for a fixed input
/// and constraint set (spec glossary: "Variant").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantId {
    pub number: u32,
    pub id: String,
}

impl VariantId {
    pub fn new(seed: u64, number: u32) -> Self {
        Self { number, id: format!("variant-{seed}-{number}") }
    }
}

/// A complete generated floor plan (spec §3 "FloorPlan").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorPlan {
    pub variant: VariantId,
    pub boundary: Region,
    pub usable_area: Region,
    pub cores: Vec<Region>,
    pub corridors: Vec<Region>,
    pub units: Vec<Unit>,
}

/// Derived measurements over a [`FloorPlan`] (spec §6 "Outputs").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_area: f64,
    pub usable_area: f64,
    pub core_area: f64,
    pub corridor_area: f64,
    pub units_area: f64,
    pub efficiency: f64,
    pub corridor_ratio: f64,
    pub units_count: usize,
    pub units_by_type: BTreeMap<String, u32>,
}

impl Metrics {
    pub fn compute(plan: &FloorPlan) -> Self {
        let total_area = geom::area(&plan.boundary);
        let usable_area = geom::area(&plan.usable_area);
        let core_area = plan.cores.iter().map(geom::area).sum();
        let corridor_area = plan.corridors.iter().map(geom::area).sum();
        let units_area: f64 = plan.units.iter().map(|u| u.area).sum();

        let mut units_by_type = BTreeMap::new();
        for unit in &plan.units {
            *units_by_type.entry(unit.unit_type.clone()).or_insert(0) += 1;
        }

        Self {
            total_area,
            usable_area,
            core_area,
            corridor_area,
            units_area,
            efficiency: if total_area > 0.0 { units_area / total_area } else { 0.0 },
            corridor_ratio: if total_area > 0.0 { corridor_area / total_area } else { 0.0 },
            units_count: plan.units.len(),
            units_by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn square(side: f64) -> Region {
        geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: side, y: side })
    }

    #[test]
    fn metrics_efficiency_is_units_area_over_total_area() {
        let plan = FloorPlan {
            variant: VariantId::new(1, 0),
            boundary: square(10.0),
            usable_area: square(10.0),
            cores: vec![],
            corridors: vec![],
            units: vec![Unit::from_placed(
                0,
                PlacedUnit { unit_type: "Studio".into(), polygon: square(5.0), target_area: 25.0 },
            )],
        };
        let metrics = Metrics::compute(&plan);
        assert!((metrics.efficiency - 0.25).abs() < 1e-9);
        assert_eq!(metrics.units_by_type.get("Studio"), Some(&1));
    }

    #[test]
    fn variant_id_embeds_seed_and_number() {
        let v = VariantId::new(42, 3);
        assert_eq!(v.id, "variant-42-3");
    }
}
