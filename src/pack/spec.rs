//! Spec preparation (spec §4.D.1): turn a [`UnitProgram`] into a flat,
//! priority-ordered list of [`UnitSpec`] values ready for placement.

use rand::Rng;

use crate::constraints::UnitProgram;

/// One unit still waiting to be placed: a type name and a concrete target
/// area drawn from its program entry's `[min, max]` range.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpec {
    pub unit_type: String,
    pub target_area: f64,
    pub priority: i32,
}

/// Efficiency factor used to estimate total unit count for `fill_available`
/// programs. The row-based packer wastes far less area to fragmentation
/// than the region-based one, so it can afford a higher target (spec
/// §4.D.1: "0.85 in the V2 legacy path, 0.95 in the V3 row-based path").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyTarget {
    RegionBased,
    RowBased,
}

impl EfficiencyTarget {
    fn factor(self) -> f64 {
        match self {
            EfficiencyTarget::RegionBased => 0.85,
            EfficiencyTarget::RowBased => 0.95,
        }
    }
}

/// Materialise `program` into an ordered list of specs, drawing each
/// target area uniformly from its `[min, max]` via `rng`. `free_area` is
/// only consulted for `fill_available` programs, to estimate the total
/// unit count.
pub fn materialize(
    program: &UnitProgram,
    free_area: f64,
    efficiency: EfficiencyTarget,
    rng: &mut impl Rng,
) -> Vec<UnitSpec> {
    let mut specs = match program {
        UnitProgram::Count { entries } => entries
            .iter()
            .flat_map(|entry| {
                let priority = entry.priority;
                let unit_type = entry.unit_type.clone();
                let (min, max) = (entry.min_area, entry.max_area);
                (0..entry.count).map(move |_| (unit_type.clone(), min, max, priority))
            })
            .map(|(unit_type, min, max, priority)| UnitSpec {
                unit_type,
                target_area: draw_area(rng, min, max),
                priority,
            })
            .collect(),
        UnitProgram::FillAvailable {
            entries,
            total_units_min,
            total_units_max,
        } => {
            let avg_target: f64 = entries
                .iter()
                .map(|e| e.percentage / 100.0 * ((e.min_area + e.max_area) / 2.0))
                .sum();
            if avg_target <= 0.0 {
                Vec::new()
            } else {
                let estimated =
                    ((free_area / avg_target) * efficiency.factor()).floor() as i64;
                let total = estimated.clamp(*total_units_min as i64, *total_units_max as i64).max(0) as u32;

                entries
                    .iter()
                    .flat_map(|entry| {
                        let count = (total as f64 * entry.percentage / 100.0).round() as u32;
                        let priority = entry.priority;
                        let unit_type = entry.unit_type.clone();
                        let (min, max) = (entry.min_area, entry.max_area);
                        (0..count).map(move |_| (unit_type.clone(), min, max, priority))
                    })
                    .map(|(unit_type, min, max, priority)| UnitSpec {
                        unit_type,
                        target_area: draw_area(rng, min, max),
                        priority,
                    })
                    .collect()
            }
        }
    };

    specs.sort_by_key(|s| s.priority);
    specs
}

fn draw_area(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{UnitCountEntry, UnitPercentEntry};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn count_program_materializes_exact_counts_in_priority_order() {
        let program = UnitProgram::Count {
            entries: vec![
                UnitCountEntry { unit_type: "2BR".into(), count: 2, min_area: 65.0, max_area: 85.0, priority: 1 },
                UnitCountEntry { unit_type: "Studio".into(), count: 3, min_area: 25.0, max_area: 35.0, priority: 0 },
            ],
        };
        let mut rng = StdRng::seed_from_u64(1);
        let specs = materialize(&program, 1000.0, EfficiencyTarget::RowBased, &mut rng);
        assert_eq!(specs.len(), 5);
        assert_eq!(specs[0].unit_type, "Studio");
        assert!(specs.iter().all(|s| s.target_area > 0.0));
    }

    #[test]
    fn fill_available_program_respects_total_unit_bounds() {
        let program = UnitProgram::FillAvailable {
            entries: vec![
                UnitPercentEntry { unit_type: "Studio".into(), percentage: 50.0, min_area: 25.0, max_area: 35.0, priority: 0 },
                UnitPercentEntry { unit_type: "1BR".into(), percentage: 50.0, min_area: 45.0, max_area: 55.0, priority: 0 },
            ],
            total_units_min: 5,
            total_units_max: 10,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let specs = materialize(&program, 50.0, EfficiencyTarget::RowBased, &mut rng);
        assert!(specs.len() >= 5 && specs.len() <= 10);
    }
}
