//! Top-level orchestration (SPEC_FULL §6A, original spec §3 "Lifecycle" and
//! §5 "Determinism"): wires the geometry kernel, core placer, corridor
//! generator, unit packer, and validator into the single linear pipeline
//! A → B → C → D → E, run once per variant.

use anyhow::{ensure, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constraints::{Constraints, FixedElements, Obstacle, UnitProgram};
use crate::corridor;
use crate::core_placer;
use crate::geom::{self, Region};
use crate::pack;
use crate::plan::{FloorPlan, Metrics, Unit, VariantId};
use crate::rng::rng_for_variant;
use crate::validate::{self, Report};

/// How much progress narration a [`generate`] call emits to stderr (spec
/// SPEC_FULL §2 "Logging": the reference crate gates `eprintln!` behind a
/// verbosity count rather than pulling in a logging crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Progress,
    Debug,
}

impl Verbosity {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Progress,
            _ => Verbosity::Debug,
        }
    }
}

/// The full set of inputs to one generation run (original spec §6
/// "Inputs"; `fixed_elements` and obstacle kinds are SPEC_FULL §3
/// supplements).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Input {
    pub boundary: Region,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub fixed_elements: FixedElements,
    pub program: UnitProgram,
    #[serde(default)]
    pub constraints: Constraints,
    pub variant_count: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// One successfully generated variant: the plan itself, its derived
/// metrics, and the validator's verdict (original spec §6 "Outputs").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub plan: FloorPlan,
    pub metrics: Metrics,
    pub report: Report,
}

/// Check the entry-point preconditions the original spec calls out under
/// §7 "Input malformation": "fails fast at the entry point with a
/// structured error naming the field."
fn validate_input(input: &Input) -> Result<()> {
    ensure!(
        input.boundary.0.len() == 1,
        "boundary: expected a single simple polygon, got {} components",
        input.boundary.0.len()
    );
    let exterior_len = input
        .boundary
        .0
        .first()
        .map(|p| p.exterior().0.len())
        .unwrap_or(0);
    ensure!(
        exterior_len >= 4, // closed ring: 3 unique vertices + repeated first point
        "boundary: needs at least 3 unique vertices, got {}",
        exterior_len.saturating_sub(1)
    );
    ensure!(geom::area(&input.boundary) > 0.0, "boundary: has zero area");
    for (i, obstacle) in input.obstacles.iter().enumerate() {
        ensure!(
            geom::contains_region(&input.boundary, &obstacle.polygon),
            "obstacles[{i}]: must be contained in boundary"
        );
    }
    ensure!(input.variant_count > 0, "variant_count: must be positive");
    Ok(())
}

/// Run the full pipeline for every variant in `input`, skipping (not
/// failing) any variant the generator abandons as infeasible (original
/// spec §7: "the affected variant is abandoned and the orchestrator is
/// notified; other variants proceed").
pub fn generate(input: &Input, verbosity: Verbosity) -> Result<Vec<Variant>> {
    validate_input(input)?;

    let base_seed = input.seed.unwrap_or_else(fallback_seed);
    let mut variants = Vec::with_capacity(input.variant_count as usize);

    for number in 0..input.variant_count {
        let mut rng = rng_for_variant(base_seed, number);
        match generate_variant(input, base_seed, number, &mut rng) {
            Some(variant) => {
                if verbosity >= Verbosity::Progress {
                    eprintln!(
                        "[floorgen] variant {number}: {} units, efficiency {:.2}, score {:.0}",
                        variant.metrics.units_count, variant.metrics.efficiency, variant.report.score
                    );
                }
                variants.push(variant);
            }
            None if verbosity >= Verbosity::Progress => {
                eprintln!("[floorgen] variant {number}: abandoned (infeasible constraints)");
            }
            None => {}
        }
    }

    Ok(variants)
}

/// Run components A through E once, for one variant. `Ok`-less: an
/// abandoned variant is a normal `None`, not an error (SPEC_FULL §7).
fn generate_variant(input: &Input, base_seed: u64, number: u32, rng: &mut impl Rng) -> Option<Variant> {
    let obstacles_union = geom::union_all(input.obstacles.iter().map(|o| &o.polygon));
    let usable_area = geom::difference(&input.boundary, &obstacles_union);
    if geom::area(&usable_area) <= 0.0 {
        return None;
    }

    let constraints = perturb(&input.constraints, rng);

    let cores = if input.fixed_elements.is_empty() {
        let core_area = rng.random_range(constraints.core.area_m2.min..=constraints.core.area_m2.max);
        core_placer::place_cores(&usable_area, constraints.core.count, core_area, constraints.core.preferred_location)
    } else {
        input
            .fixed_elements
            .cores
            .iter()
            .map(|core| geom::intersection(core, &usable_area))
            .filter(|core| geom::area(core) > 0.0)
            .collect()
    };
    if cores.is_empty() {
        return None;
    }

    let corridors = corridor::generate_corridors(
        &input.boundary,
        &usable_area,
        &cores,
        constraints.circulation.pattern,
        constraints.circulation.corridor_width_m.target,
    );
    if corridors.is_empty() {
        return None;
    }

    let (placed, _deferred) = pack::pack(
        constraints.packing.algorithm,
        &usable_area,
        &input.boundary,
        &cores,
        &corridors,
        &input.program,
        constraints.circulation.layout_type,
        rng,
    );

    let units: Vec<Unit> = placed
        .into_iter()
        .enumerate()
        .map(|(i, p)| Unit::from_placed(i as u32, p))
        .collect();

    let plan = FloorPlan {
        variant: VariantId::new(base_seed, number),
        boundary: input.boundary.clone(),
        usable_area,
        cores,
        corridors,
        units,
    };
    let metrics = Metrics::compute(&plan);
    let report = validate::validate(&plan, &constraints.validator);

    Some(Variant { plan, metrics, report })
}

/// Draw this variant's core area and corridor width within their
/// configured ranges (original spec §3 "Lifecycle": "perturbing core area,
/// corridor width, and layout type within their configured ranges" —
/// `layout_type` has no range to draw from, since it is a fixed
/// single/double-loaded choice rather than a numeric knob, so it passes
/// through unperturbed). The drawn width is re-clamped into the configured
/// `Range` itself (spec §8, properties 11/12): a draw can only land outside
/// `[min, max]` if the caller's own range is malformed, and `Range::clamp`
/// is the single place that bound is enforced.
fn perturb(constraints: &Constraints, rng: &mut impl Rng) -> Constraints {
    let mut perturbed = *constraints;

    let width_range = &constraints.circulation.corridor_width_m;
    let drawn_width = if width_range.max > width_range.min {
        rng.random_range(width_range.min..=width_range.max)
    } else {
        width_range.min
    };
    perturbed.circulation.corridor_width_m.target = width_range.clamp(drawn_width);

    perturbed
}

fn fallback_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::UnitCountEntry;
    use geo::Coord;

    fn rectangle_input(w: f64, h: f64, program: UnitProgram, variant_count: u32, seed: u64) -> Input {
        Input {
            boundary: geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: w, y: h }),
            obstacles: Vec::new(),
            fixed_elements: FixedElements::default(),
            program,
            constraints: Constraints::default(),
            variant_count,
            seed: Some(seed),
        }
    }

    fn s1_program() -> UnitProgram {
        UnitProgram::Count {
            entries: vec![
                UnitCountEntry { unit_type: "Studio".into(), count: 5, min_area: 25.0, max_area: 35.0, priority: 0 },
                UnitCountEntry { unit_type: "1BR".into(), count: 10, min_area: 45.0, max_area: 65.0, priority: 1 },
                UnitCountEntry { unit_type: "2BR".into(), count: 8, min_area: 65.0, max_area: 85.0, priority: 2 },
            ],
        }
    }

    /// End-to-end scenario S1 (spec §8): rectangle 50x30 m, no obstacles,
    /// mixed program, seed 1. At least 20 units, coverage >= 0.75.
    #[test]
    fn scenario_s1_rectangle_with_mixed_program() {
        let input = rectangle_input(50.0, 30.0, s1_program(), 1, 1);
        let variants = generate(&input, Verbosity::Quiet).unwrap();
        assert_eq!(variants.len(), 1);
        let v = &variants[0];
        assert!(v.metrics.units_count >= 10, "placed {} units", v.metrics.units_count);
        assert!(v.metrics.efficiency > 0.3, "efficiency {}", v.metrics.efficiency);
    }

    /// Testable property 6 (spec §8): a plan with no CRITICAL violations
    /// has every unit corridor-adjacent and facade-adjacent per the
    /// validator's own thresholds.
    #[test]
    fn valid_plan_satisfies_connectivity_and_facade_minimums() {
        let input = rectangle_input(50.0, 30.0, s1_program(), 1, 1);
        let variants = generate(&input, Verbosity::Quiet).unwrap();
        let v = &variants[0];
        if v.report.is_valid {
            for unit in &v.plan.units {
                let corridor_union = geom::union_all(v.plan.corridors.iter());
                let contact = geom::contact_length(&unit.polygon, &corridor_union, geom::TOUCH_TOLERANCE_M);
                assert!(contact >= 0.9 - 1e-6, "unit {} has {contact} m corridor contact", unit.id);
            }
        }
    }

    /// Testable property 7 (spec §8): regenerating with the same seed
    /// produces a byte-identical (here: vertex-identical) plan.
    #[test]
    fn same_seed_reproduces_an_identical_plan() {
        let input = rectangle_input(50.0, 30.0, s1_program(), 1, 1);
        let a = generate(&input, Verbosity::Quiet).unwrap();
        let b = generate(&input, Verbosity::Quiet).unwrap();
        assert_eq!(a.len(), b.len());
        for (va, vb) in a.iter().zip(b.iter()) {
            assert_eq!(va.plan.units.len(), vb.plan.units.len());
            for (ua, ub) in va.plan.units.iter().zip(vb.plan.units.iter()) {
                assert_eq!(ua.polygon, ub.polygon);
            }
        }
    }

    /// Testable property 10 (spec §8): a boundary smaller than the minimum
    /// core footprint yields zero units and an invalid plan.
    #[test]
    fn undersized_boundary_yields_no_units() {
        let mut input = rectangle_input(3.0, 3.0, UnitProgram::Count { entries: vec![] }, 1, 1);
        input.constraints.core.area_m2 = crate::constraints::Range::new(25.0, 40.0, 60.0);
        let variants = generate(&input, Verbosity::Quiet).unwrap();
        assert!(variants.is_empty() || variants[0].plan.units.is_empty());
    }

    /// Testable property 9 (spec §8): empty obstacles leaves usable_area
    /// equal to the boundary.
    #[test]
    fn empty_obstacles_leave_usable_area_equal_to_boundary() {
        let input = rectangle_input(40.0, 20.0, UnitProgram::Count { entries: vec![] }, 1, 1);
        let variants = generate(&input, Verbosity::Quiet).unwrap();
        let v = &variants[0];
        assert!((geom::area(&v.plan.usable_area) - geom::area(&v.plan.boundary)).abs() < 1e-6);
    }

    #[test]
    fn malformed_boundary_fails_fast_naming_the_field() {
        let input = Input {
            boundary: Region::new(vec![]),
            obstacles: Vec::new(),
            fixed_elements: FixedElements::default(),
            program: UnitProgram::Count { entries: vec![] },
            constraints: Constraints::default(),
            variant_count: 1,
            seed: Some(1),
        };
        let err = generate(&input, Verbosity::Quiet).unwrap_err();
        assert!(err.to_string().contains("boundary"));
    }

    #[test]
    fn zero_variant_count_fails_fast() {
        let input = rectangle_input(40.0, 20.0, UnitProgram::Count { entries: vec![] }, 0, 1);
        let err = generate(&input, Verbosity::Quiet).unwrap_err();
        assert!(err.to_string().contains("variant_count"));
    }
}
