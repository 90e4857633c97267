//! Architectural Validator (spec §4.E): checks a finished [`FloorPlan`]
//! against a fixed rule taxonomy and reduces the findings to a score. The
//! validator is read-only — it never mutates the plan (spec §4.E) — and
//! running it twice on the same plan produces identical reports (spec §8,
//! property 8), since every rule check here is a pure function of the
//! plan and the thresholds.

mod rules;

pub use rules::{Finding, Severity};

use serde::{Deserialize, Serialize};

use crate::constraints::ValidatorThresholds;
use crate::geom;
use crate::plan::FloorPlan;

/// The validator's verdict on one [`FloorPlan`] (spec §4.E).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub is_valid: bool,
    pub score: f64,
    pub violations: Vec<ReportedFinding>,
    pub warnings: Vec<ReportedFinding>,
}

/// A [`Finding`] flattened to owned, serializable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedFinding {
    pub code: String,
    pub message: String,
}

impl From<&Finding> for ReportedFinding {
    fn from(f: &Finding) -> Self {
        Self { code: f.code.to_string(), message: f.message.clone() }
    }
}

/// Run every rule in the taxonomy against `plan` and reduce the findings
/// to a [`Report`] (spec §4.E scoring rule: `50 - 10*critical` when any
/// critical finding exists, else `100 - 2*warnings`, both floored at 0).
pub fn validate(plan: &FloorPlan, thresholds: &ValidatorThresholds) -> Report {
    let boundary = &plan.boundary;
    let corridor_union = geom::union_all(plan.corridors.iter());
    let core_union = geom::union_all(plan.cores.iter());

    let mut findings = rules::check_connectivity_prerequisite(plan);

    for unit in &plan.units {
        findings.extend(rules::check_unit(unit, boundary, &corridor_union, &core_union, thresholds));
    }
    for corridor in &plan.corridors {
        findings.extend(rules::check_corridor(corridor, &core_union, thresholds));
    }

    let core_area: f64 = plan.cores.iter().map(geom::area).sum();
    findings.extend(rules::check_core_area(core_area, plan.units.len()));

    let total_area = geom::area(boundary);
    if total_area > 0.0 {
        let units_area: f64 = plan.units.iter().map(|u| u.area).sum();
        let corridor_area: f64 = plan.corridors.iter().map(geom::area).sum();
        findings.extend(rules::check_efficiency(units_area / total_area, thresholds));
        findings.extend(rules::check_corridor_ratio(corridor_area / total_area, thresholds));
    }

    let (violations, warnings): (Vec<_>, Vec<_>) =
        findings.into_iter().partition(|f| f.severity == Severity::Critical);

    let is_valid = violations.is_empty();
    let score = if !violations.is_empty() {
        (50.0 - 10.0 * violations.len() as f64).max(0.0)
    } else {
        (100.0 - 2.0 * warnings.len() as f64).max(0.0)
    };

    Report {
        is_valid,
        score,
        violations: violations.iter().map(ReportedFinding::from).collect(),
        warnings: warnings.iter().map(ReportedFinding::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::PlacedUnit;
    use crate::plan::{Unit, VariantId};
    use geo::Coord;

    fn square(side: f64) -> geom::Region {
        geom::rect(Coord { x: 0.0, y: 0.0 }, Coord { x: side, y: side })
    }

    #[test]
    fn plan_with_no_corridors_fails_every_unit_via_conn_002() {
        let unit = Unit::from_placed(
            0,
            PlacedUnit { unit_type: "Studio".into(), polygon: square(6.0), target_area: 30.0 },
        );
        let plan = FloorPlan {
            variant: VariantId::new(1, 0),
            boundary: square(20.0),
            usable_area: square(20.0),
            cores: vec![],
            corridors: vec![],
            units: vec![unit],
        };
        let report = validate(&plan, &ValidatorThresholds::default());
        assert!(!report.is_valid);
        assert!(report.violations.iter().any(|v| v.code == "CONN_002"));
    }

    #[test]
    fn repeated_validation_of_the_same_plan_is_identical() {
        let plan = FloorPlan {
            variant: VariantId::new(1, 0),
            boundary: square(20.0),
            usable_area: square(20.0),
            cores: vec![],
            corridors: vec![],
            units: vec![],
        };
        let thresholds = ValidatorThresholds::default();
        let a = validate(&plan, &thresholds);
        let b = validate(&plan, &thresholds);
        assert_eq!(a, b);
    }

    #[test]
    fn undersized_unit_fails_spat_001() {
        let unit = Unit::from_placed(
            0,
            PlacedUnit { unit_type: "1BR".into(), polygon: square(4.0), target_area: 45.0 },
        );
        let corridor = geom::rect(Coord { x: 0.0, y: -3.0 }, Coord { x: 20.0, y: -0.1 });
        let plan = FloorPlan {
            variant: VariantId::new(1, 0),
            boundary: square(20.0),
            usable_area: square(20.0),
            cores: vec![],
            corridors: vec![corridor],
            units: vec![unit],
        };
        let report = validate(&plan, &ValidatorThresholds::default());
        assert!(report.violations.iter().any(|v| v.code == "SPAT_001"));
    }
}
