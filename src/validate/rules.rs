//! Individual rule checks (spec §4.E). Each function returns the
//! [`Finding`]s it produced for one unit, corridor, or the plan as a
//! whole; [`super::validate`] collects and scores them.

use geo::{BoundingRect, Point};

use crate::constraints::ValidatorThresholds;
use crate::geom::{self, Region};
use crate::plan::{FloorPlan, Unit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
}

fn finding(code: &'static str, severity: Severity, message: impl Into<String>) -> Finding {
    Finding { code, severity, message: message.into() }
}

/// Per-type minimum area floors (spec §4.E SPAT_001).
fn min_area_for_type(unit_type: &str) -> f64 {
    match unit_type {
        "Studio" => 25.0,
        "1BR" => 45.0,
        "2BR" => 65.0,
        "3BR" => 85.0,
        _ => 0.0,
    }
}

/// Per-type recommended minimum width/depth (spec §4.E SPAT_001/SPAT_002).
fn recommended_dims_for_type(unit_type: &str) -> Option<(f64, f64)> {
    match unit_type {
        "Studio" => Some((3.5, 4.0)),
        "1BR" => Some((4.0, 5.0)),
        "2BR" => Some((5.0, 6.0)),
        "3BR" => Some((6.0, 7.0)),
        _ => None,
    }
}

pub fn check_unit(
    unit: &Unit,
    boundary: &Region,
    corridor_union: &Region,
    core_union: &Region,
    thresholds: &ValidatorThresholds,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let corridor_contact = geom::contact_length(&unit.polygon, corridor_union, geom::TOUCH_TOLERANCE_M);
    if corridor_contact < thresholds.door_width_m {
        findings.push(finding(
            "CONN_001",
            Severity::Critical,
            format!("unit {} has only {corridor_contact:.2} m of corridor contact, needs {:.2}", unit.id, thresholds.door_width_m),
        ));
    }

    let facade_length = geom::contact_length(&unit.polygon, boundary, geom::TOUCH_TOLERANCE_M);
    if facade_length < thresholds.min_facade_length_m {
        findings.push(finding(
            "LIGHT_001",
            Severity::Critical,
            format!("unit {} has only {facade_length:.2} m of facade, needs {:.2}", unit.id, thresholds.min_facade_length_m),
        ));
    }

    if unit.area > 0.0 && facade_length / unit.area < thresholds.min_facade_to_area_ratio {
        findings.push(finding(
            "LIGHT_002",
            Severity::Warning,
            format!("unit {} facade-to-area ratio below {:.2}", unit.id, thresholds.min_facade_to_area_ratio),
        ));
    }

    if let Some(bounds) = unit.polygon.bounding_rect() {
        let (w, h) = (bounds.width(), bounds.height());
        let (long, short) = if w >= h { (w, h) } else { (h, w) };

        if long > thresholds.max_unit_bbox_long_side_m {
            findings.push(finding(
                "LIGHT_003",
                Severity::Warning,
                format!("unit {} long side {long:.2} m exceeds {:.2}", unit.id, thresholds.max_unit_bbox_long_side_m),
            ));
        }
        if short > 0.0 && long / short > thresholds.max_unit_aspect_ratio {
            findings.push(finding(
                "SPAT_003",
                Severity::Warning,
                format!("unit {} aspect ratio {:.2} exceeds {:.2}", unit.id, long / short, thresholds.max_unit_aspect_ratio),
            ));
        }
        if let Some((rec_w, rec_h)) = recommended_dims_for_type(&unit.unit_type) {
            let recommended_width = rec_w.min(rec_h);
            if short < recommended_width {
                findings.push(finding(
                    "SPAT_002",
                    Severity::Warning,
                    format!("unit {} minor dimension {short:.2} m below recommended {recommended_width:.2}", unit.id),
                ));
            }
        }
    }

    let floor = min_area_for_type(&unit.unit_type);
    if unit.area < floor {
        findings.push(finding(
            "SPAT_001",
            Severity::Critical,
            format!("unit {} ({}) area {:.2} m² below floor {:.2}", unit.id, unit.unit_type, unit.area, floor),
        ));
    }

    let core_distance = geom::distance_to_point(core_union, Point::new(unit.centroid.0, unit.centroid.1));
    if core_distance > thresholds.max_escape_distance_m {
        findings.push(finding(
            "SAFE_001",
            Severity::Critical,
            format!("unit {} is {core_distance:.2} m from the nearest core, exceeds {:.2}", unit.id, thresholds.max_escape_distance_m),
        ));
    }

    findings
}

/// CONN_002: with no corridors at all, every unit fails regardless of its
/// own geometry.
pub fn check_connectivity_prerequisite(plan: &FloorPlan) -> Vec<Finding> {
    if plan.corridors.is_empty() {
        plan.units
            .iter()
            .map(|unit| {
                finding(
                    "CONN_002",
                    Severity::Critical,
                    format!("unit {} fails: no corridors exist in this plan", unit.id),
                )
            })
            .collect()
    } else {
        Vec::new()
    }
}

pub fn check_corridor(
    corridor: &Region,
    core_union: &Region,
    thresholds: &ValidatorThresholds,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let touches_core = geom::touches(corridor, core_union, 0.1);
    if !touches_core {
        findings.push(finding(
            "CONN_003",
            Severity::Critical,
            "corridor does not touch or come within 0.1 m of the core",
        ));
    }

    let farthest = corridor
        .0
        .iter()
        .flat_map(|polygon| polygon.exterior().0.iter())
        .map(|coord| {
            core_union
                .0
                .iter()
                .flat_map(|p| p.exterior().0.iter())
                .map(|core_coord| {
                    let dx = coord.x - core_coord.x;
                    let dy = coord.y - core_coord.y;
                    (dx * dx + dy * dy).sqrt()
                })
                .fold(f64::INFINITY, f64::min)
        })
        .fold(0.0_f64, f64::max);
    if farthest > thresholds.fire_escape_distance_m {
        findings.push(finding(
            "CONN_004",
            Severity::Critical,
            format!("corridor's farthest point is {farthest:.2} m from the core, exceeds {:.2}", thresholds.fire_escape_distance_m),
        ));
    }

    if let Some(bounds) = corridor.bounding_rect() {
        let minor = bounds.width().min(bounds.height());
        if minor < thresholds.min_corridor_minor_dim_m {
            findings.push(finding(
                "SPAT_004",
                Severity::Critical,
                format!("corridor minor dimension {minor:.2} m below {:.2}", thresholds.min_corridor_minor_dim_m),
            ));
        } else if minor < thresholds.recommended_corridor_minor_dim_m {
            findings.push(finding(
                "SPAT_004",
                Severity::Warning,
                format!("corridor minor dimension {minor:.2} m below recommended {:.2}", thresholds.recommended_corridor_minor_dim_m),
            ));
        }
    }

    findings
}

/// SPAT_006: minimum core area scales with unit count.
pub fn check_core_area(core_area: f64, unit_count: usize) -> Vec<Finding> {
    let required = if unit_count > 15 {
        60.0
    } else if unit_count > 8 {
        40.0
    } else {
        25.0
    };
    if core_area < required {
        vec![finding(
            "SPAT_006",
            Severity::Critical,
            format!("core area {core_area:.2} m² below {required:.2} required for {unit_count} units"),
        )]
    } else {
        Vec::new()
    }
}

pub fn check_efficiency(efficiency: f64, thresholds: &ValidatorThresholds) -> Vec<Finding> {
    if efficiency < thresholds.min_net_to_gross_ratio {
        vec![finding(
            "EFFI_001",
            Severity::Warning,
            format!("net-to-gross efficiency {efficiency:.2} below {:.2}", thresholds.min_net_to_gross_ratio),
        )]
    } else {
        Vec::new()
    }
}

pub fn check_corridor_ratio(corridor_ratio: f64, thresholds: &ValidatorThresholds) -> Vec<Finding> {
    if corridor_ratio > thresholds.max_corridor_ratio {
        vec![finding(
            "EFFI_002",
            Severity::Warning,
            format!("corridor ratio {corridor_ratio:.2} exceeds {:.2}", thresholds.max_corridor_ratio),
        )]
    } else {
        Vec::new()
    }
}
