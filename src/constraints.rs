//! Input data model (spec §3, §6): the configuration record, the unit
//! program, and the obstacle/fixed-element inputs. Plain structs with
//! `serde` derives and a `Default` impl carrying the numeric defaults named
//! throughout the spec, the same shape the reference crate uses for its own
//! `clap`-derived argument structs — just deserialized from JSON instead of
//! parsed from argv.

use serde::{Deserialize, Serialize};

use crate::geom::Region;

/// An inclusive `[min, max]` range with a preferred `target`, used for
/// `core.area_m2` and `circulation.corridor_width_m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, target: f64, max: f64) -> Self {
        Self { min, target, max }
    }

    /// Clamp `value` into `[min, max]` (spec §8, properties 11/12: a drawn
    /// corridor width is silently clamped into its configured range, e.g.
    /// the default `[2.2, 2.5]`).
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreCount {
    One = 1,
    Two = 2,
    Four = 4,
}

impl CoreCount {
    pub fn count(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredLocation {
    Center,
    North,
    South,
    East,
    West,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    SingleLoaded,
    DoubleLoaded,
}

/// The corridor topology (spec §4.C); `Auto` runs the shape-based decision
/// tree, the rest force a specific pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorridorPattern {
    Auto,
    T,
    L,
    U,
    H,
    Plus,
    Line,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreConstraints {
    pub count: CoreCount,
    pub area_m2: Range,
    pub preferred_location: PreferredLocation,
}

impl Default for CoreConstraints {
    fn default() -> Self {
        Self {
            count: CoreCount::One,
            area_m2: Range::new(25.0, 40.0, 60.0),
            preferred_location: PreferredLocation::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CirculationConstraints {
    pub corridor_width_m: Range,
    pub layout_type: LayoutType,
    pub pattern: CorridorPattern,
}

impl Default for CirculationConstraints {
    fn default() -> Self {
        Self {
            corridor_width_m: Range::new(2.2, 2.35, 2.5),
            layout_type: LayoutType::DoubleLoaded,
            pattern: CorridorPattern::Auto,
        }
    }
}

/// The fixed thresholds the Architectural Validator checks against
/// (spec §4.E). Exposed as part of the constraint set so a caller can tune
/// code requirements per jurisdiction without recompiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatorThresholds {
    pub door_width_m: f64,
    pub fire_escape_distance_m: f64,
    pub min_facade_length_m: f64,
    pub max_escape_distance_m: f64,
    pub min_corridor_minor_dim_m: f64,
    pub recommended_corridor_minor_dim_m: f64,
    pub min_facade_to_area_ratio: f64,
    pub max_unit_bbox_long_side_m: f64,
    pub max_unit_aspect_ratio: f64,
    pub min_net_to_gross_ratio: f64,
    pub max_corridor_ratio: f64,
}

impl Default for ValidatorThresholds {
    fn default() -> Self {
        Self {
            door_width_m: 0.9,
            fire_escape_distance_m: 30.0,
            min_facade_length_m: 3.0,
            max_escape_distance_m: 45.0,
            min_corridor_minor_dim_m: 1.2,
            recommended_corridor_minor_dim_m: 1.8,
            min_facade_to_area_ratio: 0.10,
            max_unit_bbox_long_side_m: 8.0,
            max_unit_aspect_ratio: 2.5,
            min_net_to_gross_ratio: 0.70,
            max_corridor_ratio: 0.20,
        }
    }
}

/// Which unit-packer algorithm to run (spec §4.D.2): both honor the same
/// input/output contract, but trade off coverage against implementation
/// simplicity differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackerAlgorithm {
    /// Algorithm 2 (§4.D.4) — the default; no residual fragmentation.
    RowBased,
    /// Algorithm 1 (§4.D.3) — legacy multi-pass region subtraction.
    RegionBased,
}

impl Default for PackerAlgorithm {
    fn default() -> Self {
        PackerAlgorithm::RowBased
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackingConstraints {
    pub algorithm: PackerAlgorithm,
}

impl Default for PackingConstraints {
    fn default() -> Self {
        Self { algorithm: PackerAlgorithm::RowBased }
    }
}

/// The full configuration record (spec §3 "Constraint set").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    pub core: CoreConstraints,
    pub circulation: CirculationConstraints,
    pub validator: ValidatorThresholds,
    pub packing: PackingConstraints,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            core: CoreConstraints::default(),
            circulation: CirculationConstraints::default(),
            validator: ValidatorThresholds::default(),
            packing: PackingConstraints::default(),
        }
    }
}

/// One entry of a `count`-strategy unit program (spec §4.D.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCountEntry {
    pub unit_type: String,
    pub count: u32,
    pub min_area: f64,
    pub max_area: f64,
    /// Lower sorts first (spec §4.D.1: "sorted by priority ascending").
    #[serde(default)]
    pub priority: i32,
}

/// One entry of a `fill_available`-strategy unit program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPercentEntry {
    pub unit_type: String,
    pub percentage: f64,
    pub min_area: f64,
    pub max_area: f64,
    #[serde(default)]
    pub priority: i32,
}

/// The program of required unit types (spec §3 "UnitProgram").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum UnitProgram {
    Count { entries: Vec<UnitCountEntry> },
    FillAvailable {
        entries: Vec<UnitPercentEntry>,
        total_units_min: u32,
        total_units_max: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Column,
    Void,
    Shaft,
}

/// A subtracted region (spec glossary: "a subtracted region (column, void,
/// shaft) that is unusable"). `kind` has no geometric effect — it only
/// round-trips through JSON I/O so a caller that promotes a `Shaft` to a
/// fixed core knows which obstacle it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub polygon: Region,
}

/// Pre-placed core/stair/elevator/shaft polygons that override
/// `place_cores` entirely when present (spec §6, SPEC_FULL §3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedElements {
    pub cores: Vec<Region>,
}

impl FixedElements {
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_clamp_keeps_values_inside_bounds() {
        let r = Range::new(2.2, 2.35, 2.5);
        assert_eq!(r.clamp(1.0), 2.2);
        assert_eq!(r.clamp(10.0), 2.5);
        assert_eq!(r.clamp(2.4), 2.4);
    }

    #[test]
    fn constraints_default_matches_spec_defaults() {
        let c = Constraints::default();
        assert_eq!(c.circulation.corridor_width_m.min, 2.2);
        assert_eq!(c.circulation.corridor_width_m.max, 2.5);
        assert_eq!(c.validator.door_width_m, 0.9);
        assert_eq!(c.validator.fire_escape_distance_m, 30.0);
    }
}
