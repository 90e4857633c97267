#![doc = "floorgen: a geometric layout engine for multi-unit residential floor plans"]

//! Generates candidate floor plans from a 2D building outline, a set of
//! obstacles, and a program of required unit types. The pipeline runs five
//! components in strict sequence, once per variant: the geometry kernel
//! underlies everything; the core placer positions the service core(s);
//! the corridor network generator lays out circulation and guarantees it
//! reaches every core; the unit packer fills what's left with
//! non-overlapping units; the architectural validator scores the result
//! against a fixed rule taxonomy. [`pipeline::generate`] is the single
//! entry point that runs all five for every requested variant.

mod constraints;
mod core_placer;
mod corridor;
mod error;
mod geom;
mod pack;
mod pipeline;
mod plan;
mod rng;
mod validate;

#[doc(inline)]
pub use constraints::{
    CirculationConstraints, Constraints, CoreConstraints, CoreCount, CorridorPattern,
    FixedElements, LayoutType, Obstacle, ObstacleKind, PackerAlgorithm, PackingConstraints,
    PreferredLocation, Range, UnitCountEntry, UnitPercentEntry, UnitProgram, ValidatorThresholds,
};

#[doc(inline)]
pub use error::GeomError;

#[doc(inline)]
pub use geom::Region;

#[doc(inline)]
pub use pipeline::{generate, Input, Variant, Verbosity};

#[doc(inline)]
pub use plan::{FloorPlan, Metrics, Unit, VariantId};

#[doc(inline)]
pub use validate::{validate, Report, ReportedFinding, Severity};
