use std::fmt;

/// Degeneracies the geometry kernel can hand back to a caller that wants to
/// branch on them rather than just propagate a generic failure (mirrors
/// `RegionError` in the reference crate's planar-graph sub-crate). Kernel
/// operations repair what they can silently (spec §4.A); these variants
/// only surface when repair genuinely isn't possible for the caller's
/// purposes — e.g. a candidate unit clipped to more than one disjoint
/// piece, which a placement pass must reject outright rather than pick a
/// piece for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomError {
    /// An operation that requires a single simple polygon produced more
    /// than one component.
    MultiComponent { component_count: usize },
    /// An operation that requires non-empty input received an empty region.
    Empty,
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeomError::MultiComponent { component_count } => {
                write!(f, "expected a single polygon, got {component_count} components")
            }
            GeomError::Empty => write!(f, "expected a non-empty region"),
        }
    }
}

impl std::error::Error for GeomError {}
