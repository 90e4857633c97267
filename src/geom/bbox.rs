use geo::Rect;
use rstar::{PointDistance, RTreeObject, AABB};

/// A bounding box keyed by index, for use in an [`rstar::RTree`].
///
/// Several modules (core-connectivity repair, region selection in the
/// packer) need "find me the nearest of these N polygons" queries; rather
/// than duplicating an R-tree wrapper per call site, every caller builds an
/// `RTree<IndexedBox>` over the bounds of its candidate list and looks the
/// winning index back up in its own `Vec`.
#[derive(Debug, Clone, Copy)]
pub struct IndexedBox {
    idx: usize,
    bbox: Rect<f64>,
}

impl IndexedBox {
    pub fn new(idx: usize, bbox: Rect<f64>) -> Self {
        Self { idx, bbox }
    }

    #[inline]
    pub fn idx(&self) -> usize {
        self.idx
    }

    #[inline]
    pub fn bbox(&self) -> &Rect<f64> {
        &self.bbox
    }
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

impl PointDistance for IndexedBox {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let center = self.bbox.center();
        let dx = center.x - point[0];
        let dy = center.y - point[1];
        dx * dx + dy * dy
    }
}
