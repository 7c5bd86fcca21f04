pub mod profile;
pub mod skew;

use crate::math::{Point3, Vector3};

/// The polygon of one cross-section: an exterior boundary ring plus zero
/// or more hole rings.
///
/// Rings are ordered point sequences; vertices carry a third coordinate so
/// that end-skew rotation can perturb the out-of-plane placement of a ring
/// (see [`skew`]). Sections built from tabular data start with `z = 0`
/// everywhere. Hole rings are assumed disjoint from the exterior; the
/// input format guarantees this and it is not re-validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionGeometry {
    exterior: Vec<Point3>,
    interior: Vec<Vec<Point3>>,
}

impl SectionGeometry {
    /// Creates a section polygon from an exterior ring and its hole rings.
    #[must_use]
    pub fn new(exterior: Vec<Point3>, interior: Vec<Vec<Point3>>) -> Self {
        Self { exterior, interior }
    }

    /// Returns the exterior boundary ring.
    #[must_use]
    pub fn exterior(&self) -> &[Point3] {
        &self.exterior
    }

    /// Returns the hole rings.
    #[must_use]
    pub fn interior(&self) -> &[Vec<Point3>] {
        &self.interior
    }

    /// Translates every vertex of every ring by `-offset`, moving the
    /// given reference point to the local origin.
    pub fn translate_to_origin(&mut self, offset: Vector3) {
        for point in &mut self.exterior {
            *point -= offset;
        }
        for hole in &mut self.interior {
            for point in hole {
                *point -= offset;
            }
        }
    }

    /// Applies `f` to every vertex of the exterior and every hole ring.
    pub(crate) fn map_points(&self, f: impl Fn(&Point3) -> Point3) -> Self {
        Self {
            exterior: self.exterior.iter().map(&f).collect(),
            interior: self
                .interior
                .iter()
                .map(|hole| hole.iter().map(&f).collect())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn translate_moves_reference_to_origin() {
        let mut geom = SectionGeometry::new(
            vec![
                Point3::new(2.0, 3.0, 0.0),
                Point3::new(4.0, 3.0, 0.0),
                Point3::new(4.0, 5.0, 0.0),
            ],
            vec![vec![Point3::new(3.0, 4.0, 0.0)]],
        );
        geom.translate_to_origin(Vector3::new(2.0, 3.0, 0.0));
        assert!((geom.exterior()[0] - Point3::origin()).norm() < TOLERANCE);
        assert!((geom.interior()[0][0] - Point3::new(1.0, 1.0, 0.0)).norm() < TOLERANCE);
    }
}
