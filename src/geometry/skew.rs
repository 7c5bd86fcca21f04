use crate::geometry::SectionGeometry;
use crate::math::{so3::exp_so3, Point3, Vector3};

/// Rotates the end cross-sections of a member by its end skew angles.
///
/// The first sample is rotated by `skew_i_deg`, the last by `skew_j_deg`,
/// both about the member's longitudinal axis. The rotation vector is
/// `theta * e3`, and only the first coordinate of each vertex is replaced
/// by the rotated value: a skewed cut plane shifts the out-of-plane
/// placement of the ring without distorting the in-plane shape.
///
/// Note that this assumes the fixed local-axis convention of the source
/// format (the longitudinal axis is the perturbed coordinate); it does not
/// generalize to arbitrary member orientations.
pub fn apply_skew(samples: &mut [SectionGeometry], skew_i_deg: f64, skew_j_deg: f64) {
    let Some(last) = samples.len().checked_sub(1) else {
        return;
    };
    for (index, angle) in [(0, skew_i_deg), (last, skew_j_deg)] {
        samples[index] = rotate_section(&samples[index], angle);
    }
}

fn rotate_section(geometry: &SectionGeometry, angle_deg: f64) -> SectionGeometry {
    let r = exp_so3(&Vector3::new(0.0, 0.0, angle_deg.to_radians()));
    geometry.map_points(|p| Point3::new((r * p.coords).x, p.y, p.z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn rectangle() -> SectionGeometry {
        SectionGeometry::new(
            vec![
                Point3::new(-1.0, -2.0, 0.0),
                Point3::new(1.0, -2.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(-1.0, 2.0, 0.0),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn quarter_skew_at_start_only() {
        let mut samples = vec![rectangle(), rectangle()];
        apply_skew(&mut samples, 90.0, 0.0);

        // Start ring: x' = (R*p).x = cos(90)*x - sin(90)*y = -y.
        for (rotated, original) in samples[0].exterior().iter().zip(rectangle().exterior()) {
            assert!((rotated.x - (-original.y)).abs() < 1e-12);
            assert!((rotated.y - original.y).abs() < TOLERANCE);
            assert!((rotated.z - original.z).abs() < TOLERANCE);
        }
        // End ring is untouched by a zero angle.
        assert_eq!(samples[1], rectangle());
    }

    #[test]
    fn holes_are_rotated_with_the_ring() {
        let geometry = SectionGeometry::new(
            rectangle().exterior().to_vec(),
            vec![vec![Point3::new(0.5, 0.5, 0.0)]],
        );
        let mut samples = vec![geometry, rectangle()];
        apply_skew(&mut samples, 90.0, 0.0);
        assert!((samples[0].interior()[0][0].x - (-0.5)).abs() < 1e-12);
        assert!((samples[0].interior()[0][0].y - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn empty_sequence_is_a_no_op() {
        let mut samples: Vec<SectionGeometry> = Vec::new();
        apply_skew(&mut samples, 45.0, 45.0);
        assert!(samples.is_empty());
    }
}
