use crate::math::{Matrix3, Vector3};

/// Magnitude below which the exponential map switches to its Taylor branch.
const SMALL_ANGLE: f64 = 1e-8;

/// Builds the skew-symmetric cross-product matrix of a 3-vector.
///
/// `hat(v) * w == v.cross(&w)` for any `w`.
#[must_use]
pub fn hat(v: &Vector3) -> Matrix3 {
    Matrix3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

/// Exponential map for SO(3): the rotation matrix of a rotation vector.
///
/// Uses Rodrigues' formula, falling back to a second-order Taylor
/// expansion when the magnitude of `v` is below `1e-8` to avoid dividing
/// by a near-zero angle. The result is orthogonal with determinant 1 for
/// any input.
#[must_use]
pub fn exp_so3(v: &Vector3) -> Matrix3 {
    let theta = v.norm();
    if theta < SMALL_ANGLE {
        let k = hat(v);
        Matrix3::identity() + k + 0.5 * (k * k)
    } else {
        let k = hat(&(v / theta));
        Matrix3::identity() + theta.sin() * k + (1.0 - theta.cos()) * (k * k)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn hat_reproduces_cross_product() {
        let v = Vector3::new(1.0, -2.0, 3.0);
        let w = Vector3::new(0.5, 4.0, -1.5);
        assert!((hat(&v) * w - v.cross(&w)).norm() < TOLERANCE);
    }

    #[test]
    fn exp_is_orthogonal_with_unit_determinant() {
        for v in [
            Vector3::new(0.0, 0.0, 1.3),
            Vector3::new(0.2, -0.7, 0.4),
            Vector3::new(0.0, 0.0, 123.0),
            Vector3::zeros(),
        ] {
            let r = exp_so3(&v);
            assert!((r.transpose() * r - Matrix3::identity()).norm() < 1e-9);
            assert!((r.determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = exp_so3(&Vector3::new(0.0, 0.0, FRAC_PI_2));
        let p = r * Vector3::new(1.0, 0.0, 0.0);
        assert!((p - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn branches_agree_near_the_switch() {
        // Compare the Taylor branch just below 1e-8 with the exact branch
        // just above it; both should be the same rotation to within 1e-6.
        let below = exp_so3(&Vector3::new(0.0, 0.0, 0.99e-8));
        let above = exp_so3(&Vector3::new(0.0, 0.0, 1.01e-8));
        assert!((below - above).norm() < 1e-6);
    }

    #[test]
    fn zero_vector_is_identity() {
        assert!((exp_so3(&Vector3::zeros()) - Matrix3::identity()).norm() < TOLERANCE);
    }
}
