//! Gauss-Legendre quadrature used to integrate property variation along
//! tapered members.

/// 5-point Gauss-Legendre abscissas and weights on `[-1, 1]`.
const GAUSS_LEGENDRE_5: [(f64, f64); 5] = [
    (-0.906_179_845_938_664, 0.236_926_885_056_189),
    (-0.538_469_310_105_683, 0.478_628_670_499_366),
    (0.0, 0.568_888_888_888_889),
    (0.538_469_310_105_683, 0.478_628_670_499_366),
    (0.906_179_845_938_664, 0.236_926_885_056_189),
];

/// The 5-point Gauss-Legendre rule mapped to the unit interval.
///
/// Each abscissa `x` becomes the natural coordinate `xi = (1 + x) / 2`
/// and its weight is halved, so the weights sum to exactly 1 over
/// `[0, 1]`. Points are ordered start to end.
#[must_use]
pub fn unit_interval_rule() -> [(f64, f64); 5] {
    GAUSS_LEGENDRE_5.map(|(x, w)| ((1.0 + x) / 2.0, w / 2.0))
}
