use super::scalar::Scalar;

/// Wrap an angle in degrees into [-180, 180).
pub fn bounded_angle<S: Scalar>(angle_deg: S) -> S {
    let half = S::from_f32(180.0);
    let full = S::from_f32(360.0);
    let mut a = angle_deg;
    while a < -half {
        a += full;
    }
    while a >= half {
        a -= full;
    }
    a
}

/// Shortest signed angular distance in degrees from `from` to `to`.
pub fn bounded_angle_delta<S: Scalar>(from: S, to: S) -> S {
    bounded_angle(to - from)
}
