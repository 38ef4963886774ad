//! Coordinate-system conversions into Cartesian 3-space.
//!
//! These are pure functions; which slot of the input triple receives the
//! evaluated scalar is decided by the sampler from the classified variable
//! role, and must match the slot ordering of the coordinate system.

use super::point::Point3;

/// Identity mapping for Cartesian samples.
#[must_use]
pub const fn cartesian(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// Spherical `(theta, r, phi)` with `theta` the azimuth and `phi` the polar
/// angle measured from the positive Z axis. `phi = pi/2` lands on the XY
/// plane, which is what planar polar curves rely on.
#[must_use]
pub fn spherical(theta: f64, r: f64, phi: f64) -> Point3 {
    Point3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Cylindrical `(theta, r, z)`.
#[must_use]
pub fn cylindrical(theta: f64, r: f64, z: f64) -> Point3 {
    Point3::new(r * theta.cos(), r * theta.sin(), z)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    fn assert_close(p: Point3, q: Point3) {
        assert!(p.distance_to(q) < 1e-12, "{p:?} != {q:?}");
    }

    #[test]
    fn test_spherical_equator() {
        // phi = pi/2 puts the sample on the XY plane
        assert_close(spherical(0.0, 2.0, FRAC_PI_2), Point3::new(2.0, 0.0, 0.0));
        assert_close(spherical(FRAC_PI_2, 2.0, FRAC_PI_2), Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_spherical_pole() {
        assert_close(spherical(1.234, 3.0, 0.0), Point3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_cylindrical() {
        assert_close(cylindrical(0.0, 1.5, 4.0), Point3::new(1.5, 0.0, 4.0));
        assert_close(cylindrical(PI, 1.0, -1.0), Point3::new(-1.0, 0.0, -1.0));
    }
}
