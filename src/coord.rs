//! This module contains a struct, [`Coord`](struct.Coord.html), that models a 3D coordinate space
//! and supports limited math in 3 dimensions with scalars and other coordinates. Every color
//! representation in this crate that can be embedded in 3D space converts to and from `Coord`, which
//! unifies operations such as clamping components to a gamut or interpolating between two colors
//! without repeating the arithmetic for every representation.

use num;
use num::{Num, NumCast};
use std::ops::{Add, Div, Mul, Sub};

/// Represents a scalar value that can be easily converted, described using the common numeric traits
/// in [`num`]. Anything that falls under this category can be multiplied by a [`Coord`] to scale
/// it. This has no added functionality: it's just for convenience.
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in 3D space. The axes `x`, `y`, and `z` are purely conventional: a color maps onto them
/// in the order its components are written, so an `XyYColor` puts chromaticity x on the x-axis,
/// chromaticity y on the y-axis, and the luminance factor Y on the z-axis.
///
/// # Example
/// ```
/// # use munsell::coord::Coord;
/// let point_1 = Coord { x: 0.31, y: 0.32, z: 0.5 };
/// let point_2 = Coord { x: 0.41, y: 0.38, z: 0.3 };
/// let sum = point_1 + point_2;
/// let diff = point_1 - point_2;
/// let scaled = point_1 * 2u8;
/// let halved = point_1 / 2.;
/// assert!((sum.x - 0.72).abs() < 1e-10);
/// assert!((diff.z - 0.2).abs() < 1e-10);
/// assert!((scaled.y - 0.64).abs() < 1e-10);
/// assert!((halved.z - 0.25).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coord {
    /// The first axis.
    pub x: f64,
    /// The second axis.
    pub y: f64,
    /// The third axis.
    pub z: f64,
}

impl Add for Coord {
    type Output = Coord;
    fn add(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Coord {
    type Output = Coord;
    fn sub(self, rhs: Coord) -> Coord {
        Coord {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

// scalar multiplication and division only: multiplying two points has no single sensible meaning
impl<U: Scalar> Mul<U> for Coord {
    type Output = Coord;
    fn mul(self, rhs: U) -> Coord {
        let r: f64 = num::cast(rhs).unwrap();
        Coord {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

impl<U: Scalar> Div<U> for Coord {
    type Output = Coord;
    fn div(self, rhs: U) -> Coord {
        if rhs.is_zero() {
            panic!("Division by 0!");
        } else {
            let r: f64 = num::cast(rhs).unwrap();
            Coord {
                x: self.x / r,
                y: self.y / r,
                z: self.z / r,
            }
        }
    }
}

impl Coord {
    /// The midpoint between two 3D points: returns a new Coord.
    /// # Example
    /// ```
    /// # use munsell::coord::Coord;
    /// let point1 = Coord { x: 0.25, y: 0., z: 1. };
    /// let point2 = Coord { x: 0.75, y: 1., z: 1. };
    /// let mid = point1.midpoint(&point2);
    /// assert!((mid.x - 0.5).abs() <= 1e-10);
    /// assert!((mid.y - 0.5).abs() <= 1e-10);
    /// assert!((mid.z - 1.).abs() <= 1e-10);
    /// ```
    pub fn midpoint(&self, other: &Coord) -> Coord {
        Coord {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
    /// The Euclidean distance between two 3D points. In a perceptually uniform projection such as
    /// CIELAB this doubles as a color difference (ΔE*76), but for most projections it is only
    /// geometry: don't read perceptual meaning into it unless the space earns it.
    /// # Example
    /// ```
    /// # use munsell::coord::Coord;
    /// let point1 = Coord { x: 0., y: 0., z: -1. };
    /// let point2 = Coord { x: 2., y: 3., z: 5. };
    /// let dist = point1.euclidean_distance(&point2);
    /// assert!((dist - 7.).abs() <= 1e-10);
    /// ```
    pub fn euclidean_distance(&self, other: &Coord) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_inverts() {
        let a = Coord { x: 1., y: 8., z: 7. };
        let b = Coord { x: 7., y: 2., z: 3. };
        let c = a + b;
        assert_eq!(c - b, a);
        assert_eq!(c - a, b);
    }

    #[test]
    #[should_panic(expected = "Division by 0!")]
    fn test_div_by_zero_panics() {
        let a = Coord { x: 1., y: 1., z: 1. };
        let _ = a / 0.;
    }
}
