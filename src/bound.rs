//! This module describes the [`Bound`](trait.Bound.html) trait, which gives a color space explicit
//! component bounds and a way of clamping colors into them. The notation engine uses it to honor
//! the rule that physically meaningless inputs (a luminance factor of 1.3, a chromaticity of -0.1)
//! are clamped rather than rejected: a scraped paint record with a slightly out-of-range channel
//! should still land somewhere sensible in the color solid.

use color::Color;
use coord::Coord;

/// Describes a color space in which the total space of representable colors has explicit bounds
/// besides those imposed by human vision. Only applies to colors that can be embedded in 3D space
/// via `Coord`.
/// # Example
/// ```
/// # use munsell::prelude::*;
/// let sample = XyYColor { x: 0.31, y: -0.02, luma: 1.3 };
/// let clamped = sample.clamp();
/// assert_eq!(clamped.y, 0.);
/// assert_eq!(clamped.luma, 1.);
/// assert_eq!(clamped.x, 0.31);
/// ```
pub trait Bound: Color + Into<Coord> + From<Coord> + Copy {
    /// Returns an array [(min1, max1), (min2, max2), (min3, max3)] that represents the bounds on
    /// each component of the color space, in the order that they appear in the Coord
    /// representation. If some parts of the bounds don't exist, using infinity or negative infinity
    /// works.
    fn bounds() -> [(f64, f64); 3];

    /// Given a Coord, returns a Coord such that each component has been clamped to the correct
    /// bounds.
    fn clamp_coord(point: Coord) -> Coord {
        let ranges = Self::bounds();
        let mut point_vals = [0.; 3];
        for i in 0..3 {
            let component = [point.x, point.y, point.z][i];
            let (min, max) = ranges[i];
            point_vals[i] = if component < min {
                min
            } else if component > max {
                max
            } else {
                component
            };
        }
        Coord {
            x: point_vals[0],
            y: point_vals[1],
            z: point_vals[2],
        }
    }

    /// Returns a copy of this color with every component clamped into the space's bounds. A color
    /// already in bounds comes back unchanged.
    fn clamp(self) -> Self {
        Self::from(Self::clamp_coord(self.into()))
    }
}

mod impls {
    use super::Bound;
    use color::RGBColor;
    use colors::xyycolor::XyYColor;

    impl Bound for RGBColor {
        fn bounds() -> [(f64, f64); 3] {
            [(0., 1.), (0., 1.), (0., 1.)]
        }
    }

    impl Bound for XyYColor {
        fn bounds() -> [(f64, f64); 3] {
            [(0., 1.), (0., 1.), (0., 1.)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Bound;
    use color::RGBColor;
    use colors::xyycolor::XyYColor;

    #[test]
    fn test_rgb_clamping() {
        let color = RGBColor {
            r: 0.1,
            g: -0.2,
            b: 1.2,
        };
        let clamped = color.clamp();
        assert_eq!(
            (clamped.r, clamped.g, clamped.b),
            (0.1, 0., 1.)
        );
    }

    #[test]
    fn test_in_bounds_unchanged() {
        let xyy = XyYColor {
            x: 0.31,
            y: 0.32,
            luma: 0.5,
        };
        assert_eq!(xyy.clamp(), xyy);
    }
}
