//! A module that implements the [CIELAB color
//! space](https://en.wikipedia.org/wiki/Lab_color_space#CIELAB): an L value for luminance and two
//! opponent color axes for chromaticity. Most CIELAB implementations pin the space to D50 or D65;
//! this one is explicitly CIELAB C, because everything in this crate exists to serve Munsell
//! conversion and the renotation data is referenced to illuminant C. Any other illuminant is
//! adapted to C on the way in and out.
//!
//! Besides being a conversion waypoint, CIELAB carries two conveniences the rest of the crate
//! leans on: the chroma/hue-angle cylindrical form (the raw material for the interpolated
//! renotation lookup) and the ΔE*76 color difference (used to rank scraped paint swatches against
//! located Munsell chips).

use color::{Color, XYZColor};
use coord::Coord;
use illuminants::Illuminant;

/// A color in the CIELAB color space, referenced to illuminant C.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CIELABColor {
    /// The luminance of the color: 0 is black, 100 is the diffuse white of the reference
    /// illuminant.
    pub l: f64,
    /// The first opponent color axis, negative toward green and positive toward magenta. Usually
    /// within [-128, 127] for physical colors.
    pub a: f64,
    /// The second opponent color axis, negative toward blue and positive toward yellow. Usually
    /// within [-128, 127] for physical colors.
    pub b: f64,
}

impl CIELABColor {
    /// The chroma correlate: the distance from the neutral axis in the (a, b) plane. A scaled
    /// cousin of Munsell chroma, and the quantity the interpolated renotation lookup divides by a
    /// hue-dependent factor to estimate it.
    pub fn chroma(&self) -> f64 {
        self.b.hypot(self.a)
    }

    /// The hue angle correlate in degrees, in [0, 360): the angle of (a, b) around the neutral
    /// axis. 0° is magenta-red, 90° is yellow, 180° is green, 270° is blue.
    pub fn hue_angle(&self) -> f64 {
        let degrees = self.b.atan2(self.a).to_degrees();
        if degrees < 0. {
            degrees + 360.
        } else {
            degrees
        }
    }

    /// The CIE 1976 color difference ΔE*76: Euclidean distance in CIELAB. Roughly, a ΔE near 2 is
    /// a just-noticeable difference; paint-matching tools in this crate's orbit use it to rank
    /// candidate chips against a target swatch.
    pub fn delta_e(&self, other: &CIELABColor) -> f64 {
        let c1: Coord = (*self).into();
        let c2: Coord = (*other).into();
        c1.euclidean_distance(&c2)
    }
}

impl Color for CIELABColor {
    /// Converts a given CIE XYZ color to CIELAB C, adapting other illuminants to C first.
    fn from_xyz(xyz: XYZColor) -> CIELABColor {
        // https://en.wikipedia.org/wiki/Lab_color_space#CIELAB-CIEXYZ_conversions
        let f = |x: f64| {
            let delta: f64 = 6.0 / 29.0;
            if x <= delta.powi(3) {
                x / (3.0 * delta * delta) + 4.0 / 29.0
            } else {
                x.cbrt()
            }
        };
        let white_point = Illuminant::C.white_point();
        let adapted = xyz.color_adapt(Illuminant::C);
        // XYZ here is scaled so white Y is 1; the white point table is scaled to 100
        let fx = f(adapted.x * 100.0 / white_point[0]);
        let fy = f(adapted.y * 100.0 / white_point[1]);
        let fz = f(adapted.z * 100.0 / white_point[2]);
        CIELABColor {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Returns an XYZ color that corresponds to the CIELAB C color: first a C-referenced XYZ
    /// coordinate, then a chromatic adaptation to the requested illuminant.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        let f_inv = |x: f64| {
            let delta: f64 = 6.0 / 29.0;
            if x > delta {
                x * x * x
            } else {
                3.0 * delta * delta * (x - 4.0 / 29.0)
            }
        };
        let white_point = Illuminant::C.white_point();
        let fy = (self.l + 16.0) / 116.0;
        let x = white_point[0] / 100.0 * f_inv(fy + self.a / 500.0);
        let y = white_point[1] / 100.0 * f_inv(fy);
        let z = white_point[2] / 100.0 * f_inv(fy - self.b / 200.0);
        XYZColor {
            x,
            y,
            z,
            illuminant: Illuminant::C,
        }
        .color_adapt(illuminant)
    }
}

impl From<Coord> for CIELABColor {
    fn from(c: Coord) -> CIELABColor {
        CIELABColor {
            l: c.x,
            a: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for CIELABColor {
    fn into(self) -> Coord {
        Coord {
            x: self.l,
            y: self.a,
            z: self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cielab_xyz_round_trip() {
        let xyz = XYZColor {
            x: 0.4,
            y: 0.2,
            z: 0.6,
            illuminant: Illuminant::C,
        };
        let lab = CIELABColor::from_xyz(xyz);
        let back = lab.to_xyz(Illuminant::C);
        assert!(xyz.approx_equal(&back));
    }

    #[test]
    fn test_neutral_has_no_chroma() {
        let gray = XYZColor {
            x: 0.98074 * 0.5,
            y: 0.5,
            z: 1.18232 * 0.5,
            illuminant: Illuminant::C,
        };
        let lab = CIELABColor::from_xyz(gray);
        assert!(lab.chroma() < 1e-6);
    }

    #[test]
    fn test_hue_angle_quadrants() {
        let yellow_ish = CIELABColor {
            l: 50.,
            a: 0.,
            b: 40.,
        };
        let blue_ish = CIELABColor {
            l: 50.,
            a: 0.,
            b: -40.,
        };
        assert!((yellow_ish.hue_angle() - 90.).abs() < 1e-9);
        assert!((blue_ish.hue_angle() - 270.).abs() < 1e-9);
    }

    #[test]
    fn test_delta_e_is_a_metric() {
        let a = CIELABColor {
            l: 50.,
            a: 10.,
            b: 10.,
        };
        let b = CIELABColor {
            l: 53.,
            a: 14.,
            b: 10.,
        };
        assert_eq!(a.delta_e(&a), 0.);
        assert!((a.delta_e(&b) - 5.0).abs() < 1e-9);
        assert_eq!(a.delta_e(&b), b.delta_e(&a));
    }
}
