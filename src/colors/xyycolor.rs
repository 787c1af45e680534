//! A module that implements the CIE xyY color space: the chromaticity coordinates (x, y) of the
//! 1931 chromaticity diagram plus the luminance factor Y. This is the native input of the Munsell
//! renotation: a renotation lookup answers "which Munsell chip has this chromaticity at this
//! luminance?", so every conversion in this crate funnels through an `XyYColor` sooner or later.
//!
//! An `XyYColor` in this crate is always referenced to illuminant C, the Munsell measurement
//! illuminant. Colors under other illuminants are adapted on the way in, which keeps the type a
//! plain value (and lets it derive serde traits for swatch records) instead of carrying an
//! illuminant tag around.

use color::{Color, XYZColor};
use coord::Coord;
use illuminants::Illuminant;

/// A color as CIE chromaticity plus luminance factor, referenced to illuminant C.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyYColor {
    /// The chromaticity coordinate x, in [0, 1].
    pub x: f64,
    /// The chromaticity coordinate y, in [0, 1].
    pub y: f64,
    /// The luminance factor Y as a proportion in [0, 1]: 0 is ideal black, 1 is the reflectance of
    /// the ideal white under the same light.
    pub luma: f64,
}

impl XyYColor {
    /// Returns the same chromaticity with a different luminance factor. The notation engine's
    /// bounded searches lean on this: near the edges of the color solid, hue and chroma are far
    /// less sensitive to a small luminance nudge than the value computation is to numerical
    /// instability, so a search perturbs `luma` and leaves (x, y) alone.
    pub fn with_luma(&self, luma: f64) -> XyYColor {
        XyYColor {
            x: self.x,
            y: self.y,
            luma,
        }
    }
}

impl Color for XyYColor {
    /// Converts from XYZ, adapting to illuminant C first. A degenerate input (X + Y + Z ≈ 0, i.e.
    /// black) has no chromaticity of its own and takes the illuminant's, matching the convention of
    /// the reference colorimetry libraries.
    fn from_xyz(xyz: XYZColor) -> XyYColor {
        let c = xyz.color_adapt(Illuminant::C);
        let sum = c.x + c.y + c.z;
        if sum.abs() < 1e-10 {
            let (wx, wy) = Illuminant::C.chromaticity();
            XyYColor {
                x: wx,
                y: wy,
                luma: 0.,
            }
        } else {
            XyYColor {
                x: c.x / sum,
                y: c.y / sum,
                luma: c.y,
            }
        }
    }

    /// Converts back to XYZ under the requested illuminant. A zero `y` chromaticity would divide by
    /// zero; it is treated as black, which is the only physical color it can describe.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        let (x, y, z) = if self.y.abs() < 1e-10 {
            (0., 0., 0.)
        } else {
            (
                self.x * self.luma / self.y,
                self.luma,
                (1. - self.x - self.y) * self.luma / self.y,
            )
        };
        XYZColor {
            x,
            y,
            z,
            illuminant: Illuminant::C,
        }
        .color_adapt(illuminant)
    }
}

impl From<Coord> for XyYColor {
    fn from(c: Coord) -> XyYColor {
        XyYColor {
            x: c.x,
            y: c.y,
            luma: c.z,
        }
    }
}

impl Into<Coord> for XyYColor {
    fn into(self) -> Coord {
        Coord {
            x: self.x,
            y: self.y,
            z: self.luma,
        }
    }
}
