//! This module provides an enum of the illuminants this crate works with, as well as a table of
//! white point values for them. The values are copied from the ASTM E308 standard, which itself
//! copies them photographically from the CIE standard, normalized so that the Y (luminance) value
//! is 100. Illuminant C deserves a note: it is obsolete for most modern colorimetry, but it is the
//! light the Munsell renotation was measured under, so every Munsell conversion in this crate is
//! referenced to it.

/// A listing of the supported CIE standard illuminants, standards that describe a particular set of
/// lighting conditions. D65 is the sRGB reference white; C is the Munsell reference white; the
/// others appear in older measurement data and in CIELAB workflows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Illuminant {
    /// Average daylight from the north sky, the Munsell renotation reference.
    C,
    /// Horizon daylight, the usual CIELAB reference in print workflows.
    D50,
    /// Mid-morning daylight.
    D55,
    /// Noon daylight, the sRGB reference.
    D65,
    /// North sky daylight.
    D75,
    /// Represents a light of any given hue, as an array [X, Y, Z] in CIE 1931 space with Y
    /// normalized to 1.
    Custom([f64; 3]),
}

/// An array of the named illuminants, in the same order as the white point table below.
pub static ILLUMINANTS: [Illuminant; 5] = [
    Illuminant::C,
    Illuminant::D50,
    Illuminant::D55,
    Illuminant::D65,
    Illuminant::D75,
];

/// A table of white point values for the named illuminants. As there are currently no static
/// HashMaps or the like in Rust, this is simply an array of arrays, in the order of the enum
/// definition. Each white point is an array of 3 `f64` values X, Y, and Z, normalized so that Y is
/// 100.
pub static ILLUMINANT_WHITE_POINTS: [[f64; 3]; 5] = [
    [98.074, 100.000, 118.232],
    [96.422, 100.000, 82.521],
    [95.682, 100.000, 92.149],
    [95.047, 100.000, 108.883],
    [94.972, 100.000, 122.638],
];

impl Illuminant {
    /// Gets the XYZ coordinates of the white point value of the illuminant, normalized so Y is 100.
    pub fn white_point(&self) -> [f64; 3] {
        match *self {
            Illuminant::C => ILLUMINANT_WHITE_POINTS[0],
            Illuminant::D50 => ILLUMINANT_WHITE_POINTS[1],
            Illuminant::D55 => ILLUMINANT_WHITE_POINTS[2],
            Illuminant::D65 => ILLUMINANT_WHITE_POINTS[3],
            Illuminant::D75 => ILLUMINANT_WHITE_POINTS[4],
            Illuminant::Custom(xyz) => {
                [xyz[0] * 100.0 / xyz[1], 100.0, xyz[2] * 100.0 / xyz[1]]
            }
        }
    }

    /// The chromaticity coordinates (x, y) of the illuminant's white point.
    pub fn chromaticity(&self) -> (f64, f64) {
        let wp = self.white_point();
        let sum = wp[0] + wp[1] + wp[2];
        (wp[0] / sum, wp[1] / sum)
    }
}
