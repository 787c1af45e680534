//! This file defines the [`Color`](trait.Color.html) trait and the two workhorse representations
//! every conversion in this crate passes through: [`XYZColor`](struct.XYZColor.html), a point in the
//! CIE 1931 XYZ space tagged with its illuminant, and [`RGBColor`](struct.RGBColor.html), a color in
//! the sRGB space that screens and scraped paint catalogs speak. Munsell work happens under
//! illuminant C, sRGB under D65, so the chromatic adaptation transform that moves colors between
//! lighting conditions lives here too.

use std::fmt;
use std::str::FromStr;
use std::error::Error;

use regex::Regex;

use consts;
use coord::Coord;
use illuminants::Illuminant;

/// A point in the CIE 1931 XYZ color space, the device-independent hub every other representation
/// converts through. Components are scaled so that the illuminant's white has Y = 1. Unlike the
/// other color types, an `XYZColor` carries its illuminant with it: the same physical surface has
/// different XYZ coordinates under different lights, and forgetting which light a coordinate was
/// measured under is the classic way to get silently wrong Munsell notations.
#[derive(Debug, Copy, Clone)]
pub struct XYZColor {
    /// The X component: roughly, a red-ish tristimulus response. Nonnegative for physical colors.
    pub x: f64,
    /// The Y component: luminance. 0 is black, 1 is the illuminant's white.
    pub y: f64,
    /// The Z component: roughly, a blue-ish tristimulus response. Nonnegative for physical colors.
    pub z: f64,
    /// The illuminant these coordinates are referenced to.
    pub illuminant: Illuminant,
}

impl XYZColor {
    /// Returns a new XYZColor representing the same surface seen under the given illuminant, using
    /// the Bradford chromatic adaptation transform. The forward and reverse cone matrices come from
    /// the same constant (see `consts`), so adapting there and back is exact.
    pub fn color_adapt(&self, illuminant: Illuminant) -> XYZColor {
        if illuminant == self.illuminant {
            return *self;
        }
        let bradford = consts::BRADFORD_TRANSFORM_MAT();
        let source_wp = self.illuminant.white_point();
        let dest_wp = illuminant.white_point();
        let source_lms = &bradford * &vector![source_wp[0] / 100., 1.0, source_wp[2] / 100.];
        let dest_lms = &bradford * &vector![dest_wp[0] / 100., 1.0, dest_wp[2] / 100.];
        let lms = &bradford * &vector![self.x, self.y, self.z];
        // von Kries scaling in the Bradford cone space
        let scaled = vector![
            lms[0] * dest_lms[0] / source_lms[0],
            lms[1] * dest_lms[1] / source_lms[1],
            lms[2] * dest_lms[2] / source_lms[2]
        ];
        let adapted = &consts::inv(&bradford) * &scaled;
        XYZColor {
            x: adapted[0],
            y: adapted[1],
            z: adapted[2],
            illuminant,
        }
    }

    /// Tests whether two XYZ coordinates are the same to within a small numerical tolerance,
    /// ignoring illuminant tags. Meant for tests and sanity checks, not perceptual comparison.
    pub fn approx_equal(&self, other: &XYZColor) -> bool {
        (self.x - other.x).abs() < 1e-6
            && (self.y - other.y).abs() < 1e-6
            && (self.z - other.z).abs() < 1e-6
    }
}

/// A trait that includes any color representation that can be converted to and from the CIE 1931
/// XYZ color space.
pub trait Color: Sized {
    /// Constructs this color from an XYZ coordinate, adapting the illuminant as needed.
    fn from_xyz(xyz: XYZColor) -> Self;
    /// Converts this color to an XYZ coordinate under the given illuminant.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor;
    /// Converts between any two color representations, going through XYZ under illuminant C. C is
    /// the hub here, rather than the D65 most RGB-centric libraries pick, because the renotation
    /// data this crate exists to serve is referenced to C.
    fn convert<T: Color>(&self) -> T {
        T::from_xyz(self.to_xyz(Illuminant::C))
    }
}

impl Color for XYZColor {
    fn from_xyz(xyz: XYZColor) -> XYZColor {
        xyz
    }
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        self.color_adapt(illuminant)
    }
}

/// An error that occurs while parsing a string into an [`RGBColor`].
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum RGBParseError {
    /// The string is not a 6-digit hexadecimal code, with or without a leading `#`.
    InvalidHexSyntax,
}

impl fmt::Display for RGBParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RGB parsing error: {}", self.description())
    }
}

impl Error for RGBParseError {
    fn description(&self) -> &str {
        match *self {
            RGBParseError::InvalidHexSyntax => "invalid hex color syntax",
        }
    }
}

/// A color in the sRGB space: the space of monitors, web pages, and the scraped paint catalogs this
/// crate's data comes from. Components are stored as floats in [0, 1]; the conventional 0-255
/// integer channels are a constructor and accessor away. Values outside [0, 1] are representable,
/// which keeps out-of-gamut intermediate results exact: clamp through the
/// [`Bound`](../bound/trait.Bound.html) trait when a displayable color is required.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RGBColor {
    /// The red component, nominally in [0, 1].
    pub r: f64,
    /// The green component, nominally in [0, 1].
    pub g: f64,
    /// The blue component, nominally in [0, 1].
    pub b: f64,
}

/// The sRGB companding curve: linear light to gamma-encoded component.
fn compand(c: f64) -> f64 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// The inverse sRGB companding curve: gamma-encoded component to linear light.
fn uncompand(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl RGBColor {
    /// Constructs an `RGBColor` from conventional 0-255 integer channels.
    pub fn from_int_rgb(r: u8, g: u8, b: u8) -> RGBColor {
        RGBColor {
            r: f64::from(r) / 255.,
            g: f64::from(g) / 255.,
            b: f64::from(b) / 255.,
        }
    }

    /// Constructs an `RGBColor` from 0-255 channels given as floats, as scraped records sometimes
    /// carry them ("148.7, 109.1, 81.6"). No rounding is applied.
    pub fn from_channel_floats(r: f64, g: f64, b: f64) -> RGBColor {
        RGBColor {
            r: r / 255.,
            g: g / 255.,
            b: b / 255.,
        }
    }

    /// Returns the conventional 0-255 integer channels, rounding and clamping as needed.
    pub fn int_rgb(&self) -> (u8, u8, u8) {
        let to_int = |c: f64| (c.max(0.).min(1.) * 255.).round() as u8;
        (to_int(self.r), to_int(self.g), to_int(self.b))
    }

    /// Parses a 6-digit hexadecimal color code, with or without a leading `#`.
    /// # Example
    /// ```
    /// # use munsell::color::RGBColor;
    /// let sienna = RGBColor::from_hex_code("#1E150F").unwrap();
    /// assert_eq!(sienna.int_rgb(), (30, 21, 15));
    /// ```
    pub fn from_hex_code(code: &str) -> Result<RGBColor, RGBParseError> {
        lazy_static! {
            static ref HEX_RE: Regex = Regex::new(r"^#?([0-9a-fA-F]{6})$").unwrap();
        }
        match HEX_RE.captures(code) {
            Some(caps) => {
                let digits = &caps[1];
                // the regex guarantees these parses succeed
                let r = u8::from_str_radix(&digits[0..2], 16).unwrap();
                let g = u8::from_str_radix(&digits[2..4], 16).unwrap();
                let b = u8::from_str_radix(&digits[4..6], 16).unwrap();
                Ok(RGBColor::from_int_rgb(r, g, b))
            }
            None => Err(RGBParseError::InvalidHexSyntax),
        }
    }
}

impl Color for RGBColor {
    /// Converts a given XYZ color to sRGB: the coordinate is first adapted to D65, the sRGB
    /// reference white, then run through the linear transform and the companding curve.
    fn from_xyz(xyz: XYZColor) -> RGBColor {
        let d65 = xyz.color_adapt(Illuminant::D65);
        let linear = &consts::STANDARD_RGB_TRANSFORM_MAT() * &vector![d65.x, d65.y, d65.z];
        RGBColor {
            r: compand(linear[0]),
            g: compand(linear[1]),
            b: compand(linear[2]),
        }
    }

    /// Converts to XYZ by undoing the companding curve, applying the inverse linear transform to
    /// get a D65 coordinate, and then chromatically adapting to the requested illuminant.
    fn to_xyz(&self, illuminant: Illuminant) -> XYZColor {
        let linear = vector![uncompand(self.r), uncompand(self.g), uncompand(self.b)];
        let xyz = &consts::inv(&consts::STANDARD_RGB_TRANSFORM_MAT()) * &linear;
        XYZColor {
            x: xyz[0],
            y: xyz[1],
            z: xyz[2],
            illuminant: Illuminant::D65,
        }
        .color_adapt(illuminant)
    }
}

impl From<Coord> for RGBColor {
    fn from(c: Coord) -> RGBColor {
        RGBColor {
            r: c.x,
            g: c.y,
            b: c.z,
        }
    }
}

impl Into<Coord> for RGBColor {
    fn into(self) -> Coord {
        Coord {
            x: self.r,
            y: self.g,
            z: self.b,
        }
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (r, g, b) = self.int_rgb();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl FromStr for RGBColor {
    type Err = RGBParseError;
    fn from_str(s: &str) -> Result<RGBColor, RGBParseError> {
        RGBColor::from_hex_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_xyz_round_trip() {
        let color = RGBColor::from_int_rgb(148, 109, 81);
        let back = RGBColor::from_xyz(color.to_xyz(Illuminant::C));
        assert!((color.r - back.r).abs() < 1e-8);
        assert!((color.g - back.g).abs() < 1e-8);
        assert!((color.b - back.b).abs() < 1e-8);
    }

    #[test]
    fn test_white_luminance() {
        // sRGB white should land on Y = 1 to within the precision of the published matrix
        let white = RGBColor::from_int_rgb(255, 255, 255);
        let xyz = white.to_xyz(Illuminant::D65);
        assert!((xyz.y - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_adaptation_keeps_neutral_neutral() {
        // a gray under D65, moved to C, should sit at C's chromaticity
        let gray = RGBColor::from_int_rgb(128, 128, 128);
        let xyz = gray.to_xyz(Illuminant::C);
        let (cx, cy) = Illuminant::C.chromaticity();
        let sum = xyz.x + xyz.y + xyz.z;
        assert!((xyz.x / sum - cx).abs() < 1e-3);
        assert!((xyz.y / sum - cy).abs() < 1e-3);
    }

    #[test]
    fn test_adapt_round_trip_is_exact() {
        let xyz = XYZColor {
            x: 0.21,
            y: 0.188,
            z: 0.104,
            illuminant: Illuminant::D65,
        };
        let back = xyz.color_adapt(Illuminant::C).color_adapt(Illuminant::D65);
        assert!(xyz.approx_equal(&back));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(
            RGBColor::from_hex_code("1E150F").unwrap().int_rgb(),
            (30, 21, 15)
        );
        assert_eq!(
            "#FEED40".parse::<RGBColor>().unwrap().int_rgb(),
            (254, 237, 64)
        );
        assert_eq!(
            RGBColor::from_hex_code("#12345"),
            Err(RGBParseError::InvalidHexSyntax)
        );
        assert_eq!(
            RGBColor::from_hex_code("nothex"),
            Err(RGBParseError::InvalidHexSyntax)
        );
    }

    #[test]
    fn test_display_round_trips() {
        let color = RGBColor::from_hex_code("#B14835").unwrap();
        assert_eq!(color.to_string(), "#B14835");
    }
}
