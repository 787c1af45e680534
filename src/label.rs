//! Rounded Munsell notation: the step from continuous specifications to the labels printed on
//! charts, like `5.0YR 5/4` or `N 7`. Rounding is not an afterthought here: the order the
//! components are rounded and re-tested in decides whether a near-neutral color collapses to an
//! `N` label or keeps a meaningless hue, so the normalizer pins that order down and the rest of
//! the crate goes through it.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use engine::{HueFamily, MunsellSpec};

/// The granularities label components are rounded to. The defaults are the steps paint charts
/// conventionally print: hues at quarter-sector steps (2.5, 5.0, 7.5, 10.0), values at whole
/// numbers, chromas at even numbers. All rounding is half away from zero.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rounding {
    /// The hue granularity.
    pub hue_step: f64,
    /// The value granularity.
    pub value_step: f64,
    /// The chroma granularity.
    pub chroma_step: f64,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding {
            hue_step: 2.5,
            value_step: 1.,
            chroma_step: 2.,
        }
    }
}

fn round_to_step(x: f64, step: f64) -> f64 {
    (x / step).round() * step
}

/// A rounded Munsell label, ready to print.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum MunsellLabel {
    /// An achromatic label: `N` followed by the value.
    Neutral {
        /// The rounded value.
        value: f64,
    },
    /// A chromatic label: hue, family letters, then value over chroma.
    Chromatic {
        /// The rounded hue angle within the family, in (0, 10].
        hue: f64,
        /// The hue family.
        family: HueFamily,
        /// The rounded value.
        value: f64,
        /// The rounded chroma.
        chroma: f64,
    },
}

impl MunsellLabel {
    /// The label's value component, defined for both forms.
    pub fn value(&self) -> f64 {
        match *self {
            MunsellLabel::Neutral { value } => value,
            MunsellLabel::Chromatic { value, .. } => value,
        }
    }

    /// The continuous specification at exactly this label's coordinates, for converting a label
    /// back into color space.
    pub fn to_specification(&self) -> MunsellSpec {
        match *self {
            MunsellLabel::Neutral { value } => MunsellSpec::grey(value),
            MunsellLabel::Chromatic {
                hue,
                family,
                value,
                chroma,
            } => MunsellSpec::new(hue, value, chroma, family),
        }
    }
}

/// Rounds a continuous specification to a label. The order matters and is fixed:
///
/// 1. Round the value.
/// 2. A specification that is already neutral becomes `N` with the rounded value.
/// 3. Round the chroma. If the rounded value is 10 or the rounded chroma is 0, the color has
///    collapsed onto the neutral axis and becomes `N` too: ideal white and zero chroma have no
///    reportable hue, whatever the continuous hue was.
/// 4. Round the hue. A hue that rounds to 0 is the same wheel point as 10 in the successor
///    family and is always spelled that way, so `0.0YR` never appears in output.
pub fn normalize(spec: &MunsellSpec, rounding: &Rounding) -> MunsellLabel {
    let value = round_to_step(spec.value, rounding.value_step);
    if spec.is_grey() {
        return MunsellLabel::Neutral { value };
    }
    let chroma = round_to_step(spec.chroma, rounding.chroma_step);
    if value == 10. || chroma == 0. {
        return MunsellLabel::Neutral { value };
    }
    let mut hue = round_to_step(spec.hue, rounding.hue_step);
    let mut family = spec.family.unwrap();
    if hue == 0. {
        hue = 10.;
        family = family.next_cyclic();
    }
    MunsellLabel::Chromatic {
        hue,
        family,
        value,
        chroma,
    }
}

/// Writes a rounded component the way charts do: whole numbers without a decimal point,
/// anything else with one decimal.
fn fmt_step(f: &mut fmt::Formatter, x: f64) -> fmt::Result {
    if (x - x.round()).abs() < 1e-9 {
        write!(f, "{}", x.round() as i64)
    } else {
        write!(f, "{:.1}", x)
    }
}

impl fmt::Display for MunsellLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MunsellLabel::Neutral { value } => {
                write!(f, "N ")?;
                fmt_step(f, value)
            }
            MunsellLabel::Chromatic {
                hue,
                family,
                value,
                chroma,
            } => {
                write!(f, "{:.1}{} ", hue, family.letters())?;
                fmt_step(f, value)?;
                write!(f, "/")?;
                fmt_step(f, chroma)
            }
        }
    }
}

/// An error parsing Munsell notation from a string.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LabelParseError {
    /// The string is not `N VALUE` or `HUE FAMILY VALUE/CHROMA` notation.
    InvalidSyntax,
}

impl fmt::Display for LabelParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LabelParseError::InvalidSyntax => write!(f, "invalid Munsell notation"),
        }
    }
}

impl Error for LabelParseError {
    fn description(&self) -> &str {
        match *self {
            LabelParseError::InvalidSyntax => "invalid Munsell notation",
        }
    }
}

impl FromStr for MunsellLabel {
    type Err = LabelParseError;
    fn from_str(s: &str) -> Result<MunsellLabel, LabelParseError> {
        lazy_static! {
            static ref NEUTRAL: Regex = Regex::new(r"^N\s*(\d+(?:\.\d+)?)$").unwrap();
            static ref CHROMATIC: Regex = Regex::new(
                r"^(\d+(?:\.\d+)?)(BG|GY|YR|RP|PB|B|G|Y|R|P)\s+(\d+(?:\.\d+)?)/(\d+(?:\.\d+)?)$"
            )
            .unwrap();
        }
        let s = s.trim();
        if let Some(caps) = NEUTRAL.captures(s) {
            let value = caps[1].parse().map_err(|_| LabelParseError::InvalidSyntax)?;
            return Ok(MunsellLabel::Neutral { value });
        }
        if let Some(caps) = CHROMATIC.captures(s) {
            let hue: f64 = caps[1].parse().map_err(|_| LabelParseError::InvalidSyntax)?;
            let family =
                HueFamily::from_letters(&caps[2]).ok_or(LabelParseError::InvalidSyntax)?;
            let value = caps[3].parse().map_err(|_| LabelParseError::InvalidSyntax)?;
            let chroma = caps[4].parse().map_err(|_| LabelParseError::InvalidSyntax)?;
            if hue <= 0. || hue > 10. {
                return Err(LabelParseError::InvalidSyntax);
            }
            return Ok(MunsellLabel::Chromatic {
                hue,
                family,
                value,
                chroma,
            });
        }
        Err(LabelParseError::InvalidSyntax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::NotationEngine;
    use swatch::ColorSample;

    #[test]
    fn test_default_rounding() {
        let spec = MunsellSpec::new(5.57, 4.94, 4.16, HueFamily::YR);
        let label = normalize(&spec, &Rounding::default());
        assert_eq!(label.to_string(), "5.0YR 5/4");
    }

    #[test]
    fn test_low_chroma_collapses_to_neutral() {
        let spec = MunsellSpec::new(3.1, 6.4, 0.7, HueFamily::R);
        let label = normalize(&spec, &Rounding::default());
        assert_eq!(label, MunsellLabel::Neutral { value: 6. });
    }

    #[test]
    fn test_value_ten_collapses_to_neutral() {
        // near-white keeps a nominal hue and chroma, but a value that rounds to 10 is white
        let spec = MunsellSpec::new(7.2, 9.6, 1.4, HueFamily::G);
        let label = normalize(&spec, &Rounding::default());
        assert_eq!(label, MunsellLabel::Neutral { value: 10. });
    }

    #[test]
    fn test_hue_rounding_wraps_to_successor_family() {
        // hue 0.3 rounds to 0, which is spelled 10 in the next family: 0.3G is 10.0GY
        let spec = MunsellSpec::new(0.3, 5., 6., HueFamily::G);
        let label = normalize(&spec, &Rounding::default());
        assert_eq!(label.to_string(), "10.0GY 5/6");
    }

    #[test]
    fn test_grey_specification_stays_neutral() {
        let label = normalize(&MunsellSpec::grey(2.5), &Rounding::default());
        assert_eq!(label.to_string(), "N 3");
    }

    #[test]
    fn test_custom_granularity_formats_fractions() {
        let rounding = Rounding {
            hue_step: 2.5,
            value_step: 0.5,
            chroma_step: 0.5,
        };
        let spec = MunsellSpec::new(2.4, 4.4, 3.3, HueFamily::B);
        let label = normalize(&spec, &rounding);
        assert_eq!(label.to_string(), "2.5B 4.5/3.5");
    }

    #[test]
    fn test_parse_round_trips_display() {
        for notation in &["5.0YR 5/4", "10.0GY 5/6", "2.5B 4.5/3.5", "N 7"] {
            let label: MunsellLabel = notation.parse().unwrap();
            assert_eq!(&label.to_string(), notation);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_notation() {
        for bad in &["hello", "5.0XX 5/4", "5.0YR 5", "N", "12.0R 5/4", "0R 5/4"] {
            assert!(bad.parse::<MunsellLabel>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_label_color_label_round_trip() {
        // a chart label, realized as a paint color, must read back as the same label
        let engine = NotationEngine::new();
        for notation in &["5.0R 6/8", "2.5G 8/4"] {
            let label: MunsellLabel = notation.parse().unwrap();
            let rgb = engine.to_rgb(&label.to_specification()).unwrap();
            let back = engine.color_to_label(&ColorSample::Rgb(rgb)).unwrap();
            assert_eq!(&back.to_string(), notation);
        }
    }
}
