//! The notation engine: conversion from device colors to continuous Munsell specifications,
//! guaranteed to return a defined, finite result for every physically valid input. The direct
//! inverse lookup against the renotation data is undefined in two regions: very dark colors,
//! where the tabulated coverage is sparse and the value computation goes unstable, and very light
//! saturated colors, where the requested chromaticity falls outside the hull of tabulated data.
//! This module wraps the lookup in the two bounded luminance searches that keep the conversion
//! total there. The searches perturb only the luminance: near the edges of the solid, hue and
//! chroma are far less sensitive to a small luminance nudge than the lookup is to being asked for a
//! point it cannot resolve.
//!
//! The actual lookup is injected as a [`RenotationLookup`](../renotation/trait.RenotationLookup.html)
//! strategy, so the search scaffolding is written and tested once whether the lookup is the
//! in-process interpolation or an external interpolation tool.

use std::error::Error;
use std::fmt;

use bound::Bound;
use astm;
use color::{Color, RGBColor};
use colors::xyycolor::XyYColor;
use label::{normalize, MunsellLabel, Rounding};
use renotation::{self, InterpolatedTable, RenotationLookup};
use swatch::ColorSample;

/// The ten Munsell hue families, in the canonical code order (B = 1 through PB = 10). Note that
/// the code order is *not* the order the families appear around the hue wheel; see
/// [`wheel_index`](#method.wheel_index).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HueFamily {
    /// Blue, code 1.
    B,
    /// Blue-green, code 2.
    BG,
    /// Green, code 3.
    G,
    /// Green-yellow, code 4.
    GY,
    /// Yellow, code 5.
    Y,
    /// Yellow-red (orange), code 6.
    YR,
    /// Red, code 7.
    R,
    /// Red-purple, code 8.
    RP,
    /// Purple, code 9.
    P,
    /// Purple-blue, code 10.
    PB,
}

/// The families in code order, so `HUE_FAMILIES[code - 1]` is the family with that code.
pub static HUE_FAMILIES: [HueFamily; 10] = [
    HueFamily::B,
    HueFamily::BG,
    HueFamily::G,
    HueFamily::GY,
    HueFamily::Y,
    HueFamily::YR,
    HueFamily::R,
    HueFamily::RP,
    HueFamily::P,
    HueFamily::PB,
];

/// The family codes in hue wheel order (R, YR, Y, GY, G, BG, B, PB, P, RP), the order
/// interpolation tools number the 100-unit wheel in.
static WHEEL_TO_CODE: [u8; 10] = [7, 6, 5, 4, 3, 2, 1, 10, 9, 8];

impl HueFamily {
    /// The family's code, 1 through 10.
    pub fn code(&self) -> u8 {
        match *self {
            HueFamily::B => 1,
            HueFamily::BG => 2,
            HueFamily::G => 3,
            HueFamily::GY => 4,
            HueFamily::Y => 5,
            HueFamily::YR => 6,
            HueFamily::R => 7,
            HueFamily::RP => 8,
            HueFamily::P => 9,
            HueFamily::PB => 10,
        }
    }

    /// The family with the given code, if the code is in 1-10.
    pub fn from_code(code: u8) -> Option<HueFamily> {
        if code >= 1 && code <= 10 {
            Some(HUE_FAMILIES[(code - 1) as usize])
        } else {
            None
        }
    }

    /// The family's letters as written in notation, e.g. "YR".
    pub fn letters(&self) -> &'static str {
        match *self {
            HueFamily::B => "B",
            HueFamily::BG => "BG",
            HueFamily::G => "G",
            HueFamily::GY => "GY",
            HueFamily::Y => "Y",
            HueFamily::YR => "YR",
            HueFamily::R => "R",
            HueFamily::RP => "RP",
            HueFamily::P => "P",
            HueFamily::PB => "PB",
        }
    }

    /// Parses family letters, case-sensitively, as they appear in notation strings.
    pub fn from_letters(letters: &str) -> Option<HueFamily> {
        use std::collections::HashMap;
        lazy_static! {
            static ref LETTER_TO_FAMILY: HashMap<&'static str, HueFamily> = hashmap! {
                "B" => HueFamily::B,
                "BG" => HueFamily::BG,
                "G" => HueFamily::G,
                "GY" => HueFamily::GY,
                "Y" => HueFamily::Y,
                "YR" => HueFamily::YR,
                "R" => HueFamily::R,
                "RP" => HueFamily::RP,
                "P" => HueFamily::P,
                "PB" => HueFamily::PB,
            };
        }
        LETTER_TO_FAMILY.get(letters).cloned()
    }

    /// The next family in cyclic code order (PB wraps to B). A hue angle of exactly 0 within a
    /// family is the same point on the wheel as 10 within this successor, which is how the label
    /// normalizer spells it.
    pub fn next_cyclic(&self) -> HueFamily {
        HUE_FAMILIES[(self.code() % 10) as usize]
    }

    /// The family's position (0-9) around the hue wheel in R, YR, Y, GY, G, BG, B, PB, P, RP
    /// order: its sector on the 100-unit wheel spans `[10 * index, 10 * (index + 1)]`.
    pub fn wheel_index(&self) -> usize {
        WHEEL_TO_CODE
            .iter()
            .position(|&code| code == self.code())
            .unwrap()
    }
}

/// Splits a position on the 100-unit hue wheel into a hue angle in (0, 10] and its family.
/// Positions at or below 0 wrap around, so 0 means 10RP and 100 does too.
pub fn wheel_to_hue_and_family(wheel: f64) -> (f64, HueFamily) {
    let mut wheel = wheel % 100.;
    if wheel <= 0. {
        wheel += 100.;
    }
    let mut index = (wheel / 10.).floor() as usize;
    let mut hue = wheel - 10. * index as f64;
    // floating point residue just past a sector boundary reads as hue 10 of the lower sector,
    // never as hue 0 of the next: hue stays in (0, 10]
    if hue < 1e-9 {
        hue = 10.;
        index = if index == 0 { 9 } else { index - 1 };
    }
    (hue, HueFamily::from_code(WHEEL_TO_CODE[index % 10]).unwrap())
}

/// The inverse of [`wheel_to_hue_and_family`]: the position on the 100-unit wheel of a hue angle
/// within a family.
pub fn hue_and_family_to_wheel(hue: f64, family: HueFamily) -> f64 {
    10. * family.wheel_index() as f64 + hue
}

/// The continuous, un-rounded result of notation conversion. For a neutral (achromatic) color the
/// hue angle and chroma are NaN and the family is `None`: near the neutral axis the hue angle is
/// numerically meaningless, and pretending otherwise is how neutral grays end up labeled with
/// arbitrary hues. The value component is always defined.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct MunsellSpec {
    /// The hue angle within the family's sector, in (0, 10]; NaN for neutral colors.
    pub hue: f64,
    /// The Munsell value (lightness): 0 is ideal black, 10 is ideal white.
    pub value: f64,
    /// The Munsell chroma, 0 upward (practically bounded around 50); NaN for neutral colors.
    pub chroma: f64,
    /// The hue family, or `None` for neutral colors.
    pub family: Option<HueFamily>,
}

impl MunsellSpec {
    /// A chromatic specification.
    pub fn new(hue: f64, value: f64, chroma: f64, family: HueFamily) -> MunsellSpec {
        MunsellSpec {
            hue,
            value,
            chroma,
            family: Some(family),
        }
    }

    /// A neutral (grey) specification: only the value is defined.
    pub fn grey(value: f64) -> MunsellSpec {
        MunsellSpec {
            hue: f64::NAN,
            value,
            chroma: f64::NAN,
            family: None,
        }
    }

    /// Whether this is a neutral specification, by the same test the original tooling used: an
    /// undefined hue or chroma means no meaningful hue can be reported.
    pub fn is_grey(&self) -> bool {
        self.family.is_none() || self.hue.is_nan() || self.chroma.is_nan()
    }

    /// The specification's position on the 100-unit hue wheel, or `None` when neutral.
    pub fn wheel_position(&self) -> Option<f64> {
        self.family
            .map(|family| hue_and_family_to_wheel(self.hue, family))
    }
}

/// The ways notation conversion can fail. All of these are surfaced to the caller: a wrong Munsell
/// notation in a reference chart is worse than a visibly missing one, so the engine never papers
/// over a failure with a best-effort guess.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MunsellError {
    /// The computed Munsell value exceeds 10: the input claims to be brighter than the ideal
    /// white, which no physically meaningful surface color is.
    OutOfRange {
        /// The offending Munsell value.
        value: f64,
    },
    /// A bounded luminance search was exhausted without finding a usable specification: the input
    /// sits at or beyond the edge of the representable color solid.
    Exhausted {
        /// The last luminance factor the search tested before giving up.
        last_luma: f64,
    },
    /// The downward search was entered below the near-white region where that remedy is known to
    /// apply. This signals a failure mode of the direct lookup the engine does not know how to
    /// repair, and must not be silently papered over.
    Precondition {
        /// The luminance factor at which the direct lookup failed.
        luma: f64,
    },
}

impl fmt::Display for MunsellError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MunsellError::OutOfRange { value } => {
                write!(f, "Munsell value {:.3} exceeds 10", value)
            }
            MunsellError::Exhausted { last_luma } => write!(
                f,
                "could not adjust into the renotation domain, last Y tested was {:.3}",
                last_luma
            ),
            MunsellError::Precondition { luma } => write!(
                f,
                "Y {:.3} is too low to adjust down: direct lookup failed outside the near-white region",
                luma
            ),
        }
    }
}

impl Error for MunsellError {
    fn description(&self) -> &str {
        match *self {
            MunsellError::OutOfRange { .. } => "Munsell value out of range",
            MunsellError::Exhausted { .. } => "bounded luminance search exhausted",
            MunsellError::Precondition { .. } => "downward search precondition violated",
        }
    }
}

/// The number of evenly spaced sub-steps each bounded search takes. Termination is by construction:
/// a search either returns within this many steps or fails.
pub const SEARCH_STEPS: usize = 100;
/// The luminance factor the upward (too-dark) search walks toward.
const UPWARD_LUMA_BOUND: f64 = 0.2;
/// The luminance factor the downward (near-white) search walks toward, and the floor below which
/// that remedy is not known to apply.
const DOWNWARD_LUMA_BOUND: f64 = 0.8;

/// The notation engine: converts color samples to Munsell specifications and back, wrapping the
/// injected renotation lookup in the bounded searches that keep conversion defined at the edges of
/// the color solid.
///
/// # Example
/// ```
/// # use munsell::prelude::*;
/// let engine = NotationEngine::new();
/// let brick = ColorSample::Rgb(RGBColor::from_int_rgb(148, 109, 81));
/// let label = engine.color_to_label(&brick).unwrap();
/// assert_eq!(label.to_string(), "5.0YR 5/4");
/// ```
pub struct NotationEngine<L: RenotationLookup = InterpolatedTable> {
    lookup: L,
}

impl NotationEngine<InterpolatedTable> {
    /// An engine using the in-process interpolated renotation lookup.
    pub fn new() -> NotationEngine<InterpolatedTable> {
        NotationEngine {
            lookup: InterpolatedTable,
        }
    }
}

impl Default for NotationEngine<InterpolatedTable> {
    fn default() -> NotationEngine<InterpolatedTable> {
        NotationEngine::new()
    }
}

impl<L: RenotationLookup> NotationEngine<L> {
    /// An engine using the given lookup strategy.
    pub fn with_lookup(lookup: L) -> NotationEngine<L> {
        NotationEngine { lookup }
    }

    /// The value-finding phase. Computes the Munsell value of the coordinate and, when it falls in
    /// the too-dark region (value below 1) where the renotation coverage is unstable, walks the
    /// luminance upward in even sub-steps toward the bound and returns at the first step reaching
    /// value 1, keeping the chromaticity fixed. Each successful nudge is warned about: precision is
    /// allowed to be lost here, but never silently.
    fn adjust_value_up(&self, xyy: &XyYColor) -> Result<(XyYColor, f64), MunsellError> {
        let luma = xyy.luma;
        let value = astm::munsell_value_astm_d1535(luma * 100.);
        // tolerate Newton residue at exact white
        if value > 10. + 1e-9 {
            return Err(MunsellError::OutOfRange { value });
        }
        if luma == 0. || value >= 1. {
            return Ok((*xyy, value));
        }
        let step = (UPWARD_LUMA_BOUND - luma) / SEARCH_STEPS as f64;
        let mut last_luma = luma;
        for i in 1..=SEARCH_STEPS {
            let luma_next = luma + i as f64 * step;
            last_luma = luma_next;
            let value_next = astm::munsell_value_astm_d1535(luma_next * 100.);
            if value_next > 10. {
                break;
            }
            if value_next >= 1. {
                warn!(
                    "Y adjusted up from {:.3} to {:.3}: value from {:.3} to {:.3}",
                    luma, luma_next, value, value_next
                );
                return Ok((xyy.with_luma(luma_next), value_next));
            }
        }
        Err(MunsellError::Exhausted { last_luma })
    }

    /// The near-white remedy. The direct lookup is known to fail when the chromaticity falls
    /// outside the hull of tabulated data close to white; walking the luminance down toward the
    /// bound and retrying recovers those. A direct-lookup failure anywhere darker is an unexpected
    /// failure mode this engine does not know how to repair, so it is a hard error rather than a
    /// generalized remedy: the boundary behavior below the near-white region is unverified.
    fn adjust_value_down(&self, xyy: &XyYColor, value: f64) -> Result<MunsellSpec, MunsellError> {
        let luma = xyy.luma;
        if luma < DOWNWARD_LUMA_BOUND {
            return Err(MunsellError::Precondition { luma });
        }
        if value > 10. + 1e-9 {
            return Err(MunsellError::OutOfRange { value });
        }
        let step = (DOWNWARD_LUMA_BOUND - luma) / SEARCH_STEPS as f64;
        let mut last_luma = luma;
        for i in 1..=SEARCH_STEPS {
            let luma_next = luma + i as f64 * step;
            last_luma = luma_next;
            let value_next = astm::munsell_value_astm_d1535(luma_next * 100.);
            if value_next > 10. {
                break;
            }
            let candidate = xyy.with_luma(luma_next);
            if let Ok(spec) = self.lookup.munsell_from_xyy(&candidate) {
                warn!(
                    "Y adjusted down from {:.3} to {:.3}: value from {:.3} to {:.3}",
                    luma, luma_next, value, value_next
                );
                return Ok(spec);
            }
        }
        Err(MunsellError::Exhausted { last_luma })
    }

    /// Converts an illuminant-C xyY coordinate to a Munsell specification. Out-of-range components
    /// are clamped, never rejected. Colors too dark to resolve a hue (value below 1 from exact
    /// black) come back as a neutral specification with the computed value: a recognized degenerate
    /// result, not an error.
    pub fn xyy_to_munsell_specification(&self, xyy: &XyYColor) -> Result<MunsellSpec, MunsellError> {
        let xyy = xyy.clamp();
        let (adjusted, value) = self.adjust_value_up(&xyy)?;
        if value < 1. {
            return Ok(MunsellSpec::grey(value));
        }
        match self.lookup.munsell_from_xyy(&adjusted) {
            Ok(spec) => Ok(spec),
            Err(err) => {
                warn!(
                    "direct renotation lookup failed for xyY ({:.4}, {:.4}, {:.4}): {}",
                    adjusted.x, adjusted.y, adjusted.luma, err
                );
                self.adjust_value_down(&adjusted, value)
            }
        }
    }

    /// Converts any color sample to a Munsell specification. RGB samples are adapted from their
    /// native D65 white to illuminant C on the way in.
    pub fn to_munsell_specification(&self, sample: &ColorSample) -> Result<MunsellSpec, MunsellError> {
        self.xyy_to_munsell_specification(&sample.to_xyy())
    }

    /// The forward direction: the illuminant-C xyY coordinate of a Munsell specification. This
    /// always goes through the in-process interpolation model (the external strategy only answers
    /// inverse queries), and is the exact inverse of the interpolated lookup.
    pub fn to_xyy(&self, spec: &MunsellSpec) -> Result<XyYColor, MunsellError> {
        renotation::munsell_to_xyy(spec).map_err(|_| MunsellError::OutOfRange { value: spec.value })
    }

    /// The forward direction all the way to sRGB, for writing chart swatches.
    pub fn to_rgb(&self, spec: &MunsellSpec) -> Result<RGBColor, MunsellError> {
        self.to_xyy(spec).map(|xyy| xyy.convert())
    }

    /// The composition CSV writers and renderers use: sample in, rounded label out, with the
    /// default rounding granularities.
    pub fn color_to_label(&self, sample: &ColorSample) -> Result<MunsellLabel, MunsellError> {
        let spec = self.to_munsell_specification(sample)?;
        Ok(normalize(&spec, &Rounding::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use label::MunsellLabel;

    #[test]
    fn test_wheel_round_trips() {
        let cases = [
            (2.5, HueFamily::R),
            (10., HueFamily::R),
            (5., HueFamily::Y),
            (7.5, HueFamily::PB),
            (10., HueFamily::RP),
        ];
        for &(hue, family) in &cases {
            let wheel = hue_and_family_to_wheel(hue, family);
            let (hue_back, family_back) = wheel_to_hue_and_family(wheel);
            assert!((hue - hue_back).abs() < 1e-12);
            assert_eq!(family, family_back);
        }
        // the wheel origin is 10RP
        assert_eq!(wheel_to_hue_and_family(0.), (10., HueFamily::RP));
        assert_eq!(wheel_to_hue_and_family(100.), (10., HueFamily::RP));
        // wheel position 10 is 10R, not 0YR
        assert_eq!(wheel_to_hue_and_family(10.), (10., HueFamily::R));
    }

    #[test]
    fn test_wheel_boundary_jitter_snaps_to_the_upper_hue() {
        // a reconstructed wheel position carrying floating point residue just past a sector
        // boundary must still read as hue 10 of the lower sector, keeping hue in (0, 10]
        let (hue, family) = wheel_to_hue_and_family(20. + 4e-15);
        assert_eq!(family, HueFamily::YR);
        assert!((hue - 10.).abs() < 1e-9);
        // the same jitter at the wheel origin wraps to 10RP
        let (hue, family) = wheel_to_hue_and_family(1e-15);
        assert_eq!(family, HueFamily::RP);
        assert!((hue - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_family_cyclic_successor() {
        assert_eq!(HueFamily::G.next_cyclic(), HueFamily::GY);
        assert_eq!(HueFamily::PB.next_cyclic(), HueFamily::B);
    }

    #[test]
    fn test_gray_ramp_is_neutral() {
        // RGB (0,0,0), (25,25,25), ..., (250,250,250) must label N 0 through N 10
        let engine = NotationEngine::new();
        for i in 0..11u8 {
            let level = 25 * i;
            let sample = ColorSample::Rgb(RGBColor::from_int_rgb(level, level, level));
            let label = engine.color_to_label(&sample).unwrap();
            match label {
                MunsellLabel::Neutral { value } => assert_eq!(value, f64::from(i)),
                _ => panic!("gray ramp swatch {} was not neutral: {}", level, label),
            }
        }
    }

    #[test]
    fn test_published_brick_sample() {
        // a published conversion: sRGB (148.7, 109.1, 81.6) is 5YR 4.79/4.23,
        // which rounds to 5.0YR 5/4 under default granularity
        let engine = NotationEngine::new();
        let sample = ColorSample::Rgb(RGBColor::from_channel_floats(148.7, 109.1, 81.6));
        let spec = engine.to_munsell_specification(&sample).unwrap();
        assert_eq!(spec.family, Some(HueFamily::YR));
        assert!((spec.value - 4.8).abs() < 0.3);
        let label = engine.color_to_label(&sample).unwrap();
        assert_eq!(label.to_string(), "5.0YR 5/4");
    }

    #[test]
    fn test_luminance_sweep_never_fails_and_value_is_monotone() {
        // fixed chromaticity, Y swept across [0, 1]: conversion must always succeed and the
        // value must be non-decreasing up to the resolution of the downward walk. Near white
        // the reported value comes from the first sub-step that resolves, and neighboring sweep
        // points can land on sub-steps one apart: at most one luma sub-step of drop, which
        // moves the value by under 5x the luma change at these lightnesses.
        let engine = NotationEngine::new();
        let slack = 5. * (1. - DOWNWARD_LUMA_BOUND) / SEARCH_STEPS as f64;
        let mut last_value = 0.;
        for i in 0..=100 {
            let xyy = XyYColor {
                x: 0.418,
                y: 0.374,
                luma: f64::from(i) / 100.,
            };
            let spec = engine.xyy_to_munsell_specification(&xyy).unwrap();
            assert!(spec.value >= last_value - slack);
            assert!(spec.value <= 10.);
            last_value = spec.value;
        }
    }

    #[test]
    fn test_near_black_resolves_by_upward_adjustment() {
        // a very dark chromatic color is brightened until value reaches 1, keeping chromaticity
        let engine = NotationEngine::new();
        let sample = ColorSample::Rgb(RGBColor::from_int_rgb(10, 0, 0));
        let spec = engine.to_munsell_specification(&sample).unwrap();
        assert!(!spec.is_grey());
        assert!(spec.value >= 1.);
        assert!(spec.value < 1.2);
    }

    #[test]
    fn test_exact_black_is_degenerate_neutral() {
        let engine = NotationEngine::new();
        let spec = engine
            .xyy_to_munsell_specification(&XyYColor {
                x: 0.31006,
                y: 0.31616,
                luma: 0.,
            })
            .unwrap();
        assert!(spec.is_grey());
        assert_eq!(spec.value, 0.);
    }

    #[test]
    fn test_dark_lookup_failure_is_a_hard_error() {
        // an impossible chromaticity at moderate luminance fails the direct lookup, and the
        // downward remedy must refuse to apply below the near-white region
        let engine = NotationEngine::new();
        let err = engine
            .xyy_to_munsell_specification(&XyYColor {
                x: 0.8,
                y: 0.15,
                luma: 0.3,
            })
            .unwrap_err();
        assert_eq!(err, MunsellError::Precondition { luma: 0.3 });
    }

    #[test]
    fn test_near_white_impossible_chromaticity_exhausts() {
        // near white the downward search applies, but it is bounded: an impossible chromaticity
        // fails every step and surfaces as exhaustion instead of hanging or guessing
        let engine = NotationEngine::new();
        let err = engine
            .xyy_to_munsell_specification(&XyYColor {
                x: 0.8,
                y: 0.15,
                luma: 0.9,
            })
            .unwrap_err();
        match err {
            MunsellError::Exhausted { last_luma } => {
                assert!(last_luma >= DOWNWARD_LUMA_BOUND - 1e-9)
            }
            other => panic!("expected exhaustion, got {}", other),
        }
    }

    #[test]
    fn test_downward_search_respects_its_step_budget() {
        use renotation::LookupError;
        use std::cell::Cell;
        use std::rc::Rc;

        struct CountingLookup {
            calls: Rc<Cell<usize>>,
        }
        impl RenotationLookup for CountingLookup {
            fn munsell_from_xyy(&self, _xyy: &XyYColor) -> Result<MunsellSpec, LookupError> {
                self.calls.set(self.calls.get() + 1);
                Err(LookupError::BeyondMaxChroma {
                    chroma: 99.,
                    max_chroma: 1.,
                })
            }
        }

        let calls = Rc::new(Cell::new(0));
        let engine = NotationEngine::with_lookup(CountingLookup {
            calls: calls.clone(),
        });
        let err = engine
            .xyy_to_munsell_specification(&XyYColor {
                x: 0.31006,
                y: 0.31616,
                luma: 0.9,
            })
            .unwrap_err();
        match err {
            MunsellError::Exhausted { .. } => {}
            other => panic!("expected exhaustion, got {}", other),
        }
        // one direct attempt plus at most one retry per search step
        assert!(calls.get() <= 1 + SEARCH_STEPS);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let engine = NotationEngine::new();
        let spec = engine
            .xyy_to_munsell_specification(&XyYColor {
                x: 0.31006,
                y: 0.31616,
                luma: 1.5,
            })
            .unwrap();
        assert!(spec.is_grey());
        assert!((spec.value - 10.).abs() < 1e-6);
    }
}
