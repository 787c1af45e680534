//! This file implements the boundary checks on the outside of the color solid: whether a given
//! chromaticity is a physically realizable color at all, and an approximation of the MacAdam
//! limits, the outer boundary of chromaticities an object color can reach at a given luminance.
//! The spectral locus data is bundled as a CSV of CIE 1931 2° chromaticity coordinates and loaded
//! once into an immutable polygon at first use.
//!
//! The luminance dependence of the true MacAdam limits is wavelength-specific and needs the full
//! optimal-color computation to get right; this module deliberately settles for a first-order
//! stand-in (full purity is allowed until close to white, then the allowed purity falls linearly
//! to zero at the ideal white). That is enough for what the conversion pipeline asks of it:
//! rejecting impossible chromaticities outright, and giving the luminance walk inherited from the
//! original tooling something to converge on near white.

use std::error::Error;
use std::fmt;

use geo::prelude::*;
use geo::{Closest, LineString, Point, Polygon};

use colors::xyycolor::XyYColor;
use illuminants::Illuminant;

/// One row of the bundled chromaticity table.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    wavelength: u16,
    x: f64,
    y: f64,
}

/// Reads the bundled CIE 1931 2° spectral locus chromaticities. Panics on bad data: the file is
/// compiled into the crate, so a parse failure is a build defect, not an input error.
fn read_spectral_locus() -> Vec<(f64, f64)> {
    let raw = include_str!("../data/cie_1931_chromaticity.csv");
    let mut reader = ::csv::Reader::from_reader(raw.as_bytes());
    let mut points = vec![];
    for result in reader.deserialize() {
        let record: Record = result.unwrap();
        points.push((record.x, record.y));
    }
    points
}

lazy_static! {
    /// The spectral locus closed with the purple line, as a polygon in chromaticity space. Every
    /// chromaticity of every physically realizable color lies inside it.
    static ref SPECTRAL_LOCUS: Polygon<f64> = {
        let points = read_spectral_locus();
        Polygon::new(LineString::from(points), vec![])
    };
}

/// Tests whether a chromaticity coordinate lies within the spectral locus (closed with the purple
/// line): a chromaticity outside it corresponds to no light at all, regardless of luminance.
pub fn is_within_spectral_locus(x: f64, y: f64) -> bool {
    SPECTRAL_LOCUS.contains(&Point::new(x, y))
}

/// The excitation-purity stand-in used by the MacAdam check: 0 at the white point, approaching 1
/// at the locus boundary. The denominator uses the distance to the nearest boundary point rather
/// than the intersection along the ray from white, which underestimates slightly but is monotone
/// toward the boundary, which is all the check needs.
fn purity(x: f64, y: f64) -> f64 {
    let (wx, wy) = Illuminant::C.chromaticity();
    let p = Point::new(x, y);
    let from_white = ((x - wx).powi(2) + (y - wy).powi(2)).sqrt();
    let to_boundary = match SPECTRAL_LOCUS.exterior.closest_point(&p) {
        Closest::Intersection(b) | Closest::SinglePoint(b) => {
            ((b.x() - x).powi(2) + (b.y() - y).powi(2)).sqrt()
        }
        Closest::Indeterminate => return 1.,
    };
    if from_white + to_boundary == 0. {
        0.
    } else {
        from_white / (from_white + to_boundary)
    }
}

/// Above this luminance factor the allowed purity starts shrinking toward zero at ideal white.
const NEAR_WHITE_LUMA: f64 = 0.95;

/// Tests whether an xyY coordinate is (approximately) within the MacAdam limits: its chromaticity
/// must be physically realizable, its luminance must not exceed the ideal white, and close to
/// white only near-neutral chromaticities are allowed.
pub fn is_within_macadam_limits(xyy: &XyYColor) -> bool {
    if xyy.luma > 1. || xyy.luma < 0. {
        return false;
    }
    if !is_within_spectral_locus(xyy.x, xyy.y) {
        return false;
    }
    if xyy.luma <= NEAR_WHITE_LUMA {
        return true;
    }
    let ceiling = (1. - xyy.luma) / (1. - NEAR_WHITE_LUMA);
    purity(xyy.x, xyy.y) <= ceiling
}

/// An error raised when a coordinate cannot be brought within the MacAdam limits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GamutError {
    /// No luminance on the walk toward mid-gray makes this chromaticity realizable.
    Unadjustable {
        /// The offending chromaticity x.
        x: f64,
        /// The offending chromaticity y.
        y: f64,
        /// The luminance factor the walk started from.
        luma: f64,
    },
}

impl fmt::Display for GamutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GamutError::Unadjustable { x, y, luma } => write!(
                f,
                "could not adjust xyY ({:.4}, {:.4}, {:.4}) into the MacAdam limits",
                x, y, luma
            ),
        }
    }
}

impl Error for GamutError {
    fn description(&self) -> &str {
        "coordinate outside the MacAdam limits"
    }
}

/// The number of evenly spaced steps each bounded luminance walk takes.
const ADJUST_STEPS: usize = 100;

/// Returns the input if it is already within the MacAdam limits; otherwise walks the luminance in
/// 100 even steps toward mid-gray (Y = 0.5), where the limits are widest, and returns the first
/// coordinate that lands inside, warning about the nudge. The chromaticity is never touched: if no
/// luminance makes it realizable, the coordinate is simply not a color, and that is an error.
pub fn adjust_to_macadam_limits(xyy: &XyYColor) -> Result<XyYColor, GamutError> {
    if is_within_macadam_limits(xyy) {
        return Ok(*xyy);
    }
    let step = (0.5 - xyy.luma) / ADJUST_STEPS as f64;
    for i in 1..=ADJUST_STEPS {
        let candidate = xyy.with_luma(xyy.luma + i as f64 * step);
        if is_within_macadam_limits(&candidate) {
            warn!(
                "Y adjusted from {:.3} to {:.3} to reach the MacAdam limits",
                xyy.luma, candidate.luma
            );
            return Ok(candidate);
        }
    }
    Err(GamutError::Unadjustable {
        x: xyy.x,
        y: xyy.y,
        luma: xyy.luma,
    })
}
