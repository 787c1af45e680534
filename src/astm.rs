//! The ASTM D1535 Munsell value function: the mapping between a surface's luminance factor Y and
//! its Munsell value V. The forward direction is the Newhall-Nickerson-Judd quintic adopted by the
//! standard; the inverse — the direction conversions actually need, since measurements arrive as
//! luminance — has no closed form and is computed here by Newton iteration.
//!
//! Y is expressed as a percentage (0-100) throughout this module, matching how the standard and the
//! renotation literature write it; callers holding a [0, 1] luminance factor multiply by 100 at the
//! boundary. The quintic is normalized such that V = 10 lands exactly on Y = 100, so values above
//! 10 correspond to luminances above the ideal white and are physically meaningless.

/// The luminance factor Y (as a percentage) of a surface with the given Munsell value, via the
/// ASTM D1535 quintic. Monotonically increasing on the meaningful domain [0, 10]; negative values
/// are treated as ideal black.
pub fn luminance_astm_d1535(v: f64) -> f64 {
    if v <= 0. {
        return 0.;
    }
    1.1914 * v - 0.22533 * v.powi(2) + 0.23352 * v.powi(3) - 0.020484 * v.powi(4)
        + 0.00081939 * v.powi(5)
}

/// The derivative of the quintic with respect to V, used by the Newton inversion.
fn luminance_derivative(v: f64) -> f64 {
    1.1914 - 0.45066 * v + 0.70056 * v.powi(2) - 0.081936 * v.powi(3) + 0.00409695 * v.powi(4)
}

/// The Munsell value of a surface with luminance factor `y` (as a percentage), inverting the ASTM
/// D1535 quintic by Newton iteration. The cube-root lightness approximation (the same shape as
/// CIELAB L*) seeds the iteration close enough that a handful of steps reaches full double
/// precision; the iterate is boxed into [0, 12] so a wild input can't escape the region where the
/// quintic is monotone.
pub fn munsell_value_astm_d1535(y: f64) -> f64 {
    if y <= 0. {
        return 0.;
    }
    let mut v = 11.6 * (y / 100.).cbrt() - 1.6;
    if v < 0.1 {
        v = 0.1;
    }
    for _ in 0..32 {
        let step = (luminance_astm_d1535(v) - y) / luminance_derivative(v);
        v -= step;
        if v < 0. {
            v = 0.;
        } else if v > 12. {
            v = 12.;
        }
        if step.abs() < 1e-12 {
            break;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::ApproxEqRatio;

    #[test]
    fn test_anchor_points() {
        // the quintic is normalized so ideal black and ideal white are exact
        assert_eq!(luminance_astm_d1535(0.), 0.);
        assert!((luminance_astm_d1535(10.) - 100.).abs() < 1e-6);
        assert_eq!(munsell_value_astm_d1535(0.), 0.);
        assert!((munsell_value_astm_d1535(100.) - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_known_luminances() {
        // V = 9 sits near 76.7% luminance: the near-white region the downward search guards
        assert!((luminance_astm_d1535(9.) - 76.69).abs() < 0.01);
        // mid-gray: V = 5 sits near 19.27% luminance
        assert!((luminance_astm_d1535(5.) - 19.27).abs() < 0.01);
    }

    #[test]
    fn test_inverse_round_trips() {
        for i in 1..100 {
            let v = f64::from(i) / 10.;
            let recovered = munsell_value_astm_d1535(luminance_astm_d1535(v));
            assert!(recovered.approx_eq_ratio(&v, 1e-9));
        }
    }

    #[test]
    fn test_value_is_monotone_in_luminance() {
        let mut last = 0.;
        for i in 0..=1000 {
            let y = f64::from(i) / 10.;
            let v = munsell_value_astm_d1535(y);
            assert!(v >= last);
            last = v;
        }
    }
}
