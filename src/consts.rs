//! This file provides the constant matrices used for color space conversion, along with a function
//! for computing inverses. The reason for storing only one direction of each transformation and
//! inverting it on demand is precision: published inverse matrices are rounded separately from the
//! forward ones, so converting a color back and forth with both published matrices slowly drifts.
//! Deriving the inverse from the forward matrix keeps a round trip exact to floating point.

use rulinalg::matrix::Matrix;

/// Not safe for general use: this is only intended for inverting the constant matrices below, which
/// are all well-conditioned. Panics on a singular matrix, which for constants is a programming
/// error, not an input error.
pub fn inv(m: &Matrix<f64>) -> Matrix<f64> {
    let a = m[[0, 0]];
    let b = m[[0, 1]];
    let c = m[[0, 2]];
    let d = m[[1, 0]];
    let e = m[[1, 1]];
    let f = m[[1, 2]];
    let g = m[[2, 0]];
    let h = m[[2, 1]];
    let i = m[[2, 2]];
    let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
    if det.abs() < 1e-12 {
        panic!("Constant matrix not invertible!")
    }
    matrix![
        (e * i - f * h) / det, (c * h - b * i) / det, (b * f - c * e) / det;
        (f * g - d * i) / det, (a * i - c * g) / det, (c * d - a * f) / det;
        (d * h - e * g) / det, (b * g - a * h) / det, (a * e - b * d) / det
    ]
}

/// The matrix taking CIE 1931 XYZ coordinates (D65, Y normalized to 1) to linear (pre-companding)
/// sRGB components. The opposite direction is derived with [`inv`].
#[allow(non_snake_case)]
pub fn STANDARD_RGB_TRANSFORM_MAT() -> Matrix<f64> {
    matrix![
        03.2406, -1.5372, -0.4986;
        -0.9689, 01.8758, 00.0415;
        00.0557, -0.2040, 01.0570
    ]
}

/// The Bradford cone-response matrix, used for chromatic adaptation between illuminants. This is
/// the transform that moves sRGB samples from their native D65 white to the illuminant C white that
/// the Munsell renotation data is referenced to.
#[allow(non_snake_case)]
pub fn BRADFORD_TRANSFORM_MAT() -> Matrix<f64> {
    matrix![
        00.8951, 00.2664, -0.1614;
        -0.7502, 01.7135, 00.0367;
        00.0389, -0.0685, 01.0296
    ]
}
