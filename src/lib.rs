//! Munsell is a library for converting between device color spaces and the Munsell color system,
//! the hue/value/chroma notation paint charts and soil surveys are written in. The underlying
//! philosophy is that a color chart is a reference document: a conversion that silently guesses is
//! worse than one that visibly fails, and a conversion that fails where an answer exists is worse
//! than one that works a little harder. The renotation data the system is defined by is undefined
//! at the edges of the color solid, so the conversions here wrap it in bounded searches that keep
//! the result defined for every physically valid input, and every compromise those searches make
//! is logged rather than swallowed.
//!
//! The usual entry points are [`NotationEngine`](engine/struct.NotationEngine.html) for
//! conversion and [`normalize`](label/fn.normalize.html) for turning its continuous results into
//! chart labels:
//!
//! ```
//! use munsell::prelude::*;
//!
//! let engine = NotationEngine::new();
//! let swatch = ColorSample::Rgb(RGBColor::from_int_rgb(148, 109, 81));
//! assert_eq!(engine.color_to_label(&swatch).unwrap().to_string(), "5.0YR 5/4");
//! ```

// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
// compare -0.96924 with -0.96_924
#![allow(clippy::unreadable_literal)]

extern crate csv;
extern crate geo;
#[macro_use]
extern crate rulinalg;
extern crate num;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate maplit;
#[cfg(test)]
extern crate float_cmp;

pub mod astm;
pub mod bound;
pub mod color;
pub mod colors;
mod consts;
pub mod coord;
pub mod engine;
pub mod external;
pub mod gamut;
pub mod illuminants;
pub mod label;
pub mod prelude;
pub mod renotation;
pub mod swatch;

pub use color::{Color, RGBColor};
pub use label::{normalize, MunsellLabel, Rounding};
pub use engine::{HueFamily, MunsellError, MunsellSpec, NotationEngine};
pub use swatch::ColorSample;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
