//! The most common traits and types, all in one place. Converting a vendor table is usually a
//! `use munsell::prelude::*;` away: the engine, the sample and label types, and the
//! [`Color`](../color/trait.Color.html) trait the conversions hang off of.

pub use bound::Bound;
pub use color::{Color, RGBColor, XYZColor};
pub use colors::cielabcolor::CIELABColor;
pub use colors::xyycolor::XyYColor;
pub use coord::Coord;
pub use engine::{HueFamily, MunsellError, MunsellSpec, NotationEngine};
pub use external::ExternalProcess;
pub use illuminants::Illuminant;
pub use label::{normalize, MunsellLabel, Rounding};
pub use renotation::{InterpolatedTable, RenotationLookup};
pub use swatch::{label_swatches, ColorSample, LabeledSwatch, Swatch};
