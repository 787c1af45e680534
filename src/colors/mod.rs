//! This module contains the alternative color representations the Munsell conversion pipeline works
//! through. For convenience, each main type is imported into this module's namespace directly.

pub mod cielabcolor;
pub mod xyycolor;

pub use self::cielabcolor::CIELABColor;
pub use self::xyycolor::XyYColor;
