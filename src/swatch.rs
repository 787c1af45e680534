//! Swatches: named color samples as they arrive from paint vendors, and the batch plumbing that
//! turns a table of them into a table of Munsell labels. Vendor tables come in two shapes, sRGB
//! channel triples or measured xyY coordinates, so a sample carries whichever it was born as and
//! converts at the last moment.
//!
//! Batch labeling is per-row independent: a swatch that can't be labeled is logged and dropped,
//! and never disturbs its neighbors. A vendor table with one bad measurement should still produce
//! the other thousand labels.

use std::io;

use color::{Color, RGBColor};
use colors::xyycolor::XyYColor;
use label::MunsellLabel;
use engine::NotationEngine;
use renotation::RenotationLookup;

/// A color sample in whichever space it was published in.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub enum ColorSample {
    /// An sRGB sample (D65 white), as channel values.
    Rgb(RGBColor),
    /// A measured chromaticity and luminance factor under illuminant C.
    XyY(XyYColor),
}

impl ColorSample {
    /// The sample as an illuminant-C xyY coordinate, adapting RGB samples from their native D65.
    pub fn to_xyy(&self) -> XyYColor {
        match *self {
            ColorSample::Rgb(rgb) => rgb.convert(),
            ColorSample::XyY(xyy) => xyy,
        }
    }
}

/// A vendor swatch: a sample with the identifier and display name it was published under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swatch {
    /// The vendor's identifier for the swatch, e.g. a product code.
    pub identifier: String,
    /// The swatch's display name.
    pub name: String,
    /// The color sample.
    pub sample: ColorSample,
}

/// A swatch together with the Munsell label the engine assigned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledSwatch {
    /// The vendor's identifier.
    pub identifier: String,
    /// The swatch's display name.
    pub name: String,
    /// The assigned label, in notation form.
    pub label: MunsellLabel,
}

#[derive(Debug, Deserialize)]
struct RgbRecord {
    identifier: String,
    name: String,
    r: f64,
    g: f64,
    b: f64,
}

#[derive(Debug, Deserialize)]
struct XyYRecord {
    identifier: String,
    name: String,
    x: f64,
    y: f64,
    #[serde(rename = "Y")]
    luma: f64,
}

#[derive(Debug, Serialize)]
struct LabeledRecord<'a> {
    identifier: &'a str,
    name: &'a str,
    label: String,
}

/// Reads swatches from a CSV table with `identifier,name,r,g,b` columns, channels in 0-255.
pub fn read_rgb_swatches<R: io::Read>(reader: R) -> Result<Vec<Swatch>, ::csv::Error> {
    let mut csv_reader = ::csv::Reader::from_reader(reader);
    let mut swatches = vec![];
    for record in csv_reader.deserialize() {
        let record: RgbRecord = record?;
        swatches.push(Swatch {
            identifier: record.identifier,
            name: record.name,
            sample: ColorSample::Rgb(RGBColor::from_channel_floats(record.r, record.g, record.b)),
        });
    }
    Ok(swatches)
}

/// Reads swatches from a CSV table with `identifier,name,x,y,Y` columns, Y in [0, 1].
pub fn read_xyy_swatches<R: io::Read>(reader: R) -> Result<Vec<Swatch>, ::csv::Error> {
    let mut csv_reader = ::csv::Reader::from_reader(reader);
    let mut swatches = vec![];
    for record in csv_reader.deserialize() {
        let record: XyYRecord = record?;
        swatches.push(Swatch {
            identifier: record.identifier,
            name: record.name,
            sample: ColorSample::XyY(XyYColor {
                x: record.x,
                y: record.y,
                luma: record.luma,
            }),
        });
    }
    Ok(swatches)
}

/// Labels every swatch the engine can, in input order. Failures are logged with the swatch's
/// identifier and dropped; they never abort the batch.
pub fn label_swatches<L: RenotationLookup>(
    engine: &NotationEngine<L>,
    swatches: &[Swatch],
) -> Vec<LabeledSwatch> {
    let mut labeled = vec![];
    for swatch in swatches {
        match engine.color_to_label(&swatch.sample) {
            Ok(label) => labeled.push(LabeledSwatch {
                identifier: swatch.identifier.clone(),
                name: swatch.name.clone(),
                label,
            }),
            Err(err) => {
                warn!("skipping swatch {} ({}): {}", swatch.identifier, swatch.name, err);
            }
        }
    }
    labeled
}

/// Writes labeled swatches as a CSV table with `identifier,name,label` columns, labels in
/// notation form.
pub fn write_labeled_swatches<W: io::Write>(
    writer: W,
    labeled: &[LabeledSwatch],
) -> Result<(), ::csv::Error> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for swatch in labeled {
        csv_writer.serialize(LabeledRecord {
            identifier: &swatch.identifier,
            name: &swatch.name,
            label: swatch.label.to_string(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
