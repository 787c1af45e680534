//! An out-of-process renotation lookup. The published renotation interpolators live in scientific
//! computing environments rather than on crates.io, and chart authors who need their answers
//! verbatim can point this strategy at any helper program speaking a one-line protocol: the
//! program is invoked per query with the x, y, and Y coordinates appended as its final three
//! arguments, and prints a single line `WHEEL VALUE CHROMA` on success, where WHEEL is the
//! position on the 100-unit hue wheel and CHROMA is `NaN` for an achromatic answer. A non-zero
//! exit status means the coordinate is outside the data, which the engine treats like any other
//! failed lookup.
//!
//! Process failures (a missing binary, a crash, unparseable output) are reported distinctly from
//! domain failures so a misconfigured helper doesn't masquerade as an out-of-gamut color.

use std::process::Command;

use colors::xyycolor::XyYColor;
use engine::{wheel_to_hue_and_family, MunsellSpec};
use renotation::{LookupError, RenotationLookup};

/// A renotation lookup that shells out to a helper program for each query.
#[derive(Debug, Clone)]
pub struct ExternalProcess {
    program: String,
    args: Vec<String>,
}

impl ExternalProcess {
    /// A lookup invoking the given program with no fixed arguments.
    pub fn new(program: &str) -> ExternalProcess {
        ExternalProcess {
            program: program.to_string(),
            args: vec![],
        }
    }

    /// A lookup invoking the given program with fixed leading arguments; the query coordinates are
    /// appended after them.
    pub fn with_args(program: &str, args: &[&str]) -> ExternalProcess {
        ExternalProcess {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn parse_answer(stdout: &str) -> Result<(f64, f64, f64), LookupError> {
        let fields: Vec<&str> = stdout.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(LookupError::Process {
                message: format!("expected 3 fields, got {}: {:?}", fields.len(), stdout.trim()),
            });
        }
        let mut parsed = [0.; 3];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| LookupError::Process {
                message: format!("unparseable field {:?} in {:?}", field, stdout.trim()),
            })?;
        }
        Ok((parsed[0], parsed[1], parsed[2]))
    }
}

impl RenotationLookup for ExternalProcess {
    fn munsell_from_xyy(&self, xyy: &XyYColor) -> Result<MunsellSpec, LookupError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(format!("{:.12}", xyy.x))
            .arg(format!("{:.12}", xyy.y))
            .arg(format!("{:.12}", xyy.luma))
            .output()
            .map_err(|err| LookupError::Process {
                message: format!("could not run {}: {}", self.program, err),
            })?;
        if !output.status.success() {
            return Err(LookupError::Process {
                message: format!(
                    "{} failed ({}): {}",
                    self.program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let (wheel, value, chroma) = ExternalProcess::parse_answer(&stdout)?;
        if value > 10. + 1e-9 || value < 0. {
            return Err(LookupError::OutOfRange { value });
        }
        if chroma.is_nan() {
            return Ok(MunsellSpec::grey(value));
        }
        let (hue, family) = wheel_to_hue_and_family(wheel);
        Ok(MunsellSpec::new(hue, value, chroma, family))
    }
}
