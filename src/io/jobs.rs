//! Job list loading
//!
//! ```xml
//! <samples>
//!   <overlapping name="Flowers" N="3" periodic="True" symmetry="2" ground="-4"/>
//!   <simpletiled name="Knots" subset="Standard" periodic="True"/>
//! </samples>
//! ```
//!
//! Attributes that are absent or zero fall back to the per-kind defaults.

use crate::algorithm::overlapping::OverlappingConfig;
use crate::algorithm::tiled::TiledConfig;
use crate::io::catalog::{parse_flag, parse_number, read_attributes};
use crate::io::configuration::{
    DEFAULT_LIMIT, DEFAULT_OVERLAPPING_HEIGHT, DEFAULT_OVERLAPPING_WIDTH, DEFAULT_PATTERN_SIZE,
    DEFAULT_PERIODIC_INPUT, DEFAULT_SCREENSHOTS, DEFAULT_SYMMETRY, DEFAULT_TILED_HEIGHT,
    DEFAULT_TILED_WIDTH,
};
use crate::io::error::{AlgorithmError, Result, catalog_error};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

/// Model family and parameters of a job
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobKind {
    /// `<overlapping>` element
    Overlapping(OverlappingConfig),
    /// `<simpletiled>` element
    Tiled(TiledConfig),
    /// Any other element, kept so the runner can report it
    Unsupported(String),
}

/// One entry of a job list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Sample image stem or tileset directory name
    pub name: String,
    /// Model to build
    pub kind: JobKind,
    /// Round limit per attempt (0 = unbounded)
    pub limit: usize,
    /// Number of images to produce
    pub screenshots: usize,
}

/// Read and parse a job list file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed
pub fn load_jobs<P: AsRef<Path>>(path: P) -> Result<Vec<Job>> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read job list",
        source: e,
    })?;
    parse_jobs(&xml, path)
}

/// Parse job list XML; each child of the root element is one job
///
/// # Errors
///
/// Returns an error for malformed XML or attribute values that do not parse
pub fn parse_jobs(xml: &str, origin: &Path) -> Result<Vec<Job>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut jobs = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if depth == 1 {
                    jobs.push(parse_job(e, origin)?);
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) if depth == 1 => jobs.push(parse_job(e, origin)?),
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(catalog_error(
                    origin,
                    &format!("XML parse error at byte {}: {e}", reader.buffer_position()),
                ));
            }
            _ => {}
        }
    }

    Ok(jobs)
}

fn parse_job(element: &BytesStart<'_>, origin: &Path) -> Result<Job> {
    let attributes = read_attributes(element, origin)?;
    let fields = Fields {
        attributes: &attributes,
        origin,
    };
    let element_name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

    let kind = match element_name.as_str() {
        "overlapping" => JobKind::Overlapping(OverlappingConfig {
            pattern_size: fields.count("N", DEFAULT_PATTERN_SIZE)?,
            width: fields.count("width", DEFAULT_OVERLAPPING_WIDTH)?,
            height: fields.count("height", DEFAULT_OVERLAPPING_HEIGHT)?,
            periodic_input: fields.flag("periodicInput", DEFAULT_PERIODIC_INPUT)?,
            periodic_output: fields.flag("periodic", false)?,
            symmetry: fields.count("symmetry", DEFAULT_SYMMETRY)?,
            ground: fields
                .number::<isize>("ground")?
                .filter(|&ground| ground != 0),
        }),
        "simpletiled" => JobKind::Tiled(TiledConfig {
            width: fields.count("width", DEFAULT_TILED_WIDTH)?,
            height: fields.count("height", DEFAULT_TILED_HEIGHT)?,
            periodic: fields.flag("periodic", false)?,
            black: fields.flag("black", false)?,
            subset: attributes
                .get("subset")
                .filter(|subset| !subset.is_empty())
                .cloned(),
        }),
        _ => JobKind::Unsupported(element_name),
    };

    Ok(Job {
        name: attributes.get("name").cloned().unwrap_or_default(),
        kind,
        limit: fields.number("limit")?.unwrap_or(DEFAULT_LIMIT),
        screenshots: fields.count("screenshots", DEFAULT_SCREENSHOTS)?,
    })
}

struct Fields<'a> {
    attributes: &'a HashMap<String, String>,
    origin: &'a Path,
}

impl Fields<'_> {
    fn number<T>(&self, attribute: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.attributes
            .get(attribute)
            .map(|text| parse_number(text, attribute, self.origin))
            .transpose()
    }

    // Zero counts as absent
    fn count(&self, attribute: &str, default: usize) -> Result<usize> {
        Ok(self
            .number::<usize>(attribute)?
            .filter(|&value| value != 0)
            .unwrap_or(default))
    }

    fn flag(&self, attribute: &str, default: bool) -> Result<bool> {
        self.attributes
            .get(attribute)
            .map_or(Ok(default), |text| parse_flag(text, attribute, self.origin))
    }
}
