//! Turbine geolocations.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataError;

/// Position of one turbine.
///
/// `id` is the zero-based position in the site list and keys the turbine's
/// weather rows and results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: usize,
    /// Degrees north, `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, `[-180, 180]`.
    pub longitude: f64,
}

impl Site {
    /// Returns a description of the first out-of-range coordinate, if any.
    pub fn check(&self) -> Option<String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Some(format!("latitude {} outside [-90, 90]", self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Some(format!("longitude {} outside [-180, 180]", self.longitude));
        }
        None
    }
}

/// Reads sites from a two-column (latitude, longitude) CSV file.
///
/// # Errors
///
/// Returns a `DataError` if the file cannot be opened, a row is malformed, or a
/// coordinate is out of range.
pub fn load_sites_csv(path: &Path, has_header: bool) -> Result<Vec<Site>, DataError> {
    let file = File::open(path)?;
    let sites = read_sites(file, has_header)?;
    debug!(path = %path.display(), count = sites.len(), "loaded sites");
    Ok(sites)
}

/// Reads sites from any CSV source; see [`load_sites_csv`].
///
/// # Errors
///
/// Returns a `DataError` on malformed rows or out-of-range coordinates.
pub fn read_sites(reader: impl Read, has_header: bool) -> Result<Vec<Site>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let first_line = if has_header { 2 } else { 1 };
    let mut sites = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = first_line + i;
        let coord = |col: usize, name: &str| -> Result<f64, DataError> {
            let raw = record.get(col).ok_or_else(|| DataError::InvalidSite {
                line,
                reason: format!("missing {name} column"),
            })?;
            raw.parse::<f64>().map_err(|_| DataError::InvalidSite {
                line,
                reason: format!("{name} \"{raw}\" is not a number"),
            })
        };
        let site = Site {
            id: i,
            latitude: coord(0, "latitude")?,
            longitude: coord(1, "longitude")?,
        };
        if let Some(reason) = site.check() {
            return Err(DataError::InvalidSite { line, reason });
        }
        sites.push(site);
    }
    Ok(sites)
}
