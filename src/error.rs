//! Error types shared by the physical models and their data collaborators.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Deterministic failures of the power-conversion models.
///
/// Every variant is a pure function of the inputs that produced it; retrying
/// with the same data yields the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Elementwise inputs do not share a length.
    #[error("shape mismatch in {what}: expected {expected} elements, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A turbine descriptor violates one of its construction invariants.
    #[error("invalid turbine spec: {field} {reason}")]
    InvalidSpec { field: &'static str, reason: String },
    /// Tip-speed ratio requested for a zero wind speed.
    #[error("tip-speed ratio is undefined for zero wind speed")]
    ZeroWindSpeed,
    /// A weather series is not strictly increasing at a fixed interval.
    #[error("invalid weather series: {reason}")]
    InvalidSeries { reason: String },
}

/// Failures while configuring a park, loading sites or weather, or writing results.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// A geolocation row is out of range or unparsable.
    #[error("invalid site on line {line}: {reason}")]
    InvalidSite { line: usize, reason: String },
    /// The weather source holds no rows for the requested site.
    #[error("no weather data for site {0}")]
    NoWeatherForSite(usize),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A configuration or command-line name that matches no known option.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} \"{name}\", expected one of: {expected}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
    /// Comma-separated accepted names.
    pub expected: String,
}

impl UnknownName {
    pub(crate) fn new(kind: &'static str, name: &str, accepted: &[&str]) -> Self {
        Self {
            kind,
            name: name.to_string(),
            expected: accepted.join(", "),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Fails with [`ModelError::ShapeMismatch`] unless `found == expected`.
pub(crate) fn ensure_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ModelError::ShapeMismatch {
            what,
            expected,
            found,
        })
    }
}
