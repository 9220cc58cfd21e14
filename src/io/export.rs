//! CSV export for pipeline results.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{DataError, ModelError, UnknownName, ensure_len};
use crate::pipeline::PipelineResult;

/// Column header of the long layout, one row per turbine and timestep.
pub const LONG_HEADER: &str = "turbine_id,latitude,longitude,timestamp,wind_speed_ms,\
                               air_density_kg_m3,input_power_kw,output_power_kw,tip_speed_ratio";

/// Row shape of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportLayout {
    /// One row per turbine and timestep with every derived series.
    #[default]
    Long,
    /// One row per timestep, one output-power column per turbine.
    Wide,
}

impl FromStr for ExportLayout {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(Self::Long),
            "wide" => Ok(Self::Wide),
            other => Err(UnknownName::new("layout", other, &["long", "wide"])),
        }
    }
}

impl fmt::Display for ExportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("long"),
            Self::Wide => f.write_str("wide"),
        }
    }
}

/// Exports park results to a CSV file at the given path.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns a `DataError` if the file cannot be written, or if the wide layout
/// is requested for turbines that do not share timestamps.
pub fn export_csv(
    results: &[PipelineResult],
    layout: ExportLayout,
    path: &Path,
) -> Result<(), DataError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, layout, buf)
}

/// Writes park results as CSV to any writer.
///
/// # Errors
///
/// See [`export_csv`].
pub fn write_csv(
    results: &[PipelineResult],
    layout: ExportLayout,
    writer: impl Write,
) -> Result<(), DataError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    match layout {
        ExportLayout::Long => write_long(results, &mut wtr)?,
        ExportLayout::Wide => write_wide(results, &mut wtr)?,
    }
    wtr.flush()?;
    Ok(())
}

fn write_long<W: Write>(
    results: &[PipelineResult],
    wtr: &mut csv::Writer<W>,
) -> Result<(), DataError> {
    wtr.write_record(LONG_HEADER.split(',').map(str::trim))?;

    for r in results {
        for rec in r.records() {
            wtr.write_record(&[
                r.turbine_id.to_string(),
                format!("{:.5}", r.site.latitude),
                format!("{:.5}", r.site.longitude),
                timestamp(rec.timestamp),
                format!("{:.4}", rec.wind_speed_ms),
                format!("{:.6}", rec.air_density_kg_m3),
                format!("{:.4}", rec.input_power_kw),
                format!("{:.4}", rec.output_power_kw),
                rec.tip_speed_ratio
                    .map(|tsr| format!("{tsr:.4}"))
                    .unwrap_or_default(),
            ])?;
        }
    }
    Ok(())
}

fn write_wide<W: Write>(
    results: &[PipelineResult],
    wtr: &mut csv::Writer<W>,
) -> Result<(), DataError> {
    let Some(first) = results.first() else {
        wtr.write_record(["timestamp"])?;
        return Ok(());
    };
    for r in &results[1..] {
        ensure_len("wide export timestamps", first.len(), r.len())?;
        if r.timestamps != first.timestamps {
            return Err(ModelError::InvalidSeries {
                reason: format!(
                    "turbine {} timestamps differ from turbine {}",
                    r.turbine_id, first.turbine_id
                ),
            }
            .into());
        }
    }

    let header: Vec<String> = std::iter::once("timestamp".to_string())
        .chain(results.iter().map(|r| format!("turbine_{}_kw", r.turbine_id)))
        .collect();
    wtr.write_record(&header)?;

    for (i, &ts) in first.timestamps.iter().enumerate() {
        let row: Vec<String> = std::iter::once(timestamp(ts))
            .chain(results.iter().map(|r| format!("{:.4}", r.output_power_kw[i])))
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

fn timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
