// JSON case lists: `[{"id": 0, "features": ["a"], "label": "L"}, ...]`
use crate::error::Result;
use cbrx_core::Case;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub fn parse_json_cases(text: &str) -> Result<Vec<Case>> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_json_cases<P: AsRef<Path>>(path: P) -> Result<Vec<Case>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let cases: Vec<Case> = serde_json::from_reader(reader)?;
    info!(path = %path.display(), cases = cases.len(), "Cases loaded");
    Ok(cases)
}

/// Write cases in the format read by [`load_json_cases`], e.g. to convert a
/// tabular source once
pub fn write_json_cases<P: AsRef<Path>>(path: P, cases: &[Case]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, cases)?;
    writer.flush()?;
    Ok(())
}
