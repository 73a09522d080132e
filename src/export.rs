//! CSV persistence of datasets and the run manifest
//!
//! Each dataset is written as `<stem>.csv`:
//!
//! ```text
//! ,B_x,B_y,B_z,V_1,V_2,V_3
//! 0,<bx>,<by>,<bz>,<v1>,<v2>,<v3>
//! ```
//!
//! Cells go through the csv serializer, which writes the shortest decimal
//! that parses back to the same f64, so reading a file back reproduces the
//! samples exactly. `manifest.json` records the configuration and seed.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dataset::{Dataset, DatasetKind, FieldSample, COLUMNS};
use crate::error::{Error, Result};
use crate::generate::DatasetBundle;
use crate::moment::LinearityMode;
use crate::SimulationConfig;

pub const MANIFEST_FILE: &str = "manifest.json";

/// One CSV record: unnamed row index, then the six data columns
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "B_x")]
    b_x: f64,
    #[serde(rename = "B_y")]
    b_y: f64,
    #[serde(rename = "B_z")]
    b_z: f64,
    #[serde(rename = "V_1")]
    v_1: f64,
    #[serde(rename = "V_2")]
    v_2: f64,
    #[serde(rename = "V_3")]
    v_3: f64,
}

impl CsvRow {
    fn new(index: usize, sample: &FieldSample) -> Self {
        let [b_x, b_y, b_z, v_1, v_2, v_3] = sample.to_row();
        Self { index, b_x, b_y, b_z, v_1, v_2, v_3 }
    }

    fn sample(&self) -> FieldSample {
        FieldSample::from_row([self.b_x, self.b_y, self.b_z, self.v_1, self.v_2, self.v_3])
    }
}

fn header() -> impl Iterator<Item = &'static str> {
    std::iter::once("").chain(COLUMNS)
}

fn column_name(field: u64) -> &'static str {
    match field {
        0 => "row index",
        i => COLUMNS.get(i as usize - 1).copied().unwrap_or("extra"),
    }
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::Io(e),
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => {
                Error::parse(line, format!("bad {} value: {}", column_name(field), err.kind()))
            }
            None => Error::parse(line, message),
        },
        _ => Error::parse(line, message),
    }
}

/// Write one dataset as CSV with a leading row index column
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    w.write_record(header()).map_err(csv_error)?;

    for (index, sample) in dataset.samples.iter().enumerate() {
        w.serialize(CsvRow::new(index, sample)).map_err(csv_error)?;
    }

    w.flush()?;
    Ok(())
}

/// Parse a dataset CSV back into samples, in file order
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<FieldSample>> {
    let mut r = csv::ReaderBuilder::new().from_reader(reader);

    let headers = r.headers().map_err(csv_error)?;
    if !headers.iter().eq(header()) {
        return Err(Error::parse(1, format!("unexpected header: {:?}", headers)));
    }

    let mut samples = Vec::new();
    for record in r.deserialize::<CsvRow>() {
        let row = record.map_err(csv_error)?;
        if row.index != samples.len() {
            return Err(Error::parse(
                samples.len() + 2,
                format!("row index {} out of order, expected {}", row.index, samples.len()),
            ));
        }
        samples.push(row.sample());
    }

    Ok(samples)
}

/// Manifest entry for one persisted dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub kind: DatasetKind,
    pub file: String,
    pub mode: LinearityMode,
    pub rows: usize,
}

/// Everything needed to reproduce or re-check a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub generator: String,
    pub version: String,
    pub generated_at: String,
    pub seed: u64,
    pub config: SimulationConfig,
    pub datasets: Vec<DatasetEntry>,
}

impl RunManifest {
    pub fn load(dir: &Path) -> Result<Self> {
        let file = File::open(dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn write_to_dir(&self, dir: &Path) -> Result<()> {
        let file = File::create(dir.join(MANIFEST_FILE))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn dataset_path(&self, dir: &Path, kind: DatasetKind) -> Option<PathBuf> {
        self.datasets.iter().find(|d| d.kind == kind).map(|d| dir.join(&d.file))
    }
}

/// Write every dataset of `bundle` plus `manifest.json` into `out_dir`
pub fn write_bundle(
    bundle: &DatasetBundle,
    config: &SimulationConfig,
    out_dir: &Path,
) -> Result<RunManifest> {
    fs::create_dir_all(out_dir)?;

    let mut datasets = Vec::with_capacity(bundle.datasets.len());
    for dataset in &bundle.datasets {
        let file = format!("{}.csv", dataset.file_stem());
        let path = out_dir.join(&file);
        write_csv(dataset, File::create(&path)?)?;
        info!("Wrote {} rows to {:?}", dataset.len(), path);

        datasets.push(DatasetEntry {
            kind: dataset.kind,
            file,
            mode: dataset.mode,
            rows: dataset.len(),
        });
    }

    let manifest = RunManifest {
        generator: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        seed: bundle.seed,
        config: config.clone(),
        datasets,
    };
    manifest.write_to_dir(out_dir)?;

    Ok(manifest)
}

/// Load one persisted dataset listed in a manifest
pub fn load_dataset(dir: &Path, entry: &DatasetEntry) -> Result<Dataset> {
    let samples = read_csv(File::open(dir.join(&entry.file))?)?;
    if samples.len() != entry.rows {
        return Err(Error::parse(
            samples.len() + 1,
            format!("{} has {} rows, manifest lists {}", entry.file, samples.len(), entry.rows),
        ));
    }
    Ok(Dataset { kind: entry.kind, mode: entry.mode, samples })
}
