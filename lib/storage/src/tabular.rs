//! Tabular corpus loader
//!
//! Reads delimited text with a header row: one label column and any number
//! of 0/1 indicator columns, one row per case. This is the layout of the
//! Kaggle symptom/prognosis datasets, including their trailing delimiter
//! (a column with a blank name, ignored here).

use crate::error::{Result, StorageError};
use cbrx_core::{Case, CaseBase, CaseId, FeatureSet, FeatureVocabulary};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cases plus the vocabulary declared by the source header
#[derive(Debug, Clone)]
pub struct Corpus {
    pub vocabulary: FeatureVocabulary,
    pub cases: Vec<Case>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn into_case_base(self) -> Result<CaseBase> {
        Ok(CaseBase::new(self.cases)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Label,
    Feature(usize),
    Ignored,
}

/// Loader for indicator tables
#[derive(Debug, Clone)]
pub struct TabularLoader {
    label_column: String,
    delimiter: u8,
    default_solution: bool,
}

impl Default for TabularLoader {
    fn default() -> Self {
        Self {
            label_column: "prognosis".to_string(),
            delimiter: b',',
            default_solution: false,
        }
    }
}

impl TabularLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Attach "Standard treatment for {label}" as each case's solution
    #[must_use]
    pub fn with_default_solution(mut self, enabled: bool) -> Self {
        self.default_solution = enabled;
        self
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Corpus> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let corpus = self.load_reader(file)?;
        info!(path = %path.display(), cases = corpus.len(), features = corpus.vocabulary.len(), "Corpus loaded");
        Ok(corpus)
    }

    pub fn load_str(&self, text: &str) -> Result<Corpus> {
        self.load_reader(text.as_bytes())
    }

    /// Quoted fields may contain the delimiter; whitespace around cells is
    /// trimmed.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Corpus> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut records = reader
            .records()
            .filter(|record| !matches!(record, Ok(r) if is_blank(r)));

        let header = match records.next() {
            Some(record) => record?,
            None => return Err(StorageError::MissingHeader),
        };

        let mut columns = Vec::with_capacity(header.len());
        let mut feature_names = Vec::new();
        let mut has_label = false;
        for name in header.iter() {
            if name == self.label_column && !has_label {
                has_label = true;
                columns.push(Column::Label);
            } else if name.is_empty() {
                columns.push(Column::Ignored);
            } else {
                columns.push(Column::Feature(feature_names.len()));
                feature_names.push(name.to_string());
            }
        }
        if !has_label {
            return Err(StorageError::MissingLabelColumn(self.label_column.clone()));
        }
        let vocabulary = FeatureVocabulary::from_names(feature_names.iter().cloned())?;

        let mut cases = Vec::new();
        for record in records {
            let record = record?;
            let line_no = record.position().map_or(0, |p| p.line() as usize);
            check_width(&columns, &record, line_no)?;

            let mut label = None;
            let mut features = FeatureSet::new();
            for (column, cell) in columns.iter().zip(record.iter()) {
                match *column {
                    Column::Label => label = Some(cell),
                    Column::Feature(i) => {
                        if indicator_present(cell).ok_or_else(|| StorageError::InvalidIndicator {
                            line: line_no,
                            column: feature_names[i].clone(),
                            value: cell.to_string(),
                        })? {
                            features.insert(feature_names[i].clone());
                        }
                    }
                    Column::Ignored => {}
                }
            }

            let label = match label {
                Some(label) if !label.is_empty() => label.to_string(),
                _ => return Err(StorageError::EmptyLabel { line: line_no }),
            };

            let id = CaseId::Integer(cases.len() as u64);
            let mut case = Case {
                id,
                features,
                label,
                solution: None,
            };
            if self.default_solution {
                case.solution = Some(format!("Standard treatment for {}", case.label));
            }
            cases.push(case);
        }

        debug!(cases = cases.len(), columns = columns.len(), "Parsed tabular corpus");
        Ok(Corpus { vocabulary, cases })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// Cells may be missing or extra only where the header column is blank
fn check_width(columns: &[Column], cells: &StringRecord, line: usize) -> Result<()> {
    let ragged = || StorageError::RaggedRow {
        line,
        expected: columns.len(),
        actual: cells.len(),
    };
    if cells.len() < columns.len() && columns[cells.len()..].iter().any(|c| *c != Column::Ignored) {
        return Err(ragged());
    }
    if cells.len() > columns.len() && cells.iter().skip(columns.len()).any(|c| !c.is_empty()) {
        return Err(ragged());
    }
    Ok(())
}

/// `Some(true)` for a positive number, `Some(false)` for zero or blank,
/// `None` for anything else (text, negatives, NaN, infinities)
fn indicator_present(cell: &str) -> Option<bool> {
    if cell.is_empty() {
        return Some(false);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v > 0.0),
        _ => None,
    }
}
