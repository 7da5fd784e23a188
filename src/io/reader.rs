//! Text dataset reader.
//!
//! One point per line, fields separated by spaces or commas. The first line
//! fixes the number of dimensions; a blank line ends the data. With labels
//! enabled the first field of every line names the point instead of holding
//! a value.

use crate::data::dataset::{Dataset, Preference};
use crate::skycube_error::SkycubeError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const SEPARATORS: [char; 2] = [' ', ','];

/// Reader producing a validated [`Dataset`].
#[derive(Clone, Debug, Default)]
pub struct DatasetReader {
    labels: bool,
    preferences: Option<Vec<Preference>>,
}

impl DatasetReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat the first field of every line as the point's label.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Direction per dimension; every dimension is minimized when unset.
    pub fn with_preferences(mut self, preferences: Vec<Preference>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Parse a dataset from `reader`.
    ///
    /// # Errors
    /// Positions in errors are 1-based; `column` counts characters.
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset, SkycubeError> {
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut labels = Vec::new();
        let mut n_dims = None;

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let line = line.trim_end_matches(['\r', ' ']);
            if line.is_empty() {
                if !rows.is_empty() {
                    log::debug!("line {line_no} is empty, end of data");
                }
                break;
            }

            let mut fields = split_fields(line, line_no)?;
            if self.labels {
                let (_, label) = fields.remove(0);
                labels.push(label.to_owned());
            }
            let expected = match n_dims {
                Some(n) => n,
                None => {
                    let n = fields.len();
                    if n == 0 {
                        return Err(SkycubeError::EmptyDataset);
                    }
                    if let Some(prefs) = &self.preferences
                        && prefs.len() != n
                    {
                        return Err(SkycubeError::PreferenceMismatch {
                            expected: prefs.len(),
                            found: n,
                        });
                    }
                    n_dims = Some(n);
                    n
                }
            };
            if fields.len() != expected {
                return Err(SkycubeError::RaggedRow {
                    line: line_no,
                    found: fields.len(),
                    expected,
                });
            }
            let row = fields
                .into_iter()
                .map(|(column, token)| parse_value(token, line_no, column))
                .collect::<Result<Vec<f64>, _>>()?;
            rows.push(row);
        }

        let n_dims = n_dims.ok_or(SkycubeError::EmptyDataset)?;
        log::info!("loading {} points in {} dimensions", rows.len(), n_dims);
        let preferences = self
            .preferences
            .clone()
            .unwrap_or_else(|| vec![Preference::Min; n_dims]);
        let dataset = Dataset::from_rows(&rows, preferences)?;
        if self.labels {
            dataset.with_labels(labels)
        } else {
            Ok(dataset)
        }
    }

    /// Parse the file at `path`.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Dataset, SkycubeError> {
        self.read(File::open(path)?)
    }
}

/// Fields of `line` with their 1-based starting character.
fn split_fields(line: &str, line_no: usize) -> Result<Vec<(usize, &str)>, SkycubeError> {
    let mut fields = Vec::new();
    let mut column = 1;
    for token in line.split(SEPARATORS) {
        if token.is_empty() {
            return Err(SkycubeError::EmptyField {
                line: line_no,
                column,
            });
        }
        fields.push((column, token));
        column += token.chars().count() + 1;
    }
    Ok(fields)
}

fn parse_value(token: &str, line: usize, column: usize) -> Result<f64, SkycubeError> {
    let value: f64 = token.parse().map_err(|_| SkycubeError::InvalidNumber {
        line,
        column,
        token: token.to_owned(),
    })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SkycubeError::NonFiniteValue { line, column })
    }
}
