//! Line-oriented parser for the matrix text format.
//!
//! Blank lines and lines starting with `#` are skipped everywhere. The first
//! remaining line holds the taxon count `n`; each of the next `n` lines holds
//! `n` distances, optionally preceded by a label. Fields are separated by any
//! run of whitespace and commas. Whether rows carry labels is decided by the
//! first row and must hold for every row after it.

use std::io::{BufRead, Lines};

use crate::errors::MatrixProviderError;

/// Matrix contents recovered from text.
#[derive(Debug)]
pub(crate) struct ParsedMatrix {
    pub(crate) dimension: usize,
    pub(crate) values: Vec<f64>,
    pub(crate) labels: Option<Vec<String>>,
}

/// Iterates over the lines that carry content, tracking line numbers.
struct ContentLines<R> {
    lines: Lines<R>,
    number: usize,
}

impl<R: BufRead> ContentLines<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            number: 0,
        }
    }

    fn next_content(&mut self) -> Result<Option<(usize, String)>, MatrixProviderError> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.number += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((self.number, line)));
        }
        Ok(None)
    }
}

fn fields(line: &str) -> Vec<&str> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|field| !field.is_empty())
        .collect()
}

fn parse_dimension(line: &str) -> Result<usize, MatrixProviderError> {
    match fields(line).as_slice() {
        [raw] => raw
            .parse::<usize>()
            .ok()
            .filter(|&count| count > 0)
            .ok_or_else(|| MatrixProviderError::InvalidDimension {
                raw: (*raw).to_owned(),
            }),
        _ => Err(MatrixProviderError::MissingDimension),
    }
}

/// Parses a complete matrix from `reader`.
pub(crate) fn parse_matrix<R: BufRead>(reader: R) -> Result<ParsedMatrix, MatrixProviderError> {
    let mut content = ContentLines::new(reader);
    let Some((_, header)) = content.next_content()? else {
        return Err(MatrixProviderError::EmptyInput);
    };
    let dimension = parse_dimension(&header)?;

    let mut values = Vec::new();
    let mut labels = Vec::new();
    let mut labelled = false;
    for row in 0..dimension {
        let Some((line, text)) = content.next_content()? else {
            return Err(MatrixProviderError::MissingRows {
                expected: dimension,
                actual: row,
            });
        };
        let fields = fields(&text);
        if row == 0 {
            labelled = fields.len() == dimension + 1;
        }
        let offset = usize::from(labelled);
        let numbers = fields.get(offset..).unwrap_or_default();
        if numbers.len() != dimension {
            return Err(MatrixProviderError::RowLength {
                row,
                expected: dimension,
                actual: numbers.len(),
            });
        }
        if let Some(label) = fields.first().filter(|_| labelled) {
            labels.push((*label).to_owned());
        }
        for (index, raw) in numbers.iter().enumerate() {
            let value = raw
                .parse::<f64>()
                .map_err(|_| MatrixProviderError::InvalidNumber {
                    line,
                    column: index + offset + 1,
                    raw: (*raw).to_owned(),
                })?;
            values.push(value);
        }
    }

    if let Some((line, _)) = content.next_content()? {
        return Err(MatrixProviderError::TrailingData { line });
    }

    Ok(ParsedMatrix {
        dimension,
        values,
        labels: labelled.then_some(labels),
    })
}
