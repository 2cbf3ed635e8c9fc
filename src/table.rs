//! Flat observation table built from a JSON-stat dataset.
//!
//! One row per cell of the dataset cube; each row carries the display label of
//! its category in every dimension (in dimension order) plus the value. Columns
//! are addressed by their display label, which is how the label resolver hands
//! them out.

use crate::error::PipelineError;
use crate::models::{JsonStatDataset, Values};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    /// Stable dimension id.
    pub id: String,
    /// Locale-dependent display label.
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    /// Category labels, aligned with `Table::columns`.
    pub categories: Vec<String>,
    pub value: Option<f64>,
}

impl Row {
    pub fn category(&self, column: usize) -> &str {
        &self.categories[column]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Flatten a dataset cube into rows, in storage order.
    ///
    /// Dense values produce one row per cell (holes become `value: None`); sparse
    /// values only produce rows for the positions present.
    pub fn from_dataset(ds: &JsonStatDataset) -> Result<Self, PipelineError> {
        if ds.id.len() != ds.size.len() {
            return Err(PipelineError::MalformedDataset(format!(
                "{} dimension ids but {} sizes",
                ds.id.len(),
                ds.size.len()
            )));
        }

        let mut columns = Vec::with_capacity(ds.id.len());
        let mut category_labels: Vec<Vec<String>> = Vec::with_capacity(ds.id.len());
        for (dim_id, &size) in ds.id.iter().zip(&ds.size) {
            let dim = ds.dimension.get(dim_id).ok_or_else(|| {
                PipelineError::MalformedDataset(format!("dimension '{dim_id}' is not described"))
            })?;
            let ids = dim.category.ordered_ids();
            if ids.len() != size {
                return Err(PipelineError::MalformedDataset(format!(
                    "dimension '{dim_id}' has {} categories but size {size}",
                    ids.len()
                )));
            }
            columns.push(Column {
                id: dim_id.clone(),
                label: dim.label_or(dim_id).to_string(),
            });
            category_labels.push(
                ids.iter()
                    .map(|id| dim.category.label_of(id).to_string())
                    .collect(),
            );
        }

        let total: usize = ds.size.iter().product();
        let cell = |pos: usize, value: Option<f64>| Row {
            categories: coordinates(pos, &ds.size)
                .into_iter()
                .zip(&category_labels)
                .map(|(i, labels)| labels[i].clone())
                .collect(),
            value,
        };

        let rows = match &ds.value {
            Values::Dense(values) => {
                if values.len() != total {
                    return Err(PipelineError::MalformedDataset(format!(
                        "{} values for a cube of {total} cells",
                        values.len()
                    )));
                }
                values
                    .iter()
                    .enumerate()
                    .map(|(pos, v)| cell(pos, *v))
                    .collect()
            }
            Values::Sparse(values) => {
                let mut cells = Vec::with_capacity(values.len());
                for (key, v) in values {
                    let pos: usize = key.parse().map_err(|_| {
                        PipelineError::MalformedDataset(format!("value key '{key}' is not a position"))
                    })?;
                    if pos >= total {
                        return Err(PipelineError::MalformedDataset(format!(
                            "value position {pos} outside a cube of {total} cells"
                        )));
                    }
                    cells.push((pos, *v));
                }
                cells.sort_by_key(|(pos, _)| *pos);
                cells.into_iter().map(|(pos, v)| cell(pos, v)).collect()
            }
        };

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column carrying `label`.
    pub fn column(&self, label: &str) -> Result<usize, PipelineError> {
        self.columns
            .iter()
            .position(|c| c.label == label)
            .ok_or_else(|| PipelineError::UnknownColumn(label.to_string()))
    }

    /// Category of the first row in a column, or `None` for an empty table.
    pub fn first(&self, column: usize) -> Option<&str> {
        self.rows.first().map(|r| r.category(column))
    }

    /// Distinct categories of a column in first-encounter order.
    pub fn distinct(&self, column: usize) -> Vec<&str> {
        let mut seen = ahash::AHashSet::new();
        self.rows
            .iter()
            .map(|r| r.category(column))
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Split rows by the category of `column`, groups in first-encounter order
    /// and rows within a group in table order.
    pub fn group_by(&self, column: usize) -> Vec<(&str, Vec<&Row>)> {
        let mut slot: ahash::AHashMap<&str, usize> = ahash::AHashMap::new();
        let mut groups: Vec<(&str, Vec<&Row>)> = Vec::new();
        for row in &self.rows {
            let key = row.category(column);
            let idx = *slot.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push(row);
        }
        groups
    }
}

/// Row-major coordinates of a flat cube position (last dimension fastest).
fn coordinates(mut pos: usize, sizes: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; sizes.len()];
    for (i, &size) in sizes.iter().enumerate().rev() {
        coords[i] = pos % size;
        pos /= size;
    }
    coords
}
