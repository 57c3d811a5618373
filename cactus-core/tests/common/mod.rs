use cactus_core::{DataSource, DataSourceError};

/// Dense in-memory source backed by literal rows.
#[derive(Clone)]
pub struct Rows {
    name: &'static str,
    rows: Vec<Vec<f64>>,
}

impl Rows {
    #[must_use]
    pub fn new(name: &'static str, rows: Vec<Vec<f64>>) -> Self {
        Self { name, rows }
    }
}

impl DataSource for Rows {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        self.name
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        self.rows
            .get(i)
            .ok_or(DataSourceError::OutOfBounds { index: i })?
            .get(j)
            .copied()
            .ok_or(DataSourceError::OutOfBounds { index: j })
    }
}

/// Four taxa on a tree with two internal vertices.
#[must_use]
pub fn tree_rows() -> Rows {
    Rows::new(
        "tree",
        vec![
            vec![0.0, 5.0, 7.0, 7.0],
            vec![5.0, 0.0, 8.0, 8.0],
            vec![7.0, 8.0, 0.0, 6.0],
            vec![7.0, 8.0, 6.0, 0.0],
        ],
    )
}

/// Four equidistant taxa.
#[must_use]
pub fn uniform_rows() -> Rows {
    Rows::new(
        "uniform",
        vec![
            vec![0.0, 2.0, 2.0, 2.0],
            vec![2.0, 0.0, 2.0, 2.0],
            vec![2.0, 2.0, 0.0, 2.0],
            vec![2.0, 2.0, 2.0, 0.0],
        ],
    )
}
