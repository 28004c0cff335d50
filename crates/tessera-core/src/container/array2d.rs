use std::ops::{Index, IndexMut};

use super::clamp_axis;

/// A rows × columns grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array2D<T> {
    rows: usize,
    columns: usize,
    data: Box<[T]>,
}

impl<T: Default> Array2D<T> {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            data: (0..rows * columns).map(|_| T::default()).collect(),
        }
    }
}

impl<T> Array2D<T> {
    /// Wrap row-major `data`. Returns `None` if its length is not
    /// `rows * columns`.
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != rows * columns {
            return None;
        }
        Some(Self {
            rows,
            columns,
            data: data.into_boxed_slice(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            self.data.get(row * self.columns + column)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.rows && column < self.columns {
            self.data.get_mut(row * self.columns + column)
        } else {
            None
        }
    }

    /// Clamped access; each axis is clamped independently.
    pub fn index_of(&self, row: usize, column: usize) -> Option<&T> {
        let position = self.clamped(row, column)?;
        self.data.get(position)
    }

    pub fn index_of_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        let position = self.clamped(row, column)?;
        self.data.get_mut(position)
    }

    /// One row as a slice; past-the-end rows resolve to the last row.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if self.rows == 0 {
            tracing::error!("Array2D::row({}): array has no rows", row);
            return None;
        }
        let row = clamp_axis("Array2D::row", "row", row, self.rows);
        let start = row * self.columns;
        self.data.get(start..start + self.columns)
    }

    fn clamped(&self, row: usize, column: usize) -> Option<usize> {
        if self.data.is_empty() {
            tracing::error!("Array2D::index_of({}, {}): array is empty", row, column);
            return None;
        }
        let row = clamp_axis("Array2D::index_of", "row", row, self.rows);
        let column = clamp_axis("Array2D::index_of", "column", column, self.columns);
        Some(row * self.columns + column)
    }
}

impl<T> Index<(usize, usize)> for Array2D<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        match self.index_of(row, column) {
            Some(item) => item,
            None => panic!("index ({}, {}) into an empty Array2D", row, column),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Array2D<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        match self.index_of_mut(row, column) {
            Some(item) => item,
            None => panic!("index ({}, {}) into an empty Array2D", row, column),
        }
    }
}
