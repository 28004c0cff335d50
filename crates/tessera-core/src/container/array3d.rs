use std::ops::{Index, IndexMut};

use super::clamp_axis;

/// A levels × rows × columns volume, stored level by level, each level
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Array3D<T> {
    levels: usize,
    rows: usize,
    columns: usize,
    data: Box<[T]>,
}

impl<T: Default> Array3D<T> {
    pub fn new(levels: usize, rows: usize, columns: usize) -> Self {
        Self {
            levels,
            rows,
            columns,
            data: (0..levels * rows * columns).map(|_| T::default()).collect(),
        }
    }
}

impl<T> Array3D<T> {
    pub fn from_vec(levels: usize, rows: usize, columns: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != levels * rows * columns {
            return None;
        }
        Some(Self {
            levels,
            rows,
            columns,
            data: data.into_boxed_slice(),
        })
    }

    pub fn levels(&self) -> usize {
        self.levels
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

    fn offset(&self, level: usize, row: usize, column: usize) -> usize {
        level * self.rows * self.columns + row * self.columns + column
    }

    pub fn get(&self, level: usize, row: usize, column: usize) -> Option<&T> {
        if level < self.levels && row < self.rows && column < self.columns {
            self.data.get(self.offset(level, row, column))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, level: usize, row: usize, column: usize) -> Option<&mut T> {
        if level < self.levels && row < self.rows && column < self.columns {
            let offset = self.offset(level, row, column);
            self.data.get_mut(offset)
        } else {
            None
        }
    }

    pub fn index_of(&self, level: usize, row: usize, column: usize) -> Option<&T> {
        let position = self.clamped(level, row, column)?;
        self.data.get(position)
    }

    pub fn index_of_mut(&mut self, level: usize, row: usize, column: usize) -> Option<&mut T> {
        let position = self.clamped(level, row, column)?;
        self.data.get_mut(position)
    }

    /// One level as a flat row-major slice, clamped to the last level.
    pub fn level(&self, level: usize) -> Option<&[T]> {
        if self.levels == 0 {
            tracing::error!("Array3D::level({}): array has no levels", level);
            return None;
        }
        let level = clamp_axis("Array3D::level", "level", level, self.levels);
        let plane = self.rows * self.columns;
        self.data.get(level * plane..(level + 1) * plane)
    }

    fn clamped(&self, level: usize, row: usize, column: usize) -> Option<usize> {
        if self.data.is_empty() {
            tracing::error!(
                "Array3D::index_of({}, {}, {}): array is empty",
                level,
                row,
                column
            );
            return None;
        }
        let level = clamp_axis("Array3D::index_of", "level", level, self.levels);
        let row = clamp_axis("Array3D::index_of", "row", row, self.rows);
        let column = clamp_axis("Array3D::index_of", "column", column, self.columns);
        Some(self.offset(level, row, column))
    }
}

impl<T> Index<(usize, usize, usize)> for Array3D<T> {
    type Output = T;

    fn index(&self, (level, row, column): (usize, usize, usize)) -> &T {
        match self.index_of(level, row, column) {
            Some(item) => item,
            None => panic!("index ({}, {}, {}) into an empty Array3D", level, row, column),
        }
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Array3D<T> {
    fn index_mut(&mut self, (level, row, column): (usize, usize, usize)) -> &mut T {
        match self.index_of_mut(level, row, column) {
            Some(item) => item,
            None => panic!("index ({}, {}, {}) into an empty Array3D", level, row, column),
        }
    }
}
