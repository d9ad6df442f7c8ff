use crate::error::{NeuroError, Result};
use compute::BufferView;

/// Fixed-shape, row-major 2-D `f32` buffer.
///
/// The shape is set at construction and never changes; only element values
/// can be written through [`Tensor::data_mut`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl Tensor {
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(NeuroError::ShapeMismatch { rows, cols, len: data.len() });
        }
        Ok(Self { data, rows, cols })
    }

    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { data: vec![0.0; rows * cols], rows, cols }
    }

    /// Fills a `rows x cols` tensor in row-major order from `f`.
    pub fn from_fn(rows: usize, cols: usize, f: impl FnMut() -> f32) -> Self {
        let data = std::iter::repeat_with(f).take(rows * cols).collect();
        Self { data, rows, cols }
    }

    /// Builds a tensor from nested rows. Every row must have the same length;
    /// an empty slice gives a `0 x 0` tensor.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(NeuroError::ShapeMismatch {
                    rows: rows.len(),
                    cols,
                    len: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, rows: rows.len(), cols })
    }

    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks_exact(self.cols).map(<[f32]>::to_vec).collect()
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &[f32] {
        &self.data[index * self.cols..(index + 1) * self.cols]
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub(crate) fn to_buffer(&self) -> BufferView {
        BufferView::from_f32(vec![self.rows, self.cols], &self.data)
    }

    pub(crate) fn column(&self, col: usize) -> Vec<f32> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    pub(crate) fn set_column(&mut self, col: usize, values: &[f32]) {
        for (r, &v) in values.iter().enumerate().take(self.rows) {
            self.data[r * self.cols + col] = v;
        }
    }
}
