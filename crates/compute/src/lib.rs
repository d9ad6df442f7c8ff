#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! CPU numeric kernels behind a small dispatch interface.
//!
//! Buffers travel as raw little-endian bytes wrapped in [`BufferView`], so a
//! backend only ever sees `(kernel, binds, workgroups)`. The network forward
//! pass in `neuro` is written against [`ComputeBackend`] and runs on
//! [`CpuBackend`].

use std::sync::Arc;
use thiserror::Error;

pub mod backend;
pub mod cpu_backend;
pub mod kernels;
pub mod layout;

pub use backend::ComputeBackend;
pub use cpu_backend::CpuBackend;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error("buffer shape mismatch: {0}")]
    ShapeMismatch(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    // Linear algebra
    MatMul,
    AddBroadcast,

    // Element-wise activations
    Relu,
    Tanh,
    Sigmoid,
}

impl Kernel {
    #[must_use]
    pub const fn binding_count(&self) -> usize {
        layout::binding_count(self)
    }
}

/// Row-major `m x k` times `k x n` dimensions passed to [`Kernel::MatMul`]
/// through its config binding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MatMulConfig {
    pub m: u32,
    pub k: u32,
    pub n: u32,
}

#[derive(Clone, Debug)]
pub struct BufferView {
    pub data: Arc<[u8]>,
    pub shape: Vec<usize>, // Number of elements per dimension
    pub element_size_in_bytes: usize,
}

impl BufferView {
    #[must_use]
    pub fn new(data: Arc<[u8]>, shape: Vec<usize>, element_size_in_bytes: usize) -> Self {
        Self { data, shape, element_size_in_bytes }
    }

    /// Wraps a slice of `f32` values as a buffer with the given shape.
    #[must_use]
    pub fn from_f32(shape: Vec<usize>, values: &[f32]) -> Self {
        Self::new(encode_f32(values).into(), shape, std::mem::size_of::<f32>())
    }

    /// Zero-filled `f32` buffer used as an output placeholder.
    #[must_use]
    pub fn zeros_f32(shape: Vec<usize>) -> Self {
        let len: usize = shape.iter().product();
        Self::new(
            vec![0u8; len * std::mem::size_of::<f32>()].into(),
            shape,
            std::mem::size_of::<f32>(),
        )
    }

    #[must_use]
    pub fn from_config(config: MatMulConfig) -> Self {
        Self::new(
            bytemuck::bytes_of(&config).to_vec().into(),
            vec![1],
            std::mem::size_of::<MatMulConfig>(),
        )
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns `true` when the byte length agrees with shape and element size.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.element_count() * self.element_size_in_bytes
    }
}

/// Encodes `f32` values as little-endian bytes.
#[must_use]
pub fn encode_f32(values: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(values).to_vec()
}

/// Decodes bytes produced by [`encode_f32`]. Reads are unaligned, so any byte
/// slice is accepted; a trailing partial element is ignored.
#[must_use]
pub fn decode_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(std::mem::size_of::<f32>())
        .map(bytemuck::pod_read_unaligned::<f32>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_bytes_survive_encoding() {
        let values = [1.5f32, -0.25, 0.0, f32::MAX];
        assert_eq!(decode_f32(&encode_f32(&values)), values);
    }

    #[test]
    fn buffer_consistency_tracks_shape() {
        let good = BufferView::from_f32(vec![2, 2], &[1.0, 2.0, 3.0, 4.0]);
        assert!(good.is_consistent());
        let bad = BufferView::new(vec![0u8; 12].into(), vec![4], 4);
        assert!(!bad.is_consistent());
    }
}
