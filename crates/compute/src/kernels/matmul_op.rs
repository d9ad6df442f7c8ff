use crate::layout::{STORAGE_IN, STORAGE_IN2, UNIFORM_SC};
use crate::{decode_f32, encode_f32, BufferView, ComputeError, MatMulConfig};

pub fn handle_matmul(binds: &[BufferView]) -> Result<Vec<Vec<u8>>, ComputeError> {
    if binds.len() < 4 {
        return Err(ComputeError::ShapeMismatch(
            "MatMul kernel expects 4 buffers",
        ));
    }
    let a_view = &binds[STORAGE_IN];
    let b_view = &binds[STORAGE_IN2];
    let config_view = &binds[UNIFORM_SC];

    if config_view.data.len() != std::mem::size_of::<MatMulConfig>() {
        return Err(ComputeError::ShapeMismatch(
            "MatMul config buffer has incorrect size",
        ));
    }
    let config: MatMulConfig = bytemuck::pod_read_unaligned(&config_view.data);
    let m = config.m as usize;
    let k = config.k as usize;
    let n = config.n as usize;

    if a_view.element_size_in_bytes != std::mem::size_of::<f32>()
        || b_view.element_size_in_bytes != std::mem::size_of::<f32>()
    {
        return Err(ComputeError::ShapeMismatch(
            "MatMul kernel currently only supports f32 data for matrices A and B",
        ));
    }
    if a_view.shape != [m, k] {
        return Err(ComputeError::ShapeMismatch(
            "Matrix A shape in BufferView does not match M,K from config",
        ));
    }
    if b_view.shape != [k, n] {
        return Err(ComputeError::ShapeMismatch(
            "Matrix B shape in BufferView does not match K,N from config",
        ));
    }

    let a_data = decode_f32(&a_view.data);
    let b_data = decode_f32(&b_view.data);

    let mut output_data = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for l in 0..k {
                sum += a_data[i * k + l] * b_data[l * n + j];
            }
            output_data[i * n + j] = sum;
        }
    }

    Ok(vec![encode_f32(&output_data)])
}
