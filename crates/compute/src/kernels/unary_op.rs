use crate::layout::{STORAGE_IN, STORAGE_OUT_UNARY};
use crate::{decode_f32, encode_f32, BufferView, ComputeError};

/// Applies `f` to every element of the input binding.
///
/// Bindings are `[input, output_placeholder]`; both must hold the same number
/// of `f32` elements.
pub(crate) fn map_f32(
    binds: &[BufferView],
    f: impl Fn(f32) -> f32,
) -> Result<Vec<Vec<u8>>, ComputeError> {
    if binds.len() < 2 {
        return Err(ComputeError::ShapeMismatch("unary kernel expects 2 buffers"));
    }
    let input_view = &binds[STORAGE_IN];
    let output_view = &binds[STORAGE_OUT_UNARY];
    if input_view.element_size_in_bytes != std::mem::size_of::<f32>()
        || output_view.element_size_in_bytes != std::mem::size_of::<f32>()
    {
        return Err(ComputeError::ShapeMismatch(
            "unary kernels currently only support f32 data",
        ));
    }
    if input_view.element_count() != output_view.element_count() {
        return Err(ComputeError::ShapeMismatch(
            "unary kernel output placeholder does not match input length",
        ));
    }
    let output_values: Vec<f32> = decode_f32(&input_view.data).into_iter().map(f).collect();
    Ok(vec![encode_f32(&output_values)])
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{decode_f32, BufferView, ComputeBackend, CpuBackend, Kernel};

    pub(crate) fn run_unary(kernel: Kernel, input: &[f32]) -> Vec<f32> {
        let cpu = CpuBackend::new();
        let binds = [
            BufferView::from_f32(vec![input.len()], input),
            BufferView::zeros_f32(vec![input.len()]),
        ];
        let result_buffers = cpu.dispatch(&kernel, &binds, [1, 1, 1]).unwrap();
        assert_eq!(result_buffers.len(), 1);
        decode_f32(&result_buffers[0])
    }

    #[test]
    fn placeholder_length_must_match() {
        let cpu = CpuBackend::new();
        let binds = [
            BufferView::from_f32(vec![3], &[1.0, 2.0, 3.0]),
            BufferView::zeros_f32(vec![2]),
        ];
        assert!(cpu.dispatch(&Kernel::Tanh, &binds, [1, 1, 1]).is_err());
    }
}
