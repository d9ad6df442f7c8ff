use crate::{kernels, BufferView, ComputeBackend, ComputeError, Kernel};

#[derive(Default, Debug, Clone, Copy)]
pub struct CpuBackend;

impl CpuBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ComputeBackend for CpuBackend {
    fn dispatch(
        &self,
        kernel: &Kernel,
        binds: &[BufferView],
        _workgroups: [u32; 3],
    ) -> Result<Vec<Vec<u8>>, ComputeError> {
        if binds.len() < kernel.binding_count() {
            return Err(ComputeError::ShapeMismatch("too few buffers bound for kernel"));
        }
        for buffer_view in binds {
            if !buffer_view.is_consistent() {
                return Err(ComputeError::ShapeMismatch(
                    "Buffer data length does not match product of shape dimensions and element size",
                ));
            }
        }
        tracing::trace!(?kernel, binds = binds.len(), "cpu dispatch");
        match kernel {
            Kernel::MatMul => kernels::handle_matmul(binds),
            Kernel::AddBroadcast => kernels::handle_add_broadcast(binds),
            Kernel::Relu => kernels::handle_relu(binds),
            Kernel::Tanh => kernels::handle_tanh(binds),
            Kernel::Sigmoid => kernels::handle_sigmoid(binds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_shape_fails() {
        let cpu = CpuBackend::new();
        let bad_buf = BufferView::new(vec![0u8; 12].into(), vec![4], 4);
        let good_buf = BufferView::new(vec![0u8; 16].into(), vec![4], 4);
        let out_buf = BufferView::new(vec![0u8; 16].into(), vec![4], 4);
        let result = cpu.dispatch(&Kernel::AddBroadcast, &[bad_buf, good_buf, out_buf], [1, 1, 1]);
        assert!(
            matches!(result, Err(ComputeError::ShapeMismatch(_))),
            "Expected ShapeMismatch error, got {result:?}"
        );
    }

    #[test]
    fn missing_bindings_fail() {
        let cpu = CpuBackend::new();
        let a = BufferView::from_f32(vec![2], &[1.0, 2.0]);
        let result = cpu.dispatch(&Kernel::MatMul, &[a], [1, 1, 1]);
        assert!(matches!(result, Err(ComputeError::ShapeMismatch(_))));
    }
}
