use crate::{BufferView, ComputeError, Kernel};

pub trait ComputeBackend: Send + Sync + 'static {
    /// Dispatches a kernel with the given bindings and workgroup configuration.
    ///
    /// # Arguments
    /// * `kernel`: The kernel to dispatch.
    /// * `binds`: A slice of `BufferView`s for input and output. The layout per
    ///            kernel is described in [`crate::layout`].
    /// * `workgroups`: The number of workgroups to dispatch. CPU backends may ignore it.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Vec<u8>>)` where each inner `Vec<u8>` contains the byte data
    /// of a buffer written by the kernel, in binding order.
    /// Returns `ComputeError::ShapeMismatch` if any input buffers are invalid.
    fn dispatch(
        &self,
        kernel: &Kernel,
        binds: &[BufferView],
        workgroups: [u32; 3],
    ) -> Result<Vec<Vec<u8>>, ComputeError>;
}
