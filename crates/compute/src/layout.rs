pub const STORAGE_IN: usize = 0;
pub const STORAGE_IN2: usize = 1; // binary ops
pub const STORAGE_OUT_BINARY: usize = 2;
pub const STORAGE_OUT_UNARY: usize = 1;
pub const UNIFORM_SC: usize = 3; // matmul dimensions

const _: () = assert!(STORAGE_OUT_BINARY == STORAGE_IN2 + 1);

/// Return expected number of bindings for each kernel.
pub const fn binding_count(kernel: &crate::Kernel) -> usize {
    match kernel {
        crate::Kernel::MatMul => 4,
        crate::Kernel::AddBroadcast => 3,
        crate::Kernel::Relu | crate::Kernel::Tanh | crate::Kernel::Sigmoid => 2,
    }
}
