// This module re-exports handlers for each kernel operation.

// Element-wise operations
pub mod unary_op;
pub mod relu_op;
pub use relu_op::handle_relu;
pub mod tanh_op;
pub use tanh_op::handle_tanh;
pub mod sigmoid_op;
pub use sigmoid_op::handle_sigmoid;

// Linear algebra
pub mod matmul_op;
pub use matmul_op::handle_matmul;
pub mod add_broadcast_op;
pub use add_broadcast_op::handle_add_broadcast;
