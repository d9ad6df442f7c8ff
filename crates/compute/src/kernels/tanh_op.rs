use crate::{BufferView, ComputeError};

pub fn handle_tanh(binds: &[BufferView]) -> Result<Vec<Vec<u8>>, ComputeError> {
    super::unary_op::map_f32(binds, f32::tanh)
}
