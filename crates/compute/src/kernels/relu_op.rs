use crate::{BufferView, ComputeError};

pub fn handle_relu(binds: &[BufferView]) -> Result<Vec<Vec<u8>>, ComputeError> {
    super::unary_op::map_f32(binds, |x| x.max(0.0))
}
