use crate::layout::{STORAGE_IN, STORAGE_IN2, STORAGE_OUT_BINARY};
use crate::{decode_f32, encode_f32, BufferView, ComputeError};

/// Adds a vector to each row of a matrix.
///
/// Bindings `[a, b, output_placeholder]` expect `a` shaped `[batch, dim]` and
/// `b` holding `dim` elements (either `[dim]` or `[1, dim]`). The broadcasted
/// sum is returned in a single buffer.
pub fn handle_add_broadcast(binds: &[BufferView]) -> Result<Vec<Vec<u8>>, ComputeError> {
    if binds.len() < 3 {
        return Err(ComputeError::ShapeMismatch(
            "AddBroadcast kernel expects 3 buffers (a, b, output_placeholder)",
        ));
    }
    let a_view = &binds[STORAGE_IN];
    let b_view = &binds[STORAGE_IN2];
    let output_view = &binds[STORAGE_OUT_BINARY];

    if a_view.element_size_in_bytes != std::mem::size_of::<f32>()
        || b_view.element_size_in_bytes != std::mem::size_of::<f32>()
        || output_view.element_size_in_bytes != std::mem::size_of::<f32>()
    {
        return Err(ComputeError::ShapeMismatch(
            "AddBroadcast kernel currently only supports f32",
        ));
    }
    let &[batch, dim] = a_view.shape.as_slice() else {
        return Err(ComputeError::ShapeMismatch("AddBroadcast expects a 2-D left operand"));
    };
    if b_view.element_count() != dim {
        return Err(ComputeError::ShapeMismatch(
            "AddBroadcast row vector length does not match matrix width",
        ));
    }
    if output_view.element_count() != batch * dim {
        return Err(ComputeError::ShapeMismatch(
            "AddBroadcast output placeholder has the wrong length",
        ));
    }

    let a_data = decode_f32(&a_view.data);
    let b_data = decode_f32(&b_view.data);
    let mut out_data = vec![0.0f32; batch * dim];
    for row in 0..batch {
        for i in 0..dim {
            out_data[row * dim + i] = a_data[row * dim + i] + b_data[i];
        }
    }

    Ok(vec![encode_f32(&out_data)])
}
