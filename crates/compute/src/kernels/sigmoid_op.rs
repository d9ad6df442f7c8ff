use crate::{BufferView, ComputeError};

/// Inputs are saturated to this magnitude before exponentiation.
pub const SIGMOID_SATURATION: f32 = 500.0;

#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    let x = x.clamp(-SIGMOID_SATURATION, SIGMOID_SATURATION);
    1.0 / (1.0 + (-x).exp())
}

pub fn handle_sigmoid(binds: &[BufferView]) -> Result<Vec<Vec<u8>>, ComputeError> {
    super::unary_op::map_f32(binds, sigmoid)
}

#[cfg(test)]
mod tests {
    use super::sigmoid;
    use crate::kernels::unary_op::tests::run_unary;
    use crate::Kernel;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        let input_data = [1e30f32, -1e30, f32::MAX, f32::MIN, 600.0, -600.0];
        let output = run_unary(Kernel::Sigmoid, &input_data);
        for value in output {
            assert!(value.is_finite());
            assert!((0.0..=1.0).contains(&value));
        }
        assert!((sigmoid(1e30) - 1.0).abs() < 1e-6);
        assert!(sigmoid(-1e30).abs() < 1e-6);
    }
}
