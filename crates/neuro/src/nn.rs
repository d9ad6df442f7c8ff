use crate::error::{NeuroError, Result};
use crate::genome::Genome;
use crate::tensor::Tensor;
use crate::topology::LayerSizes;
use compute::{BufferView, ComputeBackend, CpuBackend, Kernel, MatMulConfig};
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::StandardNormal;

/// Output channel carrying steering, squashed with `tanh` into `[-1, 1]`.
pub const STEERING_CHANNEL: usize = 0;
/// Output channel carrying acceleration, squashed with a sigmoid into `[0, 1]`.
pub const ACCELERATION_CHANNEL: usize = 1;

/// A fully connected layer computing `x @ w + b`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    /// Weight matrix shaped `in_dim x out_dim`.
    w: Tensor,
    /// Bias row shaped `1 x out_dim`.
    b: Tensor,
}

impl Dense {
    pub fn new(w: Tensor, b: Tensor) -> Result<Self> {
        if b.rows() != 1 || b.cols() != w.cols() {
            return Err(NeuroError::MalformedGenome(format!(
                "bias shaped {}x{} does not fit weights shaped {}x{}",
                b.rows(),
                b.cols(),
                w.rows(),
                w.cols()
            )));
        }
        Ok(Self { w, b })
    }

    /// Glorot uniform initialization with zero biases.
    pub fn xavier(in_dim: usize, out_dim: usize, rng: &mut impl Rng) -> Self {
        let limit = (6.0f32 / (in_dim as f32 + out_dim as f32)).sqrt();
        let dist = Uniform::new_inclusive(-limit, limit);
        Self {
            w: Tensor::from_fn(in_dim, out_dim, || rng.sample(dist)),
            b: Tensor::zeros(1, out_dim),
        }
    }

    #[must_use]
    pub fn in_dim(&self) -> usize {
        self.w.rows()
    }

    #[must_use]
    pub fn out_dim(&self) -> usize {
        self.w.cols()
    }

    #[must_use]
    pub fn weights(&self) -> &Tensor {
        &self.w
    }

    #[must_use]
    pub fn biases(&self) -> &Tensor {
        &self.b
    }

    pub(crate) fn weights_mut(&mut self) -> &mut Tensor {
        &mut self.w
    }

    pub(crate) fn biases_mut(&mut self) -> &mut Tensor {
        &mut self.b
    }

    /// Pre-activation output `x @ w + b` for a `batch x in_dim` input.
    pub fn forward<B: ComputeBackend + ?Sized>(&self, backend: &B, x: &Tensor) -> Result<Tensor> {
        let (batch, in_dim) = x.shape();
        let out_dim = self.out_dim();
        let config = MatMulConfig {
            m: to_u32(batch)?,
            k: to_u32(in_dim)?,
            n: to_u32(out_dim)?,
        };
        let binds = [
            x.to_buffer(),
            self.w.to_buffer(),
            BufferView::zeros_f32(vec![batch, out_dim]),
            BufferView::from_config(config),
        ];
        let wx = read_single(backend.dispatch(&Kernel::MatMul, &binds, [1, 1, 1])?)?;

        let binds = [
            BufferView::from_f32(vec![batch, out_dim], &wx),
            self.b.to_buffer(),
            BufferView::zeros_f32(vec![batch, out_dim]),
        ];
        let z = read_single(backend.dispatch(&Kernel::AddBroadcast, &binds, [1, 1, 1])?)?;
        Tensor::from_vec(batch, out_dim, z)
    }

    fn mutate(&mut self, rate: f32, strength: f32, rng: &mut impl Rng) {
        for value in self.w.data_mut().iter_mut().chain(self.b.data_mut()) {
            let selected = rng.gen::<f32>() < rate;
            let noise: f32 = rng.sample(StandardNormal);
            if selected {
                *value += noise * strength;
            }
        }
    }
}

/// Fixed-topology feedforward network used as an agent controller.
///
/// Hidden layers use ReLU. The output layer maps channel 0 through `tanh`
/// (steering) and channel 1 through a saturating sigmoid (acceleration); any
/// further channels are passed through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    layer_sizes: LayerSizes,
    layers: Vec<Dense>,
}

impl Network {
    /// Creates a network with Glorot-initialized weights and zero biases.
    pub fn new(layer_sizes: &[usize], rng: &mut impl Rng) -> Result<Self> {
        Ok(Self::with_topology(LayerSizes::new(layer_sizes.to_vec())?, rng))
    }

    pub fn with_topology(layer_sizes: LayerSizes, rng: &mut impl Rng) -> Self {
        let layers = layer_sizes
            .pairs()
            .map(|(fan_in, fan_out)| Dense::xavier(fan_in, fan_out, rng))
            .collect();
        Self { layer_sizes, layers }
    }

    /// Builds a network owning copies of the genome's tensors.
    pub fn from_genome(genome: &Genome) -> Result<Self> {
        let layer_sizes = genome.validate()?;
        let layers = genome
            .weights
            .iter()
            .zip(&genome.biases)
            .map(|(w, b)| Dense::new(Tensor::from_rows(w)?, Tensor::from_rows(b)?))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { layer_sizes, layers })
    }

    /// Replaces every tensor with the genome's values, adopting its topology.
    pub fn load_genome(&mut self, genome: &Genome) -> Result<()> {
        *self = Self::from_genome(genome)?;
        Ok(())
    }

    #[must_use]
    pub fn to_genome(&self) -> Genome {
        Genome {
            layer_sizes: self.layer_sizes.as_slice().to_vec(),
            weights: self.layers.iter().map(|l| l.w.to_rows()).collect(),
            biases: self.layers.iter().map(|l| l.b.to_rows()).collect(),
        }
    }

    #[must_use]
    pub fn layer_sizes(&self) -> &LayerSizes {
        &self.layer_sizes
    }

    #[must_use]
    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Dense] {
        &mut self.layers
    }

    /// Deep copy; the result shares no storage with `self`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Every layer still has the shape its topology dictates.
    #[must_use]
    pub fn shapes_match_topology(&self) -> bool {
        self.layers.len() == self.layer_sizes.num_layers()
            && self.layer_sizes.pairs().zip(&self.layers).all(|((i, o), l)| {
                l.w.shape() == (i, o) && l.b.shape() == (1, o)
            })
    }

    /// Runs a `batch x input_width` tensor through the network on the CPU backend.
    pub fn forward(&self, inputs: &Tensor) -> Result<Tensor> {
        self.forward_with(&CpuBackend::new(), inputs)
    }

    pub fn forward_with<B: ComputeBackend + ?Sized>(
        &self,
        backend: &B,
        inputs: &Tensor,
    ) -> Result<Tensor> {
        let output_width = self.layer_sizes.output_width();
        if inputs.rows() == 0 {
            return Ok(Tensor::zeros(0, output_width));
        }
        if inputs.cols() != self.layer_sizes.input_width() {
            return Err(NeuroError::InputWidthMismatch {
                expected: self.layer_sizes.input_width(),
                got: inputs.cols(),
            });
        }

        let (last, hidden) = self
            .layers
            .split_last()
            .ok_or_else(|| NeuroError::InvalidTopology(self.layer_sizes.as_slice().to_vec()))?;

        let mut activation = inputs.clone();
        for layer in hidden {
            let z = layer.forward(backend, &activation)?;
            activation = apply_elementwise(backend, Kernel::Relu, &z)?;
        }

        let mut out = last.forward(backend, &activation)?;
        apply_channel(backend, Kernel::Tanh, &mut out, STEERING_CHANNEL)?;
        if output_width > ACCELERATION_CHANNEL {
            apply_channel(backend, Kernel::Sigmoid, &mut out, ACCELERATION_CHANNEL)?;
        }
        Ok(out)
    }

    /// Forward pass for a single input vector.
    pub fn forward_one(&self, inputs: &[f32]) -> Result<Vec<f32>> {
        let x = Tensor::from_vec(1, inputs.len(), inputs.to_vec())?;
        Ok(self.forward(&x)?.row(0).to_vec())
    }

    /// Adds `N(0, strength)` noise to each weight and bias independently with
    /// probability `rate`.
    pub fn mutate(&mut self, rate: f32, strength: f32, rng: &mut impl Rng) {
        debug_assert!(self.shapes_match_topology());
        for layer in &mut self.layers {
            layer.mutate(rate, strength, rng);
        }
    }
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| NeuroError::Compute(compute::ComputeError::ShapeMismatch("dimension exceeds u32")))
}

fn read_single(buffers: Vec<Vec<u8>>) -> Result<Vec<f32>> {
    let bytes = buffers.into_iter().next().ok_or(NeuroError::Compute(
        compute::ComputeError::ShapeMismatch("kernel returned no output buffer"),
    ))?;
    Ok(compute::decode_f32(&bytes))
}

fn apply_elementwise<B: ComputeBackend + ?Sized>(
    backend: &B,
    kernel: Kernel,
    x: &Tensor,
) -> Result<Tensor> {
    let shape = vec![x.rows(), x.cols()];
    let binds = [x.to_buffer(), BufferView::zeros_f32(shape)];
    let data = read_single(backend.dispatch(&kernel, &binds, [1, 1, 1])?)?;
    Tensor::from_vec(x.rows(), x.cols(), data)
}

fn apply_channel<B: ComputeBackend + ?Sized>(
    backend: &B,
    kernel: Kernel,
    out: &mut Tensor,
    channel: usize,
) -> Result<()> {
    let column = out.column(channel);
    let binds = [
        BufferView::from_f32(vec![column.len()], &column),
        BufferView::zeros_f32(vec![column.len()]),
    ];
    let squashed = read_single(backend.dispatch(&kernel, &binds, [1, 1, 1])?)?;
    out.set_column(channel, &squashed);
    Ok(())
}
