use crate::error::{NeuroError, Result};
use crate::genome::Genome;
use crate::nn::Network;
use crate::tensor::Tensor;
use crate::topology::LayerSizes;
use rand::Rng;

/// Ordered networks sharing one topology, with index-aligned fitness scores.
#[derive(Clone, Debug)]
pub struct Population {
    layer_sizes: LayerSizes,
    networks: Vec<Network>,
    fitness_scores: Vec<f32>,
}

impl Population {
    /// Builds `size` independently initialized networks with zero fitness.
    pub fn new(size: usize, layer_sizes: LayerSizes, rng: &mut impl Rng) -> Result<Self> {
        if size == 0 {
            return Err(NeuroError::EmptyPopulation);
        }
        let networks = (0..size)
            .map(|_| Network::with_topology(layer_sizes.clone(), rng))
            .collect();
        Ok(Self::from_parts(layer_sizes, networks))
    }

    /// Wraps existing networks; all must share the first network's topology.
    pub fn from_networks(networks: Vec<Network>) -> Result<Self> {
        let layer_sizes = networks
            .first()
            .ok_or(NeuroError::EmptyPopulation)?
            .layer_sizes()
            .clone();
        for network in &networks {
            layer_sizes.ensure_same(network.layer_sizes())?;
        }
        Ok(Self::from_parts(layer_sizes, networks))
    }

    pub fn from_genomes(genomes: &[Genome]) -> Result<Self> {
        let networks = genomes
            .iter()
            .map(Network::from_genome)
            .collect::<Result<Vec<_>>>()?;
        Self::from_networks(networks)
    }

    pub(crate) fn from_parts(layer_sizes: LayerSizes, networks: Vec<Network>) -> Self {
        let fitness_scores = vec![0.0; networks.len()];
        Self { layer_sizes, networks, fitness_scores }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    #[must_use]
    pub fn layer_sizes(&self) -> &LayerSizes {
        &self.layer_sizes
    }

    #[must_use]
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    #[must_use]
    pub fn network(&self, index: usize) -> Option<&Network> {
        self.networks.get(index)
    }

    #[must_use]
    pub fn fitness_scores(&self) -> &[f32] {
        &self.fitness_scores
    }

    /// Runs network `i` on `inputs[i]` and returns one output vector per network.
    pub fn evaluate_batch(&self, inputs: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        if inputs.len() != self.networks.len() {
            return Err(NeuroError::BatchSizeMismatch {
                expected: self.networks.len(),
                got: inputs.len(),
            });
        }
        self.networks
            .iter()
            .zip(inputs)
            .map(|(network, input)| network.forward_one(input))
            .collect()
    }

    /// Like [`Population::evaluate_batch`] but each network receives a whole
    /// `batch x input_width` tensor.
    pub fn evaluate_tensors(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>> {
        if inputs.len() != self.networks.len() {
            return Err(NeuroError::BatchSizeMismatch {
                expected: self.networks.len(),
                got: inputs.len(),
            });
        }
        self.networks
            .iter()
            .zip(inputs)
            .map(|(network, input)| network.forward(input))
            .collect()
    }

    /// Replaces the fitness vector wholesale.
    pub fn set_fitness(&mut self, scores: &[f32]) -> Result<()> {
        if scores.len() != self.networks.len() {
            return Err(NeuroError::FitnessSizeMismatch {
                expected: self.networks.len(),
                got: scores.len(),
            });
        }
        self.fitness_scores = scores.to_vec();
        Ok(())
    }

    /// Indices ordered by fitness, highest first. Equal scores, including
    /// `0.0` and `-0.0`, keep population order.
    #[must_use]
    pub fn ranked_indices(&self) -> Vec<usize> {
        // `total_cmp` orders -0.0 below 0.0; adding 0.0 turns -0.0 into 0.0.
        let key = |i: usize| self.fitness_scores[i] + 0.0;
        let mut indices: Vec<usize> = (0..self.fitness_scores.len()).collect();
        indices.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
        indices
    }

    /// The `n` fittest members in descending order; `n` is clamped to the population size.
    #[must_use]
    pub fn get_best(&self, n: usize) -> Vec<(&Network, f32)> {
        self.ranked_indices()
            .into_iter()
            .take(n)
            .map(|i| (&self.networks[i], self.fitness_scores[i]))
            .collect()
    }

    #[must_use]
    pub fn best_fitness(&self) -> f32 {
        self.fitness_scores.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    #[must_use]
    pub fn average_fitness(&self) -> f32 {
        if self.fitness_scores.is_empty() {
            return 0.0;
        }
        self.fitness_scores.iter().sum::<f32>() / self.fitness_scores.len() as f32
    }

    #[must_use]
    pub fn genomes(&self) -> Vec<Genome> {
        self.networks.iter().map(Network::to_genome).collect()
    }

    /// Replaces every member from `genomes`, adopting their count and topology.
    /// Fitness is reset to zero.
    pub fn set_all_genomes(&mut self, genomes: &[Genome]) -> Result<()> {
        *self = Self::from_genomes(genomes)?;
        Ok(())
    }

    /// Makes every member a copy of `genome`. Unless `test_mode` is set, all
    /// members after the first are mutated so the population keeps some
    /// diversity around the loaded individual.
    pub fn seed_from_genome(
        &mut self,
        genome: &Genome,
        test_mode: bool,
        mutation_rate: f32,
        mutation_strength: f32,
        rng: &mut impl Rng,
    ) -> Result<()> {
        genome.check_topology(&self.layer_sizes)?;
        let template = Network::from_genome(genome)?;
        for (index, network) in self.networks.iter_mut().enumerate() {
            *network = template.copy();
            if !test_mode && index > 0 {
                network.mutate(mutation_rate, mutation_strength, rng);
            }
        }
        self.fitness_scores.fill(0.0);
        Ok(())
    }
}
