#![allow(dead_code)]

use neuro::{Genome, Network};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Network of the given shape with every weight and bias set to `value`.
pub fn constant_network(sizes: &[usize], value: f32) -> Network {
    let mut genome = Network::new(sizes, &mut rng(0)).unwrap().to_genome();
    for layer in genome.weights.iter_mut().chain(genome.biases.iter_mut()) {
        for row in layer.iter_mut() {
            row.fill(value);
        }
    }
    Network::from_genome(&genome).unwrap()
}

pub fn flat_parameters(genome: &Genome) -> Vec<f32> {
    genome
        .weights
        .iter()
        .chain(&genome.biases)
        .flatten()
        .flatten()
        .copied()
        .collect()
}
