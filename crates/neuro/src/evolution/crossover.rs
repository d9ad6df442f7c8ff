use crate::nn::Network;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMethod {
    /// Every weight and bias is swapped between the children with probability 0.5.
    #[default]
    Uniform,
    /// All layers from a random point onward are swapped whole.
    SinglePoint,
}

/// Produces two complementary children from parents of identical topology.
///
/// With a single weight layer there is no interior crossover point, so
/// `SinglePoint` returns plain copies of the parents.
pub fn crossover(
    parent1: &Network,
    parent2: &Network,
    method: CrossoverMethod,
    rng: &mut impl Rng,
) -> (Network, Network) {
    debug_assert_eq!(parent1.layer_sizes(), parent2.layer_sizes());
    let mut child1 = parent1.copy();
    let mut child2 = parent2.copy();

    match method {
        CrossoverMethod::Uniform => {
            for (a, b) in child1.layers_mut().iter_mut().zip(child2.layers_mut()) {
                swap_entries(a.weights_mut().data_mut(), b.weights_mut().data_mut(), rng);
                swap_entries(a.biases_mut().data_mut(), b.biases_mut().data_mut(), rng);
            }
        }
        CrossoverMethod::SinglePoint => {
            let num_layers = child1.layers().len();
            if num_layers > 1 {
                let point = rng.gen_range(1..num_layers);
                for (a, b) in child1.layers_mut()[point..]
                    .iter_mut()
                    .zip(&mut child2.layers_mut()[point..])
                {
                    std::mem::swap(a, b);
                }
            }
        }
    }

    debug_assert!(child1.shapes_match_topology() && child2.shapes_match_topology());
    (child1, child2)
}

fn swap_entries(a: &mut [f32], b: &mut [f32], rng: &mut impl Rng) {
    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        if rng.gen_bool(0.5) {
            std::mem::swap(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Genome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn filled(sizes: &[usize], value: f32) -> Network {
        let mut rng = StdRng::seed_from_u64(0);
        let mut genome = Network::new(sizes, &mut rng).unwrap().to_genome();
        for layer in genome.weights.iter_mut().chain(genome.biases.iter_mut()) {
            for row in layer.iter_mut() {
                row.fill(value);
            }
        }
        Network::from_genome(&genome).unwrap()
    }

    fn all_values(genome: &Genome) -> Vec<f32> {
        genome
            .weights
            .iter()
            .chain(&genome.biases)
            .flatten()
            .flatten()
            .copied()
            .collect()
    }

    #[test]
    fn uniform_children_are_complementary() {
        let mut rng = StdRng::seed_from_u64(9);
        let zeros = filled(&[5, 6, 4, 2], 0.0);
        let ones = filled(&[5, 6, 4, 2], 1.0);
        let (c1, c2) = crossover(&zeros, &ones, CrossoverMethod::Uniform, &mut rng);
        let v1 = all_values(&c1.to_genome());
        let v2 = all_values(&c2.to_genome());
        for (a, b) in v1.iter().zip(&v2) {
            assert!(*a == 0.0 || *a == 1.0);
            assert_eq!(a + b, 1.0);
        }
    }

    #[test]
    fn single_point_swaps_whole_tail_layers() {
        let mut rng = StdRng::seed_from_u64(2);
        let zeros = filled(&[3, 4, 4, 2], 0.0);
        let ones = filled(&[3, 4, 4, 2], 1.0);
        let (c1, c2) = crossover(&zeros, &ones, CrossoverMethod::SinglePoint, &mut rng);
        assert!(c1.layers()[0].weights().data().iter().all(|&v| v == 0.0));
        assert!(c2.layers()[0].weights().data().iter().all(|&v| v == 1.0));
        assert!(c1.layers()[2].weights().data().iter().all(|&v| v == 1.0));
        assert!(c2.layers()[2].biases().data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn single_point_with_one_layer_clones() {
        let mut rng = StdRng::seed_from_u64(4);
        let zeros = filled(&[3, 2], 0.0);
        let ones = filled(&[3, 2], 1.0);
        let (c1, c2) = crossover(&zeros, &ones, CrossoverMethod::SinglePoint, &mut rng);
        assert_eq!(c1, zeros);
        assert_eq!(c2, ones);
    }
}
