mod common;

use common::{constant_network, flat_parameters, rng};
use neuro::{CrossoverMethod, EvolutionConfig, GeneticAlgorithm, LayerSizes, Population};

fn scored_population(scores: &[f32]) -> Population {
    let sizes = LayerSizes::new(vec![3, 4, 2]).unwrap();
    let mut population = Population::new(scores.len(), sizes, &mut rng(1)).unwrap();
    population.set_fitness(scores).unwrap();
    population
}

#[test]
fn uniform_crossover_never_blends_values() {
    let ga = GeneticAlgorithm::new(EvolutionConfig::default()).unwrap();
    let zeros = constant_network(&[5, 6, 4, 2], 0.0);
    let ones = constant_network(&[5, 6, 4, 2], 1.0);
    let mut rng = rng(2);
    for _ in 0..10 {
        let (c1, c2) = ga.crossover(&zeros, &ones, CrossoverMethod::Uniform, &mut rng);
        let v1 = flat_parameters(&c1.to_genome());
        let v2 = flat_parameters(&c2.to_genome());
        assert!(v1.iter().chain(&v2).all(|&v| v == 0.0 || v == 1.0));
        assert!(v1.iter().zip(&v2).all(|(a, b)| a + b == 1.0));
        assert!(v1.contains(&0.0) && v1.contains(&1.0));
    }
}

#[test]
fn single_point_crossover_preserves_topology() {
    let ga = GeneticAlgorithm::new(EvolutionConfig::default()).unwrap();
    let a = constant_network(&[5, 6, 4, 2], 0.0);
    let b = constant_network(&[5, 6, 4, 2], 1.0);
    let mut rng = rng(3);
    for _ in 0..20 {
        let (c1, c2) = ga.crossover(&a, &b, CrossoverMethod::SinglePoint, &mut rng);
        assert!(c1.shapes_match_topology() && c2.shapes_match_topology());
        // Layer 0 always precedes the crossover point.
        assert!(c1.layers()[0].weights().data().iter().all(|&v| v == 0.0));
        assert!(c2.layers()[0].weights().data().iter().all(|&v| v == 1.0));
        // The output layer is always at or after it.
        assert!(c1.layers()[2].weights().data().iter().all(|&v| v == 1.0));
    }
}

#[test]
fn tournament_selection_returns_a_copy_of_the_winner() {
    let config = EvolutionConfig { tournament_size: 20, ..Default::default() };
    let ga = GeneticAlgorithm::new(config).unwrap();
    let population = scored_population(&[1.0, 9.0, 3.0, 2.0]);
    let winner = ga.tournament_selection(&population, &mut rng(4));
    assert_eq!(winner, population.networks()[1]);
}

#[test]
fn roulette_selection_tolerates_negative_scores() {
    let ga = GeneticAlgorithm::new(EvolutionConfig::default()).unwrap();
    let population = scored_population(&[-5.0, -5.0, -5.0, 10.0]);
    let mut rng = rng(5);
    let mut counts = [0usize; 4];
    for _ in 0..1000 {
        let picked = ga.roulette_selection(&population, &mut rng);
        let index = population.networks().iter().position(|n| *n == picked).unwrap();
        counts[index] += 1;
    }
    let most = counts.iter().enumerate().max_by_key(|(_, c)| **c).unwrap().0;
    assert_eq!(most, 3);
}
