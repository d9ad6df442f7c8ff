mod common;

use common::rng;
use neuro::{
    CrossoverMethod, EvolutionConfig, GeneticAlgorithm, LayerSizes, Population, SelectionStrategy,
};

fn config(population_size: usize) -> EvolutionConfig {
    EvolutionConfig { population_size, tournament_size: 5, ..Default::default() }
}

#[test]
fn one_generation_on_reference_topology() {
    let mut rng = rng(1);
    let sizes = LayerSizes::new(vec![5, 6, 4, 2]).unwrap();
    let mut population = Population::new(10, sizes.clone(), &mut rng).unwrap();
    let scores: Vec<f32> = (0..10).map(|i| (i as f32 * 1.7).sin() * 10.0).collect();
    population.set_fitness(&scores).unwrap();

    let mut ga = GeneticAlgorithm::new(config(10)).unwrap();
    let next = ga.evolve(&population, &mut rng);

    let best = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = scores.iter().sum::<f32>() / 10.0;
    assert_eq!(ga.generation(), 1);
    assert_eq!(next.len(), 10);
    assert_eq!(next.fitness_scores(), &[0.0; 10]);
    assert_eq!(next.layer_sizes(), &sizes);
    assert_eq!(ga.best_fitness_history(), &[best]);
    assert!((ga.avg_fitness_history()[0] - mean).abs() < 1e-5);
    assert_eq!(population.fitness_scores(), scores.as_slice());
}

#[test]
fn elites_survive_unchanged() {
    let mut rng = rng(2);
    let sizes = LayerSizes::new(vec![4, 5, 2]).unwrap();
    let mut population = Population::new(20, sizes, &mut rng).unwrap();
    let scores: Vec<f32> = (0..20).map(|i| ((i * 7) % 20) as f32).collect();
    population.set_fitness(&scores).unwrap();

    let config = EvolutionConfig { elitism_rate: 0.2, ..config(20) };
    let elite_count = config.elite_count();
    assert_eq!(elite_count, 4);
    let mut ga = GeneticAlgorithm::new(config).unwrap();
    let next = ga.evolve(&population, &mut rng);

    let ranked = population.ranked_indices();
    for (slot, &index) in ranked.iter().take(elite_count).enumerate() {
        assert_eq!(next.networks()[slot], population.networks()[index]);
    }
}

#[test]
fn size_is_preserved_across_many_generations() {
    let mut rng = rng(3);
    let sizes = LayerSizes::new(vec![3, 4, 2]).unwrap();
    for (size, method, selection) in [
        (1, CrossoverMethod::Uniform, SelectionStrategy::Tournament),
        (7, CrossoverMethod::SinglePoint, SelectionStrategy::Roulette),
        (12, CrossoverMethod::Uniform, SelectionStrategy::Roulette),
    ] {
        let config = EvolutionConfig { crossover: method, selection, ..config(size) };
        let mut ga = GeneticAlgorithm::new(config).unwrap();
        let mut population = Population::new(size, sizes.clone(), &mut rng).unwrap();
        for generation in 1..=5u32 {
            let scores: Vec<f32> = (0..size).map(|i| i as f32 - 3.0).collect();
            population.set_fitness(&scores).unwrap();
            population = ga.evolve(&population, &mut rng);
            assert_eq!(population.len(), size);
            assert_eq!(ga.generation(), generation);
            assert!(population.networks().iter().all(|n| n.shapes_match_topology()));
        }
        assert_eq!(ga.best_fitness_history().len(), 5);
    }
}

#[test]
fn evolve_produces_configured_size_from_restored_population() {
    let mut rng = rng(4);
    let sizes = LayerSizes::new(vec![3, 2]).unwrap();
    let population = Population::new(4, sizes, &mut rng).unwrap();
    let mut ga = GeneticAlgorithm::new(config(9)).unwrap();
    assert_eq!(ga.evolve(&population, &mut rng).len(), 9);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut rng = rng(seed);
        let sizes = LayerSizes::new(vec![5, 6, 4, 2]).unwrap();
        let mut population = Population::new(8, sizes, &mut rng).unwrap();
        let mut ga = GeneticAlgorithm::new(config(8)).unwrap();
        for _ in 0..3 {
            let scores: Vec<f32> = population
                .evaluate_batch(&vec![vec![0.5; 5]; 8])
                .unwrap()
                .iter()
                .map(|out| out[0] + out[1])
                .collect();
            population.set_fitness(&scores).unwrap();
            population = ga.evolve(&population, &mut rng);
        }
        population.genomes()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}
