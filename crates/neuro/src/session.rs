//! One simulation run: a population, its engine and the random source they
//! share, plus the batch types exchanged with the host application.

use crate::error::{NeuroError, Result};
use crate::evolution::{CrossoverMethod, EvolutionConfig, GeneticAlgorithm, SelectionStrategy, Statistics};
use crate::genome::Genome;
use crate::nn::{ACCELERATION_CHANNEL, STEERING_CHANNEL};
use crate::population::Population;
use crate::topology::LayerSizes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Acceleration reported for networks with a single output channel.
pub const DEFAULT_ACCELERATION: f32 = 0.5;

fn default_population_size() -> usize {
    100
}
fn default_layer_sizes() -> Vec<usize> {
    vec![5, 6, 4, 2]
}
fn default_mutation_rate() -> f32 {
    0.05
}
fn default_mutation_strength() -> f32 {
    0.3
}
fn default_crossover_rate() -> f32 {
    0.7
}
fn default_elitism_rate() -> f32 {
    0.05
}
fn default_tournament_size() -> usize {
    5
}
fn default_trigger_evolution() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    #[serde(default = "default_layer_sizes")]
    pub layer_sizes: Vec<usize>,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    #[serde(default = "default_mutation_strength")]
    pub mutation_strength: f32,
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f32,
    #[serde(default = "default_elitism_rate")]
    pub elitism_rate: f32,
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    #[serde(default)]
    pub selection: SelectionStrategy,
    #[serde(default)]
    pub crossover: CrossoverMethod,
    /// Seed for the session's random source; drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            layer_sizes: default_layer_sizes(),
            mutation_rate: default_mutation_rate(),
            mutation_strength: default_mutation_strength(),
            crossover_rate: default_crossover_rate(),
            elitism_rate: default_elitism_rate(),
            tournament_size: default_tournament_size(),
            selection: SelectionStrategy::default(),
            crossover: CrossoverMethod::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON config, filling absent fields with defaults, and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<LayerSizes> {
        let layer_sizes = LayerSizes::new(self.layer_sizes.clone())?;
        self.evolution_config().validate()?;
        Ok(layer_sizes)
    }

    #[must_use]
    pub fn evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            population_size: self.population_size,
            elitism_rate: self.elitism_rate,
            mutation_rate: self.mutation_rate,
            mutation_strength: self.mutation_strength,
            crossover_rate: self.crossover_rate,
            tournament_size: self.tournament_size,
            selection: self.selection,
            crossover: self.crossover,
        }
    }
}

/// Sensor readings for one agent; values are expected in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorInput {
    pub agent_id: usize,
    pub sensors: Vec<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotorOutput {
    pub agent_id: usize,
    /// In `[-1, 1]`.
    pub steering: f32,
    /// In `[0, 1]`.
    pub acceleration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessScore {
    pub agent_id: usize,
    pub fitness: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessBatch {
    pub scores: Vec<FitnessScore>,
    /// Evolve (and adapt mutation) after recording the scores.
    #[serde(default = "default_trigger_evolution")]
    pub trigger_evolution: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvolutionResult {
    pub generation: u32,
    pub best_fitness: f32,
    pub average_fitness: f32,
    pub improvement: f32,
    pub mutation_rate: f32,
    pub genomes: Vec<Genome>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    pub generation: u32,
    pub population_size: usize,
    pub current_best_fitness: f32,
    pub current_avg_fitness: f32,
    pub mutation_rate: f32,
    pub improvement: f32,
}

/// Explicit owner of one run's population, engine and random source.
///
/// Hosts serving several clients keep one `Session` per run and serialize
/// access to it; nothing in here locks.
#[derive(Debug)]
pub struct Session {
    id: String,
    config: SimulationConfig,
    layer_sizes: LayerSizes,
    population: Population,
    engine: GeneticAlgorithm,
    rng: StdRng,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let layer_sizes = config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let population = Population::new(config.population_size, layer_sizes.clone(), &mut rng)?;
        let engine = GeneticAlgorithm::new(config.evolution_config())?;
        let id = session_id(&mut rng);
        info!(
            session_id = %id,
            population_size = config.population_size,
            layer_sizes = ?config.layer_sizes,
            "simulation initialized"
        );
        Ok(Self { id, config, layer_sizes, population, engine, rng })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn engine(&self) -> &GeneticAlgorithm {
        &self.engine
    }

    /// Motor commands for each listed agent, in request order.
    pub fn evaluate(&self, inputs: &[SensorInput]) -> Result<Vec<MotorOutput>> {
        inputs
            .iter()
            .map(|input| {
                let network = self.population.network(input.agent_id).ok_or(
                    NeuroError::UnknownAgent {
                        index: input.agent_id,
                        population_size: self.population.len(),
                    },
                )?;
                let sensors: Vec<f32> = input.sensors.iter().map(|s| s.clamp(0.0, 1.0)).collect();
                let output = network.forward_one(&sensors)?;
                Ok(MotorOutput {
                    agent_id: input.agent_id,
                    steering: output[STEERING_CHANNEL],
                    acceleration: output
                        .get(ACCELERATION_CHANNEL)
                        .copied()
                        .unwrap_or(DEFAULT_ACCELERATION),
                })
            })
            .collect()
    }

    /// Records fitness (agents not listed score 0, unknown agents are
    /// skipped) and optionally advances one generation followed by
    /// adaptive mutation.
    pub fn submit_fitness(&mut self, batch: &FitnessBatch) -> Result<EvolutionResult> {
        let mut scores = vec![0.0; self.population.len()];
        for score in &batch.scores {
            match scores.get_mut(score.agent_id) {
                Some(slot) => *slot = score.fitness,
                None => debug!(agent_id = score.agent_id, "ignoring fitness for unknown agent"),
            }
        }
        self.population.set_fitness(&scores)?;

        if batch.trigger_evolution {
            self.population = self.engine.evolve(&self.population, &mut self.rng);
            self.engine.adaptive_mutation();
        }

        let stats = self.engine.statistics();
        Ok(EvolutionResult {
            generation: stats.generation,
            best_fitness: stats.current_best_fitness,
            average_fitness: stats.current_avg_fitness,
            improvement: stats.improvement,
            mutation_rate: self.engine.mutation_rate(),
            genomes: self.population.genomes(),
        })
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let stats = self.engine.statistics();
        SessionStatus {
            session_id: self.id.clone(),
            generation: stats.generation,
            population_size: self.population.len(),
            current_best_fitness: stats.current_best_fitness,
            current_avg_fitness: stats.current_avg_fitness,
            mutation_rate: stats.mutation_rate,
            improvement: stats.improvement,
        }
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.engine.statistics()
    }

    /// Genome of the currently fittest member (index 0 before any scores are set).
    #[must_use]
    pub fn best_genome(&self) -> Option<Genome> {
        self.population
            .get_best(1)
            .first()
            .map(|(network, _)| network.to_genome())
    }

    #[must_use]
    pub fn genomes(&self) -> Vec<Genome> {
        self.population.genomes()
    }

    /// Seeds the whole population from one saved genome. With `test_mode`
    /// every member is an exact copy; otherwise all but the first are mutated
    /// with the engine's current rates.
    pub fn load_genome(&mut self, genome: &Genome, test_mode: bool) -> Result<()> {
        genome.validate()?;
        self.population.seed_from_genome(
            genome,
            test_mode,
            self.engine.mutation_rate(),
            self.engine.mutation_strength(),
            &mut self.rng,
        )?;
        info!(session_id = %self.id, test_mode, "population seeded from genome");
        Ok(())
    }

    /// Replaces the population with previously exported genomes. They must
    /// match the session topology; the population size follows `genomes.len()`.
    pub fn restore_population(&mut self, genomes: &[Genome]) -> Result<()> {
        for genome in genomes {
            genome.check_topology(&self.layer_sizes)?;
        }
        self.population.set_all_genomes(genomes)?;
        info!(session_id = %self.id, population_size = genomes.len(), "population restored");
        Ok(())
    }

    /// Starts over with the same configuration: fresh population, fresh
    /// engine and a new session id. The random source keeps running.
    pub fn reset(&mut self) -> Result<()> {
        self.population =
            Population::new(self.config.population_size, self.layer_sizes.clone(), &mut self.rng)?;
        self.engine = GeneticAlgorithm::new(self.config.evolution_config())?;
        self.id = session_id(&mut self.rng);
        info!(session_id = %self.id, "simulation reset");
        Ok(())
    }
}

fn session_id(rng: &mut impl Rng) -> String {
    format!("{:08x}", rng.gen::<u32>())
}
