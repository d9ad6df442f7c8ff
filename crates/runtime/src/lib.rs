#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss, clippy::module_name_repetitions)]

pub mod track;

use anyhow::{ensure, Result};
use neuro::{FitnessBatch, Session};
use track::{Track, SENSOR_COUNT};

/// Summary of one generation driven on the track.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationReport {
    pub generation: u32,
    pub best_fitness: f32,
    pub average_fitness: f32,
    pub improvement: f32,
    pub mutation_rate: f32,
    pub steps: usize,
}

/// Drives every agent of `session` around a fresh track for up to `steps`
/// steps, then submits fitness and evolves.
pub fn run_generation(session: &mut Session, steps: usize) -> Result<GenerationReport> {
    let layer_sizes = session.population().layer_sizes();
    ensure!(
        layer_sizes.input_width() == SENSOR_COUNT,
        "network input width {} does not match the track's {SENSOR_COUNT} sensors",
        layer_sizes.input_width()
    );

    let mut track = Track::new(session.population().len());
    let mut taken = 0;
    for _ in 0..steps {
        if track.all_crashed() {
            break;
        }
        let commands = session.evaluate(&track.sensors())?;
        track.step(&commands);
        taken += 1;
    }

    let result = session.submit_fitness(&FitnessBatch {
        scores: track.fitness(),
        trigger_evolution: true,
    })?;
    Ok(GenerationReport {
        generation: result.generation,
        best_fitness: result.best_fitness,
        average_fitness: result.average_fitness,
        improvement: result.improvement,
        mutation_rate: result.mutation_rate,
        steps: taken,
    })
}

/// Runs `generations` consecutive generations, logging each one.
pub fn run(session: &mut Session, generations: usize, steps: usize) -> Result<Vec<GenerationReport>> {
    let mut reports = Vec::with_capacity(generations);
    for _ in 0..generations {
        let report = run_generation(session, steps)?;
        tracing::info!(
            generation = report.generation,
            best = report.best_fitness,
            average = report.average_fitness,
            improvement = report.improvement,
            mutation_rate = report.mutation_rate,
            steps = report.steps,
            "generation complete"
        );
        reports.push(report);
    }
    Ok(reports)
}
