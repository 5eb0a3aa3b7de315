use crate::engines::evaluation::evaluator::FitnessEvaluator;
use crate::engines::generation::individual::Individual;
use crate::engines::generation::progress::ProgressCallback;
use crate::error::{MemnavError, Result};
use crate::robot::link::RobotLink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct MemeticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub genome_size: usize,
    pub gene_mutation_rate: f64,
    pub seed: Option<u64>,
}

/// Result of a search run: the best individual found and the best fitness
/// recorded at each generation.
pub struct SearchOutcome {
    pub best: Individual,
    pub fitness_history: Vec<f64>,
}

/// The memetic loop. Each generation is evaluated, ranked, truncated to
/// survivors, refilled by crossover, then mutated and repaired, for a fixed
/// number of generations against one shared robot.
///
/// Everything is strictly sequential: the robot is a process-wide exclusive
/// resource, so individuals are never evaluated concurrently. There is no
/// convergence check; the loop always runs the configured generation count.
pub struct MemeticEngine {
    config: MemeticConfig,
    evaluator: FitnessEvaluator,
    rng: StdRng,
    abort: Option<Arc<AtomicBool>>,
}

impl MemeticEngine {
    pub fn new(config: MemeticConfig, evaluator: FitnessEvaluator) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            evaluator,
            rng,
            abort: None,
        }
    }

    /// Cooperative abort: when the flag goes up, the run stops at the next
    /// individual boundary with [`MemnavError::Interrupted`]. Motion already
    /// in flight completes its blocking window first.
    pub fn with_abort_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    /// Run the search to completion.
    pub fn run<C: ProgressCallback>(
        &mut self,
        link: &mut dyn RobotLink,
        mut callback: C,
    ) -> Result<SearchOutcome> {
        self.check_config()?;

        let mut population: Vec<Individual> = (0..self.config.population_size)
            .map(|_| Individual::random(self.config.genome_size, &mut self.rng))
            .collect();

        let mut fitness_history = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation, self.config.generations);

            // Evaluate sequentially; the robot cannot be shared.
            let total = population.len();
            for index in 0..total {
                self.check_abort()?;
                callback.on_individual_start(index, total);
                let report =
                    self.evaluator
                        .evaluate(&mut population[index], link, &mut callback)?;
                callback.on_individual_evaluated(index, total, &population[index], &report);
                link.wait(self.evaluator.command_delay_s());
            }

            // Stable sort keeps original order on ties, which keeps seeded
            // runs reproducible.
            population.sort_by(|a, b| {
                b.fitness
                    .partial_cmp(&a.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            fitness_history.push(population[0].fitness);
            callback.on_generation_complete(generation, &population);

            if generation == self.config.generations - 1 {
                break;
            }

            population = self.next_generation(population, link, &mut callback)?;
        }

        let best = population
            .into_iter()
            .next()
            .ok_or_else(|| MemnavError::Search("population drained mid-run".to_string()))?;

        Ok(SearchOutcome {
            best,
            fitness_history,
        })
    }

    /// Truncation selection plus bounded offspring pairing.
    ///
    /// Exactly `ceil(needed / 2)` crossover calls on uniformly chosen
    /// survivor pairs (with replacement; self-pairing allowed), then truncate
    /// to the exact deficit. Offspring are mutated and repaired before they
    /// join the survivors.
    fn next_generation<C: ProgressCallback>(
        &mut self,
        ranked: Vec<Individual>,
        link: &mut dyn RobotLink,
        callback: &mut C,
    ) -> Result<Vec<Individual>> {
        let survivor_count = self.config.population_size / 2;
        let needed = self.config.population_size - survivor_count;

        let mut survivors = ranked;
        survivors.truncate(survivor_count);

        let pairings = (needed + 1) / 2;
        let mut offspring = Vec::with_capacity(pairings * 2);
        for _ in 0..pairings {
            let first = self.rng.gen_range(0..survivors.len());
            let second = self.rng.gen_range(0..survivors.len());
            let (child1, child2) = survivors[first].crossover(&survivors[second], &mut self.rng);
            offspring.push(child1);
            offspring.push(child2);
        }
        offspring.truncate(needed);

        for child in &mut offspring {
            child.mutate(self.config.gene_mutation_rate, &mut self.rng);
        }

        // Memetic step: one live probe per offspring.
        for child in &mut offspring {
            self.check_abort()?;
            if let Some(reading) =
                child.local_search(link, self.evaluator.sensor_delay_s(), &mut self.rng)?
            {
                callback.on_repair_applied(reading);
            }
        }

        link.wait(self.evaluator.movement_delay_s());

        survivors.extend(offspring);
        Ok(survivors)
    }

    fn check_config(&self) -> Result<()> {
        if self.config.population_size < 2 {
            return Err(MemnavError::Search(
                "population size must be at least 2".to_string(),
            ));
        }
        if self.config.genome_size < 2 {
            return Err(MemnavError::Search(
                "genome size must be at least 2".to_string(),
            ));
        }
        if self.config.generations == 0 {
            return Err(MemnavError::Search(
                "generation count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn check_abort(&self) -> Result<()> {
        match &self.abort {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(MemnavError::Interrupted),
            _ => Ok(()),
        }
    }
}
