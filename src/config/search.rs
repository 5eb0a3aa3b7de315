use super::traits::ConfigSection;
use crate::error::MemnavError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub population_size: usize,
    pub generations: usize,
    pub genome_size: usize,
    pub gene_mutation_rate: f64,
    /// Fixed seed for reproducible runs; None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 4,
            generations: 4,
            genome_size: 4,
            gene_mutation_rate: 0.3,
            seed: None,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<(), MemnavError> {
        if self.population_size < 2 {
            return Err(MemnavError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(MemnavError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        if self.genome_size < 2 {
            return Err(MemnavError::Configuration(
                "Genome size must be at least 2 (single-point crossover needs a cut point)"
                    .to_string(),
            ));
        }
        if self.gene_mutation_rate < 0.0 || self.gene_mutation_rate > 1.0 {
            return Err(MemnavError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
