use crate::engines::generation::gene::MotionGene;
use crate::error::Result;
use crate::robot::link::RobotLink;
use crate::robot::sensors::{self, SENSOR_WARNING};
use rand::Rng;

/// Probability that the repair pass rewrites a given gene into a forced turn.
const REPAIR_REWRITE_RATE: f64 = 0.7;
/// Turns are kept short; repair never lengthens a gene.
const REPAIR_DURATION_CAP: f64 = 1.5;

/// A candidate behavior: an ordered sequence of motion genes plus the
/// telemetry recorded by its last evaluation.
///
/// Each individual exclusively owns its genome. Crossover copies genes by
/// value into fresh sequences, so mutating a child never touches a parent
/// still sitting in the survivor pool.
#[derive(Debug, Clone)]
pub struct Individual {
    pub genome: Vec<MotionGene>,
    pub fitness: f64,
    pub collision_count: u32,
    pub steps_completed: usize,
}

impl Individual {
    pub fn random<R: Rng>(genome_size: usize, rng: &mut R) -> Self {
        Self {
            genome: (0..genome_size).map(|_| MotionGene::random(rng)).collect(),
            fitness: 0.0,
            collision_count: 0,
            steps_completed: 0,
        }
    }

    fn with_genome(genome: Vec<MotionGene>) -> Self {
        Self {
            genome,
            fitness: 0.0,
            collision_count: 0,
            steps_completed: 0,
        }
    }

    /// Single-point crossover. The cut point is uniform in `[1, len - 1]`;
    /// genomes shorter than 2 have no interior cut point, so the children
    /// degrade to plain copies of the parents.
    pub fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        let len = self.genome.len().min(other.genome.len());
        if len < 2 {
            return (
                Self::with_genome(self.genome.clone()),
                Self::with_genome(other.genome.clone()),
            );
        }

        let point = rng.gen_range(1..len);

        let mut first = Vec::with_capacity(self.genome.len());
        first.extend_from_slice(&self.genome[..point]);
        first.extend_from_slice(&other.genome[point..]);

        let mut second = Vec::with_capacity(other.genome.len());
        second.extend_from_slice(&other.genome[..point]);
        second.extend_from_slice(&self.genome[point..]);

        (Self::with_genome(first), Self::with_genome(second))
    }

    /// Gene-level mutation applied across the whole genome.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        for gene in &mut self.genome {
            gene.mutate(rate, rng);
        }
    }

    /// Memetic repair: one fresh front-sensor probe, and if the robot is
    /// currently facing an obstacle, bias the genome toward turning away.
    ///
    /// Each gene is independently rewritten with probability 0.7 into a
    /// forced turn (one side fast, the other slow or reversed) and its
    /// duration capped. A single biased rewrite, not hill-climbing: there is
    /// no acceptance test and no re-evaluation here.
    ///
    /// Returns the triggering reading when a repair pass ran.
    pub fn local_search<R: Rng>(
        &mut self,
        link: &mut dyn RobotLink,
        sensor_delay_s: f64,
        rng: &mut R,
    ) -> Result<Option<f64>> {
        let reading = sensors::probe_front(link, sensor_delay_s)?;

        if reading <= SENSOR_WARNING {
            return Ok(None);
        }

        for gene in &mut self.genome {
            if rng.gen::<f64>() < REPAIR_REWRITE_RATE {
                if rng.gen_bool(0.5) {
                    gene.left_speed = rng.gen_range(50..=80);
                    gene.right_speed = rng.gen_range(-30..=20);
                } else {
                    gene.right_speed = rng.gen_range(50..=80);
                    gene.left_speed = rng.gen_range(-30..=20);
                }
                gene.duration_s = gene.duration_s.min(REPAIR_DURATION_CAP);
            }
        }

        Ok(Some(reading))
    }
}
