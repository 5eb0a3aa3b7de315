use rand::Rng;
use std::fmt;

/// Hard bounds enforced after mutation.
pub const SPEED_FLOOR: i32 = -50;
pub const SPEED_CEIL: i32 = 100;
pub const DURATION_FLOOR: f64 = 0.5;
pub const DURATION_CEIL: f64 = 2.5;

const MUTATION_SPEED_DELTA: i32 = 30;
const MUTATION_DURATION_DELTA: f64 = 0.5;

/// One timed differential-drive command.
///
/// A genome is a short sequence of these; the search recombines and perturbs
/// them rather than editing trajectories directly, so any gene sequence is a
/// valid (if possibly bad) behavior. Random construction biases toward
/// turning maneuvers: half the time one wheel is allowed to run slow or in
/// reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionGene {
    pub left_speed: i32,
    pub right_speed: i32,
    pub duration_s: f64,
}

impl MotionGene {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let (left_speed, right_speed) = if rng.gen_bool(0.5) {
            // Differential pair: one wheel slower or reversed
            (rng.gen_range(30..=80), rng.gen_range(-20..=40))
        } else {
            (rng.gen_range(30..=80), rng.gen_range(30..=80))
        };

        Self {
            left_speed,
            right_speed,
            duration_s: rng.gen_range(0.8..2.0),
        }
    }

    /// Perturb each field independently with probability `rate`, clamping to
    /// the hard bounds.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        if rng.gen::<f64>() < rate {
            let delta = rng.gen_range(-MUTATION_SPEED_DELTA..=MUTATION_SPEED_DELTA);
            self.left_speed = (self.left_speed + delta).clamp(SPEED_FLOOR, SPEED_CEIL);
        }
        if rng.gen::<f64>() < rate {
            let delta = rng.gen_range(-MUTATION_SPEED_DELTA..=MUTATION_SPEED_DELTA);
            self.right_speed = (self.right_speed + delta).clamp(SPEED_FLOOR, SPEED_CEIL);
        }
        if rng.gen::<f64>() < rate {
            let delta = rng.gen_range(-MUTATION_DURATION_DELTA..MUTATION_DURATION_DELTA);
            self.duration_s = (self.duration_s + delta).clamp(DURATION_FLOOR, DURATION_CEIL);
        }
    }

    /// Wheel-speed spread; a spread above 30 counts as a turning maneuver.
    pub fn speed_spread(&self) -> i32 {
        (self.left_speed - self.right_speed).abs()
    }
}

impl fmt::Display for MotionGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={} R={} T={:.1}s",
            self.left_speed, self.right_speed, self.duration_s
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_gene_within_generation_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let gene = MotionGene::random(&mut rng);
            assert!((30..=80).contains(&gene.left_speed));
            assert!((-20..=80).contains(&gene.right_speed));
            assert!((0.8..2.0).contains(&gene.duration_s));
        }
    }

    #[test]
    fn test_mutation_respects_hard_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        // Start from the corners so clamping actually engages.
        let starts = [
            (SPEED_FLOOR, SPEED_CEIL, DURATION_FLOOR),
            (SPEED_CEIL, SPEED_FLOOR, DURATION_CEIL),
            (60, 60, 1.2),
        ];
        for (l, r, d) in starts {
            let mut gene = MotionGene {
                left_speed: l,
                right_speed: r,
                duration_s: d,
            };
            for _ in 0..300 {
                gene.mutate(1.0, &mut rng);
                assert!((SPEED_FLOOR..=SPEED_CEIL).contains(&gene.left_speed));
                assert!((SPEED_FLOOR..=SPEED_CEIL).contains(&gene.right_speed));
                assert!((DURATION_FLOOR..=DURATION_CEIL).contains(&gene.duration_s));
            }
        }
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut gene = MotionGene {
            left_speed: 42,
            right_speed: -10,
            duration_s: 1.5,
        };
        let before = gene;
        for _ in 0..100 {
            gene.mutate(0.0, &mut rng);
        }
        assert_eq!(gene, before);
    }

    #[test]
    fn test_speed_spread() {
        let gene = MotionGene {
            left_speed: 60,
            right_speed: -10,
            duration_s: 1.0,
        };
        assert_eq!(gene.speed_spread(), 70);
    }
}
