use crate::config::RobotConfig;
use crate::engines::generation::gene::MotionGene;
use crate::engines::generation::individual::Individual;
use crate::engines::generation::progress::ProgressCallback;
use crate::error::Result;
use crate::robot::link::RobotLink;
use crate::robot::sensors::{self, ProximityBand, SENSOR_CRITICAL, SENSOR_SAFE, SENSOR_WARNING};

const STEP_BASE_REWARD: f64 = 20.0;
const CLEAR_PATH_BONUS: f64 = 30.0;
const ACCEPTABLE_DISTANCE_BONUS: f64 = 10.0;
const TOO_CLOSE_PENALTY: f64 = 20.0;
const TURNING_BONUS: f64 = 15.0;
const TURNING_SPREAD: i32 = 30;
const SPEED_BONUS_FACTOR: f64 = 0.1;
const COLLISION_PENALTY_FACTOR: f64 = 0.2;
const COMPLETION_BONUS: f64 = 100.0;
const SAFE_STEP_BONUS: f64 = 10.0;

/// Telemetry from one evaluation run.
///
/// `safe_margin` accumulates how far below the SAFE threshold the robot ended
/// each safe step (in thousandths of a proximity unit). It does not feed the
/// score; it is kept for reporting.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub fitness: f64,
    pub safe_steps: usize,
    pub safe_margin: f64,
}

/// Executes an individual's gene sequence against the live robot and scores
/// safety, progress, and turning behavior.
///
/// Evaluation has physical side effects: the robot moves. It also resets and
/// recomputes the individual's fitness and counters. Critical proximity is a
/// scored outcome, not an error: the gene loop truncates and the run
/// continues with the next individual.
pub struct FitnessEvaluator {
    command_delay_s: f64,
    sensor_delay_s: f64,
    movement_delay_s: f64,
    swap_wheel_order: bool,
}

impl FitnessEvaluator {
    pub fn new(robot: &RobotConfig) -> Self {
        Self {
            command_delay_s: robot.command_delay_s,
            sensor_delay_s: robot.sensor_delay_s,
            movement_delay_s: robot.movement_delay_s,
            swap_wheel_order: robot.swap_wheel_order,
        }
    }

    pub fn command_delay_s(&self) -> f64 {
        self.command_delay_s
    }

    pub fn sensor_delay_s(&self) -> f64 {
        self.sensor_delay_s
    }

    pub fn movement_delay_s(&self) -> f64 {
        self.movement_delay_s
    }

    /// One settled front-proximity probe.
    pub fn probe(&self, link: &mut dyn RobotLink) -> Result<f64> {
        sensors::probe_front(link, self.sensor_delay_s)
    }

    /// Issue one gene's motion as a blocking, time-bounded command.
    pub fn drive_gene(&self, link: &mut dyn RobotLink, gene: &MotionGene) -> Result<()> {
        let (left, right) = if self.swap_wheel_order {
            (gene.right_speed, gene.left_speed)
        } else {
            (gene.left_speed, gene.right_speed)
        };
        link.move_wheels_timed(left, right, gene.duration_s)
    }

    pub fn evaluate<C: ProgressCallback>(
        &self,
        individual: &mut Individual,
        link: &mut dyn RobotLink,
        callback: &mut C,
    ) -> Result<EvaluationReport> {
        let mut fitness = 0.0;
        let mut safe_steps = 0usize;
        let mut safe_margin = 0.0;

        individual.collision_count = 0;
        individual.steps_completed = 0;

        let genome_len = individual.genome.len();
        for step in 0..genome_len {
            let gene = individual.genome[step];

            let before = self.probe(link)?;
            if before > SENSOR_CRITICAL {
                callback.on_step_blocked(step, before);
                individual.collision_count += 1;
                break;
            }
            if before > SENSOR_WARNING {
                callback.on_step_warning(step, before);
            }

            link.wait(self.command_delay_s);
            callback.on_gene_move(step, genome_len, &gene);
            self.drive_gene(link, &gene)?;
            link.wait(self.movement_delay_s);

            individual.steps_completed += 1;

            let after = self.probe(link)?;

            let mut step_fitness = STEP_BASE_REWARD;
            match ProximityBand::of(after) {
                ProximityBand::Clear => {
                    step_fitness += CLEAR_PATH_BONUS;
                    safe_steps += 1;
                    safe_margin += (SENSOR_SAFE - after) / 1000.0;
                }
                ProximityBand::Caution => {
                    step_fitness += ACCEPTABLE_DISTANCE_BONUS;
                }
                ProximityBand::Close | ProximityBand::Critical => {
                    step_fitness -= TOO_CLOSE_PENALTY;
                }
            }

            if gene.speed_spread() > TURNING_SPREAD {
                step_fitness += TURNING_BONUS;
            }

            if gene.left_speed > 0 || gene.right_speed > 0 {
                let avg_speed = (gene.left_speed.abs() + gene.right_speed.abs()) as f64 / 2.0;
                step_fitness += avg_speed * SPEED_BONUS_FACTOR;
            }

            callback.on_step_scored(step, &gene, after);
            fitness += step_fitness;

            if after > SENSOR_CRITICAL {
                callback.on_collision(step, after);
                individual.collision_count += 1;
                // The penalty hits everything accumulated so far, the
                // colliding step included.
                fitness *= COLLISION_PENALTY_FACTOR;
                break;
            }
        }

        if individual.steps_completed == genome_len && individual.collision_count == 0 {
            fitness += COMPLETION_BONUS;
        }
        fitness += safe_steps as f64 * SAFE_STEP_BONUS;

        link.wait(self.command_delay_s);
        link.stop_motors()?;
        link.wait(self.movement_delay_s);

        let parked = self.probe(link)?;
        if parked > SENSOR_WARNING {
            log::warn!("ended evaluation too close to obstacle ({:.0}), backing off", parked);
            callback.on_position_reset();
            self.reset_position(link)?;
        }

        let fitness = fitness.max(0.0);
        individual.fitness = fitness;

        Ok(EvaluationReport {
            fitness,
            safe_steps,
            safe_margin,
        })
    }

    /// Fixed open-loop recovery: back up, pivot, stop. Used when an
    /// evaluation parks the robot against an obstacle.
    pub fn reset_position(&self, link: &mut dyn RobotLink) -> Result<()> {
        link.wait(self.command_delay_s);
        link.move_wheels_timed(-40, -40, 1.5)?;
        link.wait(self.movement_delay_s);
        link.move_wheels_timed(50, -50, 1.0)?;
        link.wait(self.movement_delay_s);
        link.stop_motors()?;
        link.wait(self.command_delay_s);
        Ok(())
    }
}
