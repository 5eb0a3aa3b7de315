use crate::engines::evaluation::evaluator::EvaluationReport;
use crate::engines::generation::gene::MotionGene;
use crate::engines::generation::individual::Individual;
use crate::robot::sensors::ProximityBand;

/// Typed progress events emitted by the search loop and the evaluator.
///
/// The algorithmic core never prints; rendering is a reporter concern. All
/// hooks default to no-ops so test callbacks only override what they assert
/// on.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, _generation: usize, _total_generations: usize) {}
    fn on_individual_start(&mut self, _index: usize, _total: usize) {}
    fn on_individual_evaluated(
        &mut self,
        _index: usize,
        _total: usize,
        _individual: &Individual,
        _report: &EvaluationReport,
    ) {
    }
    /// Called with the population ranked best-first.
    fn on_generation_complete(&mut self, _generation: usize, _ranked: &[Individual]) {}

    fn on_step_blocked(&mut self, _step: usize, _reading: f64) {}
    fn on_step_warning(&mut self, _step: usize, _reading: f64) {}
    fn on_gene_move(&mut self, _step: usize, _total: usize, _gene: &MotionGene) {}
    fn on_step_scored(&mut self, _step: usize, _gene: &MotionGene, _reading_after: f64) {}
    fn on_collision(&mut self, _step: usize, _reading: f64) {}
    fn on_position_reset(&mut self) {}
    fn on_repair_applied(&mut self, _reading: f64) {}
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total_generations: usize) {
        println!("\n{}", "=".repeat(60));
        println!("GENERATION {}/{}", generation + 1, total_generations);
        println!("{}", "=".repeat(60));
    }

    fn on_individual_start(&mut self, index: usize, total: usize) {
        println!("\n--- Individual {}/{} ---", index + 1, total);
    }

    fn on_individual_evaluated(
        &mut self,
        _index: usize,
        _total: usize,
        individual: &Individual,
        report: &EvaluationReport,
    ) {
        println!(
            "-> Fitness: {:.2} | Steps: {}/{} | Collisions: {} | Safe steps: {}",
            individual.fitness,
            individual.steps_completed,
            individual.genome.len(),
            individual.collision_count,
            report.safe_steps,
        );
    }

    fn on_generation_complete(&mut self, generation: usize, ranked: &[Individual]) {
        let top: Vec<String> = ranked
            .iter()
            .take(3)
            .map(|ind| format!("{:.1}", ind.fitness))
            .collect();
        println!("\nGeneration {} complete. Best fitness: {:.2}, Top: [{}]",
            generation + 1,
            ranked.first().map(|ind| ind.fitness).unwrap_or(0.0),
            top.join(", "),
        );
    }

    fn on_step_blocked(&mut self, step: usize, reading: f64) {
        println!("  [Gene {}] BLOCKED - obstacle too close ({:.0})", step + 1, reading);
    }

    fn on_step_warning(&mut self, step: usize, reading: f64) {
        println!("  [Gene {}] Warning - approaching obstacle ({:.0})", step + 1, reading);
    }

    fn on_gene_move(&mut self, step: usize, total: usize, gene: &MotionGene) {
        println!("  [Gene {}/{}] Moving: {}", step + 1, total, gene);
    }

    fn on_step_scored(&mut self, step: usize, gene: &MotionGene, reading_after: f64) {
        match ProximityBand::of(reading_after) {
            ProximityBand::Clear => {
                println!("  [Gene {}] Safe distance maintained", step + 1)
            }
            ProximityBand::Caution => {}
            ProximityBand::Close | ProximityBand::Critical => {
                println!("  [Gene {}] Ending too close to obstacle", step + 1)
            }
        }
        if gene.speed_spread() > 30 {
            println!("  [Gene {}] + turning bonus", step + 1);
        }
    }

    fn on_collision(&mut self, step: usize, reading: f64) {
        println!("  [Gene {}] COLLISION ({:.0})", step + 1, reading);
    }

    fn on_position_reset(&mut self) {
        println!("  Resetting robot position...");
    }

    fn on_repair_applied(&mut self, reading: f64) {
        println!("  Local search: obstacle detected ({:.0}), adjusting genes for turning", reading);
    }
}

// For handing progress to another thread (UI, recorder)
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone)]
pub enum ProgressMessage {
    GenerationStart { generation: usize, total: usize },
    IndividualEvaluated {
        index: usize,
        fitness: f64,
        steps_completed: usize,
        collision_count: u32,
    },
    Collision { step: usize, reading: f64 },
    GenerationComplete { generation: usize, best_fitness: f64 },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize, total_generations: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart {
            generation,
            total: total_generations,
        });
    }

    fn on_individual_evaluated(
        &mut self,
        index: usize,
        _total: usize,
        individual: &Individual,
        _report: &EvaluationReport,
    ) {
        let _ = self.sender.send(ProgressMessage::IndividualEvaluated {
            index,
            fitness: individual.fitness,
            steps_completed: individual.steps_completed,
            collision_count: individual.collision_count,
        });
    }

    fn on_collision(&mut self, step: usize, reading: f64) {
        let _ = self.sender.send(ProgressMessage::Collision { step, reading });
    }

    fn on_generation_complete(&mut self, generation: usize, ranked: &[Individual]) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness: ranked.first().map(|ind| ind.fitness).unwrap_or(0.0),
        });
    }
}
