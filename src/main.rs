use anyhow::Context;
use memnav::config::{AppConfig, ConfigManager};
use memnav::engines::evaluation::FitnessEvaluator;
use memnav::engines::generation::{
    ConsoleProgressCallback, MemeticConfig, MemeticEngine, SearchOutcome,
};
use memnav::error::MemnavError;
use memnav::robot::{RemoteRobot, RobotLink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static SIGNAL_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

extern "C" fn handle_sigint(_sig: i32) {
    // Only an atomic store here; the engine notices the flag at the next
    // individual boundary and unwinds through the cleanup path.
    if let Some(flag) = SIGNAL_FLAG.get() {
        flag.store(true, Ordering::SeqCst);
    }
}

#[cfg(unix)]
extern "C" {
    fn signal(signum: i32, handler: extern "C" fn(i32)) -> usize;
}

fn install_signal_handler() {
    #[cfg(unix)]
    unsafe {
        signal(2 /* SIGINT */, handle_sigint);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if let Some(path) = std::env::args().nth(1) {
        manager
            .load_from_file(&path)
            .with_context(|| format!("loading config from {}", path))?;
    }
    let config = manager.get();

    let abort = Arc::new(AtomicBool::new(false));
    let _ = SIGNAL_FLAG.set(Arc::clone(&abort));
    install_signal_handler();

    let mut robot = RemoteRobot::new(&config.robot.host, config.robot.port);
    println!(
        "Connecting to robot service at {}:{}...",
        config.robot.host, config.robot.port
    );
    robot.connect()?;
    robot.wait(1.5);
    println!("Connected!");

    let outcome = run_session(&mut robot, &config, abort);

    // Unconditional cleanup: stop motors and drop the session no matter how
    // the run ended.
    robot.wait(config.robot.command_delay_s);
    if let Err(e) = robot.stop_motors() {
        log::warn!("stop motors during cleanup failed: {}", e);
    }
    robot.wait(config.robot.command_delay_s);
    if let Err(e) = robot.disconnect() {
        log::warn!("disconnect during cleanup failed: {}", e);
    }
    println!("\nDisconnected from robot service");

    match outcome {
        Ok(()) => Ok(()),
        Err(MemnavError::Interrupted) => {
            println!("\nInterrupted by user");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn run_session(
    robot: &mut RemoteRobot,
    config: &AppConfig,
    abort: Arc<AtomicBool>,
) -> memnav::Result<()> {
    println!("\n=== Memetic Algorithm: Collision Avoidance ===");
    println!(
        "Population: {}, Generations: {}, Genome size: {}",
        config.search.population_size, config.search.generations, config.search.genome_size
    );

    let engine_config = MemeticConfig {
        population_size: config.search.population_size,
        generations: config.search.generations,
        genome_size: config.search.genome_size,
        gene_mutation_rate: config.search.gene_mutation_rate,
        seed: config.search.seed,
    };
    let mut engine = MemeticEngine::new(engine_config, FitnessEvaluator::new(&config.robot))
        .with_abort_flag(abort);

    let SearchOutcome {
        best,
        fitness_history,
    } = engine.run(robot, ConsoleProgressCallback)?;

    println!("\n{}", "=".repeat(60));
    println!("EXECUTING BEST SOLUTION");
    println!("{}", "=".repeat(60));
    robot.wait(config.robot.movement_delay_s);

    // Replay with the same wheel-order convention the evaluation used.
    let replay = FitnessEvaluator::new(&config.robot);
    for (i, gene) in best.genome.iter().enumerate() {
        println!("\nMove {}/{}: {}", i + 1, best.genome.len(), gene);
        let before = replay.probe(robot)?;
        println!("  Sensor before: {:.0}", before);
        replay.drive_gene(robot, gene)?;
        robot.wait(config.robot.movement_delay_s);
    }

    let history: Vec<String> = fitness_history.iter().map(|f| format!("{:.1}", f)).collect();
    println!("\nFitness evolution: [{}]", history.join(", "));
    println!("Best solution executed successfully!");

    Ok(())
}
