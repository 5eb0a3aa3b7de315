pub mod gene;
pub mod individual;
pub mod memetic_engine;
pub mod progress;

pub use gene::MotionGene;
pub use individual::Individual;
pub use memetic_engine::{MemeticConfig, MemeticEngine, SearchOutcome};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressCallback, ProgressMessage};
