pub mod builder;
pub mod challenge;
pub mod launcher;
pub mod options;

pub use builder::EvolutionLauncherBuilder;
pub use challenge::Challenge;
pub use launcher::{BestSolution, EvolutionLauncher, EvolutionResult, TspLauncher};
pub use options::{EvolutionOptions, LogLevel};
