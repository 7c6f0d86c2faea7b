//! Simulation orchestration: configuration, tick loop and tick events.
pub mod config;
pub mod events;
pub mod runner;

pub use config::SimulationConfig;
pub use events::{EventSink, FnSink, TickEvent, VecSink};
pub use runner::Simulation;
