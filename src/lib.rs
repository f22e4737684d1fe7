use crate::api::simulation_dto::SimulationDto;
use crate::domain::simulator::driver::{SimulationDriver, SimulationReport};
use crate::error::Result;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Builds the driver described by `config` and runs it to its end tick.
pub fn run_simulation(config: SimulationDto) -> Result<SimulationReport> {
    let mut driver = SimulationDriver::try_from(config)?;
    log::info!("Simulation model constructed successfully.");

    driver.run()
}
