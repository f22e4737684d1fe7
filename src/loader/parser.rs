use serde::de::DeserializeOwned;
use std::fs;

use crate::api::simulation_dto::SimulationDto;
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Loads the simulation config at `file_path`, or the built-in default if no path is given.
pub fn load_simulation_config(file_path: Option<&str>) -> Result<SimulationDto> {
    match file_path {
        Some(path) => {
            log::info!("Loading simulation config from '{}'.", path);
            parse_json_file::<SimulationDto>(path)
        }
        None => {
            log::info!("No config given, using the built-in simulation.");
            Ok(SimulationDto::default())
        }
    }
}
