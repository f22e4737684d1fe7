use std::collections::HashSet;

use crate::api::simulation_dto::{CapacityFeedDto, RequestFeedDto, SimulationDto};
use crate::domain::scheduler::scheduler::Scheduler;
use crate::domain::simulator::clock::Clock;
use crate::domain::simulator::driver::SimulationDriver;
use crate::domain::simulator::feed::{CapacityFeed, FixedRequestFeed, RandomCapacityFeed, RandomRequestFeed, RequestFeed, StaticCapacityFeed};
use crate::domain::utils::id::NodeId;
use crate::domain::utils::statistics::StatsRecorder;
use crate::error::Error;

impl TryFrom<SimulationDto> for SimulationDriver {
    type Error = Error;

    fn try_from(dto: SimulationDto) -> Result<Self, Self::Error> {
        if dto.end_tick < dto.start_tick {
            return Err(Error::ModelConstructionError(format!(
                "endTick ({}) lies before startTick ({})",
                dto.end_tick, dto.start_tick
            )));
        }

        let capacity_feed = build_capacity_feed(&dto.capacity_feed)?;
        let request_feed = build_request_feed(&dto.request_feed)?;

        let mut driver = SimulationDriver::new(Clock::new(dto.start_tick, dto.end_tick), Scheduler::new(), capacity_feed, request_feed)
            .with_pruning(dto.prune_expired);

        if let Some(path) = dto.statistics_file.as_deref() {
            driver = driver.with_stats(StatsRecorder::create(Some(path))?);
            log::info!("Writing per-tick statistics to '{}'.", path);
        }

        Ok(driver)
    }
}

fn unique_node_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<Vec<NodeId>, Error> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for id in ids {
        if id.is_empty() {
            return Err(Error::ModelConstructionError("node id must not be empty".to_string()));
        }
        if !seen.insert(id) {
            return Err(Error::ModelConstructionError(format!("duplicate node id '{}'", id)));
        }
        nodes.push(NodeId::new(id));
    }

    Ok(nodes)
}

fn check_range(name: &str, min: u64, max: u64, lowest: u64) -> Result<(), Error> {
    if min > max {
        return Err(Error::ModelConstructionError(format!("{}: min ({}) is greater than max ({})", name, min, max)));
    }
    if min < lowest {
        return Err(Error::ModelConstructionError(format!("{}: min must be at least {}, got {}", name, lowest, min)));
    }
    Ok(())
}

fn build_capacity_feed(dto: &CapacityFeedDto) -> Result<Box<dyn CapacityFeed>, Error> {
    match dto {
        CapacityFeedDto::Static { nodes } => {
            let ids = unique_node_ids(nodes.iter().map(|n| n.id.as_str()))?;
            let nodes = ids.into_iter().zip(nodes.iter().map(|n| n.units)).collect();
            Ok(Box::new(StaticCapacityFeed::new(nodes)))
        }
        CapacityFeedDto::Random { node_ids, min_units, max_units, interval, seed } => {
            let ids = unique_node_ids(node_ids.iter().map(String::as_str))?;
            check_range("capacityFeed units", *min_units, *max_units, 0)?;
            if *interval == 0 {
                return Err(Error::ModelConstructionError("capacityFeed interval must be positive".to_string()));
            }
            Ok(Box::new(RandomCapacityFeed::new(ids, *min_units, *max_units, *interval, *seed)))
        }
    }
}

fn build_request_feed(dto: &RequestFeedDto) -> Result<Box<dyn RequestFeed>, Error> {
    match dto {
        RequestFeedDto::Fixed { per_tick, duration } => {
            if *duration == 0 {
                return Err(Error::ModelConstructionError("requestFeed duration must be positive".to_string()));
            }
            Ok(Box::new(FixedRequestFeed::new(*per_tick, *duration)))
        }
        RequestFeedDto::Random { min_per_tick, max_per_tick, min_units, max_units, min_duration, max_duration, seed } => {
            check_range("requestFeed perTick", *min_per_tick, *max_per_tick, 0)?;
            check_range("requestFeed units", *min_units, *max_units, 1)?;
            check_range("requestFeed duration", *min_duration, *max_duration, 1)?;
            Ok(Box::new(RandomRequestFeed::new(
                (*min_per_tick, *max_per_tick),
                (*min_units, *max_units),
                (*min_duration, *max_duration),
                *seed,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::simulation_dto::NodeDto;

    fn static_nodes(ids: &[&str]) -> CapacityFeedDto {
        CapacityFeedDto::Static { nodes: ids.iter().map(|id| NodeDto { id: id.to_string(), units: 4 }).collect() }
    }

    #[test]
    fn default_config_builds() {
        let driver = SimulationDriver::try_from(SimulationDto::default()).unwrap();
        assert_eq!(driver.clock().now(), 0);
        assert_eq!(driver.clock().end(), 10);
    }

    #[test]
    fn rejects_end_before_start() {
        let dto = SimulationDto { start_tick: 5, end_tick: 2, ..SimulationDto::default() };
        assert!(matches!(SimulationDriver::try_from(dto), Err(Error::ModelConstructionError(_))));
    }

    #[test]
    fn rejects_duplicate_node_ids() {
        let dto = SimulationDto { capacity_feed: static_nodes(&["a", "b", "a"]), ..SimulationDto::default() };
        let err = SimulationDriver::try_from(dto).unwrap_err();
        assert!(err.to_string().contains("duplicate node id 'a'"), "unexpected error: {}", err);
    }

    #[test]
    fn rejects_zero_unit_random_requests() {
        let dto = SimulationDto {
            request_feed: RequestFeedDto::Random {
                min_per_tick: 1,
                max_per_tick: 2,
                min_units: 0,
                max_units: 3,
                min_duration: 1,
                max_duration: 1,
                seed: 1,
            },
            ..SimulationDto::default()
        };
        assert!(matches!(SimulationDriver::try_from(dto), Err(Error::ModelConstructionError(_))));
    }

    #[test]
    fn rejects_inverted_capacity_range() {
        let dto = SimulationDto {
            capacity_feed: CapacityFeedDto::Random { node_ids: vec!["a".into()], min_units: 9, max_units: 3, interval: 1, seed: 0 },
            ..SimulationDto::default()
        };
        assert!(matches!(SimulationDriver::try_from(dto), Err(Error::ModelConstructionError(_))));
    }
}
