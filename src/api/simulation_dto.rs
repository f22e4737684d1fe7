use serde::{Deserialize, Serialize};

/// Root of the JSON simulation config.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationDto {
    #[serde(default)]
    pub start_tick: u64,
    pub end_tick: u64,

    /// Drop finished reservations after every pass.
    #[serde(default)]
    pub prune_expired: bool,

    /// CSV output for per-tick statistics. No statistics are written if absent.
    #[serde(default)]
    pub statistics_file: Option<String>,

    pub capacity_feed: CapacityFeedDto,
    pub request_feed: RequestFeedDto,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDto {
    pub id: String,
    pub units: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "typ", rename_all = "camelCase")]
pub enum CapacityFeedDto {
    /// Registers the listed nodes once, before the first pass.
    #[serde(rename_all = "camelCase")]
    Static { nodes: Vec<NodeDto> },

    /// Registers the listed node ids and redraws each capacity every `interval` ticks.
    #[serde(rename_all = "camelCase")]
    Random { node_ids: Vec<String>, min_units: u64, max_units: u64, interval: u64, seed: u64 },
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "typ", rename_all = "camelCase")]
pub enum RequestFeedDto {
    #[serde(rename_all = "camelCase")]
    Fixed { per_tick: u64, duration: u64 },

    #[serde(rename_all = "camelCase")]
    Random {
        min_per_tick: u64,
        max_per_tick: u64,
        min_units: u64,
        max_units: u64,
        min_duration: u64,
        max_duration: u64,
        seed: u64,
    },
}

impl Default for SimulationDto {
    /// Ten ticks over ten nodes `Node-001..Node-010` with 11..20 units,
    /// seven requests per tick asking for `tick + i + 1` units for seven ticks.
    fn default() -> Self {
        SimulationDto {
            start_tick: 0,
            end_tick: 10,
            prune_expired: false,
            statistics_file: None,
            capacity_feed: CapacityFeedDto::Static {
                nodes: (1..=10).map(|i| NodeDto { id: format!("Node-{:03}", i), units: 10 + i }).collect(),
            },
            request_feed: RequestFeedDto::Fixed { per_tick: 7, duration: 7 },
        }
    }
}

impl SimulationDto {
    /// Replaces the seed of every random feed.
    pub fn set_seed(&mut self, new_seed: u64) {
        if let CapacityFeedDto::Random { seed, .. } = &mut self.capacity_feed {
            *seed = new_seed;
        }
        if let RequestFeedDto::Random { seed, .. } = &mut self.request_feed {
            *seed = new_seed;
        }
    }
}
