use std::fs;
use std::path::PathBuf;

use cluster_sched_sim::api::simulation_dto::{CapacityFeedDto, RequestFeedDto, SimulationDto};
use cluster_sched_sim::error::Error;
use cluster_sched_sim::loader::parser::{load_simulation_config, parse_json_file};
use cluster_sched_sim::run_simulation;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cluster_sched_sim_{}_{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

const STATIC_CONFIG: &str = r#"{
    "endTick": 6,
    "pruneExpired": true,
    "capacityFeed": {
        "typ": "static",
        "nodes": [
            { "id": "Node-A", "units": 10 },
            { "id": "Node-B", "units": 4 }
        ]
    },
    "requestFeed": { "typ": "fixed", "perTick": 2, "duration": 3 }
}"#;

#[test]
fn parses_static_config() {
    let path = write_temp("static.json", STATIC_CONFIG);
    let dto: SimulationDto = parse_json_file(path.to_str().unwrap()).unwrap();

    assert_eq!(dto.start_tick, 0);
    assert_eq!(dto.end_tick, 6);
    assert!(dto.prune_expired);
    assert_eq!(dto.statistics_file, None);
    match &dto.capacity_feed {
        CapacityFeedDto::Static { nodes } => {
            assert_eq!(nodes.len(), 2);
            assert_eq!(nodes[1].id, "Node-B");
            assert_eq!(nodes[1].units, 4);
        }
        other => panic!("expected static capacity feed, got {:?}", other),
    }
    assert_eq!(dto.request_feed, RequestFeedDto::Fixed { per_tick: 2, duration: 3 });

    fs::remove_file(path).unwrap();
}

#[test]
fn parses_random_feeds() {
    let json = r#"{
        "startTick": 3,
        "endTick": 20,
        "capacityFeed": { "typ": "random", "nodeIds": ["a", "b"], "minUnits": 1, "maxUnits": 8, "interval": 4, "seed": 5 },
        "requestFeed": {
            "typ": "random",
            "minPerTick": 0, "maxPerTick": 3,
            "minUnits": 1, "maxUnits": 6,
            "minDuration": 1, "maxDuration": 4,
            "seed": 5
        }
    }"#;
    let path = write_temp("random.json", json);
    let mut dto: SimulationDto = parse_json_file(path.to_str().unwrap()).unwrap();
    dto.set_seed(77);

    assert!(matches!(dto.capacity_feed, CapacityFeedDto::Random { seed: 77, interval: 4, .. }));
    assert!(matches!(dto.request_feed, RequestFeedDto::Random { seed: 77, max_per_tick: 3, .. }));

    let report = run_simulation(dto).unwrap();
    assert_eq!(report.start_tick, 3);
    assert_eq!(report.ticks_simulated, 17);

    fs::remove_file(path).unwrap();
}

#[test]
fn runs_static_config_and_writes_statistics() {
    let stats_path = std::env::temp_dir().join(format!("cluster_sched_sim_{}_stats.csv", std::process::id()));
    let config_path = write_temp("with_stats.json", STATIC_CONFIG);

    let mut dto: SimulationDto = parse_json_file(config_path.to_str().unwrap()).unwrap();
    dto.statistics_file = Some(stats_path.to_str().unwrap().to_string());

    let report = run_simulation(dto).unwrap();
    assert_eq!(report.requests_arrived, 12);
    assert_eq!(report.requests_placed + report.requests_queued, 12);
    assert_eq!(report.nodes.len(), 2);

    let csv = fs::read_to_string(&stats_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 7, "header plus one row per tick");
    assert!(lines[0].starts_with("Tick;QueueLength;"));
    assert!(lines[1].starts_with("0;"));

    fs::remove_file(config_path).unwrap();
    fs::remove_file(stats_path).unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let err = load_simulation_config(Some("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
}

#[test]
fn malformed_json_is_deserialization_error() {
    let path = write_temp("broken.json", "{ \"endTick\": ");
    let err = parse_json_file::<SimulationDto>(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, Error::DeserializationError(_)));
    fs::remove_file(path).unwrap();
}

#[test]
fn no_path_uses_built_in_simulation() {
    let dto = load_simulation_config(None).unwrap();
    assert_eq!(dto, SimulationDto::default());

    let report = run_simulation(dto).unwrap();
    assert_eq!(report.requests_arrived, 70);
    assert_eq!(report.nodes.len(), 10);
    assert_eq!(report.nodes[0].capacity, 11);
}

#[test]
fn shipped_configs_parse() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config");

    let source: SimulationDto = parse_json_file(dir.join("source_cluster.json").to_str().unwrap()).unwrap();
    assert_eq!(source, SimulationDto::default());

    let random: SimulationDto = parse_json_file(dir.join("random_cluster.json").to_str().unwrap()).unwrap();
    assert!(random.prune_expired);
    assert!(matches!(random.capacity_feed, CapacityFeedDto::Random { interval: 25, .. }));
}
