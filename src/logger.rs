use chrono::Local;
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs;

// Define where to store logs
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "system.log";

/// Initializes the global logger with the level taken from `RUST_LOG`.
///
/// If `RUST_LOG` is not set or cannot be parsed, it defaults to `info`.
/// Example: `RUST_LOG=debug cluster_sched_sim --config sim.json`
pub fn init() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    init_with_level(log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info));
}

/// Initializes the global logger.
///
/// Logs go to stderr (colored) and to `logs/system.log`. Should be called
/// once at the start of `main`; a second call only reports on stderr.
pub fn init_with_level(level: LevelFilter) {
    let base_config = Dispatch::new().level(level).level_for("serde", LevelFilter::Warn);

    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::BrightBlack);

    let console_config = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = base_config.chain(console_config);

    let log_file_path = format!("{}/{}", LOG_DIR, LOG_FILE);
    let file_sink = fs::create_dir_all(LOG_DIR).and_then(|_| fern::log_file(&log_file_path));

    match file_sink {
        Ok(file) => {
            let file_config = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
                })
                .chain(file);
            dispatch = dispatch.chain(file_config);
        }
        Err(e) => eprintln!("Failed to open log file '{}': {}. Logging to console only.", log_file_path, e),
    }

    if let Err(e) = dispatch.apply() {
        eprintln!("Failed to apply logger configuration: {}", e);
        return;
    }

    log::debug!("Logger initialized. Logging to console and '{}'.", log_file_path);
}
