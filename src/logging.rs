// src/logging.rs
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the process-wide logger. `RUST_LOG` wins when set; otherwise
/// `verbosity` picks the level (0 = warn, 1 = info, 2 = debug, 3+ = trace).
/// Safe to call more than once; later calls are ignored.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = Builder::new();
    builder.filter_level(level).format_timestamp_millis();
    builder.parse_env(Env::default());
    let _ = builder.try_init();
}
