//! Logging setup for the deckmerge driver.
//!
//! Two environment variables shape the output: `DECKMERGE_LOG` picks the
//! destination (`terminal` by default, `file`, or `both`; the file sink is
//! `./deckmerge.log`) and `DECKMERGE_LOG_LEVEL` picks the level (`info` by
//! default).

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "deckmerge.log";

/// Reads the `DECKMERGE_LOG*` variables and installs the global logger.
/// No-ops if a logger is already set.
pub fn initialize_from_env() {
    let level = level_from_env();
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let destination = std::env::var("DECKMERGE_LOG").unwrap_or_default();
    let (terminal, file) = match destination.as_str() {
        "file" => (false, true),
        "both" => (true, true),
        _ => (true, false),
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    if terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if file {
        match File::create(LOG_FILE) {
            Ok(out) => loggers.push(WriteLogger::new(level, config.clone(), out)),
            Err(err) => eprintln!("warning: cannot create {LOG_FILE}: {err}"),
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn level_from_env() -> LevelFilter {
    match std::env::var("DECKMERGE_LOG_LEVEL").as_deref() {
        Ok("off") => LevelFilter::Off,
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}
