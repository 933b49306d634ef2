use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{runtime::ConfigErrors, Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};

use crate::extractor::DominantColorGrid;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    if let Ok(config) = fallback_config() {
        let _ = log4rs::init_config(config);
    }
}

/// Console logging at the level `log4rs.yaml` ships with, used when that
/// file is not found in the working directory.
fn fallback_config() -> Result<Config, ConfigErrors> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
}

pub fn log_dominant_colors(grid: &DominantColorGrid) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    for row_index in 0..grid.rows() {
        let row: Vec<String> = grid
            .row(row_index)
            .iter()
            .map(|color| format!("{:06X}", u32::from(color)))
            .collect();
        log::trace!("row {:>4}: {}", row_index, row.join(" "));
    }
}
