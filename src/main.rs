mod app;
mod assets;
mod config;
mod core;
mod game;
mod screens;
mod ui;

use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install logger immediately, then set runtime max level from config after loading it.
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .try_init();
    // Startup default when config is missing or malformed.
    log::set_max_level(log::LevelFilter::Warn);

    let cfg = config::load(Path::new(config::CONFIG_PATH));
    log::set_max_level(cfg.log_level.as_level_filter());

    // Gameplay cannot proceed without titles; this is the one fatal error.
    let catalog = game::catalog::load(&cfg.catalog_path)?;

    app::run(cfg, catalog)
}
