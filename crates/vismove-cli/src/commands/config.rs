//! Shows or initializes the configuration file.

use anyhow::{Context, Result};
use vismove_core::config::RootConfig;
use vismove_infrastructure::ConfigService;

/// Prints the effective configuration; with `init`, writes it to disk first.
pub fn run(config_service: &ConfigService, init: bool) -> Result<()> {
    let config: RootConfig = config_service
        .get_config()
        .context("Failed to load configuration")?;

    if init {
        let path = config_service
            .save(&config)
            .context("Failed to write configuration")?;
        println!("Wrote {}", path.display());
    } else if let Some(path) = config_service.config_path() {
        println!("# {}", path.display());
    }

    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
