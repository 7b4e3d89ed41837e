use std::path::Path;

use anyhow::{Context, Result};

use newsbrief_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    let mut redacted = config.clone();
    if redacted.ai.api_key.is_some() {
        redacted.ai.api_key = Some("********".to_string());
    }

    print!("{}", toml::to_string_pretty(&redacted)?);

    if config.ai.resolved_api_key().is_none() {
        eprintln!("\nNote: no API key configured (set ai.api_key or COHERE_API_KEY)");
    }
    Ok(())
}

pub fn init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    AppConfig::default()
        .save_to(config_path)
        .with_context(|| format!("writing {}", config_path.display()))?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
