//! Initialize .repograde.toml configuration

use anyhow::Result;
use repograde_core::GradeConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(".repograde.toml");

    if config_path.exists() {
        println!("⚠️  .repograde.toml already exists at {:?}", config_path);
        return Ok(());
    }

    let config = GradeConfig::default();
    config.save(&config_path)?;

    println!("✅ Created .repograde.toml at {:?}", config_path);
    println!("\nYou can now customize the configuration and run:");
    println!("  repograde");

    Ok(())
}
