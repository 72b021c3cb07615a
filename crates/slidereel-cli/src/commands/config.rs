use anyhow::Result;

use slidereel_core::AppConfig;

pub fn run(config: &AppConfig, save: bool) -> Result<()> {
    let path = AppConfig::config_path();
    println!("# {}", path.display());
    println!("{}", config.to_toml()?);

    if save {
        config.save()?;
        eprintln!("Saved configuration to {}", path.display());
    }

    Ok(())
}
