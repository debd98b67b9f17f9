//! Engine tuning loader.

use std::path::Path;

use encounter_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`EncounterConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterConfig> {
        let config: EncounterConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.gauge_max.is_nan() || config.gauge_max <= 0.0 {
            anyhow::bail!("gauge_max must be positive, got {}", config.gauge_max);
        }
        if config.tick_ms == 0 {
            anyhow::bail!("tick_ms must be at least 1");
        }
        if !(0.0..=1.0).contains(&config.flee_success_chance) {
            anyhow::bail!(
                "flee_success_chance must be within 0..=1, got {}",
                config.flee_success_chance
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_ms = 20\npacing_delay_ms = 0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.tick_ms, 20);
        assert_eq!(config.pacing_delay_ms, 0);
        assert_eq!(config.gauge_max, EncounterConfig::default().gauge_max);
        assert_eq!(config.ghost_affinity, -50);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ConfigLoader::parse("flee_success_chance = 1.5").is_err());
        assert!(ConfigLoader::parse("tick_ms = 0").is_err());
        assert!(ConfigLoader::parse("gauge_max = 0.0").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/encounter.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/encounter.toml"));
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data/config.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), EncounterConfig::default());
    }
}
