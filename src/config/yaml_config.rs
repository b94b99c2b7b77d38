use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    let mut config: Config = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML config: {}", path.as_ref().display()))?;

    config.validate()?;
    config.tables = config.tables.normalized();

    Ok(config)
}

pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Config {
    match load_config(&path) {
        Ok(config) => {
            log::info!("Loaded configuration from: {}", path.as_ref().display());
            config
        }
        Err(e) => {
            log::warn!("Failed to load config ({:#}), using defaults", e);
            Config::default()
        }
    }
}

pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let yaml = Config::default().to_yaml()?;
    fs::write(&path, yaml)
        .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scam-radar-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_generated_config_round_trips() {
        let path = temp_path("generated.yaml");
        write_default_config(&path).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.tables, Config::default().tables);
        assert_eq!(config.scoring, Config::default().scoring);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_loaded_tables_are_lowercased() {
        let path = temp_path("mixed-case.yaml");
        fs::write(
            &path,
            r#"
tables:
  trusted_entities:
    - keyword: "ZaloPay"
      domain: "ZaloPay.VN"
  authority_keywords: ["Bộ Công An"]
  shortener_domains: ["Bit.ly"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.tables.trusted_entities[0].keyword, "zalopay");
        assert_eq!(config.tables.trusted_entities[0].domain, "zalopay.vn");
        assert_eq!(config.tables.authority_keywords, vec!["bộ công an"]);
        assert!(config.tables.is_shortener("bit.ly"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let path = temp_path("invalid.yaml");
        fs::write(&path, "scoring:\n  suspicious_threshold: 0.95\n").unwrap();

        assert!(load_config(&path).is_err());
        let fallback = load_config_or_default(&path);
        assert_eq!(fallback.scoring.suspicious_threshold, 0.5);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let config = load_config_or_default(temp_path("does-not-exist.yaml"));
        assert_eq!(config.tables.trusted_entities.len(), 17);
    }
}
