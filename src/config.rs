use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Seconds between polls of /proc/self/mountstats
    pub interval_secs: u64,
    /// Hide mounts whose slower op class averages below this many ms per op.
    /// 0 = show everything.
    pub min_op_time_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Pad columns to a fixed width in scroll mode; false = tab-separated
    pub align: bool,
    /// Dashboard color theme: default, dracula, nord
    pub theme: String,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { interval_secs: 5, min_op_time_ms: 0.0 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { align: true, theme: "default".to_string() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nfstop").join("nfstop.toml"))
    }

    /// The min-op-time filter as the differencer wants it: None = disabled.
    pub fn min_op_time(&self) -> Option<f64> {
        if self.general.min_op_time_ms > 0.0 {
            Some(self.general.min_op_time_ms)
        } else {
            None
        }
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# nfstop configuration\n# Generated on first run — edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threshold_disables_the_filter() {
        let mut cfg = Config::default();
        assert_eq!(cfg.min_op_time(), None);
        cfg.general.min_op_time_ms = 2.5;
        assert_eq!(cfg.min_op_time(), Some(2.5));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg: Config = toml::from_str(&text).unwrap();
        assert_eq!(cfg.general.interval_secs, 5);
        assert!(cfg.display.align);
    }
}
