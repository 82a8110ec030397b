use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "trailready.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub scoring: ScoringConfig,
    pub thresholds: ThresholdConfig,
    pub warnings: WarningConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeBand {
    pub below: u32,
    pub points: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmiBand {
    pub min: f64,
    pub max: f64,
    pub points: i32,
}

impl BmiBand {
    pub fn contains(&self, bmi: f64) -> bool {
        bmi >= self.min && bmi < self.max
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub age_fallback_points: i32,
    pub bmi_fallback_points: i32,
    pub fitness_multiplier: i32,
    pub experience_multiplier: i32,
    pub heart_penalty: i32,
    pub respiratory_penalty: i32,
    pub mobility_penalty: i32,
    pub condition_penalty: i32,
    pub age_bands: Vec<AgeBand>,
    /// Checked in order; the first band containing the BMI wins.
    pub bmi_bands: Vec<BmiBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            age_fallback_points: 0,
            bmi_fallback_points: 5,
            fitness_multiplier: 3,
            experience_multiplier: 2,
            heart_penalty: 15,
            respiratory_penalty: 10,
            mobility_penalty: 10,
            condition_penalty: 5,
            age_bands: vec![
                AgeBand { below: 30, points: 20 },
                AgeBand { below: 40, points: 15 },
                AgeBand { below: 50, points: 10 },
                AgeBand { below: 60, points: 5 },
            ],
            bmi_bands: vec![
                BmiBand {
                    min: 18.5,
                    max: 25.0,
                    points: 20,
                },
                BmiBand {
                    min: 25.0,
                    max: 30.0,
                    points: 15,
                },
                BmiBand {
                    min: 17.0,
                    max: 35.0,
                    points: 10,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThresholdConfig {
    pub extreme: u8,
    pub challenging: u8,
    pub moderate: u8,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            extreme: 80,
            challenging: 60,
            moderate: 40,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WarningConfig {
    pub senior_age: u32,
    pub low_fitness: u8,
    pub low_experience: u8,
}

impl Default for WarningConfig {
    fn default() -> Self {
        Self {
            senior_age: 60,
            low_fitness: 3,
            low_experience: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: String,
    pub exclude: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "tours.toml".to_string(),
            exclude: vec![
                "target".to_string(),
                ".git".to_string(),
                "node_modules".to_string(),
            ],
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    validate_config(&config).with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    let t = &config.thresholds;
    if t.extreme > 100 {
        bail!("thresholds.extreme must be at most 100 (got {})", t.extreme);
    }
    if !(t.extreme > t.challenging && t.challenging > t.moderate) {
        bail!(
            "thresholds must be strictly descending: extreme {} > challenging {} > moderate {}",
            t.extreme,
            t.challenging,
            t.moderate
        );
    }

    let s = &config.scoring;
    let weights = [
        ("fitness_multiplier", s.fitness_multiplier),
        ("experience_multiplier", s.experience_multiplier),
        ("heart_penalty", s.heart_penalty),
        ("respiratory_penalty", s.respiratory_penalty),
        ("mobility_penalty", s.mobility_penalty),
        ("condition_penalty", s.condition_penalty),
    ];
    if let Some((name, value)) = weights.iter().find(|(_, value)| *value < 0) {
        bail!("scoring.{name} must not be negative (got {value})");
    }

    let bands = &config.scoring.age_bands;
    if bands.windows(2).any(|pair| pair[0].below >= pair[1].below) {
        bail!("scoring.age_bands must be listed with strictly ascending `below` edges");
    }

    for band in &config.scoring.bmi_bands {
        if !(band.min.is_finite() && band.max.is_finite()) || band.min >= band.max {
            bail!(
                "scoring.bmi_bands entry [{}, {}) is not a valid range",
                band.min,
                band.max
            );
        }
    }

    Ok(())
}
