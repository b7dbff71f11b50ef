use crate::error::{JeepcastError, Result};
use crate::models::Settings;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    pub top_off_min_temp_f: f64,
    pub doors_off_min_temp_f: f64,
    pub max_rain_chance_percent: f64,
    pub max_wind_mph: f64,
}

impl ThresholdsConfig {
    pub fn to_settings(&self) -> Settings {
        Settings {
            top_off_min_temp_f: self.top_off_min_temp_f,
            doors_off_min_temp_f: self.doors_off_min_temp_f,
            max_rain_chance_percent: self.max_rain_chance_percent,
            max_wind_mph: self.max_wind_mph,
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            top_off_min_temp_f: settings.top_off_min_temp_f,
            doors_off_min_temp_f: settings.doors_off_min_temp_f,
            max_rain_chance_percent: settings.max_rain_chance_percent,
            max_wind_mph: settings.max_wind_mph,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("location_name", &self.location_name)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(JeepcastError::Config(format!(
                "Config file not found at {:?}. Run `jeepcast init` to set up.",
                config_path
            )));
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| JeepcastError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let config_str = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| JeepcastError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    pub fn settings(&self) -> Settings {
        self.thresholds.to_settings()
    }

    /// OpenWeatherMap settings if configured, enabled, and keyed
    pub fn active_openweathermap(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("jeepcast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/jeepcast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| JeepcastError::Config("Cannot determine config directory".into()))?
            .join("jeepcast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up jeepcast!");
        println!();

        let defaults = ThresholdsConfig::default();

        println!("Comfort thresholds");
        let top_off_min_temp_f = prompt(
            "  Minimum temperature for top off (°F)",
            defaults.top_off_min_temp_f,
        )?;
        let doors_off_min_temp_f = prompt(
            "  Minimum temperature for doors off (°F)",
            defaults.doors_off_min_temp_f,
        )?;
        if doors_off_min_temp_f < top_off_min_temp_f {
            println!("  Note: doors-off temperature is below the top-off temperature.");
        }
        let max_rain_chance_percent =
            prompt("  Maximum rain chance (%)", defaults.max_rain_chance_percent)?;
        let max_wind_mph = prompt("  Maximum wind speed (mph)", defaults.max_wind_mph)?;

        println!();

        println!("OpenWeatherMap (leave API key blank to skip)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| JeepcastError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            let latitude = prompt("  Latitude", 38.5733)?;
            let longitude = prompt("  Longitude", -109.5498)?;
            let location_name: String = Input::new()
                .with_prompt("  Display name (blank to use the city name)")
                .default(String::new())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| JeepcastError::Config(format!("Input error: {}", e)))?;

            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                latitude,
                longitude,
                location_name: (!location_name.is_empty()).then_some(location_name),
                enabled: true,
            })
        };

        println!();

        let config = Config {
            thresholds: ThresholdsConfig {
                top_off_min_temp_f,
                doors_off_min_temp_f,
                max_rain_chance_percent,
                max_wind_mph,
            },
            openweathermap,
        };

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| JeepcastError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# jeepcast configuration\n# Generated by `jeepcast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

fn prompt(label: &str, default: f64) -> Result<f64> {
    Input::new()
        .with_prompt(label)
        .default(default)
        .interact_text()
        .map_err(|e| JeepcastError::Config(format!("Input error: {}", e)))
}
