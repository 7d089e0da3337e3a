//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Simulation timing and global parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Solar generation profile parameters.
    #[serde(default = "ProfileConfig::default_solar")]
    pub solar: ProfileConfig,
    /// Wind generation profile parameters.
    #[serde(default = "ProfileConfig::default_wind")]
    pub wind: ProfileConfig,
    /// Consumer load profile parameters.
    #[serde(default = "ProfileConfig::default_load")]
    pub load: ProfileConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Feedback controller gains.
    #[serde(default)]
    pub pid: PidConfig,
    /// Main-grid fluctuation bounds.
    #[serde(default)]
    pub grid: GridConfig,
}

/// Simulation timing and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Length of one profile cycle in hours (must be > 0).
    pub hours_per_cycle: usize,
    /// Hours to simulate (zero is legal and produces an empty log).
    pub duration_hours: usize,
    /// Master random seed.
    pub seed: u64,
    /// Demand sampling mode: `"per_call"` (the load cursor advances on
    /// every read) or `"per_hour"` (one sample per hour, reused).
    pub demand_sampling: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hours_per_cycle: 24,
            duration_hours: 24,
            seed: 42,
            demand_sampling: "per_call".to_string(),
        }
    }
}

/// One cyclic profile: either explicit hourly values or seeded uniform draws
/// from `[min_kw, max_kw]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Lower bound for generated values (kW).
    pub min_kw: f32,
    /// Upper bound for generated values (kW).
    pub max_kw: f32,
    /// Explicit hourly values; overrides the bounds when present and must
    /// have exactly `hours_per_cycle` entries.
    pub values: Option<Vec<f32>>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            min_kw: 0.0,
            max_kw: 0.0,
            values: None,
        }
    }
}

impl ProfileConfig {
    fn default_solar() -> Self {
        Self {
            min_kw: 20.0,
            max_kw: 40.0,
            values: None,
        }
    }

    fn default_wind() -> Self {
        Self {
            min_kw: 10.0,
            max_kw: 30.0,
            values: None,
        }
    }

    fn default_load() -> Self {
        Self {
            min_kw: 30.0,
            max_kw: 50.0,
            values: None,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh, must be > 0).
    pub capacity_kwh: f32,
    /// Charge rate coefficient (0, 1].
    pub charge_rate: f32,
    /// Discharge rate coefficient (0, 1].
    pub discharge_rate: f32,
    /// Initial charge threshold (conventionally in [0, 1], not enforced).
    pub charge_threshold: f32,
    /// Initial discharge threshold.
    pub discharge_threshold: f32,
    /// Optional clamp floor for both thresholds; requires `threshold_ceiling`.
    pub threshold_floor: Option<f32>,
    /// Optional clamp ceiling for both thresholds; requires `threshold_floor`.
    pub threshold_ceiling: Option<f32>,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 50.0,
            charge_rate: 0.2,
            discharge_rate: 0.1,
            charge_threshold: 0.8,
            discharge_threshold: 0.2,
            threshold_floor: None,
            threshold_ceiling: None,
        }
    }
}

/// Feedback controller gains. Negative and zero gains are legal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 0.1,
            ki: 0.01,
            kd: 0.05,
        }
    }
}

/// Main-grid fluctuation bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Lower bound of the grid power output (kW).
    pub min_kw: f32,
    /// Upper bound of the grid power output (kW).
    pub max_kw: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_kw: 5.0,
            max_kw: 15.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario (the built-in default parameters).
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            solar: ProfileConfig::default_solar(),
            wind: ProfileConfig::default_wind(),
            load: ProfileConfig::default_load(),
            battery: BatteryConfig::default(),
            pid: PidConfig::default(),
            grid: GridConfig::default(),
        }
    }

    /// Returns the high-wind preset: strong wind resource, weak grid.
    pub fn high_wind() -> Self {
        Self {
            wind: ProfileConfig {
                min_kw: 25.0,
                max_kw: 55.0,
                values: None,
            },
            grid: GridConfig {
                min_kw: 2.0,
                max_kw: 8.0,
            },
            battery: BatteryConfig {
                capacity_kwh: 80.0,
                charge_rate: 0.3,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the deficit-stress preset: heavy load against thin supply.
    pub fn deficit_stress() -> Self {
        Self {
            solar: ProfileConfig {
                min_kw: 5.0,
                max_kw: 20.0,
                values: None,
            },
            wind: ProfileConfig {
                min_kw: 2.0,
                max_kw: 12.0,
                values: None,
            },
            load: ProfileConfig {
                min_kw: 45.0,
                max_kw: 70.0,
                values: None,
            },
            battery: BatteryConfig {
                capacity_kwh: 30.0,
                discharge_rate: 0.25,
                ..BatteryConfig::default()
            },
            pid: PidConfig {
                kp: 0.05,
                ki: 0.005,
                kd: 0.02,
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_wind", "deficit_stress"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_wind" => Ok(Self::high_wind()),
            "deficit_stress" => Ok(Self::deficit_stress()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. Every
    /// violation is reported before any simulation step runs.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.hours_per_cycle == 0 {
            errors.push(ConfigError {
                field: "simulation.hours_per_cycle".into(),
                message: "must be > 0".into(),
            });
        }
        if s.demand_sampling != "per_call" && s.demand_sampling != "per_hour" {
            errors.push(ConfigError {
                field: "simulation.demand_sampling".into(),
                message: format!(
                    "must be \"per_call\" or \"per_hour\", got \"{}\"",
                    s.demand_sampling
                ),
            });
        }

        for (name, profile) in [
            ("solar", &self.solar),
            ("wind", &self.wind),
            ("load", &self.load),
        ] {
            if let Some(values) = &profile.values {
                if s.hours_per_cycle > 0 && values.len() != s.hours_per_cycle {
                    errors.push(ConfigError {
                        field: format!("{name}.values"),
                        message: format!(
                            "has {} entries, expected hours_per_cycle = {}",
                            values.len(),
                            s.hours_per_cycle
                        ),
                    });
                }
                if values.iter().any(|v| *v < 0.0) {
                    errors.push(ConfigError {
                        field: format!("{name}.values"),
                        message: "entries must be non-negative".into(),
                    });
                }
            } else {
                if profile.min_kw > profile.max_kw {
                    errors.push(ConfigError {
                        field: format!("{name}.min_kw"),
                        message: format!("must be <= {name}.max_kw"),
                    });
                }
                if profile.min_kw < 0.0 {
                    errors.push(ConfigError {
                        field: format!("{name}.min_kw"),
                        message: "must be non-negative".into(),
                    });
                }
            }
        }

        let bat = &self.battery;
        if bat.capacity_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "battery.capacity_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if !(bat.charge_rate > 0.0 && bat.charge_rate <= 1.0) {
            errors.push(ConfigError {
                field: "battery.charge_rate".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        if !(bat.discharge_rate > 0.0 && bat.discharge_rate <= 1.0) {
            errors.push(ConfigError {
                field: "battery.discharge_rate".into(),
                message: "must be in (0.0, 1.0]".into(),
            });
        }
        match (bat.threshold_floor, bat.threshold_ceiling) {
            (Some(floor), Some(ceiling)) if floor > ceiling => {
                errors.push(ConfigError {
                    field: "battery.threshold_floor".into(),
                    message: "must be <= battery.threshold_ceiling".into(),
                });
            }
            (Some(_), None) | (None, Some(_)) => {
                errors.push(ConfigError {
                    field: "battery.threshold_floor".into(),
                    message: "threshold_floor and threshold_ceiling must be set together".into(),
                });
            }
            _ => {}
        }

        if self.grid.min_kw > self.grid.max_kw {
            errors.push(ConfigError {
                field: "grid.min_kw".into(),
                message: "must be <= grid.max_kw".into(),
            });
        }

        errors
    }
}
