//! Core simulation types: configuration, hourly records, and status events.

use std::fmt;

/// Timing and sampling parameters shared by the engine and its sources.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::types::{DemandSampling, SimConfig};
///
/// let cfg = SimConfig::new(24, DemandSampling::PerCall);
/// assert_eq!(cfg.hours_per_cycle, 24);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Length of one profile cycle in hours (conventionally 24).
    pub hours_per_cycle: usize,
    /// How often the load profile is sampled within one hour.
    pub demand_sampling: DemandSampling,
}

impl SimConfig {
    /// Creates a simulation configuration.
    ///
    /// # Panics
    ///
    /// Panics if `hours_per_cycle` is zero.
    pub fn new(hours_per_cycle: usize, demand_sampling: DemandSampling) -> Self {
        assert!(hours_per_cycle > 0, "hours_per_cycle must be > 0");
        Self {
            hours_per_cycle,
            demand_sampling,
        }
    }
}

/// How the load profile is consulted within a single simulated hour.
///
/// The balance error, the sufficiency check, and the deficit dispatch each
/// read demand separately. Under [`DemandSampling::PerCall`] every read
/// advances the load cursor (two or three advances per hour), so the load
/// cycle desynchronizes from solar and wind after the first day. That is the
/// default. [`DemandSampling::PerHour`] fetches demand once at the top of
/// the hour and reuses it, keeping all three profiles aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandSampling {
    /// Every demand read advances the load cursor.
    PerCall,
    /// One demand read per hour, reused for every consumer of the value.
    PerHour,
}

/// Sufficiency outcome of one simulated hour, the structured form of the
/// per-hour status line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HourStatus {
    /// Renewables, storage, and the grid covered the sampled demand.
    Sufficient,
    /// Demand exceeded the available power by `shortfall_kw`.
    Deficit {
        /// Shortfall against the deficit-branch demand sample (kW).
        shortfall_kw: f32,
    },
}

/// Immutable record of one simulated hour, appended to the engine log.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    /// Engine-global hour index (continues across `run` calls).
    pub hour: usize,
    /// Renewables + stored energy + grid power at the top of the hour (kW).
    pub total_available_kw: f32,
    /// `max(0, error)` where error came from the first demand sample (kW).
    pub deficit_kw: f32,
    /// Battery charge level after the hour's full update (kWh).
    pub battery_level_kwh: f32,
    /// Controller output applied to both dispatch thresholds this hour.
    pub controller_output: f32,
    /// Grid power used in this hour's balance (the pre-refresh value).
    pub grid_kw: f32,
    /// Sufficiency outcome of the hour.
    pub status: HourStatus,
}

impl fmt::Display for HourlyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            HourStatus::Sufficient => write!(
                f,
                "Hour {}: supply is sufficient ({:.2} kW available, grid {:.2} kW, battery {:.2} kWh)",
                self.hour + 1,
                self.total_available_kw,
                self.grid_kw,
                self.battery_level_kwh,
            ),
            HourStatus::Deficit { shortfall_kw } => write!(
                f,
                "Hour {}: power deficit of {:.2} kW ({:.2} kW available, battery {:.2} kWh)",
                self.hour + 1,
                shortfall_kw,
                self.total_available_kw,
                self.battery_level_kwh,
            ),
        }
    }
}
