//! Simulation engine orchestrating sources, controller, and battery dispatch.

use crate::sources::{CyclicProfile, MainGrid};

use super::battery::Battery;
use super::pid::PidController;
use super::types::{DemandSampling, HourStatus, HourlyRecord, SimConfig};

/// Simulation engine owning all sources, the controller, and the battery.
///
/// The engine sequences one hour at a time: read the cyclic sources, compute
/// the balance against the grid value held from the previous hour, let the
/// controller retune the battery thresholds, refresh the grid, decide
/// dispatch, settle the battery, and append a record to the engine-owned log.
///
/// Nothing is reset between [`Engine::run`] calls: profile cursors, the
/// controller's error memory, the battery level, and the held grid value all
/// persist, so a second `run` continues exactly where the first stopped.
pub struct Engine {
    config: SimConfig,
    solar: CyclicProfile,
    wind: CyclicProfile,
    load: CyclicProfile,
    grid: MainGrid,
    pid: PidController,
    battery: Battery,
    hours_elapsed: usize,
    log: Vec<HourlyRecord>,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Timing and demand-sampling configuration
    /// * `solar` - Solar generation profile
    /// * `wind` - Wind generation profile
    /// * `load` - Consumer demand profile
    /// * `grid` - Fluctuating main-grid import
    /// * `pid` - Feedback controller for the dispatch thresholds
    /// * `battery` - Storage unit
    pub fn new(
        config: SimConfig,
        solar: CyclicProfile,
        wind: CyclicProfile,
        load: CyclicProfile,
        grid: MainGrid,
        pid: PidController,
        battery: Battery,
    ) -> Self {
        Self {
            config,
            solar,
            wind,
            load,
            grid,
            pid,
            battery,
            hours_elapsed: 0,
            log: Vec::new(),
        }
    }

    /// Executes one simulated hour and appends its record to the log.
    fn step(&mut self) -> HourlyRecord {
        let hour = self.hours_elapsed;

        // Per-hour cache for the single-sample mode; None means every
        // demand read advances the load cursor.
        let mut cached_demand = match self.config.demand_sampling {
            DemandSampling::PerHour => Some(self.load.next()),
            DemandSampling::PerCall => None,
        };

        // 1. Read sources and compute the balance. The grid contribution is
        // the value drawn during the previous hour (or at construction).
        let solar_kw = self.solar.next();
        let wind_kw = self.wind.next();
        let renewable_kw = solar_kw + wind_kw;
        let grid_kw = self.grid.current_kw();
        let available_kw = renewable_kw + self.battery.charge_level_kwh() + grid_kw;

        // 2. First demand sample drives the controller.
        let error = sample_demand(&mut self.load, &mut cached_demand) - available_kw;
        let pid_output = self.pid.update(error);
        self.battery.apply_controller_output(pid_output);

        // 3. Refresh the grid for the next hour's balance.
        self.grid.refresh();

        // 4. Sufficiency check against a second sample; a third sample feeds
        // the deficit dispatch and the settlement.
        let demand_b = sample_demand(&mut self.load, &mut cached_demand);
        let (status, settle_demand_kw) = if available_kw >= demand_b {
            (HourStatus::Sufficient, demand_b)
        } else {
            let demand_c = sample_demand(&mut self.load, &mut cached_demand);
            self.battery
                .dispatch_on_deficit(renewable_kw, available_kw, demand_c);
            (
                HourStatus::Deficit {
                    shortfall_kw: demand_c - available_kw,
                },
                demand_c,
            )
        };

        // 5. Unconditional end-of-hour battery settlement.
        self.battery.settle_hour(renewable_kw, settle_demand_kw);

        self.hours_elapsed += 1;

        let record = HourlyRecord {
            hour,
            total_available_kw: available_kw,
            deficit_kw: error.max(0.0),
            battery_level_kwh: self.battery.charge_level_kwh(),
            controller_output: pid_output,
            grid_kw,
            status,
        };
        self.log.push(record.clone());
        record
    }

    /// Runs `duration_hours` steps and returns the records appended by this
    /// call. A zero duration appends nothing and mutates no state.
    pub fn run(&mut self, duration_hours: usize) -> &[HourlyRecord] {
        let start = self.log.len();
        self.log.reserve(duration_hours);
        for _ in 0..duration_hours {
            self.step();
        }
        &self.log[start..]
    }

    /// All records accumulated over the engine's lifetime.
    pub fn log(&self) -> &[HourlyRecord] {
        &self.log
    }

    /// Total hours simulated so far.
    pub fn hours_elapsed(&self) -> usize {
        self.hours_elapsed
    }

    /// Returns a reference to the battery (for reporting).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// The raw solar, wind, and load profiles, for presentation layers.
    pub fn profiles(&self) -> (&[f32], &[f32], &[f32]) {
        (self.solar.values(), self.wind.values(), self.load.values())
    }
}

/// Reads demand, either advancing the load cursor or reusing the hour's
/// cached sample depending on the configured mode.
fn sample_demand(load: &mut CyclicProfile, cached: &mut Option<f32>) -> f32 {
    match *cached {
        Some(demand) => demand,
        None => load.next(),
    }
}
