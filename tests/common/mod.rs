//! Shared test fixtures for integration tests.

use microgrid_sim::sim::battery::Battery;
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::pid::PidController;
use microgrid_sim::sim::types::{DemandSampling, SimConfig};
use microgrid_sim::sources::{CyclicProfile, MainGrid};

/// Default simulation configuration (24-hour cycle, per-call sampling).
pub fn default_config() -> SimConfig {
    SimConfig::new(24, DemandSampling::PerCall)
}

/// Default battery (50 kWh, rates 0.2/0.1, thresholds 0.8/0.2).
pub fn default_battery() -> Battery {
    Battery::new(50.0, 0.2, 0.1, 0.8, 0.2)
}

/// Constant-profile engine with a pinned grid and an inert controller:
/// solar 30 kW, wind 20 kW, load 40 kW, grid fixed at 10 kW.
pub fn constant_engine() -> Engine {
    Engine::new(
        default_config(),
        CyclicProfile::new(vec![30.0; 24], 24),
        CyclicProfile::new(vec![20.0; 24], 24),
        CyclicProfile::new(vec![40.0; 24], 24),
        MainGrid::new(10.0, 10.0, 0),
        PidController::new(0.0, 0.0, 0.0),
        default_battery(),
    )
}

/// Seeded stochastic engine: uniform profiles, fluctuating grid, active
/// controller. Identical seeds reproduce identical runs.
pub fn seeded_engine(seed: u64) -> Engine {
    Engine::new(
        default_config(),
        CyclicProfile::uniform(20.0, 40.0, 24, seed.wrapping_add(11)),
        CyclicProfile::uniform(10.0, 30.0, 24, seed.wrapping_add(23)),
        CyclicProfile::uniform(30.0, 50.0, 24, seed.wrapping_add(37)),
        MainGrid::new(5.0, 15.0, seed.wrapping_add(57)),
        PidController::new(0.1, 0.01, 0.05),
        default_battery(),
    )
}
