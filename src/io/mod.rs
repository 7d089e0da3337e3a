//! Telemetry output for simulation results.

/// CSV export of the hourly record log.
pub mod export;
