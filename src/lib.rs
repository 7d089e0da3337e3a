//! Hour-by-hour microgrid energy-balance simulator.

pub mod config;
pub mod io;
/// Simulation engine, battery dispatch, PID controller, and record types.
pub mod sim;
/// Power sources: cyclic generation/load profiles and the fluctuating main grid.
pub mod sources;
