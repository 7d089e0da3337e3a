/// Battery storage with controller-tuned dispatch thresholds.
pub mod battery;
pub mod engine;
/// PID feedback controller for threshold adjustment.
pub mod pid;
/// Post-hoc summary aggregates over a completed run.
pub mod report;
pub mod types;
