//! Power source components feeding the hourly balance.

/// Fluctuating main-grid import model.
pub mod grid;
/// Fixed-length cyclic generation and load profiles.
pub mod profile;

// Re-export the main types for convenience
pub use grid::MainGrid;
pub use profile::CyclicProfile;
