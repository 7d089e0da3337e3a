//! Post-hoc summary aggregates computed from a completed run.

use std::fmt;

use super::types::{HourStatus, HourlyRecord};

/// Aggregate summary derived from a complete hourly record log.
///
/// Computed post-hoc from the record vector so the reported numbers always
/// agree with the logged data.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Hours covered by the report.
    pub hours: usize,
    /// Hours whose sufficiency check failed.
    pub deficit_hours: usize,
    /// Sum of the per-hour deficit field (kWh, one-hour steps).
    pub unserved_energy_kwh: f32,
    /// Largest per-hour deficit (kW).
    pub peak_deficit_kw: f32,
    /// Mean total available power across all hours (kW).
    pub mean_available_kw: f32,
    /// Lowest battery level observed at any hour boundary (kWh).
    pub min_battery_kwh: f32,
    /// Highest battery level observed at any hour boundary (kWh).
    pub max_battery_kwh: f32,
    /// Largest absolute controller output applied to the thresholds.
    pub peak_controller_output: f32,
}

impl SummaryReport {
    /// Computes all aggregates from the record log.
    pub fn from_records(records: &[HourlyRecord]) -> Self {
        if records.is_empty() {
            return Self {
                hours: 0,
                deficit_hours: 0,
                unserved_energy_kwh: 0.0,
                peak_deficit_kw: 0.0,
                mean_available_kw: 0.0,
                min_battery_kwh: 0.0,
                max_battery_kwh: 0.0,
                peak_controller_output: 0.0,
            };
        }

        let mut deficit_hours = 0_usize;
        let mut unserved = 0.0_f32;
        let mut peak_deficit = 0.0_f32;
        let mut available_sum = 0.0_f32;
        let mut min_battery = f32::INFINITY;
        let mut max_battery = f32::NEG_INFINITY;
        let mut peak_output = 0.0_f32;

        for r in records {
            if matches!(r.status, HourStatus::Deficit { .. }) {
                deficit_hours += 1;
            }
            unserved += r.deficit_kw;
            peak_deficit = peak_deficit.max(r.deficit_kw);
            available_sum += r.total_available_kw;
            min_battery = min_battery.min(r.battery_level_kwh);
            max_battery = max_battery.max(r.battery_level_kwh);
            peak_output = peak_output.max(r.controller_output.abs());
        }

        Self {
            hours: records.len(),
            deficit_hours,
            unserved_energy_kwh: unserved,
            peak_deficit_kw: peak_deficit,
            mean_available_kw: available_sum / records.len() as f32,
            min_battery_kwh: min_battery,
            max_battery_kwh: max_battery,
            peak_controller_output: peak_output,
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Hours simulated:       {}", self.hours)?;
        writeln!(
            f,
            "Deficit hours:         {} ({:.1}%)",
            self.deficit_hours,
            if self.hours > 0 {
                100.0 * self.deficit_hours as f32 / self.hours as f32
            } else {
                0.0
            }
        )?;
        writeln!(f, "Unserved energy:       {:.2} kWh", self.unserved_energy_kwh)?;
        writeln!(f, "Peak deficit:          {:.2} kW", self.peak_deficit_kw)?;
        writeln!(f, "Mean available power:  {:.2} kW", self.mean_available_kw)?;
        writeln!(
            f,
            "Battery level range:   {:.2} – {:.2} kWh",
            self.min_battery_kwh, self.max_battery_kwh
        )?;
        write!(
            f,
            "Peak controller output: {:.3}",
            self.peak_controller_output
        )
    }
}
