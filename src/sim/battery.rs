/// Battery storage with controller-tuned dispatch thresholds.
///
/// The battery keeps its stored energy (`charge_level_kwh`) inside
/// `[0, capacity_kwh]` after every completed hour, while the two dispatch
/// thresholds are deliberately unbounded: the feedback controller shifts both
/// by its output every hour, and nothing clamps the drift unless an explicit
/// bound pair is configured. The thresholds gate the conditional deficit
/// dispatch as fractional multipliers of demand.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Total energy capacity in kilowatt-hours.
    pub capacity_kwh: f32,
    /// Fraction of a surplus absorbed per hour when charging (0..1].
    pub charge_rate: f32,
    /// Fraction of a shortfall covered per hour when discharging (0..1].
    pub discharge_rate: f32,
    /// Demand multiplier below which the deficit branch charges.
    pub charge_threshold: f32,
    /// Demand multiplier above which the deficit branch discharges.
    pub discharge_threshold: f32,
    /// Optional `(floor, ceiling)` clamp applied to both thresholds after
    /// each controller adjustment. `None` preserves the unbounded drift.
    pub threshold_bounds: Option<(f32, f32)>,
    charge_level_kwh: f32,
}

impl Battery {
    /// Creates a battery starting empty with the given parameters.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Energy capacity in kWh (must be > 0)
    /// * `charge_rate` - Charge rate coefficient in (0, 1]
    /// * `discharge_rate` - Discharge rate coefficient in (0, 1]
    /// * `charge_threshold` - Initial charge threshold (conventionally in [0, 1])
    /// * `discharge_threshold` - Initial discharge threshold
    ///
    /// # Panics
    ///
    /// Panics if the capacity is not positive or a rate falls outside (0, 1].
    pub fn new(
        capacity_kwh: f32,
        charge_rate: f32,
        discharge_rate: f32,
        charge_threshold: f32,
        discharge_threshold: f32,
    ) -> Self {
        assert!(capacity_kwh > 0.0, "capacity_kwh must be > 0");
        assert!(charge_rate > 0.0 && charge_rate <= 1.0);
        assert!(discharge_rate > 0.0 && discharge_rate <= 1.0);

        Self {
            capacity_kwh,
            charge_rate,
            discharge_rate,
            charge_threshold,
            discharge_threshold,
            threshold_bounds: None,
            charge_level_kwh: 0.0,
        }
    }

    /// Clamps both thresholds to `[floor, ceiling]` after every controller
    /// adjustment. Documented alternative to the default unbounded drift.
    ///
    /// # Panics
    ///
    /// Panics if `floor > ceiling`.
    pub fn with_threshold_bounds(mut self, floor: f32, ceiling: f32) -> Self {
        assert!(floor <= ceiling, "threshold floor must be <= ceiling");
        self.threshold_bounds = Some((floor, ceiling));
        self
    }

    /// Current stored energy in kilowatt-hours.
    pub fn charge_level_kwh(&self) -> f32 {
        self.charge_level_kwh
    }

    /// Shifts both dispatch thresholds by the controller output.
    ///
    /// Applied unconditionally every hour. With no configured bounds the
    /// thresholds drift freely, tracking the controller's unbounded integral.
    pub fn apply_controller_output(&mut self, output: f32) {
        self.charge_threshold += output;
        self.discharge_threshold += output;
        if let Some((floor, ceiling)) = self.threshold_bounds {
            self.charge_threshold = self.charge_threshold.clamp(floor, ceiling);
            self.discharge_threshold = self.discharge_threshold.clamp(floor, ceiling);
        }
    }

    /// Conditional dispatch taken only in a deficit hour.
    ///
    /// When renewables alone exceed `discharge_threshold * demand`, releases
    /// `(renewable - demand) * discharge_rate` capped by the stored energy.
    /// Otherwise, when total available power is below
    /// `charge_threshold * demand`, banks `(demand - available) * charge_rate`
    /// capped by the remaining headroom. At most one branch runs per hour.
    pub fn dispatch_on_deficit(&mut self, renewable_kw: f32, available_kw: f32, demand_kw: f32) {
        if renewable_kw > self.discharge_threshold * demand_kw {
            let discharge = ((renewable_kw - demand_kw) * self.discharge_rate)
                .min(self.charge_level_kwh);
            self.charge_level_kwh -= discharge;
        } else if available_kw < self.charge_threshold * demand_kw {
            let charge = ((demand_kw - available_kw) * self.charge_rate)
                .min(self.capacity_kwh - self.charge_level_kwh);
            self.charge_level_kwh += charge;
        }
    }

    /// Unconditional end-of-hour settlement, applied every hour.
    ///
    /// Banks the renewable surplus (or drains the shortfall) scaled by the
    /// charge rate, clamping at capacity; then, if renewables fell short of
    /// demand, additionally drains the gap scaled by the discharge rate,
    /// clamping at empty. The clamps are the recovery for would-be
    /// out-of-range levels, so `0 <= level <= capacity` holds afterwards.
    pub fn settle_hour(&mut self, renewable_kw: f32, demand_kw: f32) {
        self.charge_level_kwh += (renewable_kw - demand_kw) * self.charge_rate;
        self.charge_level_kwh = self.charge_level_kwh.min(self.capacity_kwh);

        if renewable_kw < demand_kw {
            self.charge_level_kwh -= (demand_kw - renewable_kw) * self.discharge_rate;
            self.charge_level_kwh = self.charge_level_kwh.max(0.0);
        }
    }
}
