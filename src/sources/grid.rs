use rand::{Rng, SeedableRng, rngs::StdRng};

/// Main-grid import whose power output fluctuates uniformly within bounds.
///
/// The grid holds one sampled value at a time. It is pre-seeded at
/// construction so a value is available before the first simulation step;
/// [`MainGrid::refresh`] replaces it with a fresh uniform draw. The engine
/// refreshes once per hour after computing the balance, so each hour's
/// available power uses the value drawn during the previous hour.
#[derive(Debug, Clone)]
pub struct MainGrid {
    /// Lower bound of the power output in kilowatts.
    pub min_kw: f32,
    /// Upper bound of the power output in kilowatts.
    pub max_kw: f32,
    current_kw: f32,
    rng: StdRng,
}

impl MainGrid {
    /// Creates a main grid fluctuating in `[min_kw, max_kw]`, drawing the
    /// initial value immediately.
    ///
    /// # Panics
    ///
    /// Panics if `min_kw > max_kw`.
    pub fn new(min_kw: f32, max_kw: f32, seed: u64) -> Self {
        assert!(min_kw <= max_kw, "grid min_kw must be <= max_kw");
        let mut rng = StdRng::seed_from_u64(seed);
        let current_kw = rng.random_range(min_kw..=max_kw);
        Self {
            min_kw,
            max_kw,
            current_kw,
            rng,
        }
    }

    /// The most recently drawn power output in kilowatts.
    pub fn current_kw(&self) -> f32 {
        self.current_kw
    }

    /// Draws a new uniform value in the bounds, stores it, and returns it.
    pub fn refresh(&mut self) -> f32 {
        self.current_kw = self.rng.random_range(self.min_kw..=self.max_kw);
        self.current_kw
    }
}
