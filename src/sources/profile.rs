use rand::{Rng, SeedableRng, rngs::StdRng};

/// A fixed-length power profile replayed cyclically, one value per hour.
///
/// `CyclicProfile` wraps one representative day of hourly values (solar
/// generation, wind generation, or load demand) and an internal cursor.
/// Every read returns the value under the cursor and advances it modulo the
/// profile length, so simulations longer than one cycle wrap and repeat.
///
/// Each profile owns its cursor; instances never share position, and the
/// cursor is the only state that changes on a read.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sources::CyclicProfile;
///
/// let mut solar = CyclicProfile::new(vec![0.0; 24], 24);
/// assert_eq!(solar.next(), 0.0);
/// assert_eq!(solar.cursor(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CyclicProfile {
    values: Vec<f32>,
    cursor: usize,
}

impl CyclicProfile {
    /// Creates a profile from an explicit value sequence.
    ///
    /// # Arguments
    ///
    /// * `values` - One value per hour of the cycle
    /// * `hours_per_cycle` - Expected cycle length (conventionally 24)
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != hours_per_cycle` or the cycle is empty.
    /// Scenario validation reports the same condition as a configuration
    /// error before any component is built.
    pub fn new(values: Vec<f32>, hours_per_cycle: usize) -> Self {
        assert!(hours_per_cycle > 0, "hours_per_cycle must be > 0");
        assert!(
            values.len() == hours_per_cycle,
            "profile length {} does not match hours_per_cycle {}",
            values.len(),
            hours_per_cycle
        );
        Self { values, cursor: 0 }
    }

    /// Creates a profile of `hours_per_cycle` uniform draws from `[min, max]`.
    ///
    /// This mirrors how example scenarios are generated: one seeded draw per
    /// hour at construction time, after which the profile is fixed.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or `hours_per_cycle` is zero.
    pub fn uniform(min: f32, max: f32, hours_per_cycle: usize, seed: u64) -> Self {
        assert!(min <= max, "profile min must be <= max");
        let mut rng = StdRng::seed_from_u64(seed);
        let values = (0..hours_per_cycle)
            .map(|_| rng.random_range(min..=max))
            .collect();
        Self::new(values, hours_per_cycle)
    }

    /// Returns the value under the cursor and advances the cursor by one,
    /// wrapping at the cycle length.
    #[expect(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }

    /// Current cursor position in `[0, hours_per_cycle)`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The raw hourly values, for reporting layers.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_values_in_order() {
        let mut p = CyclicProfile::new(vec![1.0, 2.0, 3.0], 3);
        assert_eq!(p.next(), 1.0);
        assert_eq!(p.next(), 2.0);
        assert_eq!(p.next(), 3.0);
    }

    #[test]
    fn cursor_wraps_at_cycle_length() {
        let values: Vec<f32> = (0..24).map(|h| h as f32).collect();
        let mut p = CyclicProfile::new(values.clone(), 24);
        for k in 0..60 {
            assert_eq!(p.next(), values[k % 24], "mismatch at read {k}");
        }
        assert_eq!(p.cursor(), 60 % 24);
    }

    #[test]
    fn kth_read_returns_k_mod_len() {
        let values: Vec<f32> = (0..24).map(|h| h as f32 * 1.5).collect();
        let mut p = CyclicProfile::new(values.clone(), 24);
        for _ in 0..7 {
            p.next();
        }
        assert_eq!(p.next(), values[7]);
    }

    #[test]
    #[should_panic]
    fn rejects_length_mismatch() {
        CyclicProfile::new(vec![1.0; 23], 24);
    }

    #[test]
    #[should_panic]
    fn rejects_empty_cycle() {
        CyclicProfile::new(Vec::new(), 0);
    }

    #[test]
    fn uniform_values_stay_in_bounds() {
        let mut p = CyclicProfile::uniform(20.0, 40.0, 24, 7);
        for _ in 0..24 {
            let v = p.next();
            assert!((20.0..=40.0).contains(&v), "out of bounds: {v}");
        }
    }

    #[test]
    fn uniform_is_deterministic_for_fixed_seed() {
        let a = CyclicProfile::uniform(10.0, 30.0, 24, 99);
        let b = CyclicProfile::uniform(10.0, 30.0, 24, 99);
        assert_eq!(a.values(), b.values());
    }

    #[test]
    fn independent_profiles_do_not_share_cursors() {
        let mut a = CyclicProfile::new(vec![1.0, 2.0], 2);
        let mut b = CyclicProfile::new(vec![5.0, 6.0], 2);
        a.next();
        assert_eq!(a.cursor(), 1);
        assert_eq!(b.cursor(), 0);
        assert_eq!(b.next(), 5.0);
    }
}
