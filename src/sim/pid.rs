/// PID feedback controller driving the battery dispatch thresholds.
///
/// Each update consumes the hour's supply/demand error and returns a
/// correction signal. The integral term is the raw running sum of every
/// error ever seen: it is never reset, clamped, or windup-guarded, so it
/// grows without bound under persistent error. That is the modeled behavior,
/// not an oversight; see the unit tests pinning it down.
#[derive(Debug, Clone)]
pub struct PidController {
    /// Proportional gain.
    pub kp: f32,
    /// Integral gain.
    pub ki: f32,
    /// Derivative gain.
    pub kd: f32,
    integral: f32,
    last_error: f32,
}

impl PidController {
    /// Creates a controller with the given gains and zeroed error memory.
    ///
    /// Negative and zero gains are legal; they change behavior, not validity.
    pub fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral: 0.0,
            last_error: 0.0,
        }
    }

    /// Consumes one error sample and returns the correction signal.
    ///
    /// `output = kp * error + ki * integral + kd * (error - last_error)`,
    /// with the integral accumulated before the output is formed.
    pub fn update(&mut self, error: f32) -> f32 {
        self.integral += error;
        let derivative = error - self.last_error;
        let output = self.kp * error + self.ki * self.integral + self.kd * derivative;
        self.last_error = error;
        output
    }

    /// Accumulated error sum since construction.
    pub fn integral(&self) -> f32 {
        self.integral
    }
}
