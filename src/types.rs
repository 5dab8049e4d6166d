//! Core sample types shared between the scheduler and the frame encoder.

/// One acquisition cycle's result.
///
/// The inertial vectors and the analog value are captured fresh every cycle,
/// anchored to `timestamp_ms`. The three environmental fields are stale
/// caches: each holds the most recently observed value and is only
/// overwritten on the cycle the refresh schedule selects its channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Milliseconds since daemon start, captured when the analog conversion
    /// became available. Correlation anchor for every other field.
    pub timestamp_ms: u32,
    /// Raw analog conversion result for this cycle.
    pub analog_value: u32,
    /// Accelerometer vector (m/s²)
    pub accel: [f32; 3],
    /// Magnetometer vector (µT)
    pub mag: [f32; 3],
    /// Gyroscope vector (rad/s)
    pub gyro: [f32; 3],
    /// Temperature in 0.1 °C units, truncated toward zero at refresh time
    pub temperature_dc: u16,
    /// Relative humidity, raw sensor units
    pub humidity: u16,
    /// Pressure, raw sensor units
    pub pressure: u16,
}

impl Sample {
    /// Zero-valued sample, matching the pre-first-refresh sentinel state.
    pub fn zero() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sample() {
        let s = Sample::zero();
        assert_eq!(s.timestamp_ms, 0);
        assert_eq!(s.accel, [0.0, 0.0, 0.0]);
        assert_eq!(s.temperature_dc, 0);
    }
}
