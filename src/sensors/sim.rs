//! Simulated sensor backend for hardware-free operation and testing.
//!
//! The simulated converter paces readiness at its configured data rate
//! (20 Hz by default, matching the real part's continuous-conversion setup),
//! so the acquisition loop runs at the same cadence it would against
//! hardware. Signal shapes are physics-flavored rather than physical: a slow
//! sine on the analog channel, gravity plus noise on the accelerometer, a
//! fixed ambient field on the magnetometer.

use super::noise::NoiseGenerator;
use super::{AnalogChannel, EnvironmentSource, InertialReading, InertialSource};
use crate::config::SensorsConfig;
use crate::error::Result;
use std::time::{Duration, Instant};

/// Mid-scale of a 24-bit offset-binary conversion result
const ANALOG_MID_SCALE: f32 = 8_388_608.0; // 2^23

/// Simulated inertial source: level, stationary module
pub struct SimInertial {
    noise: NoiseGenerator,
}

impl SimInertial {
    pub fn new(noise: NoiseGenerator) -> Self {
        Self { noise }
    }
}

impl InertialSource for SimInertial {
    fn read(&mut self) -> Result<InertialReading> {
        Ok(InertialReading {
            accel: [
                self.noise.gaussian(0.02),
                self.noise.gaussian(0.02),
                9.81 + self.noise.gaussian(0.02),
            ],
            mag: [
                22.0 + self.noise.gaussian(0.3),
                5.0 + self.noise.gaussian(0.3),
                -42.0 + self.noise.gaussian(0.3),
            ],
            gyro: [
                self.noise.gaussian(0.005),
                self.noise.gaussian(0.005),
                self.noise.gaussian(0.005),
            ],
        })
    }
}

/// Simulated analog converter with a paced data-ready signal
pub struct SimAnalog {
    noise: NoiseGenerator,
    period: Duration,
    next_ready: Instant,
    phase: f32,
}

impl SimAnalog {
    /// Create a converter pacing readiness at `rate_hz` conversions/second.
    pub fn new(rate_hz: f64, noise: NoiseGenerator) -> Self {
        let period = Duration::from_secs_f64(1.0 / rate_hz.max(0.001));
        Self {
            noise,
            period,
            next_ready: Instant::now() + period,
            phase: 0.0,
        }
    }
}

impl AnalogChannel for SimAnalog {
    fn is_ready(&mut self) -> bool {
        Instant::now() >= self.next_ready
    }

    fn read(&mut self) -> Result<u32> {
        self.next_ready = Instant::now() + self.period;
        self.phase += 0.05;
        // Slow sine around mid-scale, ±25% of full swing plus noise
        let signal = (self.phase.sin() * 0.25 + self.noise.gaussian(0.002)).clamp(-1.0, 1.0);
        Ok((ANALOG_MID_SCALE + signal * (ANALOG_MID_SCALE - 1.0)) as u32)
    }
}

/// Simulated environmental source: fixed lab conditions plus noise
pub struct SimEnvironment {
    noise: NoiseGenerator,
}

impl SimEnvironment {
    pub fn new(noise: NoiseGenerator) -> Self {
        Self { noise }
    }
}

impl EnvironmentSource for SimEnvironment {
    fn read_temperature(&mut self) -> Result<f32> {
        Ok(22.5 + self.noise.gaussian(0.05))
    }

    fn read_humidity(&mut self) -> Result<f32> {
        Ok(41.0 + self.noise.gaussian(0.5))
    }

    fn read_pressure(&mut self) -> Result<f32> {
        Ok(9965.0 + self.noise.gaussian(2.0))
    }
}

/// Build the simulated sensor set.
///
/// Each source gets an offset seed so their noise streams are independent
/// but still reproducible from the single configured seed.
#[allow(clippy::type_complexity)]
pub fn create(
    config: &SensorsConfig,
) -> (
    Result<Box<dyn InertialSource>>,
    Result<Box<dyn AnalogChannel>>,
    Result<Box<dyn EnvironmentSource>>,
) {
    let offset_seed = |n: u64| {
        if config.seed == 0 {
            0
        } else {
            config.seed.wrapping_add(n)
        }
    };

    (
        Ok(Box::new(SimInertial::new(NoiseGenerator::new(
            offset_seed(1),
        )))),
        Ok(Box::new(SimAnalog::new(
            config.analog_rate_hz,
            NoiseGenerator::new(offset_seed(2)),
        ))),
        Ok(Box::new(SimEnvironment::new(NoiseGenerator::new(
            offset_seed(3),
        )))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analog_readiness_pacing() {
        let mut adc = SimAnalog::new(1000.0, NoiseGenerator::new(7));

        // Not ready until one conversion period has elapsed
        assert!(!adc.is_ready());
        std::thread::sleep(Duration::from_millis(2));
        assert!(adc.is_ready());

        // Reading re-arms the ready signal
        let _ = adc.read().unwrap();
        assert!(!adc.is_ready());
    }

    #[test]
    fn test_analog_value_in_range() {
        let mut adc = SimAnalog::new(1000.0, NoiseGenerator::new(7));
        for _ in 0..200 {
            let v = adc.read().unwrap();
            assert!(v < (1 << 24), "conversion result exceeds 24 bits: {}", v);
        }
    }

    #[test]
    fn test_inertial_reads_gravity() {
        let mut imu = SimInertial::new(NoiseGenerator::new(7));
        let reading = imu.read().unwrap();
        assert!((reading.accel[2] - 9.81).abs() < 1.0);
    }
}
