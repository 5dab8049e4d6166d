//! Sampling scheduler: one acquisition cycle per call.
//!
//! The analog converter is the rate-limiting dependency. Each cycle blocks
//! until it signals readiness, anchors the timestamp to that instant, then
//! captures the inertial vectors and the conversion result. Environmental
//! channels are far too slow to read every cycle, so the schedule staggers
//! one refresh per channel across a 100-cycle period; between refreshes the
//! cached value is carried into every sample unchanged.

use crate::error::Result;
use crate::sensors::{AnalogChannel, EnvironmentSource, InertialSource};
use crate::types::Sample;
use std::time::Instant;

/// Length of the slow-channel refresh period, in cycles.
pub const SCHEDULE_PERIOD: u8 = 100;

/// Slow environmental channels, refreshed round-robin across the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlowChannel {
    Humidity,
    Pressure,
    Temperature,
}

/// Counter offsets at which each slow channel is refreshed.
///
/// The offsets are distinct by construction, so at most one slow read lands
/// in any cycle and slow transactions never stack up within a single cycle.
/// Each channel sees a refresh every 100 cycles.
pub const REFRESH_SCHEDULE: [(u8, SlowChannel); 3] = [
    (0, SlowChannel::Humidity),
    (25, SlowChannel::Pressure),
    (50, SlowChannel::Temperature),
];

/// Which slow channel, if any, is due at this counter value.
pub fn refresh_due(counter: u8) -> Option<SlowChannel> {
    REFRESH_SCHEDULE
        .iter()
        .find(|(at, _)| *at == counter)
        .map(|(_, channel)| *channel)
}

/// Cached slow-channel values, already in wire units.
#[derive(Debug, Clone, Copy, Default)]
struct SlowCache {
    temperature_dc: u16,
    humidity: u16,
    pressure: u16,
}

/// Drives the acquisition cycle and owns all persistent sampling state:
/// the schedule counter and the slow-channel cache.
pub struct Scheduler<I, A, E> {
    inertial: I,
    analog: A,
    environment: E,
    counter: u8,
    cache: SlowCache,
    boot: Instant,
}

impl<I, A, E> Scheduler<I, A, E>
where
    I: InertialSource,
    A: AnalogChannel,
    E: EnvironmentSource,
{
    pub fn new(inertial: I, analog: A, environment: E) -> Self {
        Self {
            inertial,
            analog,
            environment,
            counter: 0,
            cache: SlowCache::default(),
            boot: Instant::now(),
        }
    }

    /// Current schedule counter, in `[0, 100)`.
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Run one acquisition cycle to completion and return the sample.
    ///
    /// Blocks without timeout until the converter is ready; a permanently
    /// stuck ready signal stalls the caller indefinitely.
    pub fn run_cycle(&mut self) -> Result<Sample> {
        // Rate-limiting step: spin until a new conversion is available
        while !self.analog.is_ready() {
            std::hint::spin_loop();
        }

        // Timestamp as close to the ready instant as possible
        let timestamp_ms = self.boot.elapsed().as_millis() as u32;

        // The inertial vectors are not hardware-synchronized with the
        // conversion; low single-digit millisecond skew from the timestamp
        // is accepted.
        let inertial = self.inertial.read()?;

        let analog_value = self.analog.read()?;

        if let Some(channel) = refresh_due(self.counter) {
            self.refresh(channel)?;
        }

        self.counter = (self.counter + 1) % SCHEDULE_PERIOD;

        Ok(Sample {
            timestamp_ms,
            analog_value,
            accel: inertial.accel,
            mag: inertial.mag,
            gyro: inertial.gyro,
            temperature_dc: self.cache.temperature_dc,
            humidity: self.cache.humidity,
            pressure: self.cache.pressure,
        })
    }

    fn refresh(&mut self, channel: SlowChannel) -> Result<()> {
        match channel {
            SlowChannel::Humidity => {
                self.cache.humidity = self.environment.read_humidity()? as u16;
            }
            SlowChannel::Pressure => {
                self.cache.pressure = self.environment.read_pressure()? as u16;
            }
            SlowChannel::Temperature => {
                // 0.1 °C fixed point; the `as` cast truncates toward zero
                self.cache.temperature_dc = (self.environment.read_temperature()? * 10.0) as u16;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::{DegradedInertial, InertialReading};

    /// Converter that is always ready and counts up its results.
    struct ScriptedAnalog {
        next: u32,
    }

    impl AnalogChannel for ScriptedAnalog {
        fn is_ready(&mut self) -> bool {
            true
        }

        fn read(&mut self) -> Result<u32> {
            self.next += 1;
            Ok(self.next)
        }
    }

    struct FixedInertial;

    impl InertialSource for FixedInertial {
        fn read(&mut self) -> Result<InertialReading> {
            Ok(InertialReading {
                accel: [0.1, 0.2, 9.8],
                mag: [20.0, 5.0, -40.0],
                gyro: [0.01, -0.02, 0.03],
            })
        }
    }

    /// Environmental source that counts reads per channel.
    #[derive(Default)]
    struct CountingEnvironment {
        temperature_reads: u32,
        humidity_reads: u32,
        pressure_reads: u32,
    }

    impl EnvironmentSource for CountingEnvironment {
        fn read_temperature(&mut self) -> Result<f32> {
            self.temperature_reads += 1;
            Ok(23.45)
        }

        fn read_humidity(&mut self) -> Result<f32> {
            self.humidity_reads += 1;
            Ok(40.0 + self.humidity_reads as f32)
        }

        fn read_pressure(&mut self) -> Result<f32> {
            self.pressure_reads += 1;
            Ok(9900.0 + self.pressure_reads as f32)
        }
    }

    fn scheduler() -> Scheduler<FixedInertial, ScriptedAnalog, CountingEnvironment> {
        Scheduler::new(
            FixedInertial,
            ScriptedAnalog { next: 0 },
            CountingEnvironment::default(),
        )
    }

    #[test]
    fn test_counter_progression_wraps() {
        let mut sched = scheduler();
        for expected in 0..100u32 {
            assert_eq!(sched.counter() as u32, expected);
            sched.run_cycle().unwrap();
        }
        // Wrapped back to zero, then keeps counting
        assert_eq!(sched.counter(), 0);
        sched.run_cycle().unwrap();
        assert_eq!(sched.counter(), 1);
    }

    #[test]
    fn test_each_slow_channel_refreshed_once_per_period() {
        let mut sched = scheduler();
        for _ in 0..100 {
            sched.run_cycle().unwrap();
        }
        assert_eq!(sched.environment.humidity_reads, 1);
        assert_eq!(sched.environment.pressure_reads, 1);
        assert_eq!(sched.environment.temperature_reads, 1);

        for _ in 0..100 {
            sched.run_cycle().unwrap();
        }
        assert_eq!(sched.environment.humidity_reads, 2);
        assert_eq!(sched.environment.pressure_reads, 2);
        assert_eq!(sched.environment.temperature_reads, 2);
    }

    #[test]
    fn test_refresh_offsets() {
        assert_eq!(refresh_due(0), Some(SlowChannel::Humidity));
        assert_eq!(refresh_due(25), Some(SlowChannel::Pressure));
        assert_eq!(refresh_due(50), Some(SlowChannel::Temperature));
        for counter in 0..SCHEDULE_PERIOD {
            if !matches!(counter, 0 | 25 | 50) {
                assert_eq!(refresh_due(counter), None);
            }
        }
    }

    #[test]
    fn test_slow_values_are_stale_caches() {
        let mut sched = scheduler();

        // Cycle 0 refreshes humidity; pressure and temperature still hold
        // the zero sentinel until their offsets come up.
        let first = sched.run_cycle().unwrap();
        assert_eq!(first.humidity, 41);
        assert_eq!(first.pressure, 0);
        assert_eq!(first.temperature_dc, 0);

        // Carried over unchanged through cycle 25
        let mut last = first;
        for _ in 1..=25 {
            last = sched.run_cycle().unwrap();
        }
        assert_eq!(last.humidity, 41);
        assert_eq!(last.pressure, 9901);
        assert_eq!(last.temperature_dc, 0);

        // Temperature lands at cycle 50
        for _ in 26..=50 {
            last = sched.run_cycle().unwrap();
        }
        assert_eq!(last.temperature_dc, 234);
        assert_eq!(last.humidity, 41);
    }

    #[test]
    fn test_temperature_truncates_toward_zero() {
        // 23.45 °C must become 234, not 235
        let mut sched = scheduler();
        for _ in 0..=50 {
            sched.run_cycle().unwrap();
        }
        assert_eq!(sched.cache.temperature_dc, 234);
    }

    #[test]
    fn test_timestamps_monotonic() {
        let mut sched = scheduler();
        let mut previous = 0u32;
        for _ in 0..50 {
            let sample = sched.run_cycle().unwrap();
            assert!(sample.timestamp_ms >= previous);
            previous = sample.timestamp_ms;
        }
    }

    #[test]
    fn test_degraded_inertial_still_produces_samples() {
        let mut sched = Scheduler::new(
            DegradedInertial,
            ScriptedAnalog { next: 0 },
            CountingEnvironment::default(),
        );
        for _ in 0..10 {
            let sample = sched.run_cycle().unwrap();
            assert_eq!(sample.accel, [0.0, 0.0, 0.0]);
            assert_eq!(sample.mag, [0.0, 0.0, 0.0]);
            assert_eq!(sample.gyro, [0.0, 0.0, 0.0]);
            assert!(sample.analog_value > 0);
        }
    }

    #[test]
    fn test_analog_value_fresh_every_cycle() {
        let mut sched = scheduler();
        for expected in 1..=20u32 {
            assert_eq!(sched.run_cycle().unwrap().analog_value, expected);
        }
    }
}
