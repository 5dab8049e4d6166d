//! Sensor adapter traits and backend selection.
//!
//! The acquisition core talks to three capability-typed sources:
//!
//! - [`InertialSource`]: orientation vectors, bounded latency, safe every cycle
//! - [`AnalogChannel`]: high-rate converter with an explicit data-ready poll
//! - [`EnvironmentSource`]: slow scalar channels, unsafe to read faster than
//!   the sensor's own conversion time
//!
//! A source that fails to respond at start-up is reported once to the
//! diagnostic sink and replaced by a degraded zero-producing stand-in for the
//! rest of execution. No retry, no halt.

pub mod noise;
pub mod sim;

use crate::config::SensorsConfig;
use crate::diag::DiagSink;
use crate::error::{Error, Result};

/// One cycle's worth of inertial vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InertialReading {
    /// Accelerometer vector (m/s²)
    pub accel: [f32; 3],
    /// Magnetometer vector (µT)
    pub mag: [f32; 3],
    /// Gyroscope vector (rad/s)
    pub gyro: [f32; 3],
}

impl InertialReading {
    /// All-zero reading, used by degraded sources.
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Orientation/inertial vector source
pub trait InertialSource: Send {
    /// Read the three inertial vectors. Must complete in bounded time.
    fn read(&mut self) -> Result<InertialReading>;
}

/// High-rate analog channel with an explicit readiness signal
pub trait AnalogChannel: Send {
    /// Non-blocking poll: true when a new conversion result is available
    fn is_ready(&mut self) -> bool;

    /// Fetch the raw conversion result for the last ready signal
    fn read(&mut self) -> Result<u32>;
}

/// Slow environmental source
pub trait EnvironmentSource: Send {
    /// Temperature in °C
    fn read_temperature(&mut self) -> Result<f32>;
    /// Relative humidity, raw sensor units
    fn read_humidity(&mut self) -> Result<f32>;
    /// Pressure, raw sensor units
    fn read_pressure(&mut self) -> Result<f32>;
}

impl<T: InertialSource + ?Sized> InertialSource for Box<T> {
    fn read(&mut self) -> Result<InertialReading> {
        (**self).read()
    }
}

impl<T: AnalogChannel + ?Sized> AnalogChannel for Box<T> {
    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn read(&mut self) -> Result<u32> {
        (**self).read()
    }
}

impl<T: EnvironmentSource + ?Sized> EnvironmentSource for Box<T> {
    fn read_temperature(&mut self) -> Result<f32> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f32> {
        (**self).read_humidity()
    }

    fn read_pressure(&mut self) -> Result<f32> {
        (**self).read_pressure()
    }
}

/// Degraded inertial source: always reads all-zero vectors
pub struct DegradedInertial;

impl InertialSource for DegradedInertial {
    fn read(&mut self) -> Result<InertialReading> {
        Ok(InertialReading::zero())
    }
}

/// Degraded environmental source: every channel reads zero
pub struct DegradedEnvironment;

impl EnvironmentSource for DegradedEnvironment {
    fn read_temperature(&mut self) -> Result<f32> {
        Ok(0.0)
    }

    fn read_humidity(&mut self) -> Result<f32> {
        Ok(0.0)
    }

    fn read_pressure(&mut self) -> Result<f32> {
        Ok(0.0)
    }
}

/// The full sensor set consumed by the scheduler.
pub struct SensorSet {
    pub inertial: Box<dyn InertialSource>,
    pub analog: Box<dyn AnalogChannel>,
    pub environment: Box<dyn EnvironmentSource>,
}

/// Substitute a degraded inertial source if initialization failed.
///
/// The failure is reported once on the diagnostic channel; subsequent frames
/// carry all-zero vectors for the affected fields.
pub fn inertial_or_degraded(
    source: Result<Box<dyn InertialSource>>,
    diag: &mut dyn DiagSink,
) -> Box<dyn InertialSource> {
    match source {
        Ok(s) => s,
        Err(e) => {
            log::error!("Inertial source unavailable: {}", e);
            diag.notice(&format!("Error starting inertial source: {}", e));
            Box::new(DegradedInertial)
        }
    }
}

/// Substitute a degraded environmental source if initialization failed.
pub fn environment_or_degraded(
    source: Result<Box<dyn EnvironmentSource>>,
    diag: &mut dyn DiagSink,
) -> Box<dyn EnvironmentSource> {
    match source {
        Ok(s) => s,
        Err(e) => {
            log::error!("Environmental source unavailable: {}", e);
            diag.notice(&format!("Error starting environmental source: {}", e));
            Box::new(DegradedEnvironment)
        }
    }
}

/// Build the sensor set for the configured backend.
///
/// Inertial and environmental failures degrade to zero-producing sources; an
/// unavailable analog channel is fatal since nothing can pace the cycle
/// without it.
pub fn create_sensors(config: &SensorsConfig, diag: &mut dyn DiagSink) -> Result<SensorSet> {
    match config.backend.as_str() {
        "sim" => {
            let (inertial, analog, environment) = sim::create(config);
            Ok(SensorSet {
                inertial: inertial_or_degraded(inertial, diag),
                analog: analog?,
                environment: environment_or_degraded(environment, diag),
            })
        }
        other => Err(Error::UnknownBackend(other.to_string())),
    }
}
