//! Application orchestration for the EfmIO daemon
//!
//! Wires the configured sensor backend, the measurement link, and the
//! diagnostic channel into the acquisition loop: one cycle, one frame,
//! forever. Single-threaded by design; the only blocking point is the
//! converter's data-ready wait inside the scheduler.

use crate::config::AppConfig;
use crate::diag::{DiagSink, LogDiag, SerialDiag};
use crate::error::Result;
use crate::frame::FrameBuf;
use crate::scheduler::Scheduler;
use crate::sensors::{self, AnalogChannel, EnvironmentSource, InertialSource};
use crate::transport::{SerialTransport, Transport};
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type BoxedScheduler =
    Scheduler<Box<dyn InertialSource>, Box<dyn AnalogChannel>, Box<dyn EnvironmentSource>>;

/// Main application structure owning the acquisition pipeline
pub struct AcquisitionApp {
    scheduler: BoxedScheduler,
    frame: FrameBuf,
    link: Box<dyn Transport>,
    diag: Box<dyn DiagSink>,
    shutdown: Arc<AtomicBool>,
}

impl AcquisitionApp {
    /// Initialize sinks and sensors from configuration.
    ///
    /// An unavailable measurement link is fatal. Inertial and environmental
    /// sources degrade to zero-producing stand-ins after a single diagnostic
    /// notice; only the analog channel is mandatory.
    pub fn new(config: &AppConfig) -> Result<Self> {
        info!("Initializing acquisition pipeline");

        let link: Box<dyn Transport> = Box::new(SerialTransport::open(
            &config.link.frame_port,
            config.link.frame_baud,
        )?);

        let mut diag: Box<dyn DiagSink> = match &config.link.diag_port {
            Some(path) => Box::new(SerialDiag::open(path, config.link.diag_baud)?),
            None => Box::new(LogDiag),
        };
        diag.notice("EFM rotating module acquisition");

        let set = sensors::create_sensors(&config.sensors, diag.as_mut())?;
        info!("Sensor backend ready: {}", config.sensors.backend);

        let shutdown = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGINT, Arc::clone(&shutdown))?;
        signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))?;

        Ok(Self {
            scheduler: Scheduler::new(set.inertial, set.analog, set.environment),
            frame: FrameBuf::new(),
            link,
            diag,
            shutdown,
        })
    }

    /// Run the acquisition loop until a shutdown signal arrives.
    ///
    /// Open-loop, fire-and-forget: cycle and write failures are logged and
    /// the loop keeps going. The shutdown flag is only checked between
    /// cycles, so a permanently stuck ready signal still stalls the process.
    pub fn run(&mut self) -> Result<()> {
        info!("Acquisition loop started");

        while !self.shutdown.load(Ordering::Relaxed) {
            let sample = match self.scheduler.run_cycle() {
                Ok(sample) => sample,
                Err(e) => {
                    warn!("Cycle failed: {}", e);
                    continue;
                }
            };

            self.diag.notice("Sending new frame");

            let bytes = self.frame.encode(&sample);
            if let Err(e) = self.link.write(bytes) {
                warn!("Frame write failed: {}", e);
            }
        }

        info!("Shutdown signal received, stopping");
        self.link.flush()?;
        Ok(())
    }
}
