//! Diagnostic text channel.
//!
//! Line-oriented, best-effort, and outside the data contract: startup status
//! notices and the per-cycle "sending" notice go here. Disabling it (or
//! losing the diagnostic link entirely) never affects frame correctness, so
//! write failures are swallowed after a debug log.

use serialport::SerialPort;
use std::io::Write;
use std::time::Duration;

use crate::error::Result;

/// Line-oriented diagnostic sink
pub trait DiagSink: Send {
    /// Emit one status line. Best-effort; errors must not propagate.
    fn notice(&mut self, line: &str);
}

/// Diagnostic sink on a secondary serial link
pub struct SerialDiag {
    port: Box<dyn SerialPort>,
}

impl SerialDiag {
    /// Open the diagnostic serial port (typically 19200 baud)
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()?;

        log::info!("Opened diagnostic port: {} at {} baud", path, baud_rate);

        Ok(SerialDiag { port })
    }
}

impl DiagSink for SerialDiag {
    fn notice(&mut self, line: &str) {
        let outcome = self
            .port
            .write_all(line.as_bytes())
            .and_then(|_| self.port.write_all(b"\r\n"));
        if let Err(e) = outcome {
            log::debug!("Diagnostic write failed: {}", e);
        }
    }
}

/// Diagnostic sink routed to the log facade, used when no diagnostic
/// port is configured
pub struct LogDiag;

impl DiagSink for LogDiag {
    fn notice(&mut self, line: &str) {
        log::debug!(target: "diag", "{}", line);
    }
}
