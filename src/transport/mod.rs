//! Transport sink for the measurement link.
//!
//! Frames are written back-to-back with no inter-frame delimiter beyond the
//! frame's own markers, so a partial write would desynchronize every
//! downstream receiver. `write` therefore has write-all semantics.

use crate::error::Result;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Byte sink for encoded frames
pub trait Transport: Send {
    /// Write the entire buffer
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
