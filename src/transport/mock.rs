//! Mock transport for testing

use super::Transport;
use crate::error::Result;
use std::sync::{Arc, Mutex};

/// Mock transport for unit testing
///
/// Clones share the same buffer, so a test can keep one handle while the
/// acquisition loop owns the other.
#[derive(Clone, Default)]
pub struct MockTransport {
    written: Arc<Mutex<Vec<u8>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all written data
    pub fn get_written(&self) -> Vec<u8> {
        self.written.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Clear written data
    pub fn clear_written(&self) {
        self.written
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.written
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let mock = MockTransport::new();
        let mut writer = mock.clone();

        writer.write(&[0xBE, 0x01, 0xEF]).unwrap();
        assert_eq!(mock.get_written(), vec![0xBE, 0x01, 0xEF]);

        mock.clear_written();
        assert!(mock.get_written().is_empty());
    }
}
