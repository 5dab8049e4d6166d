//! Fixed-layout frame encoding for the measurement link.
//!
//! Every sample serializes to exactly 52 bytes:
//!
//! ```text
//! ┌────────┬──────┬───────────────────────────────────────────────┐
//! │ Offset │ Size │ Field                                         │
//! ├────────┼──────┼───────────────────────────────────────────────┤
//! │ 0      │ 1    │ start marker 0xBE                             │
//! │ 1      │ 4    │ timestamp_ms, u32 little-endian               │
//! │ 5      │ 4    │ analog_value, u32 little-endian               │
//! │ 9      │ 36   │ accel.xyz, mag.xyz, gyro.xyz, f32 native order│
//! │ 45     │ 2    │ temperature, u16 LE, 0.1 °C units             │
//! │ 47     │ 2    │ humidity, u16 LE, raw units                   │
//! │ 49     │ 2    │ pressure, u16 LE, raw units                   │
//! │ 51     │ 1    │ end marker 0xEF                               │
//! └────────┴──────┴───────────────────────────────────────────────┘
//! ```
//!
//! There is no checksum, length field, or escaping, and the marker bytes are
//! not guaranteed unique within the payload. Receivers must resynchronize on
//! the fixed 52-byte alignment, not by scanning for markers.
//!
//! The nine float fields use the host's native byte order. That is an
//! inherited wire-format caveat: changing it would break existing receivers,
//! so it is preserved rather than normalized.

use crate::error::{Error, Result};
use crate::types::Sample;
use std::io::{self, Write};

/// Total encoded frame length
pub const FRAME_SIZE: usize = 52;

/// First byte of every frame
pub const START_MARKER: u8 = 0xBE;

/// Last byte of every frame
pub const END_MARKER: u8 = 0xEF;

/// Reusable frame buffer
///
/// Both markers are pre-filled, so encoding a sample is a straight sequence
/// of field copies with zero heap allocation in the hot loop. Create once,
/// reuse every cycle.
pub struct FrameBuf {
    data: [u8; FRAME_SIZE],
}

impl FrameBuf {
    /// Create a new buffer with the marker bytes pre-filled
    pub const fn new() -> Self {
        let mut data = [0u8; FRAME_SIZE];
        data[0] = START_MARKER;
        data[FRAME_SIZE - 1] = END_MARKER;
        Self { data }
    }

    /// Serialize a sample into the buffer and return the frame bytes.
    ///
    /// Deterministic: the same sample always produces the same bytes.
    pub fn encode(&mut self, sample: &Sample) -> &[u8; FRAME_SIZE] {
        self.data[1..5].copy_from_slice(&sample.timestamp_ms.to_le_bytes());
        self.data[5..9].copy_from_slice(&sample.analog_value.to_le_bytes());

        let mut offset = 9;
        for axis in sample
            .accel
            .iter()
            .chain(sample.mag.iter())
            .chain(sample.gyro.iter())
        {
            self.data[offset..offset + 4].copy_from_slice(&axis.to_ne_bytes());
            offset += 4;
        }

        self.data[45..47].copy_from_slice(&sample.temperature_dc.to_le_bytes());
        self.data[47..49].copy_from_slice(&sample.humidity.to_le_bytes());
        self.data[49..51].copy_from_slice(&sample.pressure.to_le_bytes());

        &self.data
    }

    /// Bytes of the last encoded frame
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the frame to any writer
    pub fn send_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.data)
    }
}

impl Default for FrameBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one aligned frame back into a sample.
///
/// Receiver-side helper. The caller is responsible for handing in an aligned
/// 52-byte window; marker validation here catches misalignment but cannot
/// recover from it.
pub fn decode(bytes: &[u8]) -> Result<Sample> {
    if bytes.len() != FRAME_SIZE {
        return Err(Error::InvalidFrame(format!(
            "expected {} bytes, got {}",
            FRAME_SIZE,
            bytes.len()
        )));
    }
    if bytes[0] != START_MARKER {
        return Err(Error::InvalidFrame(format!(
            "bad start marker {:#04x}",
            bytes[0]
        )));
    }
    if bytes[FRAME_SIZE - 1] != END_MARKER {
        return Err(Error::InvalidFrame(format!(
            "bad end marker {:#04x}",
            bytes[FRAME_SIZE - 1]
        )));
    }

    Ok(Sample {
        timestamp_ms: read_u32(bytes, 1),
        analog_value: read_u32(bytes, 5),
        accel: [read_f32(bytes, 9), read_f32(bytes, 13), read_f32(bytes, 17)],
        mag: [read_f32(bytes, 21), read_f32(bytes, 25), read_f32(bytes, 29)],
        gyro: [read_f32(bytes, 33), read_f32(bytes, 37), read_f32(bytes, 41)],
        temperature_dc: read_u16(bytes, 45),
        humidity: read_u16(bytes, 47),
        pressure: read_u16(bytes, 49),
    })
}

#[inline]
fn read_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn read_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn read_f32(b: &[u8], at: usize) -> f32 {
    f32::from_ne_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}
