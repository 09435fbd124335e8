//! Calibration record and its persistence.

use crate::axis::AxisLabel;
use crate::error::{Result, StorageError};
use crate::motor::MotorId;

/// What calibration learned about one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCalibration {
    /// Motor driving the axis.
    pub motor: MotorId,
    /// Whether the motor runs with its direction inverted.
    pub flipped: bool,
    /// Measured travel in steps.
    pub length: u32,
}

/// Result of a successful calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    /// X axis.
    pub x_axis: AxisCalibration,
    /// Y axis.
    pub y_axis: AxisCalibration,
}

const RECORD_HEADER: u8 = 0xC1;
const FLAG_MOTOR_B: u8 = 0b01;
const FLAG_FLIPPED: u8 = 0b10;

impl CalibrationData {
    /// Size of the stored record.
    ///
    /// Layout: header, X flags, X length (LE), Y flags, Y length (LE), checksum.
    pub const ENCODED_LEN: usize = 12;

    /// Record for one axis.
    pub fn axis(&self, label: AxisLabel) -> &AxisCalibration {
        match label {
            AxisLabel::X => &self.x_axis,
            AxisLabel::Y => &self.y_axis,
        }
    }

    /// Encode into the fixed settings record.
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[0] = RECORD_HEADER;
        encode_axis(&self.x_axis, &mut out[1..6]);
        encode_axis(&self.y_axis, &mut out[6..11]);
        out[11] = checksum(&out[..11]);
        out
    }

    /// Decode a settings record.
    ///
    /// Blank storage (all `0xFF` or all `0x00` header) decodes to `None`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Option<Self>> {
        if bytes.len() < Self::ENCODED_LEN {
            return Err(StorageError::Corrupt.into());
        }
        match bytes[0] {
            0xFF | 0x00 => return Ok(None),
            RECORD_HEADER => {}
            _ => return Err(StorageError::Corrupt.into()),
        }
        if checksum(&bytes[..11]) != bytes[11] {
            return Err(StorageError::Corrupt.into());
        }

        let data = Self {
            x_axis: decode_axis(&bytes[1..6])?,
            y_axis: decode_axis(&bytes[6..11])?,
        };
        if data.x_axis.motor == data.y_axis.motor {
            return Err(StorageError::Corrupt.into());
        }
        Ok(Some(data))
    }
}

fn encode_axis(axis: &AxisCalibration, out: &mut [u8]) {
    let mut flags = 0;
    if axis.motor == MotorId::B {
        flags |= FLAG_MOTOR_B;
    }
    if axis.flipped {
        flags |= FLAG_FLIPPED;
    }
    out[0] = flags;
    out[1..5].copy_from_slice(&axis.length.to_le_bytes());
}

fn decode_axis(bytes: &[u8]) -> Result<AxisCalibration> {
    let flags = bytes[0];
    if flags & !(FLAG_MOTOR_B | FLAG_FLIPPED) != 0 {
        return Err(StorageError::Corrupt.into());
    }
    let mut length = [0u8; 4];
    length.copy_from_slice(&bytes[1..5]);

    Ok(AxisCalibration {
        motor: if flags & FLAG_MOTOR_B != 0 {
            MotorId::B
        } else {
            MotorId::A
        },
        flipped: flags & FLAG_FLIPPED != 0,
        length: u32::from_le_bytes(length),
    })
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)) ^ 0xA5
}

/// Persisted settings holding one calibration record.
pub trait CalibrationStore {
    /// Read the stored record, `None` when nothing has been saved.
    fn load(&mut self) -> Result<Option<CalibrationData>>;

    /// Replace the stored record.
    fn save(&mut self, data: &CalibrationData) -> Result<()>;
}

/// Store backed by a RAM buffer. Starts erased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: [u8; CalibrationData::ENCODED_LEN],
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            bytes: [0xFF; CalibrationData::ENCODED_LEN],
        }
    }

    /// Store holding raw bytes, as read back from flash.
    pub fn from_bytes(bytes: [u8; CalibrationData::ENCODED_LEN]) -> Self {
        Self { bytes }
    }

    /// Raw record.
    pub fn bytes(&self) -> &[u8; CalibrationData::ENCODED_LEN] {
        &self.bytes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationStore for MemoryStore {
    fn load(&mut self) -> Result<Option<CalibrationData>> {
        CalibrationData::from_bytes(&self.bytes)
    }

    fn save(&mut self, data: &CalibrationData) -> Result<()> {
        self.bytes = data.to_bytes();
        Ok(())
    }
}
