//! Unit types for physical quantities.
//!
//! Provides type-safe representations of lengths, feed rates, and motor steps
//! so that millimetre and step values cannot be mixed up at call sites.

use core::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Linear distance in millimetres.
///
/// Used for configuration and user-facing API. Internally converted to [`Steps`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Millimeters(pub f32);

impl Millimeters {
    /// Create a new Millimeters value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Convert to the nearest whole number of steps.
    ///
    /// Negative distances stay negative so callers can detect out-of-range targets.
    #[inline]
    pub fn to_steps(self, steps_per_mm: f32) -> Steps {
        Steps(libm::roundf(self.0 * steps_per_mm) as i64)
    }
}

impl Add for Millimeters {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Millimeters {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Millimeters {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Feed rate in millimetres per minute. Zero means "as fast as the driver allows".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillimetersPerMinute(pub u32);

impl MillimetersPerMinute {
    /// Create a new feed rate.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Minimum interval between two steps in microseconds, or 0 when unlimited.
    pub fn step_interval_us(self, steps_per_mm: f32) -> u64 {
        let steps_per_minute = self.0 as f32 * steps_per_mm;
        if steps_per_minute <= 0.0 {
            return 0;
        }
        libm::roundf(60_000_000.0 / steps_per_minute) as u64
    }
}

/// Signed step count.
///
/// Uses i64 so that requests below zero survive conversion and can be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(transparent)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i64);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Convert to millimetres.
    #[inline]
    pub fn to_millimeters(self, steps_per_mm: f32) -> Millimeters {
        Millimeters(self.0 as f32 / steps_per_mm)
    }
}

impl Add for Steps {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Steps {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<i64> for Steps {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<u32> for Steps {
    fn from(value: u32) -> Self {
        Self(value as i64)
    }
}
