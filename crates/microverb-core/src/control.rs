//! Live control values shared between a host and the engine.
//!
//! A [`ControlValue`] is an `f32` stored as atomic bits behind an `Arc`. The
//! host writes through its clone whenever automation moves; the engine reads
//! its clone once at the start of each block. Reads and writes are lock-free
//! and never allocate, so the audio thread can use them freely.

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(feature = "std")]
use std::sync::Arc;

/// Shared, lock-free control value.
///
/// Cloning shares the underlying cell.
///
/// # Example
///
/// ```rust
/// use microverb_core::ControlValue;
///
/// let host_side = ControlValue::new(0.5);
/// let engine_side = host_side.clone();
/// host_side.set(2.0);
/// assert_eq!(engine_side.get(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ControlValue {
    bits: Arc<AtomicU32>,
}

impl ControlValue {
    /// Create a control holding `value`.
    pub fn new(value: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(value.to_bits())),
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Store a new value.
    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Returns `true` if both handles share the same cell.
    pub fn shares_cell_with(&self, other: &ControlValue) -> bool {
        Arc::ptr_eq(&self.bits, &other.bits)
    }
}

impl Default for ControlValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
