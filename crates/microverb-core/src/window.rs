//! Per-pass delay window with independent write and read cursors.
//!
//! A [`WindowBuffer`] holds smoothed samples that have not yet been
//! superimposed onto the output. The write cursor advances as samples are
//! smoothed in; [`fold`](WindowBuffer::fold) adds everything between the read
//! cursor and the write cursor onto the output and moves the read cursor up.
//!
//! Invariant between folds: `read_pos <= write_pos <= len`.
//!
//! The buffer is reused across passes and blocks. [`reset`](WindowBuffer::reset)
//! zero-fills it to the requested length without reallocating as long as the
//! capacity reserved up front is large enough.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Resizable smoothing window for one pass.
#[derive(Debug, Clone, Default)]
pub struct WindowBuffer {
    samples: Vec<f32>,
    write_pos: usize,
    read_pos: usize,
}

impl WindowBuffer {
    /// Create an empty window with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            write_pos: 0,
            read_pos: 0,
        }
    }

    /// Resize to `length` zeroed samples and rewind both cursors.
    pub fn reset(&mut self, length: usize) {
        self.samples.clear();
        self.samples.resize(length, 0.0);
        self.rewind();
    }

    /// Rewind both cursors to the start, keeping the contents.
    #[inline]
    pub fn rewind(&mut self) {
        self.write_pos = 0;
        self.read_pos = 0;
    }

    /// Window length in samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the window has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Allocated capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    /// Write cursor.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Read cursor.
    #[inline]
    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    /// Returns `true` once the write cursor has reached the end.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.write_pos >= self.samples.len()
    }

    /// Window contents.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// One-pole smoothing step at the write cursor:
    /// `w[pos] = weight * w[pos] + (1 - weight) * sample`, then advance.
    ///
    /// The caller must fold and rewind before writing into a full window.
    #[inline]
    pub fn smooth_in(&mut self, weight: f64, sample: f32) {
        let slot = &mut self.samples[self.write_pos];
        *slot = (weight * f64::from(*slot) + (1.0 - weight) * f64::from(sample)) as f32;
        self.write_pos += 1;
    }

    /// Superimpose `wet_factor * w[i]` onto `output[offset + i]` for every
    /// `i` in `[read_pos, min(len, write_pos))`.
    ///
    /// Writes that would land past the end of `output` are dropped. Returns
    /// the new read cursor. A full window is not rewound here; that is up to
    /// the caller.
    pub fn fold(&mut self, output: &mut [f32], offset: usize, wet_factor: f64) -> usize {
        let end = self.samples.len().min(self.write_pos);
        let available = output.len().saturating_sub(offset);
        debug_assert!(
            end <= available || end <= self.read_pos,
            "fold of [{}, {end}) at offset {offset} overruns output of {} samples",
            self.read_pos,
            output.len()
        );
        let bounded_end = end.min(available);

        if self.read_pos < bounded_end {
            let dest = &mut output[offset + self.read_pos..offset + bounded_end];
            for (out, &wet) in dest.iter_mut().zip(&self.samples[self.read_pos..bounded_end]) {
                *out = (f64::from(*out) + wet_factor * f64::from(wet)) as f32;
            }
        }

        self.read_pos = end;
        self.read_pos
    }
}
