//! Block-processing effect trait.
//!
//! The reverb works on whole blocks: its window bookkeeping spans the block
//! and the weight is refreshed once per block, so the trait is block-first
//! rather than sample-first.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: one input slice, one output slice.
//! - **Object-safe**: `dyn Effect` works for runtime selection.
//! - **No allocations**: every method may be called on the audio thread.

/// Core trait for block-based audio effects.
///
/// # Example
///
/// ```rust
/// use microverb_core::Effect;
///
/// struct Gain(f32);
///
/// impl Effect for Gain {
///     fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
///         for (out, inp) in output.iter_mut().zip(input) {
///             *out = inp * self.0;
///         }
///     }
///
///     fn process_block_inplace(&mut self, buffer: &mut [f32]) {
///         for sample in buffer.iter_mut() {
///             *sample *= self.0;
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process one block.
    ///
    /// The block length is the shorter of the two slices; samples of `output`
    /// beyond it are left untouched.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]);

    /// Process one block where input and output share storage.
    fn process_block_inplace(&mut self, buffer: &mut [f32]);

    /// Reset internal state without changing control bindings.
    fn reset(&mut self);

    /// Processing latency in samples. Default 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::boxed::Box;

    struct Offset(f32);

    impl Effect for Offset {
        fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
            for (out, inp) in output.iter_mut().zip(input) {
                *out = inp + self.0;
            }
        }

        fn process_block_inplace(&mut self, buffer: &mut [f32]) {
            for sample in buffer.iter_mut() {
                *sample += self.0;
            }
        }

        fn reset(&mut self) {}
    }

    #[test]
    fn trait_is_object_safe() {
        let mut effects: [Box<dyn Effect>; 2] = [Box::new(Offset(1.0)), Box::new(Offset(2.0))];
        let mut buffer = [0.0, 1.0];
        effects[0].process_block_inplace(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0]);
        assert_eq!(effects[0].latency_samples(), 0);

        let mut out = [0.0; 2];
        effects[1].process_block(&buffer, &mut out);
        assert_eq!(out, [3.0, 4.0]);
    }
}
