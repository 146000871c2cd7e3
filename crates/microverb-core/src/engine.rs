//! Multi-pass mixing engine.
//!
//! [`MixingEngine`] turns one block of dry input into dry + wet output. The
//! wet tail is built from several passes, each with its own window length:
//!
//! 1. Refresh the wet level and (only if the decay moved) the weight.
//! 2. Copy the input into the output. This dry copy is the accumulator.
//! 3. For each pass, resize the window, then stream the accumulator through a
//!    one-pole smoother into the window. Every time the window fills, fold it
//!    back onto the accumulator at the current block offset and move the
//!    offset forward by one window. When streaming stops, fold what is left.
//!
//! Every fold is scaled by `wet_level / weight / pass_count`.
//!
//! ## Weight timing
//!
//! The weight is captured once per block and reused by every pass, even
//! though each pass has a different window length. When the decay changes,
//! the new weight is derived from the window length that is current at the
//! start of the block, which is the last pass's window of the previous block
//! (or the base window right after activation).
//!
//! ## Block offset
//!
//! The block offset starts at zero once per block and carries over from one
//! pass to the next. Later passes therefore resume folding where the previous
//! pass stopped.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──► Uninitialized ──connect_control()──► Configured
//!                 │                                   │
//!                 └──────────── activate() ◄──────────┘
//!                                   │
//!                                   ▼
//!                                Active ──run()──► Processing ──run()──┐
//!                                                      ▲───────────────┘
//! dispose(self) consumes the engine from any state.
//! ```

use crate::config::EngineConfig;
use crate::control::ControlValue;
use crate::effect::Effect;
use crate::error::EngineError;
use crate::param_info::{ParamDescriptor, ParameterInfo};
use crate::params::{ParameterController, decay_descriptor, wet_level_descriptor};
use crate::port::PortId;
use crate::window::WindowBuffer;

/// Lifecycle state of a [`MixingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, nothing bound yet.
    Uninitialized,
    /// At least one control binding changed since construction.
    Configured,
    /// Activated; no block processed since.
    Active,
    /// At least one block processed since activation.
    Processing,
}

/// The reverb engine.
///
/// # Example
///
/// ```rust
/// use microverb_core::{ControlValue, MixingEngine, PortId};
///
/// let mut engine = MixingEngine::new(44100).unwrap();
/// let decay = ControlValue::new(0.5);
/// engine.connect_control(PortId::Decay.index(), decay.clone()).unwrap();
/// engine.activate();
///
/// let input = vec![0.25f32; 512];
/// let mut output = vec![0.0f32; 512];
/// engine.run(&input, &mut output, 512);
///
/// decay.set(2.0); // picked up at the start of the next block
/// engine.run(&input, &mut output, 512);
/// engine.dispose();
/// ```
#[derive(Debug)]
pub struct MixingEngine {
    sample_rate: u32,
    config: EngineConfig,
    params: ParameterController,
    window: WindowBuffer,
    state: EngineState,
}

impl MixingEngine {
    /// Create an engine with the default configuration.
    pub fn new(sample_rate: u32) -> Result<Self, EngineError> {
        Self::with_config(sample_rate, EngineConfig::default())
    }

    /// Create an engine with a custom configuration.
    ///
    /// The window storage is reserved here for the largest pass so that block
    /// processing never allocates.
    pub fn with_config(sample_rate: u32, config: EngineConfig) -> Result<Self, EngineError> {
        if sample_rate == 0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        config.validate()?;

        let capacity = config.max_window_length(sample_rate);
        Ok(Self {
            sample_rate,
            config,
            params: ParameterController::new(),
            window: WindowBuffer::with_capacity(capacity),
            state: EngineState::Uninitialized,
        })
    }

    /// Bind a live control value to the control port at `port_index`.
    ///
    /// Fails for unknown indices and for audio ports; the engine is left
    /// unchanged in both cases.
    pub fn connect_control(
        &mut self,
        port_index: usize,
        control: ControlValue,
    ) -> Result<(), EngineError> {
        self.bind_control(port_index, Some(control))
    }

    /// Unbind the control port at `port_index`; its default applies from the
    /// next block on.
    pub fn disconnect_control(&mut self, port_index: usize) -> Result<(), EngineError> {
        self.bind_control(port_index, None)
    }

    /// Control bound to `port`, if any.
    pub fn control(&self, port: PortId) -> Option<&ControlValue> {
        match port {
            PortId::Decay => self.params.decay_control(),
            PortId::WetLevel => self.params.wet_level_control(),
            PortId::Input | PortId::Output => None,
        }
    }

    fn bind_control(
        &mut self,
        port_index: usize,
        control: Option<ControlValue>,
    ) -> Result<(), EngineError> {
        let port = PortId::try_from(port_index)?;
        #[cfg(feature = "tracing")]
        let connected = control.is_some();
        match port {
            PortId::Decay => self.params.bind_decay(control),
            PortId::WetLevel => self.params.bind_wet_level(control),
            PortId::Input | PortId::Output => return Err(EngineError::NotAControlPort(port)),
        }
        self.mark_configured();

        #[cfg(feature = "tracing")]
        tracing::debug!(port = port.index(), connected, "reverb control binding changed");

        Ok(())
    }

    fn mark_configured(&mut self) {
        if self.state == EngineState::Uninitialized {
            self.state = EngineState::Configured;
        }
    }

    /// Reset the window to its base size, refresh the wet level and force a
    /// weight recompute.
    pub fn activate(&mut self) {
        self.window.reset(self.config.base_window_length(self.sample_rate));
        self.params.refresh_wet_level();
        let window_duration_s = self.window_duration_s();
        self.params.refresh_weight(window_duration_s, true);
        self.state = EngineState::Active;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = self.sample_rate,
            window = self.window.len(),
            weight = self.params.weight(),
            wet_level = self.params.wet_level(),
            "reverb activated"
        );
    }

    /// Process `sample_count` samples from `input` into `output`.
    ///
    /// `sample_count` is clamped to the length of both slices. Samples of
    /// `output` past the block are not touched.
    pub fn run(&mut self, input: &[f32], output: &mut [f32], sample_count: usize) {
        let n = sample_count.min(input.len()).min(output.len());
        let block = &mut output[..n];
        block.copy_from_slice(&input[..n]);
        self.mix(block);
    }

    /// Process `sample_count` samples in place.
    pub fn run_inplace(&mut self, buffer: &mut [f32], sample_count: usize) {
        let n = sample_count.min(buffer.len());
        self.mix(&mut buffer[..n]);
    }

    /// Release the engine. No further calls are possible.
    pub fn dispose(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(state = ?self.state, "reverb disposed");
    }

    /// Add the wet passes onto `output`, which already holds the dry block.
    fn mix(&mut self, output: &mut [f32]) {
        if matches!(
            self.state,
            EngineState::Uninitialized | EngineState::Configured
        ) {
            #[cfg(feature = "tracing")]
            tracing::warn!("reverb processed before activation; activating now");
            self.activate();
        }
        self.state = EngineState::Processing;

        self.params.refresh_wet_level();
        let window_duration_s = self.window_duration_s();
        self.params.refresh_weight(window_duration_s, false);

        let sample_count = output.len();
        let pass_count = self.config.pass_count();
        let wet_factor =
            f64::from(self.params.wet_level()) / self.params.weight() / pass_count as f64;
        let mut block_offset = 0;

        for pass in 0..pass_count {
            let window_length = self.config.window_length(self.sample_rate, pass);
            self.window.reset(window_length);
            let weight = self.params.weight();

            for sample_index in 0..sample_count {
                if block_offset + self.window.write_pos() >= sample_count {
                    break;
                }
                if self.window.is_full() {
                    self.window.fold(output, block_offset, wet_factor);
                    self.window.rewind();
                    block_offset += window_length;
                }
                self.window.smooth_in(weight, output[sample_index]);
            }

            debug_assert!(
                block_offset + self.window.write_pos() <= sample_count,
                "block offset {block_offset} drifted past block of {sample_count}"
            );
            self.window.fold(output, block_offset, wet_factor);
            if self.window.is_full() {
                self.window.rewind();
            }
        }
    }

    fn window_duration_s(&self) -> f64 {
        self.window.len() as f64 / f64::from(self.sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current window length in samples.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Current smoothing weight.
    pub fn weight(&self) -> f64 {
        self.params.weight()
    }

    /// Effective decay time in seconds, as of the last refresh.
    pub fn decay_s(&self) -> f32 {
        self.params.decay_s()
    }

    /// Effective wet level, as of the last refresh.
    pub fn wet_level(&self) -> f32 {
        self.params.wet_level()
    }
}

impl Effect for MixingEngine {
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        let n = input.len().min(output.len());
        self.run(input, output, n);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        let n = buffer.len();
        self.run_inplace(buffer, n);
    }

    fn reset(&mut self) {
        self.activate();
    }
}

impl ParameterInfo for MixingEngine {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(decay_descriptor()),
            1 => Some(wet_level_descriptor()),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.params.decay_s(),
            1 => self.params.wet_level(),
            _ => 0.0,
        }
    }
}
