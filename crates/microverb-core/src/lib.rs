//! Microverb Core - multi-pass microsample reverb engine
//!
//! This crate turns a mono input stream into the dry signal plus a
//! synthesized reverberant tail. It is built for real-time use: block
//! processing never allocates, never blocks and never fails.
//!
//! # Components
//!
//! - [`ParameterController`] - decay time, wet level and the smoothing weight
//!   derived from them
//! - [`WindowBuffer`] - one pass's delay window with write/read cursors
//! - [`MixingEngine`] - runs the passes and folds each window back onto the
//!   output
//!
//! # Host Binding
//!
//! - [`PortId`] - fixed port indices (input, output, decay, wet level)
//! - [`ControlValue`] - lock-free live control shared with the host
//! - [`EngineError`] - rejected configuration requests
//!
//! # Configuration
//!
//! - [`EngineConfig`] - microsample duration, pass count and delay-factor table
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! microverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use microverb_core::{ControlValue, Effect, MixingEngine, PortId};
//!
//! let mut reverb = MixingEngine::new(48000).unwrap();
//! reverb.connect_control(PortId::WetLevel.index(), ControlValue::new(0.5)).unwrap();
//! reverb.activate();
//!
//! let input: Vec<f32> = (0..1024).map(|i| (i as f32 * 0.05).sin()).collect();
//! let mut output = vec![0.0; 1024];
//! reverb.process_block(&input, &mut output);
//! ```
//!
//! # Logging
//!
//! Enable the `tracing` feature to get debug events for activation, control
//! binding and weight recomputation. Nothing is logged per sample.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod control;
pub mod effect;
pub mod engine;
pub mod error;
pub mod param_info;
pub mod params;
pub mod port;
pub mod window;

// Re-export main types at crate root
pub use config::{
    DEFAULT_DELAY_FACTORS, DEFAULT_MICROSAMPLE_DURATION_S, DEFAULT_PASS_COUNT, EngineConfig,
};
pub use control::ControlValue;
pub use effect::Effect;
pub use engine::{EngineState, MixingEngine};
pub use error::EngineError;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use params::{
    DEFAULT_DECAY_S, DEFAULT_WET_LEVEL, MAX_WET_LEVEL, MIN_DECAY_S, MIN_WET_LEVEL,
    ParameterController,
};
pub use port::PortId;
pub use window::WindowBuffer;
