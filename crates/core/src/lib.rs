//! Core library for the Markov aura generator.
//!
//! An aura is a stack of concentric rings whose colors follow a Markov chain
//! over a small set of named moods. Each module owns one stage of the
//! pipeline: `chain` samples the mood sequence, `palette` holds the colors
//! and the stepped blend, `render` turns consecutive mood pairs into rings on
//! a drawing surface, and `config` carries the built-in tables plus JSON
//! overrides.

pub mod chain;
pub mod config;
pub mod error;
pub mod palette;
pub mod render;

pub use chain::{ChainSampler, TransitionTable};
pub use config::AuraConfig;
pub use error::{AuraError, Result};
pub use palette::{ColorTable, Rgb};
pub use render::{DrawCall, RecordingSurface, RingRenderer, Surface, SvgSurface};
