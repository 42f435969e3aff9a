use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{AuraError, Result};

/// One color with 8-bit RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Blended color at sub-step `step` (1-based) of `factor` between `self`
    /// and `to`.
    ///
    /// Each channel is `c1 + (c2 - c1) * step // factor` with *floor*
    /// division. The visible banding this causes at small factors is part of
    /// the art style and must not be smoothed out.
    pub fn blend_step(self, to: Rgb, step: u32, factor: u32) -> Rgb {
        debug_assert!(factor > 0, "blend factor must be positive");
        debug_assert!((1..=factor).contains(&step), "blend step out of range");
        Rgb {
            r: blend_channel(self.r, to.r, step, factor),
            g: blend_channel(self.g, to.g, step, factor),
            b: blend_channel(self.b, to.b, step, factor),
        }
    }
}

/// Floor-divided interpolation of one channel. `div_euclid` floors for a
/// positive divisor; plain `/` would truncate toward zero and diverge on
/// negative deltas.
fn blend_channel(from: u8, to: u8, step: u32, factor: u32) -> u8 {
    let delta = i32::from(to) - i32::from(from);
    let value = i32::from(from) + (delta * step as i32).div_euclid(factor as i32);
    value as u8
}

/// Mood-to-color lookup table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    colors: HashMap<String, Rgb>,
}

impl ColorTable {
    pub fn new(colors: HashMap<String, Rgb>) -> Self {
        Self { colors }
    }

    pub fn insert(&mut self, mood: impl Into<String>, color: Rgb) {
        self.colors.insert(mood.into(), color);
    }

    /// Returns whether `mood` has a color entry.
    pub fn contains(&self, mood: &str) -> bool {
        self.colors.contains_key(mood)
    }

    /// Resolves the color for `mood`.
    ///
    /// # Errors
    /// A missing entry is a [`AuraError::Config`]: the palette does not cover
    /// the mood set in use.
    pub fn color(&self, mood: &str) -> Result<Rgb> {
        self.colors
            .get(mood)
            .copied()
            .ok_or_else(|| AuraError::config(format!("no color entry for mood `{mood}`")))
    }
}
