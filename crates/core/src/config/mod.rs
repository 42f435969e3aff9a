use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::palette::{ColorTable, Rgb};
use crate::Result;

/// Top-level configuration for one aura run.
///
/// The defaults reproduce the original artwork: eight moods starting on
/// yellow, thirty samples, rings ten units wide drawn with a four unit
/// stroke. Every field can be overridden from JSON via [`AuraConfig::load`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuraConfig {
    pub start_mood: String,
    pub count: usize,
    pub factor: u32,
    pub stroke_width: u32,
    pub transitions: HashMap<String, HashMap<String, f64>>,
    pub colors: ColorTable,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            start_mood: "yellow".to_string(),
            count: 30,
            factor: 10,
            stroke_width: 4,
            transitions: default_transitions(),
            colors: default_colors(),
        }
    }
}

impl AuraConfig {
    /// Parses a configuration from a JSON string. Absent fields fall back to
    /// the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

fn row<const N: usize>(entries: [(&str, f64); N]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(mood, probability)| (mood.to_string(), *probability))
        .collect()
}

/// The original eight-mood transition matrix. Every row sums to 1.
pub fn default_transitions() -> HashMap<String, HashMap<String, f64>> {
    HashMap::from([
        (
            "yellow".to_string(),
            row([
                ("yellow", 0.0),
                ("orange", 0.25),
                ("red", 0.025),
                ("purple", 0.25),
                ("blue", 0.1),
                ("green", 0.25),
                ("white", 0.1),
                ("gray", 0.025),
            ]),
        ),
        (
            "orange".to_string(),
            row([
                ("yellow", 0.25),
                ("orange", 0.0),
                ("red", 0.025),
                ("purple", 0.1),
                ("blue", 0.25),
                ("green", 0.25),
                ("white", 0.1),
                ("gray", 0.025),
            ]),
        ),
        (
            "red".to_string(),
            row([
                ("yellow", 0.1),
                ("orange", 0.1),
                ("red", 0.0),
                ("purple", 0.05),
                ("blue", 0.15),
                ("green", 0.25),
                ("white", 0.15),
                ("gray", 0.2),
            ]),
        ),
        (
            "purple".to_string(),
            row([
                ("yellow", 0.2),
                ("orange", 0.15),
                ("red", 0.025),
                ("purple", 0.0),
                ("blue", 0.3),
                ("green", 0.2),
                ("white", 0.1),
                ("gray", 0.025),
            ]),
        ),
        (
            "blue".to_string(),
            row([
                ("yellow", 0.15),
                ("orange", 0.1),
                ("red", 0.025),
                ("purple", 0.25),
                ("blue", 0.0),
                ("green", 0.2),
                ("white", 0.25),
                ("gray", 0.025),
            ]),
        ),
        (
            "green".to_string(),
            row([
                ("yellow", 0.25),
                ("orange", 0.2),
                ("red", 0.04),
                ("purple", 0.25),
                ("blue", 0.15),
                ("green", 0.0),
                ("white", 0.1),
                ("gray", 0.01),
            ]),
        ),
        (
            "white".to_string(),
            row([
                ("yellow", 0.2),
                ("orange", 0.15),
                ("red", 0.0),
                ("purple", 0.1),
                ("blue", 0.25),
                ("green", 0.3),
                ("white", 0.0),
                ("gray", 0.0),
            ]),
        ),
        (
            "gray".to_string(),
            row([
                ("yellow", 0.05),
                ("orange", 0.1),
                ("red", 0.3),
                ("purple", 0.1),
                ("blue", 0.2),
                ("green", 0.1),
                ("white", 0.15),
                ("gray", 0.0),
            ]),
        ),
    ])
}

/// The original color codes for the eight moods.
pub fn default_colors() -> ColorTable {
    let mut colors = ColorTable::default();
    colors.insert("yellow", Rgb::rgb(247, 247, 73));
    colors.insert("orange", Rgb::rgb(237, 139, 0));
    colors.insert("red", Rgb::rgb(237, 29, 36));
    colors.insert("purple", Rgb::rgb(128, 49, 167));
    colors.insert("blue", Rgb::rgb(46, 103, 248));
    colors.insert("green", Rgb::rgb(48, 183, 0));
    colors.insert("white", Rgb::rgb(242, 233, 234));
    colors.insert("gray", Rgb::rgb(190, 195, 198));
    colors
}
