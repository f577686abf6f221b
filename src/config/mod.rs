pub mod preferences;
pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A named shortcut for a pattern string, shown next to the pattern field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternPreset {
    pub label: String,
    pub patterns: String,
}

impl PatternPreset {
    fn new(label: &str, patterns: &str) -> Self {
        Self {
            label: label.to_string(),
            patterns: patterns.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub pattern_presets: Vec<PatternPreset>,
    /// Longer directory paths are shortened to `...` plus their tail.
    pub display_path_max_chars: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// Looks up a preset by label, ignoring ASCII case.
    pub fn preset(&self, label: &str) -> Option<&PatternPreset> {
        self.pattern_presets
            .iter()
            .find(|preset| preset.label.eq_ignore_ascii_case(label))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pattern_presets: vec![
                PatternPreset::new("All files", "*"),
                PatternPreset::new("Scripts", "*.cs"),
                PatternPreset::new("Images", "*.png;*.jpg;*.jpeg;*.gif"),
            ],
            display_path_max_chars: 50,
        }
    }
}
