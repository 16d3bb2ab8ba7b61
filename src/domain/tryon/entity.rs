use serde::{Deserialize, Serialize};

use crate::domain::image::Image;

/// One garment processed by the pipeline, paired with its final render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnResult {
    /// The garment exactly as it was selected
    pub garment: Image,

    /// The enhanced composite
    pub image: Image,
}

/// The two sequential external calls made per garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TryOnStage {
    Compose,
    Enhance,
}

/// Free-text background instruction. Empty means keep the original background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundDirective(String);

/// Named background shortcut offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundPreset {
    pub name: &'static str,
    pub value: &'static str,
}

pub const BACKGROUND_PRESETS: [BackgroundPreset; 5] = [
    BackgroundPreset {
        name: "Default",
        value: "",
    },
    BackgroundPreset {
        name: "No BG",
        value: "a plain, solid white background",
    },
    BackgroundPreset {
        name: "Runway",
        value: "a professional fashion runway with dramatic lighting",
    },
    BackgroundPreset {
        name: "Beach",
        value: "a sunny tropical beach with turquoise water and white sand",
    },
    BackgroundPreset {
        name: "City",
        value: "a bustling, modern cityscape at dusk with neon lights",
    },
];

impl TryOnResult {
    pub fn new(garment: Image, image: Image) -> Self {
        Self { garment, image }
    }
}

impl TryOnStage {
    /// Status line shown while this stage runs for item `index` (0-based) of `total`
    pub fn label(&self, index: usize, total: usize) -> String {
        match self {
            TryOnStage::Compose => {
                format!("Generating try-on for item {} of {}...", index + 1, total)
            }
            TryOnStage::Enhance => format!("Enhancing quality for item {}...", index + 1),
        }
    }
}

impl std::fmt::Display for TryOnStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TryOnStage::Compose => write!(f, "compose"),
            TryOnStage::Enhance => write!(f, "enhance"),
        }
    }
}

impl BackgroundDirective {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn preserve() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-only counts as "keep the original background"
    pub fn preserves_original(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for BackgroundDirective {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for BackgroundDirective {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Look up a preset by its display name (case-insensitive)
pub fn find_background_preset(name: &str) -> Option<&'static BackgroundPreset> {
    BACKGROUND_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
