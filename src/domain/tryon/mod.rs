pub mod entity;

pub use entity::{
    find_background_preset, BackgroundDirective, BackgroundPreset, TryOnResult, TryOnStage,
    BACKGROUND_PRESETS,
};
