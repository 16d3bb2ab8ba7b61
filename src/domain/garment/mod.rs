pub mod entity;

pub use entity::{GarmentCatalog, PaletteRequest, SelectionSet, VariationCache};
