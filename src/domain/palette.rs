// src/domain/palette.rs
//
// Colour directives used to recolor a garment

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Free-text colour description passed to the recolor call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorDirective(String);

/// Fixed palette, in display order: red, blue, green, black, yellow
pub const PALETTE: [&str; 5] = [
    "a vibrant red",
    "a deep royal blue",
    "a forest green",
    "a classic solid black",
    "a sunny yellow",
];

impl ColorDirective {
    /// Blank colour text is rejected
    pub fn new(text: impl Into<String>) -> DomainResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Color description cannot be empty".to_string(),
            ));
        }
        Ok(Self(text.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The five fixed directives in palette order
    pub fn palette() -> Vec<ColorDirective> {
        PALETTE.iter().map(|c| ColorDirective(c.to_string())).collect()
    }
}

impl std::fmt::Display for ColorDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
