use crate::domain::image::Image;

/// Ordered list of garments available for try-on.
///
/// Mutated only by appending or by replacing content in place. Duplicates are
/// kept; they are distinct by position but behave as one unit for selection,
/// which matches by content.
#[derive(Debug, Clone, Default)]
pub struct GarmentCatalog {
    items: Vec<Image>,
}

/// Ordered set of selected garments, matched by content
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    items: Vec<Image>,
}

/// Palette for the last processed single selection.
///
/// `generation` increases on every reset so that a response computed for an
/// older request can be recognised and dropped.
#[derive(Debug, Clone, Default)]
pub struct VariationCache {
    last_processed: Option<Image>,
    palette: Vec<Image>,
    generation: u64,
}

/// Ticket handed out when a palette must be computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRequest {
    pub garment: Image,
    pub generation: u64,
}

impl GarmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, images: impl IntoIterator<Item = Image>) -> usize {
        let before = self.items.len();
        self.items.extend(images);
        self.items.len() - before
    }

    pub fn contains(&self, image: &Image) -> bool {
        self.items.iter().any(|i| i == image)
    }

    /// Replace every entry equal to `old` with `new`, keeping positions
    pub fn replace_all(&mut self, old: &Image, new: &Image) -> usize {
        replace_matching(&mut self.items, old, new)
    }

    pub fn items(&self) -> &[Image] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, image: &Image) -> bool {
        self.items.iter().any(|i| i == image)
    }

    /// Remove if present, append otherwise. Returns true when now selected.
    pub fn toggle(&mut self, image: &Image) -> bool {
        if self.contains(image) {
            self.items.retain(|i| i != image);
            false
        } else {
            self.items.push(image.clone());
            true
        }
    }

    pub fn replace_all(&mut self, old: &Image, new: &Image) -> usize {
        replace_matching(&mut self.items, old, new)
    }

    /// The sole member when exactly one garment is selected
    pub fn single(&self) -> Option<&Image> {
        match self.items.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn items(&self) -> &[Image] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl VariationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_processed(&self) -> Option<&Image> {
        self.last_processed.as_ref()
    }

    pub fn palette(&self) -> &[Image] {
        &self.palette
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start tracking `garment`; any previous palette is dropped
    pub fn restart(&mut self, garment: Image) -> PaletteRequest {
        self.generation += 1;
        self.palette.clear();
        self.last_processed = Some(garment.clone());
        PaletteRequest {
            garment,
            generation: self.generation,
        }
    }

    /// Forget everything, invalidating in-flight requests
    pub fn clear(&mut self) {
        if self.last_processed.is_some() || !self.palette.is_empty() {
            self.generation += 1;
        }
        self.last_processed = None;
        self.palette.clear();
    }

    /// Adopt `new` as the tracked identity without invalidating anything
    pub fn adopt(&mut self, new: Image) {
        self.last_processed = Some(new);
    }

    /// A request for the tracked identity at the current generation
    pub fn current_request(&self) -> Option<PaletteRequest> {
        self.last_processed.as_ref().map(|garment| PaletteRequest {
            garment: garment.clone(),
            generation: self.generation,
        })
    }

    pub fn is_current(&self, request: &PaletteRequest) -> bool {
        self.last_processed.is_some() && request.generation == self.generation
    }

    /// Store a palette; false when the request is stale
    pub fn fill(&mut self, request: &PaletteRequest, palette: Vec<Image>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.palette = palette;
        true
    }
}

fn replace_matching(items: &mut [Image], old: &Image, new: &Image) -> usize {
    let mut replaced = 0;
    for item in items.iter_mut() {
        if *item == *old {
            *item = new.clone();
            replaced += 1;
        }
    }
    replaced
}
