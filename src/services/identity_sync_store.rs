// src/services/identity_sync_store.rs
//
// Identity Sync Store - owner of the garment catalog, the selection and the
// variation cache.
//
// CRITICAL RULES:
// - The only writer of GarmentCatalog, SelectionSet and VariationCache
// - Identity is content equality; no surrogate keys
// - Never fails: requests about unknown identities are no-ops
// - `swap` updates catalog and selection inside one `&mut self` call, so no
//   observer can see one updated without the other
// - Palette responses are applied only if their ticket is still current

use log::debug;

use crate::domain::{GarmentCatalog, Image, PaletteRequest, SelectionSet, VariationCache};

#[derive(Debug, Default)]
pub struct IdentitySyncStore {
    catalog: GarmentCatalog,
    selection: SelectionSet,
    variations: VariationCache,
}

impl IdentitySyncStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // MUTATION ENTRY POINTS
    // ========================================================================

    /// Append already-validated garments to the catalog
    pub fn upload(&mut self, images: impl IntoIterator<Item = Image>) -> usize {
        let added = self.catalog.append(images);
        debug!("Catalog grew by {} to {}", added, self.catalog.len());
        added
    }

    /// Add or remove `identity` from the selection.
    ///
    /// Identities missing from the catalog are ignored. Returns a palette
    /// request when the single selection moved to an identity the cache has
    /// not processed yet.
    pub fn toggle_select(&mut self, identity: &Image) -> Option<PaletteRequest> {
        if !self.catalog.contains(identity) {
            debug!("Ignoring toggle for unknown garment {}", identity.short_digest());
            return None;
        }

        let selected = self.selection.toggle(identity);
        debug!(
            "Garment {} {} ({} selected)",
            identity.short_digest(),
            if selected { "selected" } else { "deselected" },
            self.selection.len()
        );

        self.sync_variation_cache()
    }

    /// Replace every occurrence of `old` with `new` in catalog and selection.
    ///
    /// When `old` is the identity the cache tracks, `new` is adopted in its
    /// place: the swap means "the user accepted a variant", so the palette is
    /// kept and nothing is regenerated. Returns how many catalog entries
    /// changed; 0 means no-op.
    pub fn swap(&mut self, old: &Image, new: &Image) -> usize {
        if old == new || !self.catalog.contains(old) {
            return 0;
        }

        let replaced = self.catalog.replace_all(old, new);
        self.selection.replace_all(old, new);

        if self.variations.last_processed() == Some(old) {
            self.variations.adopt(new.clone());
        }

        debug!(
            "Swapped {} -> {} ({} catalog entries)",
            old.short_digest(),
            new.short_digest(),
            replaced
        );
        replaced
    }

    /// Store a palette computed for `request`.
    ///
    /// Returns false and drops the palette when the selection has moved on
    /// since the request was issued.
    pub fn apply_palette(&mut self, request: &PaletteRequest, palette: Vec<Image>) -> bool {
        let applied = self.variations.fill(request, palette);
        if !applied {
            debug!(
                "Discarding stale palette for {} (generation {}, current {})",
                request.garment.short_digest(),
                request.generation,
                self.variations.generation()
            );
        }
        applied
    }

    // ========================================================================
    // DERIVED VIEWS
    // ========================================================================

    /// The sole selected garment, if exactly one is selected
    pub fn single_selected(&self) -> Option<&Image> {
        self.selection.single()
    }

    /// Ticket for the identity currently tracked by the cache, e.g. to retry a
    /// palette that failed. None when nothing single is selected.
    pub fn palette_request_for_current(&self) -> Option<PaletteRequest> {
        self.single_selected()?;
        self.variations.current_request()
    }

    pub fn catalog(&self) -> &[Image] {
        self.catalog.items()
    }

    pub fn selection(&self) -> &[Image] {
        self.selection.items()
    }

    pub fn palette(&self) -> &[Image] {
        self.variations.palette()
    }

    pub fn last_processed(&self) -> Option<&Image> {
        self.variations.last_processed()
    }

    pub fn is_selected(&self, identity: &Image) -> bool {
        self.selection.contains(identity)
    }

    // ========================================================================
    // INTERNAL
    // ========================================================================

    fn sync_variation_cache(&mut self) -> Option<PaletteRequest> {
        match self.selection.single().cloned() {
            None => {
                self.variations.clear();
                None
            }
            Some(current) if self.variations.last_processed() == Some(&current) => None,
            Some(current) => Some(self.variations.restart(current)),
        }
    }
}
