// src/services/identity_sync_store_tests.rs
//
// Identity Sync Store Tests
//
// Covers selection membership, swap atomicity, cache invalidation and
// staleness of palette responses.

#[cfg(test)]
mod tests {
    use crate::domain::Image;
    use crate::services::IdentitySyncStore;

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn img(tag: u8) -> Image {
        Image::new("image/png", vec![tag; 16])
    }

    fn store_with(tags: &[u8]) -> IdentitySyncStore {
        let mut store = IdentitySyncStore::new();
        store.upload(tags.iter().map(|t| img(*t)));
        store
    }

    fn assert_selection_within_catalog(store: &IdentitySyncStore) {
        for selected in store.selection() {
            assert!(
                store.catalog().contains(selected),
                "selected garment {:?} missing from catalog",
                selected
            );
        }
    }

    // ========================================================================
    // SELECTION MEMBERSHIP
    // ========================================================================

    #[test]
    fn test_upload_appends_in_order() {
        let mut store = store_with(&[1, 2]);
        assert_eq!(store.upload(vec![img(3), img(1)]), 2);
        assert_eq!(store.catalog(), &[img(1), img(2), img(3), img(1)]);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut store = store_with(&[1, 2]);

        store.toggle_select(&img(1));
        store.toggle_select(&img(2));
        assert_eq!(store.selection(), &[img(1), img(2)]);

        store.toggle_select(&img(1));
        assert_eq!(store.selection(), &[img(2)]);
    }

    #[test]
    fn test_toggle_unknown_identity_is_noop() {
        let mut store = store_with(&[1]);

        assert!(store.toggle_select(&img(42)).is_none());
        assert!(store.selection().is_empty());
        assert!(store.last_processed().is_none());
    }

    #[test]
    fn test_duplicate_catalog_entries_select_as_one_unit() {
        let mut store = store_with(&[1, 1, 2]);

        store.toggle_select(&img(1));
        assert_eq!(store.selection(), &[img(1)]);

        store.toggle_select(&img(1));
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_selection_never_leaves_catalog() {
        let mut store = store_with(&[1, 2, 3, 4]);
        let candidates: Vec<Image> = (0..8u8).map(img).collect();

        // Deterministic pseudo-random walk over toggles and swaps
        let mut seed: u32 = 0x2545_f491;
        for step in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let a = &candidates[(seed >> 16) as usize % candidates.len()];
            if step % 7 == 0 {
                let b = &candidates[(seed >> 8) as usize % candidates.len()];
                store.swap(a, b);
            } else {
                store.toggle_select(a);
            }
            assert_selection_within_catalog(&store);
        }
    }

    // ========================================================================
    // SWAP
    // ========================================================================

    #[test]
    fn test_swap_updates_catalog_and_selection_together() {
        let mut store = store_with(&[1, 2, 1]);
        store.toggle_select(&img(1));
        store.toggle_select(&img(2));

        let replaced = store.swap(&img(1), &img(9));

        assert_eq!(replaced, 2);
        assert_eq!(store.catalog(), &[img(9), img(2), img(9)]);
        assert_eq!(store.selection(), &[img(9), img(2)]);
        assert_selection_within_catalog(&store);
    }

    #[test]
    fn test_swap_of_unselected_garment_leaves_selection() {
        let mut store = store_with(&[1, 2]);
        store.toggle_select(&img(2));

        store.swap(&img(1), &img(5));

        assert_eq!(store.catalog(), &[img(5), img(2)]);
        assert_eq!(store.selection(), &[img(2)]);
    }

    #[test]
    fn test_swap_unknown_identity_is_noop() {
        let mut store = store_with(&[1]);
        store.toggle_select(&img(1));

        assert_eq!(store.swap(&img(7), &img(8)), 0);
        assert_eq!(store.catalog(), &[img(1)]);
        assert_eq!(store.selection(), &[img(1)]);
    }

    #[test]
    fn test_swapped_variant_is_selectable_with_same_content() {
        let mut store = store_with(&[1]);
        let variant = Image::new("image/webp", vec![200u8, 201, 202]);

        store.swap(&img(1), &variant);
        store.toggle_select(&variant);

        let selected = store.single_selected().unwrap();
        assert_eq!(selected, &variant);
        assert_eq!(selected.data(), &[200, 201, 202]);
        assert_eq!(selected.media_type(), "image/webp");
    }

    // ========================================================================
    // VARIATION CACHE
    // ========================================================================

    #[test]
    fn test_single_selection_requests_palette() {
        let mut store = store_with(&[1, 2]);

        let request = store.toggle_select(&img(1)).expect("palette requested");
        assert_eq!(request.garment, img(1));
        assert_eq!(store.last_processed(), Some(&img(1)));
    }

    #[test]
    fn test_multi_and_empty_selection_do_not_request() {
        let mut store = store_with(&[1, 2]);

        store.toggle_select(&img(1));
        assert!(store.toggle_select(&img(2)).is_none());
        assert!(store.single_selected().is_none());
        assert!(store.last_processed().is_none());

        store.toggle_select(&img(1));
        // back to a single selection of 2: new request
        assert_eq!(store.single_selected(), Some(&img(2)));

        let mut empty = store_with(&[1]);
        empty.toggle_select(&img(1));
        assert!(empty.toggle_select(&img(1)).is_none());
        assert!(empty.palette().is_empty());
        assert!(empty.last_processed().is_none());
    }

    #[test]
    fn test_changing_single_selection_discards_previous_palette() {
        let mut store = store_with(&[1, 2]);

        let first = store.toggle_select(&img(1)).unwrap();
        assert!(store.apply_palette(&first, vec![img(10), img(11)]));
        assert_eq!(store.palette(), &[img(10), img(11)]);

        store.toggle_select(&img(1));
        let second = store.toggle_select(&img(2)).unwrap();

        assert!(store.palette().is_empty());
        assert_eq!(second.garment, img(2));
        assert!(second.generation > first.generation);
    }

    #[test]
    fn test_stale_palette_is_discarded() {
        let mut store = store_with(&[1, 2]);

        let stale = store.toggle_select(&img(1)).unwrap();
        store.toggle_select(&img(1));
        let current = store.toggle_select(&img(2)).unwrap();

        assert!(!store.apply_palette(&stale, vec![img(10)]));
        assert!(store.palette().is_empty());

        assert!(store.apply_palette(&current, vec![img(20)]));
        assert_eq!(store.palette(), &[img(20)]);
    }

    #[test]
    fn test_reselecting_same_garment_invalidates_older_request() {
        let mut store = store_with(&[1]);

        let older = store.toggle_select(&img(1)).unwrap();
        store.toggle_select(&img(1));
        let newer = store.toggle_select(&img(1)).unwrap();

        assert_eq!(older.garment, newer.garment);
        assert!(!store.apply_palette(&older, vec![img(10)]));
        assert!(store.apply_palette(&newer, vec![img(11)]));
    }

    #[test]
    fn test_swap_adopts_identity_without_regeneration() {
        let mut store = store_with(&[1, 2]);
        let request = store.toggle_select(&img(1)).unwrap();
        store.apply_palette(&request, vec![img(10), img(11)]);

        store.swap(&img(1), &img(10));

        assert_eq!(store.single_selected(), Some(&img(10)));
        assert_eq!(store.last_processed(), Some(&img(10)));
        assert_eq!(store.palette(), &[img(10), img(11)]);

        // A second garment makes the selection multi: cache cleared, no request
        assert!(store.toggle_select(&img(2)).is_none());
        assert!(store.palette().is_empty());
    }

    #[test]
    fn test_swap_during_palette_generation_keeps_ticket_valid() {
        let mut store = store_with(&[1]);
        let request = store.toggle_select(&img(1)).unwrap();

        store.swap(&img(1), &img(5));

        assert!(store.apply_palette(&request, vec![img(6)]));
        assert_eq!(store.palette(), &[img(6)]);
    }

    #[test]
    fn test_palette_request_for_current() {
        let mut store = store_with(&[1, 2]);
        assert!(store.palette_request_for_current().is_none());

        let issued = store.toggle_select(&img(1)).unwrap();
        assert_eq!(store.palette_request_for_current(), Some(issued));

        store.toggle_select(&img(2));
        assert!(store.palette_request_for_current().is_none());
    }
}
