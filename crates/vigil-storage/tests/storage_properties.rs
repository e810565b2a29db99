//! Property tests: batch insert/fetch consistency and atomicity.

use proptest::prelude::*;

use test_fixtures::{make_validated, make_validated_batch};
use vigil_core::traits::IRecommendationStorage;
use vigil_storage::StorageEngine;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn fetch_returns_exactly_what_was_inserted(n in 0usize..40) {
        let storage = StorageEngine::open_in_memory().unwrap();
        let analysis = storage.create_analysis("prop", None).unwrap();
        let batch = make_validated_batch(n);
        let ids = storage.insert_batch(analysis, &batch).unwrap();

        let rows = storage.fetch_by_analysis(analysis).unwrap();
        prop_assert_eq!(rows.len(), n);
        prop_assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
        for (row, input) in rows.iter().zip(&batch) {
            prop_assert_eq!(&row.external_id, &input.external_id);
        }
    }

    #[test]
    fn a_duplicate_anywhere_commits_nothing(n in 1usize..30, dup in 0usize..30) {
        let storage = StorageEngine::open_in_memory().unwrap();
        let analysis = storage.create_analysis("prop", None).unwrap();
        let mut batch = make_validated_batch(n);
        let at = dup % (n + 1);
        batch.insert(at, make_validated(dup % n));

        prop_assert!(storage.insert_batch(analysis, &batch).is_err());
        prop_assert_eq!(storage.count_by_analysis(analysis).unwrap(), 0);
    }
}
